use std::path::Path;

use error_stack::{Result, ResultExt};
use serde::{Deserialize, Serialize};
use simple_backend_config::file::ConfigFileUtils;
use url::Url;

pub const CONFIG_FILE_NAME: &str = "server_config.toml";

pub const DEFAULT_CONFIG_FILE_TEXT: &str = r#"

# [grant_admin_access]
# email = "admin@example.com"

[reward_policy]
report_points = 10
collect_points = 30
# Options: "fixed", "legacy_random"
collect_mode = "fixed"

[verification]
confidence_threshold = 0.70
timeout_seconds = 30

# Without classifier config submission classification and collection
# verification are unavailable.
# [classifier]
# openai_api_url = "https://api.openai.com/v1"
# api_key = "your-api-key"
# model = "gpt-4o-mini"
# max_tokens = 300

[lifecycle]
allow_reopen_rejected = false

[identity]
email_header = "x-user-email"
name_header = "x-user-name"

"#;

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("Simple backend error")]
    SimpleBackendError,

    #[error("Load config file")]
    LoadConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConfigFile {
    pub grant_admin_access: Option<GrantAdminAccessConfig>,
    #[serde(default)]
    pub reward_policy: RewardPolicyConfig,
    #[serde(default)]
    pub verification: VerificationConfig,
    pub classifier: Option<ClassifierConfig>,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

impl ConfigFile {
    pub fn minimal_config_for_api_doc_json() -> Self {
        Self::default()
    }

    pub fn load(
        dir: impl AsRef<Path>,
        save_default_config_if_not_found: bool,
    ) -> Result<ConfigFile, ConfigFileError> {
        let config_string = ConfigFileUtils::load_string(
            dir,
            CONFIG_FILE_NAME,
            DEFAULT_CONFIG_FILE_TEXT,
            save_default_config_if_not_found,
        )
        .change_context(ConfigFileError::SimpleBackendError)?;
        toml::from_str(&config_string).change_context(ConfigFileError::LoadConfig)
    }
}

/// The user with this email gets the admin role when the user account
/// is created.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrantAdminAccessConfig {
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CollectRewardMode {
    #[default]
    Fixed,
    /// Collection reward is drawn from range [10, 59].
    LegacyRandom,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RewardPolicyConfig {
    pub report_points: i64,
    pub collect_points: i64,
    pub collect_mode: CollectRewardMode,
}

impl Default for RewardPolicyConfig {
    fn default() -> Self {
        Self {
            report_points: 10,
            collect_points: 30,
            collect_mode: CollectRewardMode::Fixed,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Classifier confidence must be greater than this.
    pub confidence_threshold: f64,
    pub timeout_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.70,
            timeout_seconds: 30,
        }
    }
}

/// OpenAI compatible chat completions API with image input support.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClassifierConfig {
    pub openai_api_url: Url,
    pub api_key: String,
    pub model: String,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Allow admins to move rejected reports back to pending state.
    pub allow_reopen_rejected: bool,
}

/// Request headers which the reverse proxy or auth gateway sets.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub email_header: String,
    pub name_header: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            email_header: "x-user-email".to_string(),
            name_header: "x-user-name".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_file_parses() {
        let file: ConfigFile = toml::from_str(DEFAULT_CONFIG_FILE_TEXT).unwrap();
        assert_eq!(file.reward_policy.report_points, 10);
        assert_eq!(file.reward_policy.collect_points, 30);
        assert_eq!(file.reward_policy.collect_mode, CollectRewardMode::Fixed);
        assert_eq!(file.verification.confidence_threshold, 0.70);
        assert_eq!(file.verification.timeout_seconds, 30);
        assert!(file.classifier.is_none());
        assert!(!file.lifecycle.allow_reopen_rejected);
        assert_eq!(file.identity.email_header, "x-user-email");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let file: ConfigFile = toml::from_str(
            r#"
            [reward_policy]
            collect_mode = "legacy_random"

            [classifier]
            openai_api_url = "http://127.0.0.1:8080/v1"
            api_key = "key"
            model = "test"
            "#,
        )
        .unwrap();
        assert_eq!(file.reward_policy.report_points, 10);
        assert_eq!(
            file.reward_policy.collect_mode,
            CollectRewardMode::LegacyRandom
        );
        assert_eq!(file.identity.name_header, "x-user-name");
        assert_eq!(file.classifier.and_then(|v| v.max_tokens), None);
    }
}
