#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod args;
pub mod file;

use std::{sync::Arc, time::Duration};

use args::{AppMode, ArgsConfig};
use error_stack::{Result, ResultExt};
use file::{
    ClassifierConfig, ConfigFile, GrantAdminAccessConfig, IdentityConfig, LifecycleConfig,
    RewardPolicyConfig,
};
use simple_backend_config::SimpleBackendConfig;
use simple_backend_utils::ContextExt;

#[derive(thiserror::Error, Debug)]
pub enum GetConfigError {
    #[error("Simple backend error")]
    SimpleBackendError,

    #[error("Get working directory error")]
    GetWorkingDir,
    #[error("File loading failed")]
    LoadFileError,

    #[error("Invalid configuration")]
    InvalidConfiguration,
}

#[derive(Debug, Clone)]
pub struct Config {
    file: ConfigFile,
    simple_backend_config: Arc<SimpleBackendConfig>,

    // Other configs
    mode: Option<AppMode>,
}

impl Config {
    /// Validates the config file values.
    pub fn new(
        file: ConfigFile,
        simple_backend_config: Arc<SimpleBackendConfig>,
    ) -> Result<Self, GetConfigError> {
        validate(&file)?;
        Ok(Self {
            file,
            simple_backend_config,
            mode: None,
        })
    }

    pub fn minimal_config_for_api_doc_json(
        simple_backend_config: Arc<SimpleBackendConfig>,
    ) -> Self {
        Self {
            file: ConfigFile::minimal_config_for_api_doc_json(),
            simple_backend_config,
            mode: None,
        }
    }

    /// Server should run in debug mode.
    ///
    /// Check also [SimpleBackendConfig::debug_mode].
    pub fn debug_mode(&self) -> bool {
        self.simple_backend_config.debug_mode()
    }

    /// Server binary was launched in a special mode instead of the server mode.
    ///
    /// If None then the mode is the server mode.
    pub fn current_mode(&self) -> Option<AppMode> {
        self.mode.clone()
    }

    pub fn grant_admin_access_config(&self) -> Option<&GrantAdminAccessConfig> {
        self.file.grant_admin_access.as_ref()
    }

    pub fn reward_policy(&self) -> &RewardPolicyConfig {
        &self.file.reward_policy
    }

    pub fn verification_confidence_threshold(&self) -> f64 {
        self.file.verification.confidence_threshold
    }

    pub fn verification_timeout(&self) -> Duration {
        Duration::from_secs(self.file.verification.timeout_seconds)
    }

    pub fn classifier(&self) -> Option<&ClassifierConfig> {
        self.file.classifier.as_ref()
    }

    pub fn lifecycle(&self) -> &LifecycleConfig {
        &self.file.lifecycle
    }

    pub fn identity(&self) -> &IdentityConfig {
        &self.file.identity
    }

    pub fn simple_backend(&self) -> &SimpleBackendConfig {
        &self.simple_backend_config
    }

    pub fn simple_backend_arc(&self) -> Arc<SimpleBackendConfig> {
        self.simple_backend_config.clone()
    }

    pub fn parsed_file(&self) -> &ConfigFile {
        &self.file
    }
}

fn validate(file: &ConfigFile) -> Result<(), GetConfigError> {
    let threshold = file.verification.confidence_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(GetConfigError::InvalidConfiguration.report())
            .attach_printable("verification.confidence_threshold must be in range [0, 1]");
    }

    if file.verification.timeout_seconds == 0 {
        return Err(GetConfigError::InvalidConfiguration.report())
            .attach_printable("verification.timeout_seconds must be greater than zero");
    }

    if file.reward_policy.report_points < 0 || file.reward_policy.collect_points < 0 {
        return Err(GetConfigError::InvalidConfiguration.report())
            .attach_printable("Reward points must not be negative");
    }

    if file.identity.email_header.trim().is_empty() || file.identity.name_header.trim().is_empty()
    {
        return Err(GetConfigError::InvalidConfiguration.report())
            .attach_printable("Identity header names must not be empty");
    }

    Ok(())
}

pub fn get_config(
    args_config: ArgsConfig,
    backend_code_version: String,
    backend_semver_version: String,
    save_default_config_if_not_found: bool,
) -> Result<Config, GetConfigError> {
    let simple_backend_config = simple_backend_config::get_config(
        args_config.server,
        backend_code_version,
        backend_semver_version,
        save_default_config_if_not_found,
    )
    .change_context(GetConfigError::SimpleBackendError)?;

    let current_dir = std::env::current_dir().change_context(GetConfigError::GetWorkingDir)?;
    let file_config = file::ConfigFile::load(&current_dir, save_default_config_if_not_found)
        .change_context(GetConfigError::LoadFileError)?;

    let mut config = Config::new(file_config, simple_backend_config.into())?;
    config.mode = args_config.mode;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple() -> Arc<SimpleBackendConfig> {
        SimpleBackendConfig::in_ram_debug_config("config_test").into()
    }

    #[test]
    fn default_file_is_valid() {
        let config = Config::new(ConfigFile::default(), simple()).unwrap();
        assert_eq!(config.verification_timeout(), Duration::from_secs(30));
        assert_eq!(config.verification_confidence_threshold(), 0.70);
        assert!(config.debug_mode());
    }

    #[test]
    fn threshold_outside_range_is_rejected() {
        let mut file = ConfigFile::default();
        file.verification.confidence_threshold = 1.5;
        let result = Config::new(file, simple());
        assert!(matches!(
            result.unwrap_err().current_context(),
            GetConfigError::InvalidConfiguration
        ));
    }

    #[test]
    fn negative_points_are_rejected() {
        let mut file = ConfigFile::default();
        file.reward_policy.collect_points = -1;
        assert!(Config::new(file, simple()).is_err());
    }
}
