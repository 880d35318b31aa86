use std::{
    io::Write,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use error_stack::{Report, Result, ResultExt};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "simple_backend_config.toml";

// Optional configs not in default file for safety:
// debug = false
//

pub const DEFAULT_CONFIG_FILE_TEXT: &str = r#"

# [general]
# log_timestamp = true

[socket]
public_api = "127.0.0.1:3000"

[data]
dir = "data"

[[data.sqlite]]
name = "current"

"#;

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("Save config file failed")]
    Save,
    #[error("Save default")]
    SaveDefault,
    #[error("Not a directory")]
    NotDirectory,
    #[error("Load config file")]
    LoadConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimpleBackendConfigFile {
    #[serde(default)]
    pub general: GeneralConfig,

    pub data: DataConfig,
    pub socket: SocketConfig,
}

impl SimpleBackendConfigFile {
    pub fn minimal_config_for_api_doc_json() -> Self {
        Self {
            general: GeneralConfig::default(),
            data: DataConfig {
                dir: PathBuf::new(),
                sqlite: vec![],
            },
            socket: SocketConfig { public_api: None },
        }
    }

    /// Config for tests and tools which use SQLite in RAM mode.
    pub fn in_ram_debug_config() -> Self {
        Self {
            general: GeneralConfig {
                debug: Some(true),
                log_timestamp: None,
            },
            data: DataConfig {
                dir: PathBuf::from("data"),
                sqlite: vec![SqliteDatabase {
                    name: "current".to_string(),
                }],
            },
            socket: SocketConfig { public_api: None },
        }
    }

    pub fn load(
        dir: impl AsRef<Path>,
        save_default_config_if_not_found: bool,
    ) -> Result<SimpleBackendConfigFile, ConfigFileError> {
        let config_string = ConfigFileUtils::load_string(
            dir,
            CONFIG_FILE_NAME,
            DEFAULT_CONFIG_FILE_TEXT,
            save_default_config_if_not_found,
        )?;
        toml::from_str(&config_string).change_context(ConfigFileError::LoadConfig)
    }
}

pub struct ConfigFileUtils;

impl ConfigFileUtils {
    pub fn save_string(file_path: impl AsRef<Path>, text: &str) -> Result<(), ConfigFileError> {
        let mut file = std::fs::File::create(file_path).change_context(ConfigFileError::Save)?;
        file.write_all(text.as_bytes())
            .change_context(ConfigFileError::Save)?;
        Ok(())
    }

    pub fn join_dir_path_and_file_name(
        dir: impl AsRef<Path>,
        file_name: &str,
    ) -> Result<PathBuf, ConfigFileError> {
        if !dir.as_ref().is_dir() {
            return Err(Report::new(ConfigFileError::NotDirectory));
        }
        let mut file_path = dir.as_ref().to_path_buf();
        file_path.push(file_name);
        Ok(file_path)
    }

    pub fn load_string(
        dir: impl AsRef<Path>,
        file_name: &str,
        default: &str,
        save_default_config_if_not_found: bool,
    ) -> Result<String, ConfigFileError> {
        let file_path = Self::join_dir_path_and_file_name(&dir, file_name)
            .change_context(ConfigFileError::LoadConfig)?;
        if !file_path.exists() {
            if save_default_config_if_not_found {
                Self::save_string(&file_path, default)
                    .change_context(ConfigFileError::SaveDefault)?;
            } else {
                return Ok(default.to_string());
            }
        }

        std::fs::read_to_string(&file_path).change_context(ConfigFileError::LoadConfig)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub debug: Option<bool>,
    /// Write timestamp to log messages. Enabled by default.
    pub log_timestamp: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Data directory for SQLite databases.
    pub dir: PathBuf,
    pub sqlite: Vec<SqliteDatabase>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteDatabase {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SocketConfig {
    pub public_api: Option<SocketAddr>,
}
