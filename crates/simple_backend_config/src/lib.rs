#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod args;
pub mod file;

use std::{
    path::{Path, PathBuf},
    sync::atomic::AtomicBool,
};

use args::ServerModeArgs;
use error_stack::{Result, ResultExt};
use simple_backend_utils::ContextExt;

use self::file::{SimpleBackendConfigFile, SocketConfig, SqliteDatabase};

/// Config file debug mode status.
///
/// Parse the config file before reading this value.
pub static RUNNING_IN_DEBUG_MODE: GlobalDebugFlag = GlobalDebugFlag {
    debug: AtomicBool::new(false),
};

pub struct GlobalDebugFlag {
    debug: AtomicBool,
}

impl GlobalDebugFlag {
    pub fn value(&self) -> bool {
        self.debug.load(std::sync::atomic::Ordering::Relaxed)
    }
}

pub use self::file::ConfigFileError;

#[derive(thiserror::Error, Debug)]
pub enum GetConfigError {
    #[error("Get working directory error")]
    GetWorkingDir,
    #[error("File loading failed")]
    LoadFileError,
    #[error("Load config file")]
    LoadConfig,

    #[error("SQLite in RAM mode is not allowed when debug mode is off")]
    SqliteInRamNotAllowed,
    #[error("Invalid configuration")]
    InvalidConfiguration,
}

#[derive(Debug, Clone)]
pub struct SimpleBackendConfig {
    file: SimpleBackendConfigFile,

    /// Backend version with git commit ID and other info.
    backend_code_version: String,
    /// Semver version of the backend.
    backend_semver_version: String,

    // Server related configs
    data_dir: PathBuf,
    sqlite_in_ram: bool,
}

impl SimpleBackendConfig {
    /// Debug mode config using SQLite in RAM mode. Database name is
    /// configurable so that multiple shared cache in RAM databases can
    /// exist in the same process.
    pub fn in_ram_debug_config(database_name: impl Into<String>) -> Self {
        let mut file = SimpleBackendConfigFile::in_ram_debug_config();
        file.data.sqlite = vec![SqliteDatabase {
            name: database_name.into(),
        }];
        Self {
            data_dir: file.data.dir.clone(),
            file,
            backend_code_version: String::new(),
            backend_semver_version: String::new(),
            sqlite_in_ram: true,
        }
    }

    /// Directory where SQLite databases are stored.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The main database. Config loading checks that it exists.
    pub fn current_database(&self) -> Option<&SqliteDatabase> {
        self.file.data.sqlite.first()
    }

    pub fn socket(&self) -> &SocketConfig {
        &self.file.socket
    }

    pub fn sqlite_in_ram(&self) -> bool {
        self.sqlite_in_ram
    }

    /// Server should run in debug mode.
    ///
    /// Debug mode changes:
    /// * Swagger UI is enabled.
    /// * HTTP request tracing is enabled.
    /// * SQLite in RAM mode is allowed.
    /// * Atomic boolean `RUNNING_IN_DEBUG_MODE` is set to `true`.
    pub fn debug_mode(&self) -> bool {
        self.file.general.debug.unwrap_or(false)
    }

    pub fn backend_code_version(&self) -> &str {
        &self.backend_code_version
    }

    pub fn backend_semver_version(&self) -> &str {
        &self.backend_semver_version
    }

    pub fn log_timestamp(&self) -> bool {
        self.file.general.log_timestamp.unwrap_or(true)
    }

    pub fn parsed_file(&self) -> &SimpleBackendConfigFile {
        &self.file
    }
}

/// Read config file from current directory.
pub fn get_config(
    args_config: args::ServerModeArgs,
    backend_code_version: String,
    backend_semver_version: String,
    save_default_config_if_not_found: bool,
) -> Result<SimpleBackendConfig, GetConfigError> {
    let current_dir = std::env::current_dir().change_context(GetConfigError::GetWorkingDir)?;
    let file_config =
        file::SimpleBackendConfigFile::load(current_dir, save_default_config_if_not_found)
            .change_context(GetConfigError::LoadFileError)?;

    create_config(
        args_config,
        file_config,
        backend_code_version,
        backend_semver_version,
    )
}

fn create_config(
    args_config: ServerModeArgs,
    mut file_config: SimpleBackendConfigFile,
    backend_code_version: String,
    backend_semver_version: String,
) -> Result<SimpleBackendConfig, GetConfigError> {
    let data_dir = if let Some(dir) = args_config.data_dir {
        dir
    } else {
        file_config.data.dir.clone()
    };

    match file_config.data.sqlite.as_slice() {
        [db] if !db.name.trim().is_empty() => (),
        _ => {
            return Err(GetConfigError::InvalidConfiguration.report())
                .attach_printable("Exactly one SQLite database must be configured");
        }
    }

    let sqlite_in_ram = if args_config.sqlite_in_ram {
        if file_config.general.debug.unwrap_or_default() {
            true
        } else {
            return Err(GetConfigError::SqliteInRamNotAllowed)
                .attach_printable("SQLite in RAM mode is not allowed when debug mode is off");
        }
    } else {
        false
    };

    if let Some(addr) = args_config.public_api {
        file_config.socket.public_api = Some(addr);
    }

    let config = SimpleBackendConfig {
        file: file_config,
        data_dir,
        sqlite_in_ram,
        backend_code_version,
        backend_semver_version,
    };

    if config.debug_mode() {
        RUNNING_IN_DEBUG_MODE
            .debug
            .store(true, std::sync::atomic::Ordering::Relaxed);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_config(debug: bool) -> SimpleBackendConfigFile {
        let mut file: SimpleBackendConfigFile =
            toml::from_str(file::DEFAULT_CONFIG_FILE_TEXT).unwrap();
        file.general.debug = Some(debug);
        file
    }

    #[test]
    fn sqlite_in_ram_requires_debug_mode() {
        let args = ServerModeArgs {
            sqlite_in_ram: true,
            ..ServerModeArgs::default()
        };
        let result = create_config(args, file_config(false), String::new(), String::new());
        assert!(matches!(
            result.unwrap_err().current_context(),
            GetConfigError::SqliteInRamNotAllowed
        ));
    }

    #[test]
    fn arguments_override_file() {
        let args = ServerModeArgs {
            data_dir: Some(PathBuf::from("/tmp/other")),
            public_api: Some("127.0.0.1:4000".parse().unwrap()),
            sqlite_in_ram: false,
        };
        let config = create_config(args, file_config(true), String::new(), String::new()).unwrap();
        assert_eq!(config.data_dir(), Path::new("/tmp/other"));
        assert_eq!(
            config.socket().public_api,
            Some("127.0.0.1:4000".parse().unwrap())
        );
        assert!(config.debug_mode());
        assert_eq!(config.current_database().map(|v| v.name.as_str()), Some("current"));
    }

    #[test]
    fn missing_database_is_rejected() {
        let mut file = file_config(true);
        file.data.sqlite.clear();
        let result = create_config(ServerModeArgs::default(), file, String::new(), String::new());
        assert!(matches!(
            result.unwrap_err().current_context(),
            GetConfigError::InvalidConfiguration
        ));
    }
}
