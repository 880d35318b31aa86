use std::{fs, path::PathBuf};

use error_stack::{Result, ResultExt};
use simple_backend_config::{SimpleBackendConfig, file::SqliteDatabase};

use crate::SimpleDatabaseError;

pub const SQLITE_DIR_NAME: &str = "sqlite";

/// Creates data and SQLite directories if needed. SQLite in RAM mode
/// does not touch the file system.
pub fn create_dirs_and_get_sqlite_database_file_path(
    config: &SimpleBackendConfig,
    database_info: &SqliteDatabase,
) -> Result<PathBuf, SimpleDatabaseError> {
    let root = config.data_dir().to_path_buf();
    let sqlite = root.join(SQLITE_DIR_NAME);
    let db_file = sqlite.join(format!("{}.db", database_info.name));

    if config.sqlite_in_ram() {
        return Ok(db_file);
    }

    if !root.exists() {
        fs::create_dir(&root).change_context(SimpleDatabaseError::FilePathCreationFailed)?;
    }

    if !sqlite.exists() {
        fs::create_dir(&sqlite).change_context(SimpleDatabaseError::FilePathCreationFailed)?;
    }

    Ok(db_file)
}
