#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! SQLite connection pools.

pub mod data;
pub mod diesel_db;

// Only links the bundled SQLite library
use libsqlite3_sys as _;

use diesel_db::{DieselReadHandle, DieselWriteHandle, PoolCloseHandle};
use diesel_migrations::EmbeddedMigrations;
use error_stack::{Result, ResultExt};
use simple_backend_config::{SimpleBackendConfig, file::SqliteDatabase};

#[derive(thiserror::Error, Debug)]
pub enum SimpleDatabaseError {
    #[error("Diesel error")]
    Diesel,
    #[error("File path creation failed")]
    FilePathCreationFailed,
}

pub struct DatabaseHandleCreator;

impl DatabaseHandleCreator {
    /// Open the write pool and run migrations. Create this before
    /// the read pool.
    pub async fn create_write_handle_from_config(
        config: &SimpleBackendConfig,
        database: &SqliteDatabase,
        migrations: EmbeddedMigrations,
    ) -> Result<(DieselWriteHandle, PoolCloseHandle), SimpleDatabaseError> {
        let file = data::create_dirs_and_get_sqlite_database_file_path(config, database)?;
        DieselWriteHandle::new(config, database, &file, migrations)
            .await
            .change_context(SimpleDatabaseError::Diesel)
    }

    pub async fn create_read_handle_from_config(
        config: &SimpleBackendConfig,
        database: &SqliteDatabase,
    ) -> Result<(DieselReadHandle, PoolCloseHandle), SimpleDatabaseError> {
        let file = data::create_dirs_and_get_sqlite_database_file_path(config, database)?;
        DieselReadHandle::new(config, database, &file)
            .await
            .change_context(SimpleDatabaseError::Diesel)
    }
}

#[cfg(test)]
mod tests {
    use diesel::{RunQueryDsl, sql_query};

    use super::*;
    use crate::diesel_db::ObjectExtensions;

    const NO_MIGRATIONS: EmbeddedMigrations = EmbeddedMigrations::new(&[]);

    fn config(name: &str) -> (SimpleBackendConfig, SqliteDatabase) {
        let config = SimpleBackendConfig::in_ram_debug_config(name);
        let database = config.current_database().cloned().unwrap();
        (config, database)
    }

    #[tokio::test]
    async fn in_ram_pools_share_data() {
        let (config, database) = config("simple_backend_database_shared");
        let (write, write_close) = DatabaseHandleCreator::create_write_handle_from_config(
            &config,
            &database,
            NO_MIGRATIONS,
        )
        .await
        .unwrap();
        let (read, read_close) =
            DatabaseHandleCreator::create_read_handle_from_config(&config, &database)
                .await
                .unwrap();

        write
            .pool()
            .get()
            .await
            .unwrap()
            .interact(|conn| {
                sql_query("CREATE TABLE item (id INTEGER PRIMARY KEY)").execute(conn)?;
                sql_query("INSERT INTO item (id) VALUES (7)").execute(conn)
            })
            .await
            .unwrap()
            .unwrap();

        let count = read
            .pool()
            .get()
            .await
            .unwrap()
            .interact(|conn| sql_query("DELETE FROM item WHERE id = 7").execute(conn))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(count, 1);

        assert!(!write.sqlite_version().await.unwrap().is_empty());

        read_close.close().await;
        write_close.close().await;
    }
}
