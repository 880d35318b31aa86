use std::{fmt::Debug, sync::Arc};

use classifier::WasteClassifier;
use config::Config;
use database::{
    CurrentReadHandle, CurrentWriteHandle, DbReaderRaw, DbWriter, DieselDatabaseError,
    current::{read::CurrentReadCommands, write::CurrentWriteCommands},
};
use server_common::{
    data::{DataError, IntoDataError},
    result::{Result, WrappedContextExt},
};
use simple_backend_database::{DatabaseHandleCreator, diesel_db::PoolCloseHandle};
use tracing::info;

use crate::reward_policy::RewardPolicy;

/// Handle SQLite database.
pub struct DatabaseManager {
    current_read_close: PoolCloseHandle,
    current_write_close: PoolCloseHandle,
}

impl DatabaseManager {
    pub async fn new(
        config: Arc<Config>,
        classifier: Arc<dyn WasteClassifier>,
        reward_policy: Arc<dyn RewardPolicy>,
    ) -> Result<(Self, RouterDatabaseReadHandle, RouterDatabaseWriteHandle), DataError> {
        info!("Creating DatabaseManager");

        let database = config
            .simple_backend()
            .current_database()
            .ok_or(DataError::Init.report())?;

        // Write handle runs the migrations so it must be created first.
        let (current_write, current_write_close) =
            DatabaseHandleCreator::create_write_handle_from_config(
                config.simple_backend(),
                database,
                database::DIESEL_MIGRATIONS,
            )
            .await
            .into_error()?;

        let diesel_sqlite = current_write.sqlite_version().await.into_error()?;
        info!("Diesel SQLite version: {}", diesel_sqlite);

        let (current_read, current_read_close) =
            DatabaseHandleCreator::create_read_handle_from_config(config.simple_backend(), database)
                .await
                .into_error()?;

        let current_write_handle = CurrentWriteHandle(current_write);

        let router_write_handle = RouterDatabaseWriteHandle {
            config: config.clone(),
            current_read_handle: current_write_handle.to_read_handle(),
            current_write_handle,
            classifier,
            reward_policy,
        };

        let router_read_handle = RouterDatabaseReadHandle {
            config,
            current_read_handle: CurrentReadHandle(current_read),
        };

        let database_manager = DatabaseManager {
            current_read_close,
            current_write_close,
        };

        info!("DatabaseManager created");

        Ok((database_manager, router_read_handle, router_write_handle))
    }

    pub async fn close(self) {
        self.current_read_close.close().await;
        self.current_write_close.close().await;
    }
}

#[derive(Clone)]
pub struct RouterDatabaseWriteHandle {
    config: Arc<Config>,
    current_write_handle: CurrentWriteHandle,
    /// This is actually the write handle
    current_read_handle: CurrentReadHandle,
    classifier: Arc<dyn WasteClassifier>,
    reward_policy: Arc<dyn RewardPolicy>,
}

impl Debug for RouterDatabaseWriteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterDatabaseWriteHandle").finish()
    }
}

impl RouterDatabaseWriteHandle {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn classifier(&self) -> &dyn WasteClassifier {
        self.classifier.as_ref()
    }

    pub fn reward_policy(&self) -> &dyn RewardPolicy {
        self.reward_policy.as_ref()
    }

    /// Run commands in a single transaction. Returning an error rolls
    /// back all writes.
    pub async fn db_transaction<
        T: FnOnce(CurrentWriteCommands<'_>) -> Result<R, DataError> + Send + 'static,
        R: Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> Result<R, DataError> {
        DbWriter::new(&self.current_write_handle)
            .db_transaction(move |conn| cmd(CurrentWriteCommands::new(conn)))
            .await?
    }

    /// Read using the write connection. Results include writes
    /// which happened just before.
    pub async fn db_read<
        T: FnOnce(CurrentReadCommands<'_>) -> error_stack::Result<R, DieselDatabaseError>
            + Send
            + 'static,
        R: Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> error_stack::Result<R, DieselDatabaseError> {
        DbReaderRaw::new(&self.current_read_handle)
            .db_read(move |conn| cmd(CurrentReadCommands::new(conn)))
            .await
    }
}

#[derive(Clone)]
pub struct RouterDatabaseReadHandle {
    config: Arc<Config>,
    current_read_handle: CurrentReadHandle,
}

impl Debug for RouterDatabaseReadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterDatabaseReadHandle").finish()
    }
}

impl RouterDatabaseReadHandle {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn db_read<
        T: FnOnce(CurrentReadCommands<'_>) -> error_stack::Result<R, DieselDatabaseError>
            + Send
            + 'static,
        R: Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> error_stack::Result<R, DieselDatabaseError> {
        DbReaderRaw::new(&self.current_read_handle)
            .db_read(move |conn| cmd(CurrentReadCommands::new(conn)))
            .await
    }
}
