//! Application state which route handlers use.

use std::sync::Arc;

use axum::http::HeaderMap;
use config::{Config, file::IdentityConfig};
use model::Identity;
use server_api::app::{
    GetConfig, IdentityProvider, ReadData, StateBase, WriteData,
};
use server_common::{data::DataError, result::WrappedResultExt};
use server_data::{db_manager::RouterDatabaseReadHandle, write::WriteCmds};
use simple_backend::app::{GetSimpleBackendConfig, SimpleBackendAppState};
use simple_backend_config::SimpleBackendConfig;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInternal>,
}

struct AppStateInternal {
    config: Arc<Config>,
    database: RouterDatabaseReadHandle,
    write: WriteCmds,
    simple_state: SimpleBackendAppState,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        database: RouterDatabaseReadHandle,
        write: WriteCmds,
        simple_state: SimpleBackendAppState,
    ) -> Self {
        Self {
            state: Arc::new(AppStateInternal {
                config,
                database,
                write,
                simple_state,
            }),
        }
    }
}

impl StateBase for AppState {}

impl GetConfig for AppState {
    fn config(&self) -> &Config {
        &self.state.config
    }
}

impl GetSimpleBackendConfig for AppState {
    fn simple_backend_config(&self) -> &SimpleBackendConfig {
        self.state.simple_state.simple_backend_config()
    }
}

impl ReadData for AppState {
    fn read(&self) -> &RouterDatabaseReadHandle {
        &self.state.database
    }
}

impl WriteData for AppState {
    async fn write<
        CmdResult: Send + 'static,
        Cmd: Future<Output = server_common::result::Result<CmdResult, DataError>> + Send + 'static,
        GetCmd: FnOnce(WriteCmds) -> Cmd + Send + 'static,
    >(
        &self,
        cmd: GetCmd,
    ) -> server_common::result::Result<CmdResult, DataError> {
        // Separate task keeps the write running if the client
        // disconnects.
        let cmds = self.state.write.clone();
        tokio::spawn(cmd(cmds))
            .await
            .change_context(DataError::CommandRunnerQuit)?
    }
}

impl IdentityProvider for AppState {
    fn identity(&self, headers: &HeaderMap) -> Option<Identity> {
        HeaderIdentityProvider::new(self.state.config.identity()).identity(headers)
    }
}

/// Reads the identity from headers which the authenticating reverse
/// proxy sets.
pub struct HeaderIdentityProvider<'a> {
    config: &'a IdentityConfig,
}

impl<'a> HeaderIdentityProvider<'a> {
    pub fn new(config: &'a IdentityConfig) -> Self {
        Self { config }
    }

    fn header_value(&self, headers: &HeaderMap, name: &str) -> Option<String> {
        let value = headers.get(name)?.to_str().ok()?.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl IdentityProvider for HeaderIdentityProvider<'_> {
    fn identity(&self, headers: &HeaderMap) -> Option<Identity> {
        let email = self.header_value(headers, &self.config.email_header)?;
        let name = self.header_value(headers, &self.config.name_header);
        Some(Identity { email, name })
    }
}
