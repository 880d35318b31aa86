#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

pub mod api_doc;
pub mod state;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use api_doc::ApiDoc;
use async_trait::async_trait;
use axum::{Router, middleware};
use classifier::{DisabledClassifier, OpenAiClassifier, WasteClassifier};
use config::Config;
use error_stack::Result;
use server_api::{create_api_router, utils::resolve_identity};
use server_data::{
    db_manager::DatabaseManager, reward_policy::reward_policy_from_config, write::WriteCmds,
};
use simple_backend::{BusinessLogic, SimpleBackendError, app::SimpleBackendAppState};
use state::AppState;
use tracing::{error, info, warn};
use utoipa_swagger_ui::SwaggerUi;

pub struct SmartCleaningServer {
    config: Arc<Config>,
}

impl SmartCleaningServer {
    pub fn new(config: Config) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub async fn run(self) -> Result<(), SimpleBackendError> {
        let logic = SmartCleaningBusinessLogic {
            config: self.config.clone(),
            database_manager: None,
        };
        let server = simple_backend::SimpleBackend::new(logic, self.config.simple_backend_arc());
        server.run().await
    }
}

/// Public API router with the identity middleware.
pub fn create_router(state: AppState) -> Router {
    let (router, _) = create_api_router::<AppState>().split_for_parts();
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity::<AppState>,
        ))
        .with_state(state)
}

/// Classifier from config. Verification is unavailable without
/// the classifier config section.
pub fn create_classifier(config: &Config) -> Arc<dyn WasteClassifier> {
    match config.classifier() {
        Some(classifier_config) => {
            info!("Classifier model: {}", classifier_config.model);
            Arc::new(OpenAiClassifier::new(classifier_config.clone()))
        }
        None => {
            warn!("Classifier is not configured. Waste verification is unavailable.");
            Arc::new(DisabledClassifier)
        }
    }
}

pub struct SmartCleaningBusinessLogic {
    config: Arc<Config>,
    database_manager: Option<DatabaseManager>,
}

#[async_trait]
impl BusinessLogic for SmartCleaningBusinessLogic {
    type AppState = AppState;

    fn public_api_router(&self, state: &Self::AppState) -> Router {
        create_router(state.clone())
    }

    fn create_swagger_ui(&self, _state: &Self::AppState) -> Option<SwaggerUi> {
        Some(SwaggerUi::new("/swagger-ui").url("/api-doc/app_api.json", ApiDoc::all()))
    }

    async fn on_before_server_start(
        &mut self,
        simple_state: SimpleBackendAppState,
    ) -> Result<Self::AppState, SimpleBackendError> {
        let classifier = create_classifier(&self.config);
        let reward_policy = reward_policy_from_config(self.config.reward_policy());

        let (database_manager, read_handle, write_handle) =
            DatabaseManager::new(self.config.clone(), classifier, reward_policy)
                .await
                .map_err(|e| {
                    e.into_report()
                        .change_context(SimpleBackendError::LogicStartup)
                })?;

        let state = AppState::new(
            self.config.clone(),
            read_handle,
            WriteCmds::new(write_handle),
            simple_state,
        );

        self.database_manager = Some(database_manager);
        Ok(state)
    }

    async fn on_after_server_quit(self) {
        match self.database_manager {
            Some(database_manager) => database_manager.close().await,
            None => error!("Database manager was not initialized"),
        }
    }
}
