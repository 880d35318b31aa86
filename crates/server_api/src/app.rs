use axum::http::HeaderMap;
use model::Identity;
pub use server_data::app::*;

/// Resolves the caller identity of a request. Authentication happens
/// before requests reach this server.
pub trait IdentityProvider {
    fn identity(&self, headers: &HeaderMap) -> Option<Identity>;
}

pub trait StateBase: Send + Sync + Clone + 'static {}

/// Everything which route handlers need from the state.
pub trait ApiState: StateBase + ReadData + WriteData + GetConfig + IdentityProvider {}

impl<T: StateBase + ReadData + WriteData + GetConfig + IdentityProvider> ApiState for T {}
