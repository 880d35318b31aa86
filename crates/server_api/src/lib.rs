#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! HTTP API types and request handlers.

use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use self::{app::ApiState, utils::SecurityIdentityHeaderDefault};

pub mod admin;
pub mod collection;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod user;
pub mod vendor;

pub mod app;
pub mod utils;

pub use server_common::{data::DataError, result};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "smart-cleaning-backend",
        description = "Smart Cleaning Management System API",
    ),
    modifiers(&SecurityIdentityHeaderDefault),
)]
pub struct ApiDoc;

/// All routes which require the request identity.
pub fn create_api_router<S: ApiState>() -> OpenApiRouter<S> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(user::router_user::<S>())
        .merge(report::router_report::<S>())
        .merge(collection::router_collection::<S>())
        .merge(vendor::router_vendor::<S>())
        .merge(ledger::router_ledger::<S>())
        .merge(notification::router_notification::<S>())
        .merge(admin::router_admin::<S>())
}

/// Runs write commands in a separate task and converts the result to
/// an API result.
///
/// The commands complete even if the client disconnects before the
/// response is ready.
///
/// ```ignore
/// let report = db_write!(state, move |cmds| cmds.report().submit(id, info))?;
/// ```
#[macro_export]
macro_rules! db_write {
    ($state:expr, move |$cmds:ident| $commands:expr) => {{
        use $crate::utils::ConvertDataErrorToApiError;
        let result: $crate::result::Result<_, $crate::DataError> = $state
            .write(move |$cmds| async move { ($commands).await })
            .await;
        result.convert_data_error_to_api_error()
    }};
}

/// Builds a router from handler functions which are generic over the
/// state type. Each handler must have a `utoipa::path` attribute.
#[macro_export]
macro_rules! create_open_api_router {
    (
        $state_type:ty,
        $(
            $path:ident,
        )*
    ) => {
        {
            let router = utoipa_axum::router::OpenApiRouter::new();
            $(
                let $path = $path::<$state_type>;
                let router = router.routes(utoipa_axum::routes!($path));
            )*
            router
        }
    };
}
