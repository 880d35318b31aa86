//! Routes which require admin role. The role is checked in the data
//! layer.

use axum::{
    Extension,
    extract::{Path, State},
};
use model::{NewReward, Report, ReportId, Reward, UpdateVendorStatus, User, Vendor, VendorId, VendorList};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router, db_write,
    utils::{ApiError, Json},
};

const PATH_GET_ALL_VENDORS: &str = "/api/v1/admin/vendors";

#[utoipa::path(
    get,
    path = PATH_GET_ALL_VENDORS,
    responses(
        (status = 200, description = "Success.", body = VendorList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Admin role is required."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_all_vendors<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<VendorList>, ApiError> {
    let r = state.read().vendor().list_vendors(&user).await?;
    Ok(r.into())
}

const PATH_POST_VENDOR_STATUS: &str = "/api/v1/admin/vendor/{id}/status";

#[utoipa::path(
    post,
    path = PATH_POST_VENDOR_STATUS,
    params(("id" = i64, Path, description = "Vendor ID")),
    request_body = UpdateVendorStatus,
    responses(
        (status = 200, description = "Success.", body = Vendor),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Admin role is required."),
        (status = 404, description = "Vendor not found."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_vendor_status<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(info): Json<UpdateVendorStatus>,
) -> Result<Json<Vendor>, ApiError> {
    let r = db_write!(state, move |cmds| cmds.vendor().update_status(
        &user,
        VendorId::new(id),
        info.status
    ))?;
    Ok(r.into())
}

const PATH_POST_REWARD: &str = "/api/v1/admin/reward";

#[utoipa::path(
    post,
    path = PATH_POST_REWARD,
    request_body = NewReward,
    responses(
        (status = 200, description = "Success.", body = Reward),
        (status = 400, description = "Invalid reward."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Admin role is required."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_reward<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Json(info): Json<NewReward>,
) -> Result<Json<Reward>, ApiError> {
    let r = db_write!(state, move |cmds| cmds.ledger().create_reward(&user, info))?;
    Ok(r.into())
}

const PATH_POST_REOPEN_REPORT: &str = "/api/v1/admin/report/{id}/reopen";

/// Move a rejected report back to pending state if the server config
/// allows it.
#[utoipa::path(
    post,
    path = PATH_POST_REOPEN_REPORT,
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Success.", body = Report),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Admin role is required or the feature is disabled."),
        (status = 404, description = "Report not found."),
        (status = 409, description = "Report is not rejected or it has an active assignment."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_reopen_report<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<Json<Report>, ApiError> {
    let r = db_write!(state, move |cmds| cmds
        .report()
        .reopen_rejected(&user, ReportId::new(id)))?;
    Ok(r.into())
}

pub fn router_admin<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(
        S,
        get_all_vendors,
        post_vendor_status,
        post_reward,
        post_reopen_report,
    )
}
