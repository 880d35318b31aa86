use axum::{
    Extension,
    extract::{Path, State},
};
use model::{
    CollectedWasteList, Report, ReportId, ReportList, SubmitVerification, User,
    VerificationOutcome,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router, db_write,
    utils::{ApiError, Json},
};

const PATH_GET_COLLECTION_TASKS: &str = "/api/v1/collection/tasks";

/// Newest reports in all states.
#[utoipa::path(
    get,
    path = PATH_GET_COLLECTION_TASKS,
    responses(
        (status = 200, description = "Success.", body = ReportList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_collection_tasks<S: ApiState>(
    State(state): State<S>,
) -> Result<Json<ReportList>, ApiError> {
    let r = state.read().report().collection_tasks().await?;
    Ok(r.into())
}

const PATH_POST_BEGIN_COLLECTION: &str = "/api/v1/collection/{id}/begin";

/// Start collecting a pending report. Only one collector can hold
/// a report.
#[utoipa::path(
    post,
    path = PATH_POST_BEGIN_COLLECTION,
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Success.", body = Report),
        (status = 401, description = "Unauthorized."),
        (status = 404, description = "Report not found."),
        (status = 409, description = "Report is not pending."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_begin_collection<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<Json<Report>, ApiError> {
    let r = db_write!(state, move |cmds| cmds
        .report()
        .begin_collection(ReportId::new(id), user.id))?;
    Ok(r.into())
}

const PATH_POST_VERIFY_COLLECTION: &str = "/api/v1/collection/{id}/verify";

/// Verify collected waste with a photo. Verified collection earns
/// collection points.
#[utoipa::path(
    post,
    path = PATH_POST_VERIFY_COLLECTION,
    params(("id" = i64, Path, description = "Report ID")),
    request_body = SubmitVerification,
    responses(
        (status = 200, description = "Success.", body = VerificationOutcome),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller is not the collector of the report."),
        (status = 404, description = "Report not found."),
        (status = 409, description = "Report collection is not in progress."),
        (status = 503, description = "Verification is not available. Report state is not changed."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_verify_collection<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
    Json(info): Json<SubmitVerification>,
) -> Result<Json<VerificationOutcome>, ApiError> {
    let r = db_write!(state, move |cmds| cmds.report().submit_verification(
        ReportId::new(id),
        user.id,
        info.image
    ))?;
    Ok(r.into())
}

const PATH_GET_MY_COLLECTED_WASTE: &str = "/api/v1/collection/mine";

#[utoipa::path(
    get,
    path = PATH_GET_MY_COLLECTED_WASTE,
    responses(
        (status = 200, description = "Success.", body = CollectedWasteList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_my_collected_waste<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<CollectedWasteList>, ApiError> {
    let r = state.read().report().collected_by_collector(user.id).await?;
    Ok(r.into())
}

pub fn router_collection<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(
        S,
        get_collection_tasks,
        post_begin_collection,
        post_verify_collection,
        get_my_collected_waste,
    )
}
