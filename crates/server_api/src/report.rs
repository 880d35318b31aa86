use axum::{
    Extension,
    extract::{Path, State},
};
use model::{
    ClassifyImage, Report, ReportId, ReportList, SubmissionClassification, SubmitReport,
    SubmitReportResult, User,
};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router, db_write,
    utils::{ApiError, Json},
};

const PATH_POST_REPORT: &str = "/api/v1/report";

/// Submit a waste report. Submitting earns report points immediately.
#[utoipa::path(
    post,
    path = PATH_POST_REPORT,
    request_body = SubmitReport,
    responses(
        (status = 200, description = "Success.", body = SubmitReportResult),
        (status = 400, description = "Location, waste type or amount is empty."),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_report<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Json(info): Json<SubmitReport>,
) -> Result<Json<SubmitReportResult>, ApiError> {
    let r = db_write!(state, move |cmds| cmds.report().submit_report(user.id, info))?;
    Ok(r.into())
}

const PATH_POST_CLASSIFY_IMAGE: &str = "/api/v1/report/classify";

/// Estimate waste type and quantity from a photo before submitting
/// a report.
#[utoipa::path(
    post,
    path = PATH_POST_CLASSIFY_IMAGE,
    request_body = ClassifyImage,
    responses(
        (status = 200, description = "Success.", body = SubmissionClassification),
        (status = 400, description = "Invalid image."),
        (status = 401, description = "Unauthorized."),
        (status = 503, description = "Classifier is not available."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_classify_image<S: ApiState>(
    State(state): State<S>,
    Json(info): Json<ClassifyImage>,
) -> Result<Json<SubmissionClassification>, ApiError> {
    let r = db_write!(state, move |cmds| cmds
        .report()
        .classify_submission(info.image))?;
    Ok(r.into())
}

const PATH_GET_REPORT: &str = "/api/v1/report/{id}";

#[utoipa::path(
    get,
    path = PATH_GET_REPORT,
    params(("id" = i64, Path, description = "Report ID")),
    responses(
        (status = 200, description = "Success.", body = Report),
        (status = 401, description = "Unauthorized."),
        (status = 404, description = "Report not found."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_report<S: ApiState>(
    State(state): State<S>,
    Path(id): Path<i64>,
) -> Result<Json<Report>, ApiError> {
    let r = state.read().report().report(ReportId::new(id)).await?;
    Ok(r.into())
}

const PATH_GET_MY_REPORTS: &str = "/api/v1/report/mine";

/// Reports which the current user has submitted. Newest first.
#[utoipa::path(
    get,
    path = PATH_GET_MY_REPORTS,
    responses(
        (status = 200, description = "Success.", body = ReportList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_my_reports<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<ReportList>, ApiError> {
    let r = state.read().report().reports_by_user(user.id).await?;
    Ok(r.into())
}

const PATH_GET_RECENT_REPORTS: &str = "/api/v1/report/recent";

#[utoipa::path(
    get,
    path = PATH_GET_RECENT_REPORTS,
    responses(
        (status = 200, description = "Success.", body = ReportList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_recent_reports<S: ApiState>(
    State(state): State<S>,
) -> Result<Json<ReportList>, ApiError> {
    let r = state.read().report().recent_reports().await?;
    Ok(r.into())
}

pub fn router_report<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(
        S,
        post_report,
        post_classify_image,
        get_report,
        get_my_reports,
        get_recent_reports,
    )
}
