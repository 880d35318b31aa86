use axum::{
    Extension,
    extract::{Path, Query, State},
};
use model::{
    AssignToStaff, Assignment, AssignmentId, AssignmentList, NewStaff, RegisterVendor,
    ReportList, Staff, StaffId, StaffList, User, Vendor, VendorId,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router, db_write,
    utils::{ApiError, Json},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ComplaintsQuery {
    /// List for this vendor. Listing without vendor requires admin role.
    pub vendor_id: Option<i64>,
}

const PATH_GET_PENDING_COMPLAINTS: &str = "/api/v1/vendor/complaints";

/// Pending reports which do not have an active assignment.
#[utoipa::path(
    get,
    path = PATH_GET_PENDING_COMPLAINTS,
    params(ComplaintsQuery),
    responses(
        (status = 200, description = "Success.", body = ReportList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not own the active vendor."),
        (status = 404, description = "Vendor not found."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_pending_complaints<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Query(query): Query<ComplaintsQuery>,
) -> Result<Json<ReportList>, ApiError> {
    let r = state
        .read()
        .report()
        .pending_complaints(&user, query.vendor_id.map(VendorId::new))
        .await?;
    Ok(r.into())
}

const PATH_POST_ASSIGNMENT: &str = "/api/v1/vendor/assignment";

/// Assign a pending report to vendor staff.
#[utoipa::path(
    post,
    path = PATH_POST_ASSIGNMENT,
    request_body = AssignToStaff,
    responses(
        (status = 200, description = "Success.", body = Assignment),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not own the active vendor."),
        (status = 404, description = "Vendor, staff or report not found."),
        (status = 409, description = "Report is not pending or it is already assigned."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_assignment<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Json(info): Json<AssignToStaff>,
) -> Result<Json<Assignment>, ApiError> {
    let r = db_write!(state, move |cmds| cmds
        .assignment()
        .assign_to_staff(user.id, info))?;
    Ok(r.into())
}

const PATH_POST_COMPLETE_ASSIGNMENT: &str = "/api/v1/vendor/assignment/{id}/complete";

#[utoipa::path(
    post,
    path = PATH_POST_COMPLETE_ASSIGNMENT,
    params(("id" = i64, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Success.", body = Assignment),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not own the vendor."),
        (status = 404, description = "Assignment not found."),
        (status = 409, description = "Assignment is already completed."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_complete_assignment<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<Json<Assignment>, ApiError> {
    let r = db_write!(state, move |cmds| cmds
        .assignment()
        .complete_assignment(user.id, AssignmentId::new(id)))?;
    Ok(r.into())
}

const PATH_GET_VENDOR_ASSIGNMENTS: &str = "/api/v1/vendor/assignments";

#[utoipa::path(
    get,
    path = PATH_GET_VENDOR_ASSIGNMENTS,
    responses(
        (status = 200, description = "Success.", body = AssignmentList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not have a vendor."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_vendor_assignments<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<AssignmentList>, ApiError> {
    let r = state
        .read()
        .assignment()
        .assignments_by_vendor(user.id)
        .await?;
    Ok(r.into())
}

const PATH_GET_STAFF_ASSIGNMENTS: &str = "/api/v1/staff/assignments";

/// Assignments for the staff member which uses the current account.
#[utoipa::path(
    get,
    path = PATH_GET_STAFF_ASSIGNMENTS,
    responses(
        (status = 200, description = "Success.", body = AssignmentList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_staff_assignments<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<AssignmentList>, ApiError> {
    let r = state
        .read()
        .assignment()
        .assignments_for_staff_user(user.id)
        .await?;
    Ok(r.into())
}

const PATH_VENDOR: &str = "/api/v1/vendor";

/// Register a vendor. New vendors are inactive until an admin
/// activates them.
#[utoipa::path(
    post,
    path = PATH_VENDOR,
    request_body = RegisterVendor,
    responses(
        (status = 200, description = "Success.", body = Vendor),
        (status = 400, description = "Required field is empty."),
        (status = 401, description = "Unauthorized."),
        (status = 409, description = "Vendor is already registered."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_vendor<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Json(info): Json<RegisterVendor>,
) -> Result<Json<Vendor>, ApiError> {
    let r = db_write!(state, move |cmds| cmds.vendor().register(user.id, info))?;
    Ok(r.into())
}

#[utoipa::path(
    get,
    path = PATH_VENDOR,
    responses(
        (status = 200, description = "Success.", body = Vendor),
        (status = 401, description = "Unauthorized."),
        (status = 404, description = "Current user does not have a vendor."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_vendor<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<Vendor>, ApiError> {
    let r = state.read().vendor().vendor_for_user(user.id).await?;
    Ok(r.into())
}

const PATH_STAFF: &str = "/api/v1/vendor/staff";

#[utoipa::path(
    post,
    path = PATH_STAFF,
    request_body = NewStaff,
    responses(
        (status = 200, description = "Success.", body = Staff),
        (status = 400, description = "Required field is empty."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not have a vendor."),
        (status = 409, description = "Staff email is already in use."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_staff<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Json(info): Json<NewStaff>,
) -> Result<Json<Staff>, ApiError> {
    let r = db_write!(state, move |cmds| cmds.vendor().create_staff(user.id, info))?;
    Ok(r.into())
}

#[utoipa::path(
    get,
    path = PATH_STAFF,
    responses(
        (status = 200, description = "Success.", body = StaffList),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not have a vendor."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_staff<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<StaffList>, ApiError> {
    let r = state.read().vendor().list_staff(user.id).await?;
    Ok(r.into())
}

const PATH_DELETE_STAFF: &str = "/api/v1/vendor/staff/{id}";

#[utoipa::path(
    delete,
    path = PATH_DELETE_STAFF,
    params(("id" = i64, Path, description = "Staff ID")),
    responses(
        (status = 200, description = "Success."),
        (status = 401, description = "Unauthorized."),
        (status = 403, description = "Caller does not have a vendor."),
        (status = 404, description = "Staff not found."),
        (status = 409, description = "Staff member has assignments."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn delete_staff<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    db_write!(state, move |cmds| cmds
        .vendor()
        .delete_staff(user.id, StaffId::new(id)))?;
    Ok(())
}

pub fn router_vendor<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(
        S,
        get_pending_complaints,
        post_assignment,
        post_complete_assignment,
        get_vendor_assignments,
        get_staff_assignments,
        post_vendor,
        get_vendor,
        post_staff,
        get_staff,
        delete_staff,
    )
}
