use axum::{
    Extension,
    extract::{Path, State},
};
use model::{NotificationId, NotificationList, User};
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router, db_write,
    utils::{ApiError, Json},
};

const PATH_GET_NOTIFICATIONS: &str = "/api/v1/notifications";

/// Unread notifications. Newest first.
#[utoipa::path(
    get,
    path = PATH_GET_NOTIFICATIONS,
    responses(
        (status = 200, description = "Success.", body = NotificationList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_notifications<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<NotificationList>, ApiError> {
    let r = state
        .read()
        .notification()
        .unread_notifications(user.id)
        .await?;
    Ok(r.into())
}

const PATH_POST_NOTIFICATION_READ: &str = "/api/v1/notifications/{id}/read";

#[utoipa::path(
    post,
    path = PATH_POST_NOTIFICATION_READ,
    params(("id" = i64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Success."),
        (status = 401, description = "Unauthorized."),
        (status = 404, description = "Notification not found."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_notification_read<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Path(id): Path<i64>,
) -> Result<(), ApiError> {
    db_write!(state, move |cmds| cmds
        .notification()
        .mark_read(user.id, NotificationId::new(id)))?;
    Ok(())
}

pub fn router_notification<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(S, get_notifications, post_notification_read,)
}
