use axum::Extension;
use model::User;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router,
    utils::{ApiError, Json},
};

const PATH_GET_USER: &str = "/api/v1/user";

/// Current user. The account is created on the first request.
#[utoipa::path(
    get,
    path = PATH_GET_USER,
    responses(
        (status = 200, description = "Success.", body = User),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_user<S: ApiState>(
    Extension(user): Extension<User>,
) -> Result<Json<User>, ApiError> {
    Ok(user.into())
}

pub fn router_user<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(S, get_user,)
}
