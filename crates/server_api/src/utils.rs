use axum::{
    body::Body,
    extract::{FromRequest, State, rejection::JsonRejection},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use server_common::result::WrappedReport;
use utoipa::{
    Modify,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::{DataError, app::ApiState, db_write};

/// Header which the default identity provider reads.
pub const USER_EMAIL_HEADER_DEFAULT: &str = "x-user-email";

/// Middleware which resolves the request identity to a user account.
/// Known users are read from the read pool. Only the first request of
/// a new identity uses the write connection.
///
/// Adds `User` extension to request, so that adding
/// "Extension(api_caller): Extension<User>"
/// to handlers is possible.
pub async fn resolve_identity<S: ApiState>(
    State(state): State<S>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = state
        .identity(req.headers())
        .ok_or_else(ApiError::unauthorized)?;
    let existing = state
        .read()
        .user()
        .user_by_email(&identity.email)
        .await
        .convert_data_error_to_api_error()?;
    let user = match existing {
        Some(user) => user,
        None => db_write!(state, move |cmds| cmds.user().get_or_create(identity))?,
    };
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Utoipa API doc security config
pub struct SecurityIdentityHeaderDefault;

impl Modify for SecurityIdentityHeaderDefault {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(
                "user_email",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(
                    USER_EMAIL_HEADER_DEFAULT,
                ))),
            )
    }
}

// Request body errors use the same JSON format as other errors.

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Error response with body `{ "error": kind, "message": text }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            kind: "unauthorized",
            message: "Identity is missing".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl From<DataError> for ApiError {
    fn from(value: DataError) -> Self {
        let message = if value.is_internal() {
            "Internal server error".to_string()
        } else {
            value.to_string()
        };
        Self {
            status: data_error_status(&value),
            kind: value.kind(),
            message,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self {
            status: value.status(),
            kind: "validation",
            message: value.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.kind,
            "message": self.message,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

pub fn data_error_status(error: &DataError) -> StatusCode {
    match error {
        DataError::Validation(_) => StatusCode::BAD_REQUEST,
        DataError::ReportBeingCollected
        | DataError::ReportAlreadyVerified
        | DataError::ReportRejected
        | DataError::ReportNotInProgress
        | DataError::Conflict(_) => StatusCode::CONFLICT,
        DataError::NotCollector | DataError::NotAllowed | DataError::FeatureDisabled => {
            StatusCode::FORBIDDEN
        }
        DataError::VerificationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        DataError::InsufficientPoints => StatusCode::PAYMENT_REQUIRED,
        DataError::NotFound => StatusCode::NOT_FOUND,
        DataError::Diesel
        | DataError::Io
        | DataError::Serde
        | DataError::Init
        | DataError::CommandRunnerQuit => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert error to API error. This is workaround for track_caller seems
/// to not work when converting using Into::into. Early return with ? seems
/// to have the correct caller location. This fixes error location printed
/// from db_write macro.
pub trait ConvertDataErrorToApiError<Ok> {
    #[track_caller]
    fn convert_data_error_to_api_error(self) -> std::result::Result<Ok, ApiError>;
}

impl<Ok> ConvertDataErrorToApiError<Ok>
    for std::result::Result<Ok, WrappedReport<error_stack::Report<DataError>>>
{
    #[track_caller]
    fn convert_data_error_to_api_error(self) -> std::result::Result<Ok, ApiError> {
        self.map_err(ApiError::from)
    }
}

impl From<WrappedReport<error_stack::Report<DataError>>> for ApiError {
    #[track_caller]
    fn from(value: WrappedReport<error_stack::Report<DataError>>) -> Self {
        let error = *value.current_context();
        if error.is_internal() {
            tracing::error!("{:?}", value);
        } else {
            tracing::debug!("{:?}", value);
        }
        error.into()
    }
}
