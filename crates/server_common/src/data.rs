use simple_backend_database::{SimpleDatabaseError, diesel_db::DieselDatabaseError};

use crate::result::Result;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataError {
    // User correctable errors
    #[error("{0}")]
    Validation(&'static str),

    // Invalid report state
    #[error("This report is already being collected by someone else")]
    ReportBeingCollected,
    #[error("This report has already been verified")]
    ReportAlreadyVerified,
    #[error("This report has been rejected")]
    ReportRejected,
    #[error("Collection of this report is not in progress")]
    ReportNotInProgress,

    #[error("Only the collector of the report can do this")]
    NotCollector,
    #[error("Tried to do something that is not allowed")]
    NotAllowed,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Waste verification is currently unavailable")]
    VerificationUnavailable,
    #[error("Not enough points")]
    InsufficientPoints,
    #[error("Not found")]
    NotFound,
    #[error("Feature disabled from config file")]
    FeatureDisabled,

    // Persistence faults
    #[error("Diesel error")]
    Diesel,
    #[error("I/O error")]
    Io,
    #[error("Serialization error")]
    Serde,
    #[error("Database initialization error")]
    Init,
    #[error("Command runner quit too early")]
    CommandRunnerQuit,
}

impl DataError {
    /// Machine readable error kind for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ReportBeingCollected
            | Self::ReportAlreadyVerified
            | Self::ReportRejected
            | Self::ReportNotInProgress => "invalid_state",
            Self::NotCollector | Self::NotAllowed => "forbidden",
            Self::Conflict(_) => "conflict",
            Self::VerificationUnavailable => "verification_unavailable",
            Self::InsufficientPoints => "insufficient_points",
            Self::NotFound => "not_found",
            Self::FeatureDisabled => "feature_disabled",
            Self::Diesel | Self::Io | Self::Serde | Self::Init | Self::CommandRunnerQuit => {
                "internal"
            },
        }
    }

    /// Persistence faults are not correctable by the caller.
    pub fn is_internal(&self) -> bool {
        self.kind() == "internal"
    }
}

/// Convert the result of a database operation to a [DataError] result.
pub trait IntoDataError<Ok>: Sized {
    #[track_caller]
    fn into_error(self) -> Result<Ok, DataError>;
}

impl<Ok> IntoDataError<Ok> for error_stack::Result<Ok, DieselDatabaseError> {
    #[track_caller]
    fn into_error(self) -> Result<Ok, DataError> {
        Ok(self?)
    }
}

impl<Ok> IntoDataError<Ok> for error_stack::Result<Ok, SimpleDatabaseError> {
    #[track_caller]
    fn into_error(self) -> Result<Ok, DataError> {
        Ok(self?)
    }
}

impl<Ok> IntoDataError<Ok> for error_stack::Result<Ok, DataError> {
    #[track_caller]
    fn into_error(self) -> Result<Ok, DataError> {
        Ok(self?)
    }
}

impl<Ok> IntoDataError<Ok> for Result<Ok, DataError> {
    #[track_caller]
    fn into_error(self) -> Result<Ok, DataError> {
        self
    }
}
