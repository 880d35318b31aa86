//! Classifier calls with a per request timeout.

use std::{future::Future, time::Duration};

use classifier::ClassifierError;
use server_common::result::{Result, WrappedContextExt, WrappedReport};
use tracing::warn;

use crate::DataError;

/// Run a classifier call. Timeout, network and parsing failures become
/// [DataError::VerificationUnavailable] and an invalid image becomes
/// [DataError::Validation]. Dropping the future on timeout cancels the
/// request.
pub async fn run_classifier<T>(
    timeout: Duration,
    call: impl Future<Output = error_stack::Result<T, ClassifierError>>,
) -> Result<T, DataError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!("Classifier call failed: {:?}", e);
            let context = if *e.current_context() == ClassifierError::InvalidImage {
                DataError::Validation("Invalid image data")
            } else {
                DataError::VerificationUnavailable
            };
            Err(WrappedReport::new(e.change_context(context)))
        }
        Err(_) => {
            warn!("Classifier call timeout after {} seconds", timeout.as_secs());
            Err(DataError::VerificationUnavailable.report())
        }
    }
}
