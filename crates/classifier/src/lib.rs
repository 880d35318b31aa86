#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Waste image classification gateway.
//!
//! The gateway sends an image to an external vision model and parses the
//! model output into [SubmissionClassification] or [CollectionVerification].
//! Network failures, timeouts and unparseable output are reported as
//! different [ClassifierError] variants. Nothing is retried or persisted
//! here.

pub mod openai;
pub mod parse;
pub mod prompt;

use async_trait::async_trait;
use base64::Engine;
use error_stack::Result;
use model::{CollectionVerification, ImageData, SubmissionClassification};
use simple_backend_utils::ContextExt;

pub use openai::OpenAiClassifier;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("Classifier is not configured")]
    NotConfigured,
    #[error("Invalid image")]
    InvalidImage,
    #[error("Classifier request failed")]
    Request,
    #[error("Classifier response was empty")]
    EmptyResponse,
    #[error("Classifier response parsing failed")]
    Parse,
}

#[async_trait]
pub trait WasteClassifier: Send + Sync + 'static {
    /// Estimate waste type, quantity and confidence for a new report photo.
    async fn classify_submission(
        &self,
        image: &ImageData,
    ) -> Result<SubmissionClassification, ClassifierError>;

    /// Compare a collection photo against the declared waste type and
    /// amount of a report.
    async fn verify_collection(
        &self,
        image: &ImageData,
        expected_waste_type: &str,
        expected_amount: &str,
    ) -> Result<CollectionVerification, ClassifierError>;
}

/// Used when the config file does not have a classifier section.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledClassifier;

#[async_trait]
impl WasteClassifier for DisabledClassifier {
    async fn classify_submission(
        &self,
        _image: &ImageData,
    ) -> Result<SubmissionClassification, ClassifierError> {
        Err(ClassifierError::NotConfigured.report())
    }

    async fn verify_collection(
        &self,
        _image: &ImageData,
        _expected_waste_type: &str,
        _expected_amount: &str,
    ) -> Result<CollectionVerification, ClassifierError> {
        Err(ClassifierError::NotConfigured.report())
    }
}

/// Decode image data. The MIME type must be an image type and the data
/// must be non-empty standard base64.
pub fn decode_image(image: &ImageData) -> Result<Vec<u8>, ClassifierError> {
    if !image.mime_type.starts_with("image/") {
        return Err(ClassifierError::InvalidImage.report());
    }

    let data = base64::engine::general_purpose::STANDARD
        .decode(image.data.trim())
        .map_err(|_| ClassifierError::InvalidImage.report())?;

    if data.is_empty() {
        return Err(ClassifierError::InvalidImage.report());
    }

    Ok(data)
}
