//! Strict parsing of model output.
//!
//! Code fences are removed before parsing. Any other deviation from the
//! expected JSON shape is an error. Partial results are never returned.

use error_stack::{Result, ResultExt};
use model::{CollectionVerification, SubmissionClassification};
use serde::de::DeserializeOwned;
use simple_backend_utils::{ContextExt, text::strip_code_fences};

use crate::ClassifierError;

fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T, ClassifierError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned)
        .change_context(ClassifierError::Parse)
        .attach_printable_lazy(|| format!("Model output: {raw}"))
}

fn check_confidence(confidence: f64) -> Result<(), ClassifierError> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(ClassifierError::Parse.report())
            .attach_printable(format!("Confidence out of range: {confidence}"))
    }
}

pub fn parse_submission(raw: &str) -> Result<SubmissionClassification, ClassifierError> {
    let value: SubmissionClassification = parse_json(raw)?;
    check_confidence(value.confidence)?;
    if value.waste_type.trim().is_empty() || value.quantity.trim().is_empty() {
        return Err(ClassifierError::Parse.report())
            .attach_printable("Empty waste type or quantity");
    }
    Ok(value)
}

pub fn parse_verification(raw: &str) -> Result<CollectionVerification, ClassifierError> {
    let value: CollectionVerification = parse_json(raw)?;
    check_confidence(value.confidence)?;
    Ok(value)
}
