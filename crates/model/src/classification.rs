use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Classifier estimate for a new waste report photo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionClassification {
    pub waste_type: String,
    pub quantity: String,
    /// Value in range [0, 1]
    pub confidence: f64,
}

/// Classifier comparison of a collection photo against the declared
/// waste type and amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectionVerification {
    pub waste_type_match: bool,
    pub quantity_match: bool,
    /// Value in range [0, 1]
    pub confidence: f64,
}

impl CollectionVerification {
    /// Both matches must be true and confidence must be strictly greater
    /// than the threshold.
    pub fn is_accepted(&self, confidence_threshold: f64) -> bool {
        self.waste_type_match && self.quantity_match && self.confidence > confidence_threshold
    }
}

/// Classification stored on a report as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(untagged)]
pub enum ClassificationRecord {
    Collection(CollectionVerification),
    Submission(SubmissionClassification),
}

impl ClassificationRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Base64 encoded image.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ImageData {
    /// For example `image/jpeg`
    pub mime_type: String,
    /// Standard base64 with padding.
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let v = CollectionVerification {
            waste_type_match: true,
            quantity_match: true,
            confidence: 0.7,
        };
        assert!(!v.is_accepted(0.7));
        assert!(v.is_accepted(0.69));
    }

    #[test]
    fn any_mismatch_rejects() {
        let v = CollectionVerification {
            waste_type_match: false,
            quantity_match: true,
            confidence: 0.9,
        };
        assert!(!v.is_accepted(0.7));
    }

    #[test]
    fn stored_json_keeps_shape() {
        let collection = ClassificationRecord::Collection(CollectionVerification {
            waste_type_match: true,
            quantity_match: false,
            confidence: 0.5,
        });
        let json = collection.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"wasteTypeMatch":true,"quantityMatch":false,"confidence":0.5}"#
        );
        assert_eq!(ClassificationRecord::from_json(&json).unwrap(), collection);

        let submission = ClassificationRecord::from_json(
            r#"{"wasteType":"plastic","quantity":"3 kg","confidence":0.8}"#,
        )
        .unwrap();
        assert!(matches!(submission, ClassificationRecord::Submission(_)));
    }
}
