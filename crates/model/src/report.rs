use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    ClassificationRecord, CollectionVerification, ImageData, SubmissionClassification, UnixTime,
    UserId, define_row_id, define_state_enum,
};

define_row_id!(ReportId);

define_state_enum!(
    /// Report lifecycle state.
    ///
    /// The collector is set only in `InProgress` and `Verified` states.
    ReportStatus {
        Pending = 0,
        InProgress = 1,
        Verified = 2,
        Rejected = 3,
    }
);

impl ReportStatus {
    pub fn has_collector(&self) -> bool {
        matches!(self, Self::InProgress | Self::Verified)
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::report)]
#[diesel(check_for_backend(crate::Db))]
pub struct ReportRaw {
    pub id: ReportId,
    pub owner_user_id: UserId,
    pub location: String,
    pub waste_type: String,
    pub amount: String,
    pub image_reference: Option<String>,
    pub verification_result: Option<String>,
    pub status: ReportStatus,
    pub created_unix_time: UnixTime,
    pub collector_user_id: Option<UserId>,
}

impl ReportRaw {
    pub fn into_report(self) -> Result<Report, serde_json::Error> {
        let verification_result = self
            .verification_result
            .as_deref()
            .map(ClassificationRecord::from_json)
            .transpose()?;
        Ok(Report {
            id: self.id,
            owner_user_id: self.owner_user_id,
            location: self.location,
            waste_type: self.waste_type,
            amount: self.amount,
            image_reference: self.image_reference,
            verification_result,
            status: self.status,
            created_unix_time: self.created_unix_time,
            collector_user_id: self.collector_user_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Report {
    pub id: ReportId,
    pub owner_user_id: UserId,
    pub location: String,
    pub waste_type: String,
    /// Declared amount with unit, for example "3 kg".
    pub amount: String,
    pub image_reference: Option<String>,
    pub verification_result: Option<ClassificationRecord>,
    pub status: ReportStatus,
    pub created_unix_time: UnixTime,
    pub collector_user_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReportList {
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubmitReport {
    pub location: String,
    pub waste_type: String,
    pub amount: String,
    /// Reference to an externally stored evidence image.
    #[serde(default)]
    pub image_reference: Option<String>,
    /// Result from the classify endpoint if the client ran it.
    #[serde(default)]
    pub classification: Option<SubmissionClassification>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubmitReportResult {
    pub report: Report,
    pub points_awarded: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClassifyImage {
    pub image: ImageData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SubmitVerification {
    pub image: ImageData,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct VerificationOutcome {
    pub report: Report,
    pub verification: CollectionVerification,
    pub accepted: bool,
    /// Collection points. Zero when verification was rejected.
    pub points_awarded: i64,
}
