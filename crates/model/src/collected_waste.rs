use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{ReportId, UnixTime, UserId, define_row_id, define_state_enum};

define_row_id!(CollectedWasteId);

define_state_enum!(
    CollectedWasteStatus {
        Verified = 0,
        Rejected = 1,
    }
);

/// Outcome of one verification attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::collected_waste)]
#[diesel(check_for_backend(crate::Db))]
pub struct CollectedWaste {
    pub id: CollectedWasteId,
    pub report_id: ReportId,
    pub collector_user_id: UserId,
    pub collected_unix_time: UnixTime,
    pub status: CollectedWasteStatus,
    /// Classifier result as JSON text.
    pub verification_result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CollectedWasteList {
    pub collected: Vec<CollectedWaste>,
}
