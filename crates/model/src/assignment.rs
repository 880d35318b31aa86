use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{ReportId, StaffId, UnixTime, VendorId, define_row_id, define_state_enum};

define_row_id!(AssignmentId);

define_state_enum!(
    /// Administrative task state. Independent from the report state.
    AssignmentStatus {
        Assigned = 0,
        Completed = 1,
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::assignment)]
#[diesel(check_for_backend(crate::Db))]
pub struct Assignment {
    pub id: AssignmentId,
    pub report_id: ReportId,
    pub vendor_id: VendorId,
    pub staff_id: StaffId,
    pub status: AssignmentStatus,
    pub assigned_unix_time: UnixTime,
    pub completed_unix_time: Option<UnixTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AssignToStaff {
    pub report_id: ReportId,
    pub staff_id: StaffId,
    pub vendor_id: VendorId,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AssignmentList {
    pub assignments: Vec<Assignment>,
}
