use diesel::{insert_into, prelude::*, update};
use error_stack::Result;
use model::{
    Assignment, AssignmentId, AssignmentStatus, ReportId, StaffId, UnixTime, VendorId,
};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteAssignment);

impl CurrentWriteAssignment<'_> {
    /// Fails if the report already has an active assignment.
    pub fn insert_assignment(
        &mut self,
        report: ReportId,
        vendor: VendorId,
        staff: StaffId,
        time: UnixTime,
    ) -> Result<Assignment, DieselDatabaseError> {
        use model::schema::assignment::dsl::*;

        insert_into(assignment)
            .values((
                report_id.eq(report),
                vendor_id.eq(vendor),
                staff_id.eq(staff),
                status.eq(AssignmentStatus::Assigned),
                assigned_unix_time.eq(time),
            ))
            .returning(Assignment::as_returning())
            .get_result(self.conn())
            .into_db_error((report, vendor, staff))
    }

    /// Returns `None` if the assignment does not exist, belongs to another
    /// vendor or is already completed.
    pub fn complete_if_assigned(
        &mut self,
        id_value: AssignmentId,
        vendor: VendorId,
        time: UnixTime,
    ) -> Result<Option<Assignment>, DieselDatabaseError> {
        use model::schema::assignment::dsl::*;

        update(assignment)
            .filter(id.eq(id_value))
            .filter(vendor_id.eq(vendor))
            .filter(status.eq(AssignmentStatus::Assigned))
            .set((
                status.eq(AssignmentStatus::Completed),
                completed_unix_time.eq(Some(time)),
            ))
            .returning(Assignment::as_returning())
            .get_result(self.conn())
            .optional()
            .into_db_error((id_value, vendor))
    }
}
