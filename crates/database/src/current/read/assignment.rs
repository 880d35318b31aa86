use diesel::prelude::*;
use error_stack::Result;
use model::{Assignment, AssignmentId, AssignmentStatus, ReportId, StaffId, UserId, VendorId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadAssignment);

impl CurrentReadAssignment<'_> {
    pub fn assignment(
        &mut self,
        id: AssignmentId,
    ) -> Result<Option<Assignment>, DieselDatabaseError> {
        use model::schema::assignment::dsl;

        dsl::assignment
            .filter(dsl::id.eq(id))
            .select(Assignment::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    pub fn active_assignment_for_report(
        &mut self,
        report: ReportId,
    ) -> Result<Option<Assignment>, DieselDatabaseError> {
        use model::schema::assignment::dsl;

        dsl::assignment
            .filter(dsl::report_id.eq(report))
            .filter(dsl::status.eq(AssignmentStatus::Assigned))
            .select(Assignment::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(report)
    }

    /// Newest first
    pub fn assignments_by_vendor(
        &mut self,
        vendor: VendorId,
    ) -> Result<Vec<Assignment>, DieselDatabaseError> {
        use model::schema::assignment::dsl;

        dsl::assignment
            .filter(dsl::vendor_id.eq(vendor))
            .order((dsl::assigned_unix_time.desc(), dsl::id.desc()))
            .select(Assignment::as_select())
            .load(self.conn())
            .into_db_error(vendor)
    }

    /// Assignments of every staff record which is linked to the user.
    /// Newest first.
    pub fn assignments_for_staff_user(
        &mut self,
        user: UserId,
    ) -> Result<Vec<Assignment>, DieselDatabaseError> {
        use model::schema::{assignment, staff};

        assignment::table
            .inner_join(staff::table)
            .filter(staff::user_id.eq(user))
            .order((assignment::assigned_unix_time.desc(), assignment::id.desc()))
            .select(Assignment::as_select())
            .load(self.conn())
            .into_db_error(user)
    }

    pub fn staff_has_assignments(&mut self, staff: StaffId) -> Result<bool, DieselDatabaseError> {
        use model::schema::assignment::dsl;

        diesel::select(diesel::dsl::exists(
            dsl::assignment.filter(dsl::staff_id.eq(staff)),
        ))
        .get_result(self.conn())
        .into_db_error(staff)
    }
}
