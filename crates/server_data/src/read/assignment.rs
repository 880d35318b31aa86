use model::{AssignmentList, UserId};
use server_common::result::Result;

use crate::{DataError, IntoDataError, access::require_own_vendor, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsAssignment);

impl ReadCommandsAssignment<'_> {
    /// Assignments of the caller's vendor.
    pub async fn assignments_by_vendor(&self, caller: UserId) -> Result<AssignmentList, DataError> {
        let vendors = self
            .db_read(move |mut cmds| cmds.vendor().vendors_by_owner(caller))
            .await
            .into_error()?;
        let vendor = require_own_vendor(vendors)?;
        let assignments = self
            .db_read(move |mut cmds| cmds.assignment().assignments_by_vendor(vendor.id))
            .await
            .into_error()?;
        Ok(AssignmentList { assignments })
    }

    /// Assignments for staff records linked to the user account.
    pub async fn assignments_for_staff_user(
        &self,
        user: UserId,
    ) -> Result<AssignmentList, DataError> {
        let assignments = self
            .db_read(move |mut cmds| cmds.assignment().assignments_for_staff_user(user))
            .await
            .into_error()?;
        Ok(AssignmentList { assignments })
    }
}
