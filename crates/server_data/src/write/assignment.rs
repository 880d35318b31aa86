use model::{AssignToStaff, Assignment, AssignmentId, NotificationKind, ReportStatus, UnixTime, UserId};
use server_common::result::{Result, WrappedContextExt};
use tracing::info;

use crate::{
    DataError,
    access::{require_active_vendor, require_vendor_owner},
    db_transaction, define_cmd_wrapper_write,
};

define_cmd_wrapper_write!(WriteCommandsAssignment);

impl WriteCommandsAssignment<'_> {
    /// Assign a pending report to a staff member of the caller's vendor.
    /// The staff member's user account becomes the report collector.
    pub async fn assign_to_staff(
        &self,
        caller: UserId,
        info: AssignToStaff,
    ) -> Result<Assignment, DataError> {
        db_transaction!(self, move |mut cmds| {
            let vendor = cmds.read().vendor().vendor(info.vendor_id)?;
            let vendor = require_vendor_owner(vendor, caller)?;
            require_active_vendor(&vendor)?;

            let staff = cmds
                .read()
                .vendor()
                .staff(info.staff_id)?
                .ok_or_else(|| DataError::NotFound.report())?;
            if staff.vendor_id != vendor.id {
                return Err(
                    DataError::Conflict("Staff member does not belong to the vendor").report(),
                );
            }

            let report = cmds
                .read()
                .report()
                .report(info.report_id)?
                .ok_or_else(|| DataError::NotFound.report())?;
            if report.status != ReportStatus::Pending {
                return Err(DataError::Conflict("Report is not pending").report());
            }
            if cmds
                .read()
                .assignment()
                .active_assignment_for_report(report.id)?
                .is_some()
            {
                return Err(DataError::Conflict("Report is already assigned").report());
            }

            let time = UnixTime::current_time();
            let assignment =
                cmds.assignment()
                    .insert_assignment(report.id, vendor.id, staff.id, time)?;
            if cmds
                .report()
                .begin_collection_if_pending(report.id, staff.user_id)?
                .is_none()
            {
                return Err(DataError::Conflict("Report is not pending").report());
            }
            cmds.notification().insert_notification(
                staff.user_id,
                &format!(
                    "You have a new collection task: {} of {} at {}",
                    report.amount, report.waste_type, report.location
                ),
                NotificationKind::Assignment,
                time,
            )?;

            info!("Report {} assigned to staff {}", report.id, staff.id);
            Ok(assignment)
        })
    }

    /// Mark the administrative task done. The report state is not changed.
    pub async fn complete_assignment(
        &self,
        caller: UserId,
        id: AssignmentId,
    ) -> Result<Assignment, DataError> {
        db_transaction!(self, move |mut cmds| {
            let assignment = cmds
                .read()
                .assignment()
                .assignment(id)?
                .ok_or_else(|| DataError::NotFound.report())?;
            let vendor = cmds.read().vendor().vendor(assignment.vendor_id)?;
            let vendor = require_vendor_owner(vendor, caller)?;

            cmds.assignment()
                .complete_if_assigned(id, vendor.id, UnixTime::current_time())?
                .ok_or_else(|| DataError::Conflict("Assignment is already completed").report())
        })
    }
}
