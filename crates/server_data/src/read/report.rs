use model::{CollectedWasteList, Report, ReportId, ReportList, User, UserId, VendorId};
use server_common::result::{Result, WrappedContextExt};

use crate::{
    DataError, IntoDataError,
    access::{require_active_vendor, require_admin, require_vendor_owner},
    define_cmd_wrapper_read,
};

pub const RECENT_REPORTS_LIMIT: i64 = 10;
pub const COLLECTION_TASKS_LIMIT: i64 = 20;

define_cmd_wrapper_read!(ReadCommandsReport);

impl ReadCommandsReport<'_> {
    pub async fn report(&self, id: ReportId) -> Result<Report, DataError> {
        self.db_read(move |mut cmds| cmds.report().report(id))
            .await
            .into_error()?
            .ok_or_else(|| DataError::NotFound.report())
    }

    pub async fn reports_by_user(&self, owner: UserId) -> Result<ReportList, DataError> {
        let reports = self
            .db_read(move |mut cmds| cmds.report().reports_by_owner(owner))
            .await
            .into_error()?;
        Ok(ReportList { reports })
    }

    pub async fn recent_reports(&self) -> Result<ReportList, DataError> {
        let reports = self
            .db_read(move |mut cmds| cmds.report().recent_reports(RECENT_REPORTS_LIMIT))
            .await
            .into_error()?;
        Ok(ReportList { reports })
    }

    /// Newest reports in all states for collectors.
    pub async fn collection_tasks(&self) -> Result<ReportList, DataError> {
        let reports = self
            .db_read(move |mut cmds| cmds.report().recent_reports(COLLECTION_TASKS_LIMIT))
            .await
            .into_error()?;
        Ok(ReportList { reports })
    }

    /// Pending reports without an active assignment. Listing for a vendor
    /// requires owning the active vendor. Listing without a vendor is
    /// for admins.
    pub async fn pending_complaints(
        &self,
        caller: &User,
        vendor: Option<VendorId>,
    ) -> Result<ReportList, DataError> {
        match vendor {
            None => require_admin(caller)?,
            Some(id) => {
                let vendor = self
                    .db_read(move |mut cmds| cmds.vendor().vendor(id))
                    .await
                    .into_error()?;
                let vendor = require_vendor_owner(vendor, caller.id)?;
                require_active_vendor(&vendor)?;
            }
        }

        let reports = self
            .db_read(move |mut cmds| cmds.report().pending_without_active_assignment())
            .await
            .into_error()?;
        Ok(ReportList { reports })
    }

    pub async fn collected_by_collector(
        &self,
        collector: UserId,
    ) -> Result<CollectedWasteList, DataError> {
        let collected = self
            .db_read(move |mut cmds| cmds.collected_waste().collected_by_user(collector))
            .await
            .into_error()?;
        Ok(CollectedWasteList { collected })
    }
}
