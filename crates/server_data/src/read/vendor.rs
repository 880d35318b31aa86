use model::{StaffList, User, UserId, Vendor, VendorList};
use server_common::result::{Result, WrappedContextExt};

use crate::{
    DataError, IntoDataError,
    access::{require_admin, require_own_vendor},
    define_cmd_wrapper_read,
};

define_cmd_wrapper_read!(ReadCommandsVendor);

impl ReadCommandsVendor<'_> {
    pub async fn vendor_for_user(&self, user: UserId) -> Result<Vendor, DataError> {
        self.db_read(move |mut cmds| cmds.vendor().vendors_by_owner(user))
            .await
            .into_error()?
            .into_iter()
            .next()
            .ok_or_else(|| DataError::NotFound.report())
    }

    pub async fn list_vendors(&self, caller: &User) -> Result<VendorList, DataError> {
        require_admin(caller)?;
        let vendors = self
            .db_read(move |mut cmds| cmds.vendor().all_vendors())
            .await
            .into_error()?;
        Ok(VendorList { vendors })
    }

    pub async fn list_staff(&self, caller: UserId) -> Result<StaffList, DataError> {
        let vendors = self
            .db_read(move |mut cmds| cmds.vendor().vendors_by_owner(caller))
            .await
            .into_error()?;
        let vendor = require_own_vendor(vendors)?;
        let staff = self
            .db_read(move |mut cmds| cmds.vendor().staff_by_vendor(vendor.id))
            .await
            .into_error()?;
        Ok(StaffList { staff })
    }
}
