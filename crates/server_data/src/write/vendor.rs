use model::{
    NewStaff, RegisterVendor, Staff, StaffId, UnixTime, User, UserId, Vendor, VendorId,
    VendorStatus,
};
use server_common::result::{Result, WrappedContextExt};
use tracing::info;

use super::user::get_or_create_user;
use crate::{
    DataError,
    access::{require_admin, require_own_vendor, required_text},
    db_transaction, define_cmd_wrapper_write,
};

define_cmd_wrapper_write!(WriteCommandsVendor);

impl WriteCommandsVendor<'_> {
    /// New vendors are inactive until an admin activates them. One user
    /// can register one vendor.
    pub async fn register(&self, owner: UserId, info: RegisterVendor) -> Result<Vendor, DataError> {
        let info = RegisterVendor {
            name: required_text(&info.name, "Name is required")?,
            email: required_text(&info.email, "Email is required")?,
            company: required_text(&info.company, "Company is required")?,
            id_number: required_text(&info.id_number, "ID number is required")?,
            license_number: required_text(&info.license_number, "License number is required")?,
            address: required_text(&info.address, "Address is required")?,
        };

        db_transaction!(self, move |mut cmds| {
            if !cmds.read().vendor().vendors_by_owner(owner)?.is_empty() {
                return Err(DataError::Conflict("Vendor is already registered").report());
            }
            let vendor = cmds
                .vendor()
                .insert_vendor(owner, &info, UnixTime::current_time())?;
            info!("Vendor {} registered", vendor.id);
            Ok(vendor)
        })
    }

    pub async fn update_status(
        &self,
        caller: &User,
        id: VendorId,
        status: VendorStatus,
    ) -> Result<Vendor, DataError> {
        require_admin(caller)?;
        db_transaction!(self, move |mut cmds| {
            cmds.vendor()
                .update_status(id, status)?
                .ok_or_else(|| DataError::NotFound.report())
        })
    }

    /// Add staff to the caller's vendor. The staff member collects using
    /// the user account which has the staff email.
    pub async fn create_staff(&self, caller: UserId, info: NewStaff) -> Result<Staff, DataError> {
        let info = NewStaff {
            name: required_text(&info.name, "Name is required")?,
            email: required_text(&info.email, "Email is required")?,
            phone: required_text(&info.phone, "Phone is required")?,
            role: required_text(&info.role, "Role is required")?,
        };
        let admin_email = self
            .config()
            .grant_admin_access_config()
            .map(|c| c.email.clone());

        db_transaction!(self, move |mut cmds| {
            let vendor = require_own_vendor(cmds.read().vendor().vendors_by_owner(caller)?)?;
            if cmds.read().vendor().staff_by_email(&info.email)?.is_some() {
                return Err(DataError::Conflict("Staff email is already in use").report());
            }
            let user = get_or_create_user(
                &mut cmds,
                &info.email,
                Some(&info.name),
                admin_email.as_deref(),
            )?;
            let staff =
                cmds.vendor()
                    .insert_staff(vendor.id, user.id, &info, UnixTime::current_time())?;
            Ok(staff)
        })
    }

    /// Staff referenced by assignments can not be removed.
    pub async fn delete_staff(&self, caller: UserId, id: StaffId) -> Result<(), DataError> {
        db_transaction!(self, move |mut cmds| {
            let vendor = require_own_vendor(cmds.read().vendor().vendors_by_owner(caller)?)?;
            if cmds.read().assignment().staff_has_assignments(id)? {
                return Err(DataError::Conflict("Staff member has assignments").report());
            }
            if cmds.vendor().delete_staff(id, vendor.id)? {
                Ok(())
            } else {
                Err(DataError::NotFound.report())
            }
        })
    }
}
