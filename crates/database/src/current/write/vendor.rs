use diesel::{delete, insert_into, prelude::*, update};
use error_stack::Result;
use model::{
    NewStaff, RegisterVendor, Staff, StaffId, UnixTime, UserId, Vendor, VendorId, VendorStatus,
};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteVendor);

impl CurrentWriteVendor<'_> {
    /// New vendors are inactive.
    pub fn insert_vendor(
        &mut self,
        owner: UserId,
        info: &RegisterVendor,
        time: UnixTime,
    ) -> Result<Vendor, DieselDatabaseError> {
        use model::schema::vendor::dsl::*;

        insert_into(vendor)
            .values((
                owner_user_id.eq(owner),
                name.eq(&info.name),
                email.eq(&info.email),
                company.eq(&info.company),
                id_number.eq(&info.id_number),
                license_number.eq(&info.license_number),
                address.eq(&info.address),
                status.eq(VendorStatus::Inactive),
                created_unix_time.eq(time),
            ))
            .returning(Vendor::as_returning())
            .get_result(self.conn())
            .into_db_error(owner)
    }

    pub fn update_status(
        &mut self,
        id_value: VendorId,
        status_value: VendorStatus,
    ) -> Result<Option<Vendor>, DieselDatabaseError> {
        use model::schema::vendor::dsl::*;

        update(vendor.find(id_value))
            .set(status.eq(status_value))
            .returning(Vendor::as_returning())
            .get_result(self.conn())
            .optional()
            .into_db_error((id_value, status_value))
    }

    pub fn insert_staff(
        &mut self,
        vendor: VendorId,
        user: UserId,
        info: &NewStaff,
        time: UnixTime,
    ) -> Result<Staff, DieselDatabaseError> {
        use model::schema::staff::dsl::*;

        insert_into(staff)
            .values((
                vendor_id.eq(vendor),
                user_id.eq(user),
                name.eq(&info.name),
                email.eq(&info.email),
                phone.eq(&info.phone),
                role.eq(&info.role),
                created_unix_time.eq(time),
            ))
            .returning(Staff::as_returning())
            .get_result(self.conn())
            .into_db_error((vendor, user))
    }

    /// Returns `true` if the staff record was deleted.
    pub fn delete_staff(
        &mut self,
        id_value: StaffId,
        vendor: VendorId,
    ) -> Result<bool, DieselDatabaseError> {
        use model::schema::staff::dsl::*;

        let deleted = delete(staff)
            .filter(id.eq(id_value))
            .filter(vendor_id.eq(vendor))
            .execute(self.conn())
            .into_db_error((id_value, vendor))?;

        Ok(deleted > 0)
    }
}
