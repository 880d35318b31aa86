use diesel::prelude::*;
use error_stack::Result;
use model::{Staff, StaffId, UserId, Vendor, VendorId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadVendor);

impl CurrentReadVendor<'_> {
    pub fn vendor(&mut self, id: VendorId) -> Result<Option<Vendor>, DieselDatabaseError> {
        use model::schema::vendor::dsl;

        dsl::vendor
            .filter(dsl::id.eq(id))
            .select(Vendor::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    pub fn vendors_by_owner(&mut self, owner: UserId) -> Result<Vec<Vendor>, DieselDatabaseError> {
        use model::schema::vendor::dsl;

        dsl::vendor
            .filter(dsl::owner_user_id.eq(owner))
            .order(dsl::id.asc())
            .select(Vendor::as_select())
            .load(self.conn())
            .into_db_error(owner)
    }

    pub fn all_vendors(&mut self) -> Result<Vec<Vendor>, DieselDatabaseError> {
        use model::schema::vendor::dsl;

        dsl::vendor
            .order(dsl::id.asc())
            .select(Vendor::as_select())
            .load(self.conn())
            .into_db_error(())
    }

    pub fn staff(&mut self, id: StaffId) -> Result<Option<Staff>, DieselDatabaseError> {
        use model::schema::staff::dsl;

        dsl::staff
            .filter(dsl::id.eq(id))
            .select(Staff::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    pub fn staff_by_vendor(&mut self, vendor: VendorId) -> Result<Vec<Staff>, DieselDatabaseError> {
        use model::schema::staff::dsl;

        dsl::staff
            .filter(dsl::vendor_id.eq(vendor))
            .order(dsl::id.asc())
            .select(Staff::as_select())
            .load(self.conn())
            .into_db_error(vendor)
    }

    pub fn staff_by_email(&mut self, email: &str) -> Result<Option<Staff>, DieselDatabaseError> {
        use model::schema::staff::dsl;

        dsl::staff
            .filter(dsl::email.eq(email))
            .select(Staff::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(())
    }
}
