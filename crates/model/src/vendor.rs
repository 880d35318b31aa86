use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{UnixTime, UserId, define_row_id, define_state_enum};

define_row_id!(VendorId);
define_row_id!(StaffId);

define_state_enum!(
    /// New vendors are inactive until an admin activates them.
    VendorStatus {
        Inactive = 0,
        Active = 1,
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vendor)]
#[diesel(check_for_backend(crate::Db))]
pub struct Vendor {
    pub id: VendorId,
    pub owner_user_id: UserId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub id_number: String,
    pub license_number: String,
    pub address: String,
    pub status: VendorStatus,
    pub created_unix_time: UnixTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegisterVendor {
    pub name: String,
    pub email: String,
    pub company: String,
    pub id_number: String,
    pub license_number: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct VendorList {
    pub vendors: Vec<Vendor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateVendorStatus {
    pub status: VendorStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::staff)]
#[diesel(check_for_backend(crate::Db))]
pub struct Staff {
    pub id: StaffId,
    pub vendor_id: VendorId,
    /// Account which the staff member uses when collecting.
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub created_unix_time: UnixTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NewStaff {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StaffList {
    pub staff: Vec<Staff>,
}
