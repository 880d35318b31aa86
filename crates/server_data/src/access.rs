//! Permission checks shared by read and write operations.

use model::{User, UserId, Vendor, VendorStatus};
use server_common::result::{Result, WrappedContextExt};
use simple_backend_utils::text::trimmed_non_empty;

use crate::DataError;

pub fn require_admin(user: &User) -> Result<(), DataError> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(DataError::NotAllowed.report())
    }
}

/// Vendor must exist and the user must own it.
pub fn require_vendor_owner(vendor: Option<Vendor>, user: UserId) -> Result<Vendor, DataError> {
    match vendor {
        None => Err(DataError::NotFound.report()),
        Some(v) if v.owner_user_id != user => Err(DataError::NotAllowed.report()),
        Some(v) => Ok(v),
    }
}

pub fn require_active_vendor(vendor: &Vendor) -> Result<(), DataError> {
    if vendor.status == VendorStatus::Active {
        Ok(())
    } else {
        Err(DataError::NotAllowed.report())
    }
}

/// The vendor which the user has registered. Users without a vendor
/// are not allowed to do vendor operations.
pub fn require_own_vendor(vendors: Vec<Vendor>) -> Result<Vendor, DataError> {
    vendors
        .into_iter()
        .next()
        .ok_or_else(|| DataError::NotAllowed.report())
}

/// Trimmed text or [DataError::Validation] with `message`.
pub fn required_text(value: &str, message: &'static str) -> Result<String, DataError> {
    trimmed_non_empty(value).ok_or_else(|| DataError::Validation(message).report())
}

#[cfg(test)]
mod tests {
    use model::{UnixTime, UserRole, VendorId};

    use super::*;

    fn vendor(owner: i64, status: VendorStatus) -> Vendor {
        Vendor {
            id: VendorId::new(1),
            owner_user_id: UserId::new(owner),
            name: "Vendor".into(),
            email: "vendor@example.com".into(),
            company: "Company".into(),
            id_number: "1".into(),
            license_number: "2".into(),
            address: "Street 1".into(),
            status,
            created_unix_time: UnixTime::new(0),
        }
    }

    #[test]
    fn only_owner_passes_vendor_check() {
        let v = vendor(1, VendorStatus::Active);
        assert!(require_vendor_owner(Some(v.clone()), UserId::new(1)).is_ok());
        let e = require_vendor_owner(Some(v), UserId::new(2)).unwrap_err();
        assert_eq!(*e.current_context(), DataError::NotAllowed);
        let e = require_vendor_owner(None, UserId::new(1)).unwrap_err();
        assert_eq!(*e.current_context(), DataError::NotFound);
    }

    #[test]
    fn inactive_vendor_is_not_allowed() {
        assert!(require_active_vendor(&vendor(1, VendorStatus::Inactive)).is_err());
        assert!(require_active_vendor(&vendor(1, VendorStatus::Active)).is_ok());
    }

    #[test]
    fn admin_check_uses_role() {
        let mut user = User {
            id: UserId::new(1),
            email: "a@example.com".into(),
            name: "A".into(),
            role: UserRole::User,
            created_unix_time: UnixTime::new(0),
        };
        assert!(require_admin(&user).is_err());
        user.role = UserRole::Admin;
        assert!(require_admin(&user).is_ok());
    }

    #[test]
    fn blank_text_is_a_validation_error() {
        let e = required_text("  ", "Location is required").unwrap_err();
        assert_eq!(
            *e.current_context(),
            DataError::Validation("Location is required")
        );
        assert_eq!(required_text(" park ", "x").unwrap(), "park");
    }
}
