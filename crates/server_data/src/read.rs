//! Read operations which use the read connection pool.

use crate::db_manager::RouterDatabaseReadHandle;

pub mod assignment;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod user;
pub mod vendor;

impl RouterDatabaseReadHandle {
    pub fn report(&self) -> report::ReadCommandsReport<'_> {
        report::ReadCommandsReport::new(self)
    }

    pub fn assignment(&self) -> assignment::ReadCommandsAssignment<'_> {
        assignment::ReadCommandsAssignment::new(self)
    }

    pub fn ledger(&self) -> ledger::ReadCommandsLedger<'_> {
        ledger::ReadCommandsLedger::new(self)
    }

    pub fn vendor(&self) -> vendor::ReadCommandsVendor<'_> {
        vendor::ReadCommandsVendor::new(self)
    }

    pub fn user(&self) -> user::ReadCommandsUser<'_> {
        user::ReadCommandsUser::new(self)
    }

    pub fn notification(&self) -> notification::ReadCommandsNotification<'_> {
        notification::ReadCommandsNotification::new(self)
    }
}
