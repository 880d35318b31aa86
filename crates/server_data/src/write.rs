//! Write operations. Each operation is one database transaction.

use crate::db_manager::RouterDatabaseWriteHandle;

pub mod assignment;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod user;
pub mod vendor;

/// Owned write access which can be moved into a spawned task.
#[derive(Clone, Debug)]
pub struct WriteCmds {
    handle: RouterDatabaseWriteHandle,
}

impl WriteCmds {
    pub fn new(handle: RouterDatabaseWriteHandle) -> Self {
        Self { handle }
    }

    pub fn user(&self) -> user::WriteCommandsUser<'_> {
        user::WriteCommandsUser::new(&self.handle)
    }

    pub fn report(&self) -> report::WriteCommandsReport<'_> {
        report::WriteCommandsReport::new(&self.handle)
    }

    pub fn assignment(&self) -> assignment::WriteCommandsAssignment<'_> {
        assignment::WriteCommandsAssignment::new(&self.handle)
    }

    pub fn ledger(&self) -> ledger::WriteCommandsLedger<'_> {
        ledger::WriteCommandsLedger::new(&self.handle)
    }

    pub fn vendor(&self) -> vendor::WriteCommandsVendor<'_> {
        vendor::WriteCommandsVendor::new(&self.handle)
    }

    pub fn notification(&self) -> notification::WriteCommandsNotification<'_> {
        notification::WriteCommandsNotification::new(&self.handle)
    }
}
