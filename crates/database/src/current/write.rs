use crate::DieselConnection;

pub mod assignment;
pub mod collected_waste;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod user;
pub mod vendor;

pub struct CurrentWriteCommands<'a> {
    conn: &'a mut DieselConnection,
}

impl<'a> CurrentWriteCommands<'a> {
    pub fn new(conn: &'a mut DieselConnection) -> Self {
        Self { conn }
    }

    pub fn read(&mut self) -> crate::current::read::CurrentReadCommands<'_> {
        crate::current::read::CurrentReadCommands::new(self.conn)
    }

    pub fn user(&mut self) -> user::CurrentWriteUser<'_> {
        user::CurrentWriteUser::new(self.conn)
    }

    pub fn report(&mut self) -> report::CurrentWriteReport<'_> {
        report::CurrentWriteReport::new(self.conn)
    }

    pub fn assignment(&mut self) -> assignment::CurrentWriteAssignment<'_> {
        assignment::CurrentWriteAssignment::new(self.conn)
    }

    pub fn vendor(&mut self) -> vendor::CurrentWriteVendor<'_> {
        vendor::CurrentWriteVendor::new(self.conn)
    }

    pub fn ledger(&mut self) -> ledger::CurrentWriteLedger<'_> {
        ledger::CurrentWriteLedger::new(self.conn)
    }

    pub fn notification(&mut self) -> notification::CurrentWriteNotification<'_> {
        notification::CurrentWriteNotification::new(self.conn)
    }

    pub fn collected_waste(&mut self) -> collected_waste::CurrentWriteCollectedWaste<'_> {
        collected_waste::CurrentWriteCollectedWaste::new(self.conn)
    }
}
