use crate::DieselConnection;

pub mod assignment;
pub mod collected_waste;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod user;
pub mod vendor;

pub struct CurrentReadCommands<'a> {
    conn: &'a mut DieselConnection,
}

impl<'a> CurrentReadCommands<'a> {
    pub fn new(conn: &'a mut DieselConnection) -> Self {
        Self { conn }
    }

    pub fn user(&mut self) -> user::CurrentReadUser<'_> {
        user::CurrentReadUser::new(self.conn)
    }

    pub fn report(&mut self) -> report::CurrentReadReport<'_> {
        report::CurrentReadReport::new(self.conn)
    }

    pub fn assignment(&mut self) -> assignment::CurrentReadAssignment<'_> {
        assignment::CurrentReadAssignment::new(self.conn)
    }

    pub fn vendor(&mut self) -> vendor::CurrentReadVendor<'_> {
        vendor::CurrentReadVendor::new(self.conn)
    }

    pub fn ledger(&mut self) -> ledger::CurrentReadLedger<'_> {
        ledger::CurrentReadLedger::new(self.conn)
    }

    pub fn notification(&mut self) -> notification::CurrentReadNotification<'_> {
        notification::CurrentReadNotification::new(self.conn)
    }

    pub fn collected_waste(&mut self) -> collected_waste::CurrentReadCollectedWaste<'_> {
        collected_waste::CurrentReadCollectedWaste::new(self.conn)
    }
}
