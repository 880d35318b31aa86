use diesel::prelude::*;
use error_stack::Result;
use model::{CollectedWaste, ReportId, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadCollectedWaste);

impl CurrentReadCollectedWaste<'_> {
    /// Newest first
    pub fn collected_by_user(
        &mut self,
        collector: UserId,
    ) -> Result<Vec<CollectedWaste>, DieselDatabaseError> {
        use model::schema::collected_waste::dsl;

        dsl::collected_waste
            .filter(dsl::collector_user_id.eq(collector))
            .order((dsl::collected_unix_time.desc(), dsl::id.desc()))
            .select(CollectedWaste::as_select())
            .load(self.conn())
            .into_db_error(collector)
    }

    pub fn collected_for_report(
        &mut self,
        report: ReportId,
    ) -> Result<Vec<CollectedWaste>, DieselDatabaseError> {
        use model::schema::collected_waste::dsl;

        dsl::collected_waste
            .filter(dsl::report_id.eq(report))
            .order(dsl::id.asc())
            .select(CollectedWaste::as_select())
            .load(self.conn())
            .into_db_error(report)
    }
}
