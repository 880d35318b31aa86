use diesel::{insert_into, prelude::*};
use error_stack::Result;
use model::{CollectedWaste, CollectedWasteStatus, ReportId, UnixTime, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteCollectedWaste);

impl CurrentWriteCollectedWaste<'_> {
    pub fn insert_collected_waste(
        &mut self,
        report: ReportId,
        collector: UserId,
        status_value: CollectedWasteStatus,
        verification_json: &str,
        time: UnixTime,
    ) -> Result<CollectedWaste, DieselDatabaseError> {
        use model::schema::collected_waste::dsl::*;

        insert_into(collected_waste)
            .values((
                report_id.eq(report),
                collector_user_id.eq(collector),
                collected_unix_time.eq(time),
                status.eq(status_value),
                verification_result.eq(verification_json),
            ))
            .returning(CollectedWaste::as_returning())
            .get_result(self.conn())
            .into_db_error((report, collector, status_value))
    }
}
