use diesel::{insert_into, prelude::*, update};
use error_stack::{Result, ResultExt};
use model::{Report, ReportId, ReportRaw, ReportStatus, UnixTime, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteReport);

pub struct NewReport<'a> {
    pub owner: UserId,
    pub location: &'a str,
    pub waste_type: &'a str,
    pub amount: &'a str,
    pub image_reference: Option<&'a str>,
    /// Classification JSON
    pub verification_result: Option<String>,
    pub time: UnixTime,
}

fn convert(raw: Option<ReportRaw>) -> Result<Option<Report>, DieselDatabaseError> {
    raw.map(|r| r.into_report())
        .transpose()
        .change_context(DieselDatabaseError::SerdeDeserialize)
}

impl CurrentWriteReport<'_> {
    pub fn insert_report(&mut self, new: NewReport<'_>) -> Result<Report, DieselDatabaseError> {
        use model::schema::report::dsl::*;

        let raw = insert_into(report)
            .values((
                owner_user_id.eq(new.owner),
                location.eq(new.location),
                waste_type.eq(new.waste_type),
                amount.eq(new.amount),
                image_reference.eq(new.image_reference),
                verification_result.eq(new.verification_result),
                status.eq(ReportStatus::Pending),
                created_unix_time.eq(new.time),
            ))
            .returning(ReportRaw::as_returning())
            .get_result(self.conn())
            .into_db_error(new.owner)?;

        raw.into_report()
            .change_context(DieselDatabaseError::SerdeDeserialize)
    }

    /// Moves a pending report to in progress and binds the collector.
    /// Returns `None` if the report was not pending.
    pub fn begin_collection_if_pending(
        &mut self,
        id_value: ReportId,
        collector: UserId,
    ) -> Result<Option<Report>, DieselDatabaseError> {
        use model::schema::report::dsl::*;

        let raw = update(report)
            .filter(id.eq(id_value))
            .filter(status.eq(ReportStatus::Pending))
            .set((
                status.eq(ReportStatus::InProgress),
                collector_user_id.eq(Some(collector)),
            ))
            .returning(ReportRaw::as_returning())
            .get_result(self.conn())
            .optional()
            .into_db_error((id_value, collector))?;

        convert(raw)
    }

    /// Returns `None` if the report is not in progress or the collector
    /// does not match.
    pub fn mark_verified_if_collector(
        &mut self,
        id_value: ReportId,
        collector: UserId,
    ) -> Result<Option<Report>, DieselDatabaseError> {
        use model::schema::report::dsl::*;

        let raw = update(report)
            .filter(id.eq(id_value))
            .filter(status.eq(ReportStatus::InProgress))
            .filter(collector_user_id.eq(collector))
            .set(status.eq(ReportStatus::Verified))
            .returning(ReportRaw::as_returning())
            .get_result(self.conn())
            .optional()
            .into_db_error((id_value, collector))?;

        convert(raw)
    }

    /// Rejected reports do not have a collector.
    pub fn mark_rejected_if_collector(
        &mut self,
        id_value: ReportId,
        collector: UserId,
    ) -> Result<Option<Report>, DieselDatabaseError> {
        use model::schema::report::dsl::*;

        let raw = update(report)
            .filter(id.eq(id_value))
            .filter(status.eq(ReportStatus::InProgress))
            .filter(collector_user_id.eq(collector))
            .set((
                status.eq(ReportStatus::Rejected),
                collector_user_id.eq(None::<UserId>),
            ))
            .returning(ReportRaw::as_returning())
            .get_result(self.conn())
            .optional()
            .into_db_error((id_value, collector))?;

        convert(raw)
    }

    pub fn reopen_if_rejected(
        &mut self,
        id_value: ReportId,
    ) -> Result<Option<Report>, DieselDatabaseError> {
        use model::schema::report::dsl::*;

        let raw = update(report)
            .filter(id.eq(id_value))
            .filter(status.eq(ReportStatus::Rejected))
            .set(status.eq(ReportStatus::Pending))
            .returning(ReportRaw::as_returning())
            .get_result(self.conn())
            .optional()
            .into_db_error(id_value)?;

        convert(raw)
    }
}
