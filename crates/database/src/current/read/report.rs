use diesel::prelude::*;
use error_stack::{Result, ResultExt};
use model::{AssignmentStatus, Report, ReportId, ReportRaw, ReportStatus, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadReport);

fn into_reports(raw: Vec<ReportRaw>) -> Result<Vec<Report>, DieselDatabaseError> {
    raw.into_iter()
        .map(|r| {
            r.into_report()
                .change_context(DieselDatabaseError::SerdeDeserialize)
        })
        .collect()
}

impl CurrentReadReport<'_> {
    pub fn report(&mut self, id: ReportId) -> Result<Option<Report>, DieselDatabaseError> {
        use model::schema::report::dsl;

        let raw = dsl::report
            .filter(dsl::id.eq(id))
            .select(ReportRaw::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)?;

        raw.map(|r| r.into_report())
            .transpose()
            .change_context(DieselDatabaseError::SerdeDeserialize)
    }

    /// Newest first
    pub fn reports_by_owner(&mut self, owner: UserId) -> Result<Vec<Report>, DieselDatabaseError> {
        use model::schema::report::dsl;

        let raw = dsl::report
            .filter(dsl::owner_user_id.eq(owner))
            .order((dsl::created_unix_time.desc(), dsl::id.desc()))
            .select(ReportRaw::as_select())
            .load(self.conn())
            .into_db_error(owner)?;

        into_reports(raw)
    }

    /// Newest first
    pub fn recent_reports(&mut self, limit: i64) -> Result<Vec<Report>, DieselDatabaseError> {
        use model::schema::report::dsl;

        let raw = dsl::report
            .order((dsl::created_unix_time.desc(), dsl::id.desc()))
            .limit(limit)
            .select(ReportRaw::as_select())
            .load(self.conn())
            .into_db_error(())?;

        into_reports(raw)
    }

    /// Pending reports which do not have an active assignment.
    /// Oldest first.
    pub fn pending_without_active_assignment(
        &mut self,
    ) -> Result<Vec<Report>, DieselDatabaseError> {
        use model::schema::{assignment, report::dsl};

        let actively_assigned = assignment::table
            .filter(assignment::status.eq(AssignmentStatus::Assigned))
            .select(assignment::report_id);

        let raw = dsl::report
            .filter(dsl::status.eq(ReportStatus::Pending))
            .filter(dsl::id.ne_all(actively_assigned))
            .order((dsl::created_unix_time.asc(), dsl::id.asc()))
            .select(ReportRaw::as_select())
            .load(self.conn())
            .into_db_error(())?;

        into_reports(raw)
    }
}
