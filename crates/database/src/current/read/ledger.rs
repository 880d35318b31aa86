use diesel::prelude::*;
use error_stack::Result;
use model::{LedgerTransaction, ReportId, Reward, RewardId, TransactionKind, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadLedger);

impl CurrentReadLedger<'_> {
    pub fn transaction_amounts(
        &mut self,
        user: UserId,
    ) -> Result<Vec<(TransactionKind, i64)>, DieselDatabaseError> {
        use model::schema::ledger_transaction::dsl;

        dsl::ledger_transaction
            .filter(dsl::user_id.eq(user))
            .select((dsl::kind, dsl::amount))
            .load(self.conn())
            .into_db_error(user)
    }

    pub fn all_transaction_amounts(
        &mut self,
    ) -> Result<Vec<(UserId, TransactionKind, i64)>, DieselDatabaseError> {
        use model::schema::ledger_transaction::dsl;

        dsl::ledger_transaction
            .select((dsl::user_id, dsl::kind, dsl::amount))
            .load(self.conn())
            .into_db_error(())
    }

    /// Newest first
    pub fn transaction_history(
        &mut self,
        user: UserId,
        limit: i64,
    ) -> Result<Vec<LedgerTransaction>, DieselDatabaseError> {
        use model::schema::ledger_transaction::dsl;

        dsl::ledger_transaction
            .filter(dsl::user_id.eq(user))
            .order((dsl::created_unix_time.desc(), dsl::id.desc()))
            .limit(limit)
            .select(LedgerTransaction::as_select())
            .load(self.conn())
            .into_db_error(user)
    }

    pub fn collect_transaction_count(
        &mut self,
        report: ReportId,
    ) -> Result<i64, DieselDatabaseError> {
        use model::schema::ledger_transaction::dsl;

        dsl::ledger_transaction
            .filter(dsl::report_id.eq(report))
            .filter(dsl::kind.eq(TransactionKind::EarnedCollect))
            .count()
            .get_result(self.conn())
            .into_db_error(report)
    }

    pub fn reward(&mut self, id: RewardId) -> Result<Option<Reward>, DieselDatabaseError> {
        use model::schema::reward::dsl;

        dsl::reward
            .filter(dsl::id.eq(id))
            .select(Reward::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    /// Cheapest first
    pub fn available_rewards(&mut self) -> Result<Vec<Reward>, DieselDatabaseError> {
        use model::schema::reward::dsl;

        dsl::reward
            .filter(dsl::is_available.eq(true))
            .order((dsl::cost.asc(), dsl::id.asc()))
            .select(Reward::as_select())
            .load(self.conn())
            .into_db_error(())
    }
}
