use diesel::{insert_into, prelude::*, update};
use error_stack::Result;
use model::{
    LedgerTransaction, NewReward, ReportId, Reward, RewardId, TransactionKind, UnixTime, UserId,
};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteLedger);

pub struct NewTransaction<'a> {
    pub user: UserId,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: &'a str,
    pub report: Option<ReportId>,
    pub time: UnixTime,
}

impl CurrentWriteLedger<'_> {
    pub fn insert_transaction(
        &mut self,
        new: NewTransaction<'_>,
    ) -> Result<LedgerTransaction, DieselDatabaseError> {
        use model::schema::ledger_transaction::dsl::*;

        insert_into(ledger_transaction)
            .values((
                user_id.eq(new.user),
                kind.eq(new.kind),
                amount.eq(new.amount),
                description.eq(new.description),
                report_id.eq(new.report),
                created_unix_time.eq(new.time),
            ))
            .returning(LedgerTransaction::as_returning())
            .get_result(self.conn())
            .into_db_error((new.user, new.kind))
    }

    /// Returns `false` if the reward was already unavailable or missing.
    pub fn mark_reward_unavailable_if_available(
        &mut self,
        id_value: RewardId,
    ) -> Result<bool, DieselDatabaseError> {
        use model::schema::reward::dsl::*;

        let updated = update(reward)
            .filter(id.eq(id_value))
            .filter(is_available.eq(true))
            .set(is_available.eq(false))
            .execute(self.conn())
            .into_db_error(id_value)?;

        Ok(updated > 0)
    }

    pub fn insert_reward(
        &mut self,
        info: &NewReward,
        time: UnixTime,
    ) -> Result<Reward, DieselDatabaseError> {
        use model::schema::reward::dsl::*;

        insert_into(reward)
            .values((
                name.eq(&info.name),
                cost.eq(info.cost),
                description.eq(&info.description),
                collection_info.eq(&info.collection_info),
                is_available.eq(true),
                created_unix_time.eq(time),
            ))
            .returning(Reward::as_returning())
            .get_result(self.conn())
            .into_db_error(())
    }
}
