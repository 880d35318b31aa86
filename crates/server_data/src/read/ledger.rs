use model::{AvailableReward, AvailableRewardList, Leaderboard, PointBalance, TransactionList, UserId};
use server_common::result::Result;

use crate::{
    DataError, IntoDataError, define_cmd_wrapper_read,
    ledger::{TRANSACTION_HISTORY_LIMIT, balance, leaderboard, points_pseudo_reward},
};

pub const LEADERBOARD_LIMIT_MAX: usize = 100;

define_cmd_wrapper_read!(ReadCommandsLedger);

impl ReadCommandsLedger<'_> {
    pub async fn balance(&self, user: UserId) -> Result<PointBalance, DataError> {
        let amounts = self
            .db_read(move |mut cmds| cmds.ledger().transaction_amounts(user))
            .await
            .into_error()?;
        Ok(PointBalance {
            points: balance(amounts),
        })
    }

    pub async fn transaction_history(&self, user: UserId) -> Result<TransactionList, DataError> {
        let transactions = self
            .db_read(move |mut cmds| {
                cmds.ledger()
                    .transaction_history(user, TRANSACTION_HISTORY_LIMIT)
            })
            .await
            .into_error()?;
        Ok(TransactionList { transactions })
    }

    /// The user's point balance as the first entry and then the catalog
    /// rewards which are still available.
    pub async fn available_rewards(&self, user: UserId) -> Result<AvailableRewardList, DataError> {
        let (amounts, catalog) = self
            .db_read(move |mut cmds| {
                let amounts = cmds.ledger().transaction_amounts(user)?;
                let catalog = cmds.ledger().available_rewards()?;
                Ok((amounts, catalog))
            })
            .await
            .into_error()?;

        let mut rewards = vec![points_pseudo_reward(balance(amounts))];
        rewards.extend(catalog.into_iter().map(AvailableReward::from));
        Ok(AvailableRewardList { rewards })
    }

    pub async fn leaderboard(&self, limit: usize) -> Result<Leaderboard, DataError> {
        let (users, transactions) = self
            .db_read(move |mut cmds| {
                let users = cmds.user().user_names()?;
                let transactions = cmds.ledger().all_transaction_amounts()?;
                Ok((users, transactions))
            })
            .await
            .into_error()?;
        Ok(Leaderboard {
            entries: leaderboard(users, transactions, limit.min(LEADERBOARD_LIMIT_MAX)),
        })
    }
}
