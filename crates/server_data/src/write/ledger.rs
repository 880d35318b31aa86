use database::current::write::ledger::NewTransaction;
use model::{
    NewReward, PointBalance, RedeemResult, Reward, RewardId, TransactionKind, UnixTime, User,
    UserId,
};
use server_common::result::{Result, WrappedContextExt};
use tracing::info;

use crate::{
    DataError,
    access::{require_admin, required_text},
    db_transaction, define_cmd_wrapper_write,
    ledger::{POINTS_PSEUDO_REWARD_ID, balance},
};

define_cmd_wrapper_write!(WriteCommandsLedger);

impl WriteCommandsLedger<'_> {
    /// Spend points for a catalog reward. Each reward can be redeemed
    /// only once.
    pub async fn redeem(&self, user: UserId, reward_id: RewardId) -> Result<RedeemResult, DataError> {
        if reward_id == POINTS_PSEUDO_REWARD_ID {
            return Err(DataError::NotFound.report());
        }

        db_transaction!(self, move |mut cmds| {
            let reward = cmds
                .read()
                .ledger()
                .reward(reward_id)?
                .ok_or_else(|| DataError::NotFound.report())?;
            if !reward.is_available {
                return Err(DataError::Conflict("Reward is no longer available").report());
            }

            let current = balance(cmds.read().ledger().transaction_amounts(user)?);
            if current < reward.cost {
                return Err(DataError::InsufficientPoints.report());
            }

            if !cmds
                .ledger()
                .mark_reward_unavailable_if_available(reward_id)?
            {
                return Err(DataError::Conflict("Reward is no longer available").report());
            }

            let transaction = cmds.ledger().insert_transaction(NewTransaction {
                user,
                kind: TransactionKind::Redeemed,
                amount: reward.cost,
                description: &format!("Redeemed reward ID {}", reward_id),
                report: None,
                time: UnixTime::current_time(),
            })?;

            info!("Reward {} redeemed", reward_id);

            Ok(RedeemResult {
                transaction,
                balance: PointBalance {
                    points: current - reward.cost,
                },
            })
        })
    }

    pub async fn create_reward(&self, caller: &User, info: NewReward) -> Result<Reward, DataError> {
        require_admin(caller)?;
        let info = NewReward {
            name: required_text(&info.name, "Reward name is required")?,
            description: info.description.trim().to_string(),
            collection_info: info.collection_info.trim().to_string(),
            cost: info.cost,
        };
        if info.cost < 0 {
            return Err(DataError::Validation("Reward cost must not be negative").report());
        }

        db_transaction!(self, move |mut cmds| {
            let reward = cmds
                .ledger()
                .insert_reward(&info, UnixTime::current_time())?;
            Ok(reward)
        })
    }
}
