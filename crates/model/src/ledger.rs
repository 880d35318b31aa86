use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{ReportId, UnixTime, UserId, define_row_id, define_state_enum};

define_row_id!(TransactionId);
define_row_id!(RewardId);

define_state_enum!(
    TransactionKind {
        EarnedReport = 0,
        EarnedCollect = 1,
        Redeemed = 2,
    }
);

impl TransactionKind {
    pub fn is_earned(&self) -> bool {
        matches!(self, Self::EarnedReport | Self::EarnedCollect)
    }
}

/// Append-only point ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::ledger_transaction)]
#[diesel(check_for_backend(crate::Db))]
pub struct LedgerTransaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    /// Set for rows created from report state transitions.
    pub report_id: Option<ReportId>,
    pub created_unix_time: UnixTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TransactionList {
    pub transactions: Vec<LedgerTransaction>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PointBalance {
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reward)]
#[diesel(check_for_backend(crate::Db))]
pub struct Reward {
    pub id: RewardId,
    pub name: String,
    pub cost: i64,
    pub description: String,
    pub collection_info: String,
    pub is_available: bool,
    pub created_unix_time: UnixTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NewReward {
    pub name: String,
    pub cost: i64,
    pub description: String,
    pub collection_info: String,
}

/// Reward list entry. The first entry is the user's own point balance.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AvailableReward {
    pub id: RewardId,
    pub name: String,
    pub cost: i64,
    pub description: String,
    pub collection_info: String,
}

impl From<Reward> for AvailableReward {
    fn from(value: Reward) -> Self {
        Self {
            id: value.id,
            name: value.name,
            cost: value.cost,
            description: value.description,
            collection_info: value.collection_info,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AvailableRewardList {
    pub rewards: Vec<AvailableReward>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RedeemReward {
    pub reward_id: RewardId,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RedeemResult {
    pub transaction: LedgerTransaction,
    pub balance: PointBalance,
}
