//! Balance derivation from the transaction log.

use std::collections::HashMap;

use model::{AvailableReward, LeaderboardEntry, RewardId, TransactionKind, UserId};

/// Reward list entry which represents the point balance.
pub const POINTS_PSEUDO_REWARD_ID: RewardId = RewardId(0);

pub const TRANSACTION_HISTORY_LIMIT: i64 = 10;

/// Sum of earned amounts minus sum of redeemed amounts. The result is
/// never negative.
pub fn balance<I: IntoIterator<Item = (TransactionKind, i64)>>(transactions: I) -> i64 {
    let total = transactions
        .into_iter()
        .fold(0i64, |total, (kind, amount)| {
            if kind.is_earned() {
                total.saturating_add(amount)
            } else {
                total.saturating_sub(amount)
            }
        });
    total.max(0)
}

pub fn points_pseudo_reward(balance: i64) -> AvailableReward {
    AvailableReward {
        id: POINTS_PSEUDO_REWARD_ID,
        name: "Your Points".to_string(),
        cost: balance,
        description: "Redeem your earned points".to_string(),
        collection_info: "Points earned from reporting and collecting waste".to_string(),
    }
}

/// Users ordered by balance. Users without transactions are included
/// with zero points. Ties are ordered by user ID.
pub fn leaderboard(
    users: Vec<(UserId, String)>,
    transactions: Vec<(UserId, TransactionKind, i64)>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut per_user: HashMap<UserId, Vec<(TransactionKind, i64)>> = HashMap::new();
    for (user, kind, amount) in transactions {
        per_user.entry(user).or_default().push((kind, amount));
    }

    let mut entries: Vec<LeaderboardEntry> = users
        .into_iter()
        .map(|(user_id, name)| LeaderboardEntry {
            user_id,
            name,
            points: per_user.remove(&user_id).map(balance).unwrap_or(0),
        })
        .collect();

    entries.sort_by(|a, b| b.points.cmp(&a.points).then(a.user_id.cmp(&b.user_id)));
    entries.truncate(limit);
    entries
}
