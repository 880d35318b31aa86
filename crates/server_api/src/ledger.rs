use axum::{
    Extension,
    extract::{Query, State},
};
use model::{
    AvailableRewardList, Leaderboard, PointBalance, RedeemResult, RedeemReward, TransactionList,
    User,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;

use crate::{
    app::ApiState,
    create_open_api_router, db_write,
    utils::{ApiError, Json},
};

const LEADERBOARD_LIMIT_DEFAULT: usize = 10;

const PATH_GET_BALANCE: &str = "/api/v1/ledger/balance";

/// Point balance derived from the transaction log.
#[utoipa::path(
    get,
    path = PATH_GET_BALANCE,
    responses(
        (status = 200, description = "Success.", body = PointBalance),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_balance<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<PointBalance>, ApiError> {
    let r = state.read().ledger().balance(user.id).await?;
    Ok(r.into())
}

const PATH_GET_TRANSACTIONS: &str = "/api/v1/ledger/transactions";

/// Latest transactions. Newest first.
#[utoipa::path(
    get,
    path = PATH_GET_TRANSACTIONS,
    responses(
        (status = 200, description = "Success.", body = TransactionList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_transactions<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<TransactionList>, ApiError> {
    let r = state.read().ledger().transaction_history(user.id).await?;
    Ok(r.into())
}

const PATH_GET_REWARDS: &str = "/api/v1/ledger/rewards";

/// The first entry is the current point balance. Other entries are
/// available catalog rewards.
#[utoipa::path(
    get,
    path = PATH_GET_REWARDS,
    responses(
        (status = 200, description = "Success.", body = AvailableRewardList),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_rewards<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
) -> Result<Json<AvailableRewardList>, ApiError> {
    let r = state.read().ledger().available_rewards(user.id).await?;
    Ok(r.into())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

const PATH_GET_LEADERBOARD: &str = "/api/v1/ledger/leaderboard";

#[utoipa::path(
    get,
    path = PATH_GET_LEADERBOARD,
    params(LeaderboardQuery),
    responses(
        (status = 200, description = "Success.", body = Leaderboard),
        (status = 401, description = "Unauthorized."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn get_leaderboard<S: ApiState>(
    State(state): State<S>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Leaderboard>, ApiError> {
    let r = state
        .read()
        .ledger()
        .leaderboard(query.limit.unwrap_or(LEADERBOARD_LIMIT_DEFAULT))
        .await?;
    Ok(r.into())
}

const PATH_POST_REDEEM: &str = "/api/v1/ledger/redeem";

#[utoipa::path(
    post,
    path = PATH_POST_REDEEM,
    request_body = RedeemReward,
    responses(
        (status = 200, description = "Success.", body = RedeemResult),
        (status = 401, description = "Unauthorized."),
        (status = 402, description = "Not enough points."),
        (status = 404, description = "Reward not found."),
        (status = 409, description = "Reward is no longer available."),
        (status = 500, description = "Internal server error."),
    ),
    security(("user_email" = [])),
)]
pub async fn post_redeem<S: ApiState>(
    State(state): State<S>,
    Extension(user): Extension<User>,
    Json(info): Json<RedeemReward>,
) -> Result<Json<RedeemResult>, ApiError> {
    let r = db_write!(state, move |cmds| cmds
        .ledger()
        .redeem(user.id, info.reward_id))?;
    Ok(r.into())
}

pub fn router_ledger<S: ApiState>() -> OpenApiRouter<S> {
    create_open_api_router!(
        S,
        get_balance,
        get_transactions,
        get_rewards,
        get_leaderboard,
        post_redeem,
    )
}
