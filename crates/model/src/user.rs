use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{UnixTime, define_row_id, define_state_enum};

define_row_id!(
    /// Internal user ID.
    UserId
);

define_state_enum!(
    UserRole {
        User = 0,
        Admin = 1,
    }
);

impl UserRole {
    pub fn is_admin(&self) -> bool {
        *self == Self::Admin
    }
}

/// Name used when the identity provider does not have one.
pub const DEFAULT_USER_NAME: &str = "Anonymous User";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::user_account)]
#[diesel(check_for_backend(crate::Db))]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_unix_time: UnixTime,
}

/// Identity of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LeaderboardEntry {
    pub user_id: UserId,
    pub name: String,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}
