use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{UnixTime, UserId, define_row_id, define_state_enum};

define_row_id!(NotificationId);

define_state_enum!(
    NotificationKind {
        Reward = 0,
        Collection = 1,
        Assignment = 2,
        System = 3,
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Queryable, Selectable)]
#[diesel(table_name = crate::schema::notification)]
#[diesel(check_for_backend(crate::Db))]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_unix_time: UnixTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
}
