use diesel::{insert_into, prelude::*, update};
use error_stack::Result;
use model::{Notification, NotificationId, NotificationKind, UnixTime, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteNotification);

impl CurrentWriteNotification<'_> {
    pub fn insert_notification(
        &mut self,
        user: UserId,
        message_value: &str,
        kind_value: NotificationKind,
        time: UnixTime,
    ) -> Result<Notification, DieselDatabaseError> {
        use model::schema::notification::dsl::*;

        insert_into(notification)
            .values((
                user_id.eq(user),
                message.eq(message_value),
                kind.eq(kind_value),
                is_read.eq(false),
                created_unix_time.eq(time),
            ))
            .returning(Notification::as_returning())
            .get_result(self.conn())
            .into_db_error((user, kind_value))
    }

    /// Returns `false` if the notification does not exist or is owned by
    /// another user. Marking an already read notification succeeds.
    pub fn mark_read(
        &mut self,
        user: UserId,
        id_value: NotificationId,
    ) -> Result<bool, DieselDatabaseError> {
        use model::schema::notification::dsl::*;

        let updated = update(notification)
            .filter(id.eq(id_value))
            .filter(user_id.eq(user))
            .set(is_read.eq(true))
            .execute(self.conn())
            .into_db_error((user, id_value))?;

        Ok(updated > 0)
    }
}
