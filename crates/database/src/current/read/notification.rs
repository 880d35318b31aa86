use diesel::prelude::*;
use error_stack::Result;
use model::{Notification, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadNotification);

impl CurrentReadNotification<'_> {
    /// Newest first
    pub fn unread_notifications(
        &mut self,
        user: UserId,
    ) -> Result<Vec<Notification>, DieselDatabaseError> {
        use model::schema::notification::dsl;

        dsl::notification
            .filter(dsl::user_id.eq(user))
            .filter(dsl::is_read.eq(false))
            .order((dsl::created_unix_time.desc(), dsl::id.desc()))
            .select(Notification::as_select())
            .load(self.conn())
            .into_db_error(user)
    }
}
