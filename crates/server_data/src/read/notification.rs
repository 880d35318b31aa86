use model::{NotificationList, UserId};
use server_common::result::Result;

use crate::{DataError, IntoDataError, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsNotification);

impl ReadCommandsNotification<'_> {
    pub async fn unread_notifications(&self, user: UserId) -> Result<NotificationList, DataError> {
        let notifications = self
            .db_read(move |mut cmds| cmds.notification().unread_notifications(user))
            .await
            .into_error()?;
        Ok(NotificationList { notifications })
    }
}
