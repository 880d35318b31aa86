use model::{NotificationId, UserId};
use server_common::result::{Result, WrappedContextExt};

use crate::{DataError, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsNotification);

impl WriteCommandsNotification<'_> {
    /// Only notifications of `user` can be marked as read.
    pub async fn mark_read(&self, user: UserId, id: NotificationId) -> Result<(), DataError> {
        db_transaction!(self, move |mut cmds| {
            if cmds.notification().mark_read(user, id)? {
                Ok(())
            } else {
                Err(DataError::NotFound.report())
            }
        })
    }
}
