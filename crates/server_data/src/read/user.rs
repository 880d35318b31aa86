use model::User;
use server_common::result::Result;
use simple_backend_utils::text::trimmed_non_empty;

use crate::{DataError, IntoDataError, define_cmd_wrapper_read};

define_cmd_wrapper_read!(ReadCommandsUser);

impl ReadCommandsUser<'_> {
    /// Existing user with the email. Emails are compared after trimming.
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, DataError> {
        let Some(email) = trimmed_non_empty(email) else {
            return Ok(None);
        };
        self.db_read(move |mut cmds| cmds.user().user_by_email(&email))
            .await
            .into_error()
    }
}
