use database::current::write::CurrentWriteCommands;
use model::{DEFAULT_USER_NAME, Identity, UnixTime, User, UserRole};
use server_common::result::Result;
use simple_backend_utils::text::trimmed_non_empty;
use tracing::info;

use crate::{DataError, access::required_text, db_transaction, define_cmd_wrapper_write};

define_cmd_wrapper_write!(WriteCommandsUser);

impl WriteCommandsUser<'_> {
    /// Find the user with the identity email or create a new user.
    pub async fn get_or_create(&self, identity: Identity) -> Result<User, DataError> {
        let email = required_text(&identity.email, "Email is required")?;
        let name = identity.name.as_deref().and_then(trimmed_non_empty);
        let admin_email = self
            .config()
            .grant_admin_access_config()
            .map(|c| c.email.clone());

        db_transaction!(self, move |mut cmds| {
            get_or_create_user(&mut cmds, &email, name.as_deref(), admin_email.as_deref())
        })
    }
}

pub(crate) fn get_or_create_user(
    cmds: &mut CurrentWriteCommands<'_>,
    email: &str,
    name: Option<&str>,
    admin_email: Option<&str>,
) -> Result<User, DataError> {
    if let Some(user) = cmds.read().user().user_by_email(email)? {
        return Ok(user);
    }

    let role = if admin_email.is_some_and(|v| v.trim().eq_ignore_ascii_case(email)) {
        info!("Admin access granted for a new user");
        UserRole::Admin
    } else {
        UserRole::User
    };

    let user = cmds.user().insert_user(
        email,
        name.unwrap_or(DEFAULT_USER_NAME),
        role,
        UnixTime::current_time(),
    )?;
    Ok(user)
}
