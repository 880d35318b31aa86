use diesel::{insert_into, prelude::*};
use error_stack::Result;
use model::{UnixTime, User, UserRole};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_write_commands};

define_current_write_commands!(CurrentWriteUser);

impl CurrentWriteUser<'_> {
    pub fn insert_user(
        &mut self,
        email_value: &str,
        name_value: &str,
        role_value: UserRole,
        time: UnixTime,
    ) -> Result<User, DieselDatabaseError> {
        use model::schema::user_account::dsl::*;

        insert_into(user_account)
            .values((
                email.eq(email_value),
                name.eq(name_value),
                role.eq(role_value),
                created_unix_time.eq(time),
            ))
            .returning(User::as_returning())
            .get_result(self.conn())
            .into_db_error(role_value)
    }
}
