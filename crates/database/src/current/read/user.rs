use diesel::prelude::*;
use error_stack::Result;
use model::{User, UserId};

use crate::{DieselDatabaseError, IntoDatabaseError, define_current_read_commands};

define_current_read_commands!(CurrentReadUser);

impl CurrentReadUser<'_> {
    pub fn user(&mut self, id: UserId) -> Result<Option<User>, DieselDatabaseError> {
        use model::schema::user_account::dsl;

        dsl::user_account
            .filter(dsl::id.eq(id))
            .select(User::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(id)
    }

    pub fn user_by_email(&mut self, email: &str) -> Result<Option<User>, DieselDatabaseError> {
        use model::schema::user_account::dsl;

        dsl::user_account
            .filter(dsl::email.eq(email))
            .select(User::as_select())
            .first(self.conn())
            .optional()
            .into_db_error(())
    }

    pub fn user_names(&mut self) -> Result<Vec<(UserId, String)>, DieselDatabaseError> {
        use model::schema::user_account::dsl;

        dsl::user_account
            .select((dsl::id, dsl::name))
            .order(dsl::id.asc())
            .load(self.conn())
            .into_db_error(())
    }
}
