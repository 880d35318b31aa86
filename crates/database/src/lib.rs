#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Diesel queries for the current state of the system.

pub mod current;
pub mod db_macros;

#[cfg(test)]
mod tests;

use std::fmt;

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, embed_migrations};
use error_stack::{Context, Result, ResultExt};
pub use model::schema;
use model::IsLoggingAllowed;
use simple_backend_config::RUNNING_IN_DEBUG_MODE;
pub use simple_backend_database::diesel_db::{DieselConnection, DieselDatabaseError};
use simple_backend_database::diesel_db::{
    DieselPool, DieselReadHandle, DieselWriteHandle, ObjectExtensions, PoolObject,
};

pub const DIESEL_MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(Clone, Debug)]
pub struct CurrentReadHandle(pub DieselReadHandle);

#[derive(Clone, Debug)]
pub struct CurrentWriteHandle(pub DieselWriteHandle);

impl CurrentWriteHandle {
    pub fn to_read_handle(&self) -> CurrentReadHandle {
        CurrentReadHandle(self.0.to_read_handle())
    }
}

async fn pooled_connection(pool: &DieselPool) -> Result<PoolObject, DieselDatabaseError> {
    pool.get()
        .await
        .change_context(DieselDatabaseError::GetConnection)
}

pub struct DbReaderRaw<'a> {
    db: &'a CurrentReadHandle,
}

impl<'a> DbReaderRaw<'a> {
    pub fn new(db: &'a CurrentReadHandle) -> Self {
        Self { db }
    }

    pub async fn db_read<
        T: FnOnce(&mut DieselConnection) -> Result<R, DieselDatabaseError> + Send + 'static,
        R: Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> Result<R, DieselDatabaseError> {
        pooled_connection(self.db.0.pool())
            .await?
            .interact(cmd)
            .await?
    }
}

pub struct DbWriter<'a> {
    db: &'a CurrentWriteHandle,
}

impl<'a> DbWriter<'a> {
    pub fn new(db: &'a CurrentWriteHandle) -> Self {
        Self { db }
    }

    /// Run `cmd` inside a transaction. The transaction is rolled back if
    /// `cmd` returns an error.
    ///
    /// The outer result contains connection errors and the inner result
    /// the transaction result.
    pub async fn db_transaction<
        T: FnOnce(&mut DieselConnection) -> std::result::Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<diesel::result::Error> + Send + 'static,
    >(
        &self,
        cmd: T,
    ) -> Result<std::result::Result<R, E>, DieselDatabaseError> {
        pooled_connection(self.db.0.pool())
            .await?
            .interact(move |conn| conn.transaction(cmd))
            .await
    }
}

/// Query parameters attached to a failed query. Values which might
/// contain personal data are hidden unless debug mode is enabled.
pub struct QueryContext<T>(pub T);

impl<T: IsLoggingAllowed> fmt::Display for QueryContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Query context: ")?;
        if RUNNING_IN_DEBUG_MODE.value() {
            write!(f, "{:?}", self.0)
        } else {
            self.0.fmt_loggable(f)
        }
    }
}

impl<T: IsLoggingAllowed> fmt::Debug for QueryContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

pub trait IntoDatabaseError: Sized {
    type Ok;

    /// Convert error to [DieselDatabaseError::Execute] and attach
    /// the query parameters.
    #[track_caller]
    fn into_db_error<T: IsLoggingAllowed>(
        self,
        query_context: T,
    ) -> Result<Self::Ok, DieselDatabaseError>;
}

impl<Ok, E: Context> IntoDatabaseError for std::result::Result<Ok, E> {
    type Ok = Ok;

    #[track_caller]
    fn into_db_error<T: IsLoggingAllowed>(
        self,
        query_context: T,
    ) -> Result<Ok, DieselDatabaseError> {
        self.change_context(DieselDatabaseError::Execute)
            .attach_printable_lazy(move || QueryContext(query_context).to_string())
    }
}
