#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Business operations over the database.
//!
//! Writes go through [write::WriteCmds] and reads through
//! [db_manager::RouterDatabaseReadHandle]. Every write operation runs
//! its reads and writes in a single transaction on the write connection.

pub use server_common::{
    data::{DataError, IntoDataError},
    result,
};

pub mod access;
pub mod app;
pub mod db_manager;
pub mod ledger;
pub mod macros;
pub mod read;
pub mod reward_policy;
pub mod verification;
pub mod write;

#[cfg(test)]
mod tests;

pub use database::{DieselConnection, DieselDatabaseError};
