#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

//! Data types for API and database.

pub use simple_backend_model::UnixTime;

pub mod assignment;
pub mod classification;
pub mod collected_waste;
pub mod ledger;
pub mod notification;
pub mod report;
pub mod user;
pub mod vendor;

pub mod markers;
pub mod schema;

pub use assignment::*;
pub use classification::*;
pub use collected_waste::*;
pub use ledger::*;
pub use markers::*;
pub use notification::*;
pub use report::*;
pub use user::*;
pub use vendor::*;

pub type Db = diesel::sqlite::Sqlite;

/// Defines an `i64` row ID newtype which is stored as `BigInt`.
macro_rules! define_row_id {
    ($(#[doc = $text:literal])* $name:ident) => {
        $(#[doc = $text])*
        #[derive(
            Debug,
            Clone,
            Copy,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            diesel::FromSqlRow,
            diesel::AsExpression,
        )]
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn as_i64(&self) -> &i64 {
                &self.0
            }
        }

        simple_backend_model::diesel_i64_wrapper!($name);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use define_row_id;

/// Defines a `#[repr(i64)]` state enum stored as `BigInt`. JSON uses
/// snake case variant names.
macro_rules! define_state_enum {
    (
        $(#[doc = $text:literal])*
        $name:ident {
            $( $variant:ident = $value:literal , )*
        }
    ) => {
        $(#[doc = $text])*
        #[derive(
            Debug,
            Clone,
            Copy,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
            PartialEq,
            Eq,
            Hash,
            num_enum::TryFromPrimitive,
            diesel::FromSqlRow,
            diesel::AsExpression,
        )]
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        #[serde(rename_all = "snake_case")]
        #[repr(i64)]
        pub enum $name {
            $( $variant = $value, )*
        }

        simple_backend_model::diesel_i64_try_from!($name);
    };
}

pub(crate) use define_state_enum;
