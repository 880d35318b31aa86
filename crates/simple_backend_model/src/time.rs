use diesel::{AsExpression, FromSqlRow, sql_types::BigInt};
use serde::{Deserialize, Serialize};
use simple_backend_utils::current_unix_time;
use utoipa::ToSchema;

use crate::diesel_i64_wrapper;

/// Seconds since the Unix epoch.
#[derive(
    Debug,
    Clone,
    Copy,
    Deserialize,
    Serialize,
    ToSchema,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    FromSqlRow,
    AsExpression,
)]
#[diesel(sql_type = BigInt)]
pub struct UnixTime {
    pub ut: i64,
}

impl UnixTime {
    pub fn new(value: i64) -> Self {
        Self { ut: value }
    }

    pub fn as_i64(&self) -> &i64 {
        &self.ut
    }

    pub fn current_time() -> Self {
        Self {
            ut: current_unix_time(),
        }
    }
}

diesel_i64_wrapper!(UnixTime);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_time_is_after_2024() {
        assert!(*UnixTime::current_time().as_i64() > 1704067200);
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_string(&UnixTime::new(5)).unwrap();
        assert_eq!(json, r#"{"ut":5}"#);
    }
}
