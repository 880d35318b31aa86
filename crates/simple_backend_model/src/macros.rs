/// Stores a newtype as SQL `BigInt`.
///
/// The type needs `new(i64)` and `as_i64() -> &i64` methods and
/// `diesel::FromSqlRow` and `diesel::AsExpression` derives with
/// `#[diesel(sql_type = BigInt)]`.
#[macro_export]
macro_rules! diesel_i64_wrapper {
    ($name:ty) => {
        impl<DB> diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB> for $name
        where
            DB: diesel::backend::Backend,
            i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB>,
        {
            fn from_sql(
                bytes: <DB as diesel::backend::Backend>::RawValue<'_>,
            ) -> diesel::deserialize::Result<Self> {
                i64::from_sql(bytes).map(<$name>::new)
            }
        }

        impl<DB> diesel::serialize::ToSql<diesel::sql_types::BigInt, DB> for $name
        where
            DB: diesel::backend::Backend,
            i64: diesel::serialize::ToSql<diesel::sql_types::BigInt, DB>,
        {
            fn to_sql<'b>(
                &'b self,
                out: &mut diesel::serialize::Output<'b, '_, DB>,
            ) -> diesel::serialize::Result {
                self.as_i64().to_sql(out)
            }
        }
    };
}

/// Stores a `#[repr(i64)]` enum as SQLite `BigInt`. Reading fails for
/// values which `TryFrom<i64>` rejects.
#[macro_export]
macro_rules! diesel_i64_try_from {
    ($name:ty) => {
        impl<DB> diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB> for $name
        where
            DB: diesel::backend::Backend,
            i64: diesel::deserialize::FromSql<diesel::sql_types::BigInt, DB>,
        {
            fn from_sql(
                bytes: <DB as diesel::backend::Backend>::RawValue<'_>,
            ) -> diesel::deserialize::Result<Self> {
                let raw = i64::from_sql(bytes)?;
                <$name>::try_from(raw).map_err(Into::into)
            }
        }

        impl diesel::serialize::ToSql<diesel::sql_types::BigInt, diesel::sqlite::Sqlite>
            for $name
        {
            fn to_sql<'b>(
                &'b self,
                out: &mut diesel::serialize::Output<'b, '_, diesel::sqlite::Sqlite>,
            ) -> diesel::serialize::Result {
                out.set_value(*self as i64);
                Ok(diesel::serialize::IsNull::No)
            }
        }
    };
}
