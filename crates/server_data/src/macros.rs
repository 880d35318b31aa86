/// Read command group. Reads use the read connection pool.
#[macro_export]
macro_rules! define_cmd_wrapper_read {
    ($struct_name:ident) => {
        pub struct $struct_name<'a>(&'a $crate::db_manager::RouterDatabaseReadHandle);

        impl<'a> $struct_name<'a> {
            pub fn new(handle: &'a $crate::db_manager::RouterDatabaseReadHandle) -> Self {
                Self(handle)
            }

            async fn db_read<
                T: FnOnce(
                        database::current::read::CurrentReadCommands<'_>,
                    ) -> error_stack::Result<R, database::DieselDatabaseError>
                    + Send
                    + 'static,
                R: Send + 'static,
            >(
                &self,
                cmd: T,
            ) -> error_stack::Result<R, database::DieselDatabaseError> {
                self.0.db_read(cmd).await
            }
        }
    };
}

/// Write command group. Besides the database, write commands can use
/// the classifier and the reward policy.
#[macro_export]
macro_rules! define_cmd_wrapper_write {
    ($struct_name:ident) => {
        pub struct $struct_name<'a>(&'a $crate::db_manager::RouterDatabaseWriteHandle);

        impl<'a> $struct_name<'a> {
            pub fn new(handle: &'a $crate::db_manager::RouterDatabaseWriteHandle) -> Self {
                Self(handle)
            }

            #[allow(dead_code)]
            fn config(&self) -> &config::Config {
                self.0.config()
            }

            #[allow(dead_code)]
            fn classifier(&self) -> &dyn classifier::WasteClassifier {
                self.0.classifier()
            }

            #[allow(dead_code)]
            fn reward_policy(&self) -> &dyn $crate::reward_policy::RewardPolicy {
                self.0.reward_policy()
            }

            async fn db_transaction<
                T: FnOnce(
                        database::current::write::CurrentWriteCommands<'_>,
                    ) -> $crate::result::Result<R, $crate::DataError>
                    + Send
                    + 'static,
                R: Send + 'static,
            >(
                &self,
                cmd: T,
            ) -> $crate::result::Result<R, $crate::DataError> {
                self.0.db_transaction(cmd).await
            }

            /// Read which sees the writes made just before it.
            #[allow(dead_code)]
            async fn db_read<
                T: FnOnce(
                        database::current::read::CurrentReadCommands<'_>,
                    ) -> error_stack::Result<R, database::DieselDatabaseError>
                    + Send
                    + 'static,
                R: Send + 'static,
            >(
                &self,
                cmd: T,
            ) -> error_stack::Result<R, database::DieselDatabaseError> {
                self.0.db_read(cmd).await
            }
        }
    };
}

/// Runs the closure in a write transaction and awaits it.
///
/// ```ignore
/// db_transaction!(self, move |mut cmds| {
///     cmds.notification().mark_read(user, id)
/// })
/// ```
#[macro_export]
macro_rules! db_transaction {
    ($state:expr, move |mut $cmds:ident| $commands:expr) => {{
        $crate::IntoDataError::into_error(
            $state.db_transaction(move |mut $cmds| ($commands)).await,
        )
    }};
    ($state:expr, move |$cmds:ident| $commands:expr) => {{
        $crate::IntoDataError::into_error($state.db_transaction(move |$cmds| ($commands)).await)
    }};
}
