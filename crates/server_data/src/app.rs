use std::future::Future;

pub use server_common::app::*;

use crate::{DataError, db_manager::RouterDatabaseReadHandle, write::WriteCmds};

pub trait WriteData {
    /// Run a write operation. The operation completes even if the
    /// returned future is dropped.
    fn write<
        CmdResult: Send + 'static,
        Cmd: Future<Output = crate::result::Result<CmdResult, DataError>> + Send + 'static,
        GetCmd: FnOnce(WriteCmds) -> Cmd + Send + 'static,
    >(
        &self,
        cmd: GetCmd,
    ) -> impl Future<Output = crate::result::Result<CmdResult, DataError>> + Send;
}

pub trait ReadData {
    fn read(&self) -> &RouterDatabaseReadHandle;
}
