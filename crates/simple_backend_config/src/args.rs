//! Server options which override the config file

use std::{net::SocketAddr, path::PathBuf};

use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct ServerModeArgs {
    /// Directory for SQLite database files
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Listen address for the public API, for example 127.0.0.1:3000
    #[arg(long, value_name = "ADDR")]
    pub public_api: Option<SocketAddr>,

    /// Keep SQLite databases in RAM. Requires debug mode.
    #[arg(short, long)]
    pub sqlite_in_ram: bool,
}
