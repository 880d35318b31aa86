//! Config given as command line arguments

use clap::{Args, Parser};
use simple_backend_config::args::ServerModeArgs;

#[derive(Args, Debug, Clone)]
pub struct ArgsConfig {
    #[command(flatten)]
    pub server: ServerModeArgs,

    #[command(subcommand)]
    pub mode: Option<AppMode>,
}

#[derive(Parser, Debug, Clone)]
pub enum AppMode {
    /// Print API documentation JSON to stdout
    OpenApi,
}
