#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

use tls_client as _;

pub mod args;

use std::process::ExitCode;

use config::{args::AppMode, get_config};
use server::{SmartCleaningServer, api_doc::ApiDoc};

const BUILD_INFO_CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_INFO_CODE_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

fn main() -> ExitCode {
    let args = args::get_config();

    if let Some(AppMode::OpenApi) = args.mode {
        return match ApiDoc::open_api_json_string() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("API doc JSON creation failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let config = match get_config(
        args,
        BUILD_INFO_CODE_VERSION.to_string(),
        BUILD_INFO_CARGO_PKG_VERSION.to_string(),
        true,
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config loading failed: {e:?}");
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Tokio runtime creation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(SmartCleaningServer::new(config).run()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server failed: {e:?}");
            ExitCode::FAILURE
        }
    }
}
