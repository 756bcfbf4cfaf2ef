mod config;
mod query;
mod report;
mod services;
mod store;

use crate::config::Config;
use crate::store::Store;
use env_logger::Env;
use log::{error, info};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match Store::open(&config.database_path) {
        Ok(store) => store,
        Err(e) => {
            error!(
                "Cannot open database {}: {}",
                config.database_path.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    if let Err(e) = services::console::run(&store, &config, stdin.lock(), io::stdout()) {
        error!("Console I/O failed: {}", e);
        return ExitCode::FAILURE;
    }
    info!("Bye");
    ExitCode::SUCCESS
}
