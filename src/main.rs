// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! Resourcing API CLI
//!
//! Command-line interface for reading from the resourcing API

use clap::Parser;
use resourcing_client::cli::{Cli, Runner};
use resourcing_client::logging;

#[tokio::main]
async fn main() {
    let runner = Runner::new(Cli::parse());

    let config = match runner.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init(config.log_level);

    if let Err(e) = runner.run(config).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
