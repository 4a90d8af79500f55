//! Binary crate for the `weather-server` HTTP service.

use clap::Parser;
use tracing::error;

mod cli;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cmd = cli::Cli::parse();
    weather_server::init_logging(&cmd.log_level);
    weather_server::install_fault_boundary();

    if let Err(e) = cmd.run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
