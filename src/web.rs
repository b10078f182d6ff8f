#![cfg(not(tarpaulin_include))]

use clap::Parser;
use score_dashboard::app;
use score_dashboard::config::Config;

/// Main entry point for the score dashboard web server
///
/// Reads configuration from flags and `SCORE_DASHBOARD_*` environment
/// variables, then serves until the process is stopped. Log verbosity
/// follows `RUST_LOG` and defaults to `info`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!(
        "Starting score dashboard v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.bind
    );

    app::run(config).await
}
