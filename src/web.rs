#![cfg(not(tarpaulin_include))]

use blockgrid::app;
use blockgrid::config::ServerConfig;

/// Main entry point for the block grid web application
///
/// Reads the configuration from `BLOCKGRID_*` environment variables and the
/// optional positional arguments `<columns> <rows>`, then serves the grid.
///
/// # Default Configuration
/// * A 10 column by 6 row grid on http://127.0.0.1:3002
/// * Log level `info`, overridden by `RUST_LOG`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::load()?;
    log::debug!("configuration: {:?}", config);

    app::run(config).await
}
