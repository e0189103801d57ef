//! Vision API - Main entry point.

use anyhow::Result;
use vision_common::config::Config;
use vision_common::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing keys or database URL abort startup here
    let config = Config::load()?;

    init_logging(&config.observability.log_level, &config.observability.log_format);

    tracing::info!("Vision API v{}", env!("CARGO_PKG_VERSION"));

    vision_api::start_server(&config).await
}
