//! Alma Record Server - HTTP front for the Alma SRU record lookup
//!
//! This binary answers record lookups by authority id and creator name,
//! configured from `ALMA_*` environment variables.

use server::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
