//! Bookmarks Server - HTTP REST API for the in-memory bookmark collection
//!
//! Reads `BOOKMARKS_*` configuration and serves until SIGTERM or Ctrl+C.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
