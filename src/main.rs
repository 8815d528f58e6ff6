//! CreatorDesk suggestion gateway.
//!
//! Main entry point for the gateway binary: the serverless-function
//! stand-in that relays streaming AI suggestions to the dashboard.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use creatordesk::config;
use creatordesk::suggest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Starting CreatorDesk suggestion gateway v{}",
        env!("CARGO_PKG_VERSION")
    );

    let app_config = config::load_config()?;
    suggest::serve(app_config.gateway).await
}
