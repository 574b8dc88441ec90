use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use users_api::USERS_ROUTE_PREFIX;
use users_api_axum::{fallback_404, users_router};

mod server;

use crate::server::{https_port, spawn_https_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install default CryptoProvider for rustls to prevent:
    // "no process-level CryptoProvider available -- call CryptoProvider::install_default() before this point"
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install default CryptoProvider");

    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug,info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    users_api::init().await?;

    let app = Router::new()
        .nest(USERS_ROUTE_PREFIX.as_str(), users_router())
        .fallback(fallback_404);

    let https_server = spawn_https_server(https_port(), app).await;

    https_server.await?;
    Ok(())
}
