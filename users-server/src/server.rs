use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// HTTPS listen port, `USERS_HTTPS_PORT` env var (default 3443)
pub(crate) fn https_port() -> u16 {
    std::env::var("USERS_HTTPS_PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(3443)
}

fn tls_cert_path() -> String {
    std::env::var("USERS_TLS_CERT").unwrap_or_else(|_| "./certs/cert.pem".to_string())
}

fn tls_key_path() -> String {
    std::env::var("USERS_TLS_KEY").unwrap_or_else(|_| "./certs/key.pem".to_string())
}

pub(crate) async fn spawn_https_server(port: u16, app: Router) -> JoinHandle<()> {
    let config = RustlsConfig::from_pem_file(tls_cert_path(), tls_key_path())
        .await
        .expect("Failed to load TLS certificates");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("HTTPS server listening on {}", addr);
    tokio::spawn(async move {
        axum_server::bind_rustls(addr, config)
            .serve(app.into_make_service())
            .await
            .expect("HTTPS server terminated unexpectedly");
    })
}
