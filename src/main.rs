//! Server bootstrap: initializes tracing and serves the HTTP router on
//! `PORT` (default `8080`).

use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    courier_optimizer::config::init_tracing();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|err| panic!("failed to bind {addr}: {err}"));

    tracing::info!(%addr, "optimizer server listening");

    axum::serve(listener, courier_optimizer::http::router())
        .await
        .unwrap_or_else(|err| panic!("server error: {err}"));
}
