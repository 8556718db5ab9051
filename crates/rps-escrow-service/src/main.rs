//! RPS Escrow Service entry point.

use rps_escrow_service::{app, state::AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let faucet_amount = std::env::var("FAUCET_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000);
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);

    let state = AppState::new(faucet_amount);

    // Pre-register demo accounts so a fresh instance is playable immediately
    let alice = state.register_account("alice".to_string());
    let bob = state.register_account("bob".to_string());
    tracing::info!(alice = %alice.id, bob = %bob.id, faucet_amount, "demo accounts ready");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app(state))
        .await
        .expect("server error");
}
