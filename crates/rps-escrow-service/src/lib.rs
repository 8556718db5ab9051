//! RPS Escrow Service
//!
//! HTTP front door over the core crate: account registration with a demo
//! faucet, match creation and discovery, and the three state-changing match
//! operations. No game rules live here; every request is decoded, handed to
//! the core under the per-match lock, and the result mapped to a status code.

pub mod handlers;
pub mod models;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// Build the service router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/accounts",
            post(handlers::create_account).get(handlers::list_accounts),
        )
        .route("/api/accounts/:id", get(handlers::get_account))
        .route(
            "/api/matches",
            post(handlers::create_match).get(handlers::list_matches),
        )
        .route("/api/matches/:id", get(handlers::get_match))
        .route("/api/matches/:id/open", post(handlers::open_match))
        .route("/api/matches/:id/join", post(handlers::join_match))
        .route("/api/matches/:id/reveal", post(handlers::reveal_match))
        .layer(cors)
        .with_state(state)
}
