//! QuoteDesk API Server - gateway between the dashboard and ServiceNow
//!
//! Provides REST endpoints for:
//! - Quote listing, detail, creation, state transition, patch, delete
//! - Contract generation and PDF download
//! - Read-only product catalog and opportunity mirrors
//!
//! Every `/api` route authenticates with a bearer-carried ServiceNow
//! access token and forwards to the instance; upstream statuses and
//! messages propagate verbatim.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod upstream;

use state::AppState;

/// Build the router. Factored out of `main` so tests can drive the
/// exact production routing.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Quotes. POST creates from an opportunity, so the one path
        // parameter is an opportunity id there and a quote id otherwise.
        .route("/api/quote", get(handlers::quotes::list_quotes))
        .route(
            "/api/quote/:id",
            get(handlers::quotes::get_quote)
                .post(handlers::quotes::create_quote)
                .patch(handlers::quotes::update_quote)
                .delete(handlers::quotes::delete_quote),
        )
        .route("/api/quote-state/:id", patch(handlers::quotes::update_quote_state))
        // Contracts
        .route("/api/contract/:quote_id", post(handlers::contracts::generate_contract))
        .route(
            "/api/download-contract/:contract_id",
            get(handlers::contracts::download_contract),
        )
        // Catalog mirrors
        .route(
            "/api/product-offerings/by-spec/:spec_id",
            get(handlers::catalog::offerings_by_spec),
        )
        .route("/api/product-offerings", get(handlers::catalog::list_offerings))
        .route("/api/categories", get(handlers::catalog::list_categories))
        .route("/api/catalogs", get(handlers::catalog::list_catalogs))
        .route("/api/specifications", get(handlers::catalog::list_specifications))
        .route("/api/opportunities", get(handlers::catalog::list_opportunities))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
