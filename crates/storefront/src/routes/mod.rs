//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Menu page (search + popular filter)
//! GET  /health           - Health check
//!
//! # Ordering
//! GET  /order/{id}       - Order form for one menu item
//! POST /order            - Place the order against the external API
//!
//! # Tracking
//! GET  /track            - Tracking form; with ?reference= looks up an order
//! ```

pub mod home;
pub mod order;
pub mod track;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/order/{id}", get(order::order_form))
        .route("/order", post(order::place_order))
        .route("/track", get(track::track))
}
