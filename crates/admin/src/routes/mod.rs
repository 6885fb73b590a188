//! HTTP route handlers for the admin dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Auth
//! GET  /login                       - Passcode form
//! POST /login                       - Check the passcode, open the session
//! POST /logout                      - Drop the session
//!
//! # Orders (session required)
//! GET  /                            - Dashboard: paged orders, filters, stats
//! GET  /orders/{reference}          - One order with its status timeline
//! POST /orders/{reference}/status   - Move the order to a new status
//! ```

pub mod auth;
pub mod dashboard;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/orders/{reference}", get(orders::order_detail))
        .route("/orders/{reference}/status", post(orders::update_status))
}
