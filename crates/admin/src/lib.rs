//! Admin dashboard for Orna Crêperie.
//!
//! Passcode-protected back office where staff review incoming orders and
//! move them along the fulfillment lifecycle. All order data lives in the
//! external orders API; this binary holds only the admin session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod lifecycle;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
