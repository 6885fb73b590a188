//! Orna Crêperie Core - Shared types library.
//!
//! This crate provides common types used across all Orna Crêperie components:
//! - `storefront` - Public-facing ordering site
//! - `admin` - Internal administration dashboard
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients. The external orders API is the sole source of truth; everything
//! here models the contract the front-end observes.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the order status state machine, the wire-format
//!   order and menu records, and the persisted admin session record.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
