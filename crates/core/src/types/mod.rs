//! Core types for Orna Crêperie.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod menu;
pub mod order;
pub mod reference;
pub mod session;
pub mod status;

pub use id::*;
pub use menu::{MenuItem, SizePrice};
pub use order::{NewOrder, Order, OrderPage, Pagination};
pub use reference::OrderReference;
pub use session::{AdminSession, INACTIVITY_WINDOW, SESSION_LIFETIME, SESSION_STORAGE_KEY};
pub use status::{OrderStatus, StatusDisplay};
