//! Background services and session management.

pub mod session;
