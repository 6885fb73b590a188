//! Request middleware and extractors.

mod auth;

pub use auth::{AdminAuthRejection, RequireAdminAuth};
