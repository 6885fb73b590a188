//! Client for the external orders API.
//!
//! All persistence lives behind this API; the storefront only places orders
//! and looks them up by reference. Requests are plain JSON over HTTP (see
//! the client for the exact endpoints).

mod client;

pub use client::OrdersClient;

use thiserror::Error;

/// Errors that can occur when talking to the orders API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// No order exists for the given reference.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The API answered with a body we could not interpret.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("CMD-404".to_string());
        assert_eq!(err.to_string(), "Order not found: CMD-404");

        let err = ApiError::Api {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 502 - bad gateway");
    }
}
