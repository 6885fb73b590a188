//! HTTP client for the staff-facing endpoints of the orders API.

mod client;

pub use client::{AdminApiClient, OrderListQuery};

use thiserror::Error;

/// Errors talking to the external orders API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// No order with the given reference.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected shape.
    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 502,
            message: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "API error 502: upstream down");

        let err = ApiError::NotFound("CMD-2024-0001".to_string());
        assert_eq!(err.to_string(), "Order not found: CMD-2024-0001");
    }
}
