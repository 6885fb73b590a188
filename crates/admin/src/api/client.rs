//! Client for the staff endpoints of the orders API.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;
use url::Url;

use creperie_core::{Order, OrderPage, OrderReference, OrderStatus};

use super::ApiError;

/// Filters and paging for the orders listing.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Restrict to one status.
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

/// Body of `POST /auth`.
#[derive(Debug, Serialize)]
struct AuthRequest<'a> {
    passcode: &'a str,
}

/// Body of `PATCH /orders/{reference}/status`.
#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

/// Error body the API uses for lookups that fail (`{"error": "..."}`).
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the staff-facing orders API endpoints.
#[derive(Debug, Clone)]
pub struct AdminApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl AdminApiClient {
    /// Create a new client against the given API base URL.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Check an admin passcode against the API.
    ///
    /// `POST /auth`. A 200 means the passcode is correct, a 401 means it is
    /// not; anything else is an API failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers with an
    /// unexpected status.
    #[instrument(skip(self, passcode))]
    pub async fn verify_passcode(&self, passcode: &SecretString) -> Result<bool, ApiError> {
        let url = format!("{}/auth", self.base_url);
        let body = AuthRequest {
            passcode: passcode.expose_secret(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(true);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(false);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch one page of orders.
    ///
    /// `GET /orders` with paging and optional status/date filters. Filtering
    /// happens server-side; the page comes back with its pagination totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self), fields(page = query.page, limit = query.limit))]
    pub async fn list_orders(&self, query: &OrderListQuery) -> Result<OrderPage, ApiError> {
        let url = format!("{}/orders", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(status) = query.status {
            params.push(("status", status.to_string()));
        }
        if let Some(start) = &query.start_date {
            params.push(("startDate", start.clone()));
        }
        if let Some(end) = &query.end_date {
            params.push(("endDate", end.clone()));
        }

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Look up one order by its tracking reference.
    ///
    /// `GET /orders/{reference}`. The API signals an unknown reference either
    /// with a 404 or with an `{"error": "..."}` body; both map to
    /// [`ApiError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the reference is unknown.
    #[instrument(skip(self), fields(reference = %reference))]
    pub async fn get_order(&self, reference: &OrderReference) -> Result<Order, ApiError> {
        let url = format!(
            "{}/orders/{}",
            self.base_url,
            urlencoding::encode(reference.as_str())
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(reference.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        // The API reports "no such order" with a 200 + error body.
        if let Ok(err) = serde_json::from_value::<ErrorBody>(body.clone()) {
            return Err(ApiError::NotFound(err.error));
        }

        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Persist a new status for an order.
    ///
    /// `PATCH /orders/{reference}/status`. The updated order comes back in
    /// the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the update.
    #[instrument(skip(self), fields(reference = %reference, status = %status))]
    pub async fn update_status(
        &self,
        reference: &OrderReference,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let url = format!(
            "{}/orders/{}/status",
            self.base_url,
            urlencoding::encode(reference.as_str())
        );

        let response = self
            .client
            .patch(&url)
            .json(&StatusUpdate { status })
            .send()
            .await?;
        let http_status = response.status();

        if http_status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(reference.to_string()));
        }
        if !http_status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: http_status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}
