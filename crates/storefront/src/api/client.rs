//! HTTP client for the customer-facing endpoints of the orders API.

use serde::Deserialize;
use tracing::instrument;
use url::Url;

use creperie_core::{NewOrder, Order, OrderReference};

use super::ApiError;

/// Response body of `POST /orders`.
#[derive(Debug, Deserialize)]
struct PlacedOrder {
    reference: OrderReference,
}

/// Error body the API uses for lookups that fail (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the customer-facing orders API endpoints.
#[derive(Debug, Clone)]
pub struct OrdersClient {
    client: reqwest::Client,
    base_url: String,
}

impl OrdersClient {
    /// Create a new client against the given API base URL.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        }
    }

    /// Place a new order.
    ///
    /// `POST /orders` with the full order payload; the store assigns and
    /// returns the tracking reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the order.
    #[instrument(skip(self, order), fields(item = %order.item_name, quantity = order.quantity))]
    pub async fn place_order(&self, order: &NewOrder) -> Result<OrderReference, ApiError> {
        let url = format!("{}/orders", self.base_url);

        let response = self.client.post(&url).json(order).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let placed: PlacedOrder = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(placed.reference)
    }

    /// Look up an order by its tracking reference.
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
}
