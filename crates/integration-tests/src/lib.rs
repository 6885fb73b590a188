//! Integration tests for Orna Crêperie.
//!
//! The tests run the real HTTP clients of both binaries against an
//! in-process stand-in for the external orders API. The stand-in records
//! every authentication and status update call so tests can assert how much
//! traffic an operation produced.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p creperie-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicI64, AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use url::Url;

use creperie_core::{NewOrder, Order, OrderId, OrderReference, OrderStatus};

/// Passcode the stand-in accepts.
pub const TEST_PASSCODE: &str = "1234";

/// Page size assumed by paging assertions.
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Default)]
struct MockState {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI64,
    auth_calls: AtomicUsize,
    patch_calls: AtomicUsize,
    patch_delay: Mutex<Option<Duration>>,
    list_queries: Mutex<Vec<HashMap<String, String>>>,
}

/// In-process orders API stand-in.
///
/// Speaks the same wire format as the production store: camelCase orders,
/// `{"reference"}` on placement, `{"error"}` bodies for unknown references.
pub struct MockOrdersApi {
    state: Arc<MockState>,
    base_url: Url,
}

impl MockOrdersApi {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/auth", post(auth))
            .route("/orders", get(list_orders).post(place_order))
            .route("/orders/{reference}", get(get_order))
            .route("/orders/{reference}/status", axum::routing::patch(update_status))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        let base_url = format!("http://{addr}/").parse().expect("base url");
        Self { state, base_url }
    }

    /// Base URL to point the clients at.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Insert an order directly, bypassing HTTP.
    pub fn seed_order(&self, status: OrderStatus) -> OrderReference {
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let reference = OrderReference::from(format!("CMD-TEST-{id:04}").as_str());
        let order = Order {
            id: OrderId::new(id),
            reference: reference.clone(),
            item_name: "Crêpe Nutella".to_string(),
            size: "Simple".to_string(),
            quantity: 1,
            total_price: 1000,
            customer_name: "Awa Diop".to_string(),
            customer_contact: "+221771234567".to_string(),
            delivery_location: "Plateau, Dakar".to_string(),
            additional_notes: String::new(),
            status,
            created_at: Utc::now(),
        };
        self.state.orders.lock().unwrap().push(order);
        reference
    }

    /// Current status of a stored order.
    #[must_use]
    pub fn status_of(&self, reference: &OrderReference) -> Option<OrderStatus> {
        self.state
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| &o.reference == reference)
            .map(|o| o.status)
    }

    /// How many `POST /auth` calls arrived.
    #[must_use]
    pub fn auth_calls(&self) -> usize {
        self.state.auth_calls.load(Ordering::SeqCst)
    }

    /// How many `PATCH /orders/{reference}/status` calls arrived.
    #[must_use]
    pub fn patch_calls(&self) -> usize {
        self.state.patch_calls.load(Ordering::SeqCst)
    }

    /// Hold every status PATCH for `delay` before answering, so a test can
    /// change state on the caller's side while the response is in flight.
    pub fn set_patch_delay(&self, delay: Duration) {
        *self.state.patch_delay.lock().unwrap() = Some(delay);
    }

    /// Query parameters of the most recent `GET /orders` call.
    #[must_use]
    pub fn last_list_query(&self) -> Option<HashMap<String, String>> {
        self.state.list_queries.lock().unwrap().last().cloned()
    }
}

async fn auth(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.auth_calls.fetch_add(1, Ordering::SeqCst);
    if body.get("passcode").and_then(Value::as_str) == Some(TEST_PASSCODE) {
        Json(json!({"success": true})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Code d'accès incorrect"})))
            .into_response()
    }
}

async fn place_order(
    State(state): State<Arc<MockState>>,
    Json(new_order): Json<NewOrder>,
) -> Response {
    let id = state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let reference = OrderReference::from(format!("CMD-TEST-{id:04}").as_str());
    let order = Order {
        id: OrderId::new(id),
        reference: reference.clone(),
        item_name: new_order.item_name,
        size: new_order.size,
        quantity: new_order.quantity,
        total_price: new_order.total_price,
        customer_name: new_order.customer_name,
        customer_contact: new_order.customer_contact,
        delivery_location: new_order.delivery_location,
        additional_notes: new_order.additional_notes,
        status: OrderStatus::default(),
        created_at: Utc::now(),
    };
    state.orders.lock().unwrap().push(order);
    (StatusCode::CREATED, Json(json!({"reference": reference}))).into_response()
}

async fn list_orders(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.list_queries.lock().unwrap().push(params.clone());

    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(DEFAULT_LIMIT);
    let status: Option<OrderStatus> = params.get("status").and_then(|s| s.parse().ok());

    let orders = state.orders.lock().unwrap();
    let filtered: Vec<&Order> = orders
        .iter()
        .filter(|o| status.is_none_or(|s| o.status == s))
        .collect();

    let total_pages = filtered.len().div_ceil(limit).max(1);
    let page_orders: Vec<&Order> = filtered
        .into_iter()
        .skip(page.saturating_sub(1) * limit)
        .take(limit)
        .collect();

    Json(json!({
        "orders": page_orders,
        "pagination": {"totalPages": total_pages},
    }))
    .into_response()
}

async fn get_order(
    State(state): State<Arc<MockState>>,
    Path(reference): Path<String>,
) -> Response {
    let orders = state.orders.lock().unwrap();
    orders
        .iter()
        .find(|o| o.reference.as_str() == reference)
        .map_or_else(
            || Json(json!({"error": "Commande non trouvée"})).into_response(),
            |order| Json(order).into_response(),
        )
}

async fn update_status(
    State(state): State<Arc<MockState>>,
    Path(reference): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let delay = *state.patch_delay.lock().unwrap();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    state.patch_calls.fetch_add(1, Ordering::SeqCst);

    let Some(status) = body
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<OrderStatus>().ok())
    else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Statut invalide"})))
            .into_response();
    };

    let mut orders = state.orders.lock().unwrap();
    match orders.iter_mut().find(|o| o.reference.as_str() == reference) {
        Some(order) => {
            order.status = status;
            Json(order.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "Commande non trouvée"})))
            .into_response(),
    }
}
