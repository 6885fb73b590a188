//! Order tracking route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use creperie_core::{Order, OrderReference};

use crate::api::ApiError;
use crate::filters;
use crate::state::AppState;

/// Tracking page query parameters.
#[derive(Debug, Deserialize)]
pub struct TrackQuery {
    pub reference: Option<String>,
}

/// Order display data for the tracking page.
#[derive(Clone)]
pub struct OrderView {
    pub reference: String,
    pub item_name: String,
    pub size: String,
    pub quantity: u32,
    pub total_price: i64,
    pub customer_name: String,
    pub customer_contact: String,
    pub delivery_location: String,
    pub additional_notes: String,
    pub status_label: String,
    pub status_badge: String,
    pub created_at: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let display = order.status.display();
        Self {
            reference: order.reference.to_string(),
            item_name: order.item_name.clone(),
            size: order.size.clone(),
            quantity: order.quantity,
            total_price: order.total_price,
            customer_name: order.customer_name.clone(),
            customer_contact: order.customer_contact.clone(),
            delivery_location: order.delivery_location.clone(),
            additional_notes: order.additional_notes.clone(),
            status_label: display.label.to_string(),
            status_badge: display.badge.to_string(),
            created_at: order.created_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Tracking page template.
#[derive(Template, WebTemplate)]
#[template(path = "track.html")]
pub struct TrackTemplate {
    pub reference: String,
    pub order: Option<OrderView>,
    pub error: Option<String>,
}

/// Track an order by reference.
///
/// Without a `reference` parameter this renders the empty form; lookup
/// failures are shown inline rather than as error pages.
#[instrument(skip(state))]
pub async fn track(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> TrackTemplate {
    let Some(raw) = query.reference else {
        return TrackTemplate {
            reference: String::new(),
            order: None,
            error: None,
        };
    };

    let reference = OrderReference::new(raw);
    if reference.is_empty() {
        return TrackTemplate {
            reference: String::new(),
            order: None,
            error: Some("Veuillez entrer un numéro de commande".to_string()),
        };
    }

    match state.orders().get_order(&reference).await {
        Ok(order) => TrackTemplate {
            reference: reference.to_string(),
            order: Some(OrderView::from(&order)),
            error: None,
        },
        Err(ApiError::NotFound(_)) => TrackTemplate {
            reference: reference.to_string(),
            order: None,
            error: Some("Commande non trouvée".to_string()),
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to look up order");
            TrackTemplate {
                reference: reference.to_string(),
                order: None,
                error: Some(
                    "Une erreur est survenue lors de la recherche de votre commande.".to_string(),
                ),
            }
        }
    }
}
