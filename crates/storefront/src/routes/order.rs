//! Order placement route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use creperie_core::{MenuItem, MenuItemId, NewOrder};

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::home::PriceView;
use crate::state::AppState;

/// Order form submission.
#[derive(Debug, Deserialize)]
pub struct OrderFormData {
    pub item_id: i64,
    pub size: String,
    pub quantity: u32,
    pub customer_name: String,
    pub customer_contact: String,
    pub delivery_location: String,
    #[serde(default)]
    pub additional_notes: String,
}

/// Order form template.
#[derive(Template, WebTemplate)]
#[template(path = "order_form.html")]
pub struct OrderFormTemplate {
    pub item_id: i64,
    pub item_name: String,
    pub prices: Vec<PriceView>,
    pub error: Option<String>,
}

/// Confirmation page shown once the store has assigned a reference.
#[derive(Template, WebTemplate)]
#[template(path = "order_placed.html")]
pub struct OrderPlacedTemplate {
    pub reference: String,
    pub item_name: String,
}

fn form_template(item: &MenuItem, error: Option<String>) -> OrderFormTemplate {
    OrderFormTemplate {
        item_id: item.id.as_i64(),
        item_name: item.name.clone(),
        prices: item
            .prices
            .iter()
            .map(|p| PriceView {
                size: p.size.clone(),
                price: p.price,
            })
            .collect(),
        error,
    }
}

/// Display the order form for one menu item.
#[instrument(skip(state))]
pub async fn order_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<OrderFormTemplate> {
    let item = state
        .menu()
        .get(MenuItemId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("menu item {id}")))?;

    Ok(form_template(item, None))
}

/// Place an order against the external store.
///
/// The total price is recomputed server-side from the menu; the submitted
/// size must be one the item is offered in.
#[instrument(skip(state, form), fields(item_id = form.item_id, quantity = form.quantity))]
pub async fn place_order(
    State(state): State<AppState>,
    Form(form): Form<OrderFormData>,
) -> Result<axum::response::Response> {
    let item = state
        .menu()
        .get(MenuItemId::new(form.item_id))
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", form.item_id)))?;

    if form.quantity == 0 {
        return Err(AppError::BadRequest("La quantité doit être au moins 1".to_string()));
    }
    if form.customer_name.trim().is_empty()
        || form.customer_contact.trim().is_empty()
        || form.delivery_location.trim().is_empty()
    {
        return Ok(form_template(
            item,
            Some("Veuillez remplir tous les champs obligatoires.".to_string()),
        )
        .into_response());
    }

    let Some(unit_price) = item.price_for_size(&form.size) else {
        return Ok(form_template(item, Some("Taille invalide.".to_string())).into_response());
    };

    let order = NewOrder {
        item_id: item.id,
        item_name: item.name.clone(),
        size: form.size,
        quantity: form.quantity,
        total_price: unit_price * i64::from(form.quantity),
        customer_name: form.customer_name.trim().to_string(),
        customer_contact: form.customer_contact.trim().to_string(),
        delivery_location: form.delivery_location.trim().to_string(),
        additional_notes: form.additional_notes.trim().to_string(),
    };

    match state.orders().place_order(&order).await {
        Ok(reference) => {
            tracing::info!(reference = %reference, "Order placed");
            Ok(OrderPlacedTemplate {
                reference: reference.to_string(),
                item_name: order.item_name,
            }
            .into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to place order");
            Ok(form_template(
                item,
                Some("Erreur lors de la commande. Veuillez réessayer.".to_string()),
            )
            .into_response())
        }
    }
}
