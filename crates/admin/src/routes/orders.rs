//! Order detail and status update handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use creperie_core::{Order, OrderReference, OrderStatus};

use crate::error::{AppError, Result};
use crate::filters;
use crate::lifecycle::TransitionError;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Status update form body.
#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

/// Flash flags carried back to the detail page after an update.
#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub updated: Option<String>,
    pub error: Option<String>,
}

/// Order display data for the detail page.
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

/// One step of the status timeline.
#[derive(Clone)]
pub struct StepView {
    pub label: String,
    pub icon: String,
    /// `done`, `current` or `todo`.
    pub state: String,
}

/// The next reachable status, offered as an action button.
#[derive(Clone)]
pub struct NextStep {
    pub value: String,
    pub label: String,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "order.html")]
pub struct OrderDetailTemplate {
    pub order: OrderView,
    pub steps: Vec<StepView>,
    pub next_step: Option<NextStep>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

fn detail_template(
    order: &Order,
    notice: Option<String>,
    error: Option<String>,
) -> OrderDetailTemplate {
    let current = order.status.index();
    let steps = OrderStatus::SEQUENCE
        .iter()
        .map(|status| {
            let display = status.display();
            let state = match status.index() {
                i if i < current => "done",
                i if i == current => "current",
                _ => "todo",
            };
            StepView {
                label: display.label.to_string(),
                icon: display.icon.to_string(),
                state: state.to_string(),
            }
        })
        .collect();

    let next_step = order.status.next().map(|next| NextStep {
        value: next.as_str().to_string(),
        label: next.display().label.to_string(),
    });

    OrderDetailTemplate {
        order: OrderView::from(order),
        steps,
        next_step,
        notice,
        error,
    }
}

/// Show one order with its status timeline.
#[instrument(skip(state, query))]
pub async fn order_detail(
    State(state): State<AppState>,
    _auth: RequireAdminAuth,
    Path(reference): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Result<OrderDetailTemplate> {
    let reference = OrderReference::new(reference);
    let order = state.api().get_order(&reference).await?;

    let notice = query
        .updated
        .is_some()
        .then(|| "Statut mis à jour.".to_string());
    let error = query
        .error
        .is_some()
        .then(|| "Cette transition de statut n'est pas autorisée.".to_string());

    Ok(detail_template(&order, notice, error))
}

/// Move an order to a new status.
///
/// The transition is checked locally before the orders API is contacted. A
/// response that lands after the session has gone away is discarded instead
/// of rendered.
#[instrument(skip(state, form))]
pub async fn update_status(
    State(state): State<AppState>,
    _auth: RequireAdminAuth,
    Path(reference): Path<String>,
    Form(form): Form<StatusForm>,
) -> Result<Response> {
    let reference = OrderReference::new(reference);
    let target = form
        .status
        .parse::<OrderStatus>()
        .map_err(AppError::BadRequest)?;

    let mut order = state.api().get_order(&reference).await?;
    let outcome = state.lifecycle().request_transition(&mut order, target).await;

    // The session may have expired while the update was in flight.
    if !state.gate().is_authenticated() {
        tracing::info!("Discarding status update response after session expiry");
        return Ok(Redirect::to("/login").into_response());
    }

    let encoded = urlencoding::encode(reference.as_str()).into_owned();
    match outcome {
        Ok(()) => Ok(Redirect::to(&format!("/orders/{encoded}?updated=1")).into_response()),
        Err(TransitionError::Rejected { from, to }) => {
            tracing::warn!(%from, %to, "Refused status transition");
            Ok(Redirect::to(&format!("/orders/{encoded}?error=transition")).into_response())
        }
        Err(TransitionError::Api(e)) => Err(AppError::Api(e)),
    }
}
