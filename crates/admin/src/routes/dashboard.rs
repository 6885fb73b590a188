//! Orders dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use creperie_core::{Order, OrderStatus};

use crate::api::OrderListQuery;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Orders shown per dashboard page.
const PAGE_SIZE: u32 = 5;

/// Dashboard query parameters.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub page: Option<u32>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One order row in the dashboard table.
#[derive(Clone)]
pub struct OrderRowView {
    pub reference: String,
    pub item_name: String,
    pub quantity: u32,
    pub total_price: i64,
    pub customer_name: String,
    pub delivery_location: String,
    pub status_label: String,
    pub status_badge: String,
    pub created_at: String,
}

impl From<&Order> for OrderRowView {
    fn from(order: &Order) -> Self {
        let display = order.status.display();
        Self {
            reference: order.reference.to_string(),
            item_name: order.item_name.clone(),
            quantity: order.quantity,
            total_price: order.total_price,
            customer_name: order.customer_name.clone(),
            delivery_location: order.delivery_location.clone(),
            status_label: display.label.to_string(),
            status_badge: display.badge.to_string(),
            created_at: order.created_at.format("%d/%m/%Y %H:%M").to_string(),
        }
    }
}

/// Counts over the fetched page.
#[derive(Clone, Copy, Default)]
pub struct PageStats {
    pub total: usize,
    pub processing: usize,
    pub preparing: usize,
    pub delivering: usize,
    pub delivered: usize,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub rows: Vec<OrderRowView>,
    pub stats: PageStats,
    pub page: u32,
    pub total_pages: u32,
    pub prev_page: u32,
    pub next_page: u32,
    pub status: String,
    pub start_date: String,
    pub end_date: String,
    /// Filter parameters re-encoded for the pagination links.
    pub filter_query: String,
}

/// Show one page of orders with status and date filters.
///
/// Filtering and paging happen in the orders API; the stats cards are
/// counted over the page that came back.
#[instrument(skip(state, query))]
pub async fn dashboard(
    State(state): State<AppState>,
    _auth: RequireAdminAuth,
    Query(query): Query<DashboardQuery>,
) -> Result<DashboardTemplate> {
    let page = query.page.unwrap_or(1).max(1);
    let status_raw = query.status.unwrap_or_default();
    let status = status_raw.parse::<OrderStatus>().ok();
    let start_date = query.start_date.unwrap_or_default();
    let end_date = query.end_date.unwrap_or_default();

    // Date bounds only apply as a pair.
    let both_dates = !start_date.is_empty() && !end_date.is_empty();
    let list = OrderListQuery {
        page,
        limit: PAGE_SIZE,
        status,
        start_date: both_dates.then(|| start_date.clone()),
        end_date: both_dates.then(|| end_date.clone()),
    };
    let fetched = state.api().list_orders(&list).await?;

    let stats = PageStats {
        total: fetched.orders.len(),
        processing: fetched.count_with_status(OrderStatus::Processing),
        preparing: fetched.count_with_status(OrderStatus::Preparing),
        delivering: fetched.count_with_status(OrderStatus::Delivering),
        delivered: fetched.count_with_status(OrderStatus::Delivered),
    };

    let mut filter_query = String::new();
    if status.is_some() {
        filter_query.push_str(&format!("&status={status_raw}"));
    }
    if both_dates {
        filter_query.push_str(&format!(
            "&start_date={}&end_date={}",
            urlencoding::encode(&start_date),
            urlencoding::encode(&end_date)
        ));
    }

    let total_pages = fetched.pagination.total_pages.max(1);
    Ok(DashboardTemplate {
        rows: fetched.orders.iter().map(OrderRowView::from).collect(),
        stats,
        page,
        total_pages,
        prev_page: page.saturating_sub(1).max(1),
        next_page: (page + 1).min(total_pages),
        status: status_raw,
        start_date,
        end_date,
        filter_query,
    })
}
