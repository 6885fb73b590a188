//! Menu page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use creperie_core::MenuItem;

use crate::filters;
use crate::state::AppState;

/// Menu page query parameters.
#[derive(Debug, Deserialize)]
pub struct MenuQuery {
    /// Search term over name and description.
    pub q: Option<String>,
    /// `popular` restricts the grid to popular items.
    pub filter: Option<String>,
}

/// Menu item display data for templates.
#[derive(Clone)]
pub struct MenuItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub preparation_time: u32,
    pub rating: String,
    pub popular: bool,
    pub prices: Vec<PriceView>,
}

/// One size/price line.
#[derive(Clone)]
pub struct PriceView {
    pub size: String,
    pub price: i64,
}

impl From<&MenuItem> for MenuItemView {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            description: item.description.clone(),
            image: item.images.first().cloned(),
            preparation_time: item.preparation_time,
            rating: format!("{:.1}", item.rating),
            popular: item.popular,
            prices: item
                .prices
                .iter()
                .map(|p| PriceView {
                    size: p.size.clone(),
                    price: p.price,
                })
                .collect(),
        }
    }
}

/// Menu page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub items: Vec<MenuItemView>,
    pub q: String,
    pub popular_only: bool,
}

/// Display the menu with optional search and popularity filtering.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<MenuQuery>) -> HomeTemplate {
    let q = query.q.unwrap_or_default().trim().to_string();
    let popular_only = query.filter.as_deref() == Some("popular");

    let items = state
        .menu()
        .filter(&q, popular_only)
        .into_iter()
        .map(MenuItemView::from)
        .collect();

    HomeTemplate {
        items,
        q,
        popular_only,
    }
}
