//! Application state shared across handlers.

use std::sync::Arc;

use crate::api::OrdersClient;
use crate::config::StorefrontConfig;
use crate::menu::{Menu, MenuError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the loaded menu and
/// the orders API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    menu: Menu,
    orders: OrdersClient,
}

impl AppState {
    /// Create a new application state, loading the menu from the configured
    /// content directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu content cannot be loaded.
    pub fn new(config: StorefrontConfig) -> Result<Self, MenuError> {
        let menu = Menu::load(&config.content_dir)?;
        let orders = OrdersClient::new(&config.api_base_url);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                menu,
                orders,
            }),
        })
    }

    /// Build a state from preassembled parts (used by tests).
    #[must_use]
    pub fn from_parts(config: StorefrontConfig, menu: Menu, orders: OrdersClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                menu,
                orders,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the loaded menu.
    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.inner.menu
    }

    /// Get a reference to the orders API client.
    #[must_use]
    pub fn orders(&self) -> &OrdersClient {
        &self.inner.orders
    }
}
