//! Bundled menu content.
//!
//! The menu is a static JSON file shipped with the storefront, loaded once
//! at startup and held in memory. Browsing never touches the external
//! orders API.

use std::path::Path;

use thiserror::Error;

use creperie_core::{MenuItem, MenuItemId};

/// File name of the menu inside the content directory.
const MENU_FILE: &str = "menu.json";

/// Errors loading the menu content.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("Failed to read menu file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse menu file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// The in-memory menu.
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    /// Load the menu from `<content_dir>/menu.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid menu JSON.
    pub fn load(content_dir: &Path) -> Result<Self, MenuError> {
        let path = content_dir.join(MENU_FILE);
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(&path).map_err(|source| MenuError::Read {
            path: display.clone(),
            source,
        })?;
        let items: Vec<MenuItem> =
            serde_json::from_str(&raw).map_err(|source| MenuError::Parse {
                path: display,
                source,
            })?;
        Ok(Self { items })
    }

    /// Build a menu from already-parsed items (used by tests).
    #[must_use]
    pub const fn from_items(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// All items, in menu order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Look up one item by id.
    #[must_use]
    pub fn get(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items matching an optional search term and the "popular" filter.
    #[must_use]
    pub fn filter(&self, search: &str, popular_only: bool) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| search.is_empty() || item.matches_search(search))
            .filter(|item| !popular_only || item.popular)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use creperie_core::SizePrice;

    fn menu() -> Menu {
        let item = |id: i64, name: &str, description: &str, popular: bool| MenuItem {
            id: MenuItemId::new(id),
            name: name.to_string(),
            description: description.to_string(),
            prices: vec![SizePrice {
                size: "Moyenne".to_string(),
                price: 1500,
            }],
            images: vec![],
            preparation_time: 10,
            rating: 4.0,
            popular,
        };
        Menu::from_items(vec![
            item(1, "Crêpe Nutella", "Chocolat noisette", true),
            item(2, "Crêpe Citron", "Citron et sucre", false),
        ])
    }

    #[test]
    fn test_get_by_id() {
        let menu = menu();
        assert!(menu.get(MenuItemId::new(2)).is_some());
        assert!(menu.get(MenuItemId::new(99)).is_none());
    }

    #[test]
    fn test_filter_search_and_popular() {
        let menu = menu();
        assert_eq!(menu.filter("", false).len(), 2);
        assert_eq!(menu.filter("citron", false).len(), 1);
        assert_eq!(menu.filter("", true).len(), 1);
        assert_eq!(menu.filter("citron", true).len(), 0);
    }
}
