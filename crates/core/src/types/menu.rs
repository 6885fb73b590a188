//! Menu content types.
//!
//! The menu is bundled with the storefront as a JSON content file; the
//! external API is not involved in browsing.

use serde::{Deserialize, Serialize};

use super::id::MenuItemId;

/// One size option with its price in FCFA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizePrice {
    pub size: String,
    pub price: i64,
}

/// A crêpe on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub prices: Vec<SizePrice>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Preparation time in minutes.
    pub preparation_time: u32,
    pub rating: f64,
    #[serde(default)]
    pub popular: bool,
}

impl MenuItem {
    /// Price for a given size, if the item is offered in that size.
    #[must_use]
    pub fn price_for_size(&self, size: &str) -> Option<i64> {
        self.prices.iter().find(|p| p.size == size).map(|p| p.price)
    }

    /// Case-insensitive substring match over name and description.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> MenuItem {
        MenuItem {
            id: MenuItemId::new(1),
            name: "Crêpe Banane-Chocolat".to_string(),
            description: "Banane fraîche et chocolat fondu".to_string(),
            prices: vec![
                SizePrice {
                    size: "Petite".to_string(),
                    price: 1000,
                },
                SizePrice {
                    size: "Grande".to_string(),
                    price: 2000,
                },
            ],
            images: vec![],
            preparation_time: 10,
            rating: 4.5,
            popular: true,
        }
    }

    #[test]
    fn test_price_for_size() {
        let item = item();
        assert_eq!(item.price_for_size("Petite"), Some(1000));
        assert_eq!(item.price_for_size("Géante"), None);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let item = item();
        assert!(item.matches_search("banane"));
        assert!(item.matches_search("CHOCOLAT"));
        assert!(!item.matches_search("fraise"));
    }
}
