//! Menu Item Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Menu category — closed set, unknown values are a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Main Dish")]
    MainDish,
    Beverages,
    Desserts,
    Snacks,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MainDish => "Main Dish",
            Category::Beverages => "Beverages",
            Category::Desserts => "Desserts",
            Category::Snacks => "Snacks",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Main Dish" => Ok(Category::MainDish),
            "Beverages" => Ok(Category::Beverages),
            "Desserts" => Ok(Category::Desserts),
            "Snacks" => Ok(Category::Snacks),
            "Other" => Ok(Category::Other),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Menu item entity
///
/// `price` is per gram; `stock_quantity` is the remaining stock in grams.
/// Both are f64 because quantities are weighed and fractional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default = "default_stock")]
    pub stock_quantity: f64,
    #[serde(default = "default_low_stock")]
    pub low_stock_threshold: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

fn default_icon() -> String {
    "🍽️".to_string()
}

fn default_true() -> bool {
    true
}

fn default_stock() -> f64 {
    50_000.0
}

fn default_low_stock() -> f64 {
    5_000.0
}

impl MenuItem {
    /// Fresh item with catalog defaults; timestamps set to now.
    pub fn new(id: String, name: String, category: Category, price: f64) -> Self {
        let now = crate::util::now_millis();
        Self {
            id,
            name,
            category,
            price,
            description: String::new(),
            icon: default_icon(),
            available: true,
            stock_quantity: default_stock(),
            low_stock_threshold: default_low_stock(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create menu item payload
///
/// `name`/`category`/`price` are optional at the wire level so the server
/// can answer their absence with one friendly validation message instead
/// of a deserializer error. `id` is normally server-assigned; a supplied
/// id is honored when it does not collide with an existing record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemCreate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub available: Option<bool>,
    pub stock_quantity: Option<f64>,
    pub low_stock_threshold: Option<f64>,
}

/// Update menu item payload — unspecified fields retain their prior value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub available: Option<bool>,
    pub stock_quantity: Option<f64>,
    pub low_stock_threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_wire_names() {
        let json = serde_json::to_string(&Category::MainDish).unwrap();
        assert_eq!(json, "\"Main Dish\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::MainDish);
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("Sides".parse::<Category>().is_err());
        assert!(serde_json::from_str::<Category>("\"Sides\"").is_err());
    }

    #[test]
    fn menu_item_defaults_apply_on_deserialize() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id":"item_1","name":"Samosa","category":"Snacks","price":0.025,
                "createdAt":0,"updatedAt":0}"#,
        )
        .unwrap();
        assert!(item.available);
        assert_eq!(item.stock_quantity, 50_000.0);
        assert_eq!(item.low_stock_threshold, 5_000.0);
        assert_eq!(item.icon, "🍽️");
    }
}
