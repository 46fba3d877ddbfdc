//! Bill Models
//!
//! A bill owns its line items outright: item name, icon and per-gram price
//! are snapshots taken at sale time, so later catalog changes never alter
//! history.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment method recorded on a bill
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Upi,
    Card,
    Check,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Card => "card",
            PaymentMethod::Check => "check",
            PaymentMethod::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "upi" => Ok(PaymentMethod::Upi),
            "card" => Ok(PaymentMethod::Card),
            "check" => Ok(PaymentMethod::Check),
            "other" => Ok(PaymentMethod::Other),
            unknown => Err(format!("Unknown payment method: {}", unknown)),
        }
    }
}

/// Bill lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    #[default]
    Completed,
    Cancelled,
}

/// One priced line of a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub item_name: String,
    #[serde(default)]
    pub icon: String,
    pub quantity_in_grams: f64,
    pub price_per_gram: f64,
    /// quantity_in_grams × price_per_gram, fixed at pricing time
    pub total_price: f64,
}

/// Bill entity
///
/// Invariants held at creation and after every update:
/// `subtotal == Σ items.total_price` and `total_amount == subtotal − discount`.
/// A discount larger than the subtotal yields a negative total; that is
/// accepted behavior, not clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: String,
    /// Sale time, UTC millis
    pub timestamp: i64,
    pub items: Vec<BillItem>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: BillStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One requested (item, quantity) pair, not yet priced
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub menu_item_id: String,
    pub quantity_in_grams: f64,
}

/// Checkout request
///
/// A missing `cartItems` field deserializes to an empty cart and fails
/// validation with the same message as an explicitly empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillCreate {
    #[serde(default)]
    pub cart_items: Vec<CartEntry>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: String,
}

/// Update bill payload — unspecified fields retain their prior value.
///
/// Totals are intentionally absent: `subtotal` and `total_amount` are
/// always re-derived server-side from the merged items and discount.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillUpdate {
    pub timestamp: Option<i64>,
    pub items: Option<Vec<BillItem>>,
    pub discount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub status: Option<BillStatus>,
}
