//! Data records shared between the server and its tests.
//!
//! Records are plain serde structs; behavior (pricing, aggregation,
//! persistence) lives in the server crate.

pub mod bill;
pub mod menu_item;
pub mod settings;

pub use bill::{
    BillCreate, BillItem, BillRecord, BillStatus, BillUpdate, CartEntry, PaymentMethod,
};
pub use menu_item::{Category, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use settings::Settings;
