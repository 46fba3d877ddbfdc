//! Shared types for the Skillet POS backend.
//!
//! Plain data records, the API response envelope and small utilities.
//! This crate has no I/O: serialization happens at the server boundary,
//! storage rows live in the server's repository layer.

pub mod models;
pub mod response;
pub mod util;

pub use models::{
    BillCreate, BillItem, BillRecord, BillStatus, BillUpdate, CartEntry, Category, MenuItem,
    MenuItemCreate, MenuItemUpdate, PaymentMethod, Settings,
};
pub use response::ApiResponse;
