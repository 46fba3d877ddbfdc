//! Repository Module
//!
//! The catalog/billing/settings logic is written once against the traits
//! below; two stores implement them:
//!
//! - [`memory::MemoryStore`] — vectors behind an RwLock, the injectable
//!   replacement for the original's global arrays
//! - [`surreal`] — embedded SurrealDB (RocksDB on disk, in-memory engine
//!   in tests)
//!
//! The backend is chosen once at startup; handlers only ever see
//! `Arc<dyn …Repository>`.

pub mod memory;
pub mod surreal;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use shared::models::{
    BillRecord, Category, MenuItem, MenuItemUpdate, PaymentMethod, Settings,
};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    /// Message carries item name, available and requested grams, and is
    /// passed through to the wire verbatim.
    #[error("{0}")]
    InsufficientStock(String),

    #[error("{0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// One stock decrement requested by a checkout, in grams.
#[derive(Debug, Clone)]
pub struct StockDeduction {
    pub menu_item_id: String,
    pub quantity_in_grams: f64,
}

/// Menu catalog storage
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All items; `only_available` applies the `available = true` filter
    async fn find_all(&self, only_available: bool) -> RepoResult<Vec<MenuItem>>;

    async fn find_by_category(&self, category: Category) -> RepoResult<Vec<MenuItem>>;

    /// Distinct categories of stored items
    async fn categories(&self) -> RepoResult<Vec<Category>>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>>;

    /// Insert a fully-populated item; duplicate id → [`RepoError::Duplicate`]
    async fn create(&self, item: MenuItem) -> RepoResult<MenuItem>;

    /// Partial update; `Ok(None)` when the id is unknown
    async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<Option<MenuItem>>;

    /// Hard delete; returns whether a record existed
    async fn delete(&self, id: &str) -> RepoResult<bool>;

    /// Deduct stock for a whole cart, all-or-nothing.
    ///
    /// Every deduction is checked against the running balance (a cart
    /// naming the same item twice cannot over-deduct) and either the whole
    /// cart applies or nothing does. Failure kinds: [`RepoError::NotFound`]
    /// for an unknown id, [`RepoError::InsufficientStock`] otherwise.
    async fn deduct_stock(&self, deductions: &[StockDeduction]) -> RepoResult<()>;
}

/// Bill history storage
#[async_trait]
pub trait BillRepository: Send + Sync {
    /// Insert a new bill; duplicate id → [`RepoError::Duplicate`]
    async fn insert(&self, bill: BillRecord) -> RepoResult<BillRecord>;

    /// All bills, newest first
    async fn find_all(&self) -> RepoResult<Vec<BillRecord>>;

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<BillRecord>>;

    /// Bills with `start <= timestamp <= end` (inclusive), newest first
    async fn find_by_range(&self, start: i64, end: i64) -> RepoResult<Vec<BillRecord>>;

    async fn find_by_method(&self, method: PaymentMethod) -> RepoResult<Vec<BillRecord>>;

    /// Replace the stored record (the engine merges and recomputes totals
    /// before calling); `Ok(None)` when the id is unknown
    async fn update(&self, id: &str, bill: BillRecord) -> RepoResult<Option<BillRecord>>;

    /// Hard delete; returns whether a record existed
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

/// Keyed settings blobs, last write wins
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self, kind: &str) -> RepoResult<Option<Settings>>;

    async fn upsert(&self, kind: &str, data: Value) -> RepoResult<Settings>;
}
