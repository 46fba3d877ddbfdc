//! In-Memory Store
//!
//! Vectors behind `parking_lot::RwLock`s — the injectable replacement for
//! the original's global mutable arrays. State lives for the process
//! lifetime only; used by tests and `STORE_BACKEND=memory` deployments.
//!
//! Stock deduction takes the write lock once for the whole cart, so the
//! validate-then-deduct sequence is atomic here: concurrent checkouts are
//! serialized and a rejected cart leaves every balance untouched.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use shared::models::{
    BillRecord, Category, MenuItem, MenuItemUpdate, PaymentMethod, Settings,
};
use shared::util::now_millis;

use super::{
    BillRepository, MenuRepository, RepoError, RepoResult, SettingsRepository, StockDeduction,
};

/// Process-local store implementing all three repositories
#[derive(Default)]
pub struct MemoryStore {
    menu: RwLock<Vec<MenuItem>>,
    bills: RwLock<Vec<BillRecord>>,
    settings: RwLock<Vec<Settings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn find_all(&self, only_available: bool) -> RepoResult<Vec<MenuItem>> {
        let items = self.menu.read();
        Ok(items
            .iter()
            .filter(|item| !only_available || item.available)
            .cloned()
            .collect())
    }

    async fn find_by_category(&self, category: Category) -> RepoResult<Vec<MenuItem>> {
        let items = self.menu.read();
        Ok(items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect())
    }

    async fn categories(&self) -> RepoResult<Vec<Category>> {
        let items = self.menu.read();
        let mut categories: Vec<Category> = items.iter().map(|item| item.category).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let items = self.menu.read();
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn create(&self, item: MenuItem) -> RepoResult<MenuItem> {
        let mut items = self.menu.write();
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(RepoError::Duplicate(format!(
                "Menu item with id {} already exists",
                item.id
            )));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<Option<MenuItem>> {
        let mut items = self.menu.write();
        let Some(item) = items.iter_mut().find(|item| item.id == id) else {
            return Ok(None);
        };

        if let Some(name) = data.name {
            item.name = name;
        }
        if let Some(category) = data.category {
            item.category = category;
        }
        if let Some(price) = data.price {
            item.price = price;
        }
        if let Some(description) = data.description {
            item.description = description;
        }
        if let Some(icon) = data.icon {
            item.icon = icon;
        }
        if let Some(available) = data.available {
            item.available = available;
        }
        if let Some(stock_quantity) = data.stock_quantity {
            item.stock_quantity = stock_quantity;
        }
        if let Some(low_stock_threshold) = data.low_stock_threshold {
            item.low_stock_threshold = low_stock_threshold;
        }
        item.updated_at = now_millis();

        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut items = self.menu.write();
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }

    async fn deduct_stock(&self, deductions: &[StockDeduction]) -> RepoResult<()> {
        let mut items = self.menu.write();

        // Pass 1: check against the running balance; nothing is mutated yet.
        let mut remaining: HashMap<usize, f64> = HashMap::new();
        for deduction in deductions {
            let Some(index) = items
                .iter()
                .position(|item| item.id == deduction.menu_item_id)
            else {
                return Err(RepoError::NotFound(format!(
                    "Item not found: {}",
                    deduction.menu_item_id
                )));
            };
            let balance = remaining
                .entry(index)
                .or_insert(items[index].stock_quantity);
            if *balance < deduction.quantity_in_grams {
                return Err(RepoError::InsufficientStock(format!(
                    "Insufficient stock for {}. Available: {}g, Requested: {}g",
                    items[index].name, *balance, deduction.quantity_in_grams
                )));
            }
            *balance -= deduction.quantity_in_grams;
        }

        // Pass 2: commit the new balances.
        let now = now_millis();
        for (index, balance) in remaining {
            items[index].stock_quantity = balance;
            items[index].updated_at = now;
        }
        Ok(())
    }
}

#[async_trait]
impl BillRepository for MemoryStore {
    async fn insert(&self, bill: BillRecord) -> RepoResult<BillRecord> {
        let mut bills = self.bills.write();
        if bills.iter().any(|existing| existing.id == bill.id) {
            return Err(RepoError::Duplicate(format!(
                "Bill with id {} already exists",
                bill.id
            )));
        }
        bills.push(bill.clone());
        Ok(bill)
    }

    async fn find_all(&self) -> RepoResult<Vec<BillRecord>> {
        let bills = self.bills.read();
        let mut all: Vec<BillRecord> = bills.clone();
        all.sort_by_key(|bill| std::cmp::Reverse(bill.timestamp));
        Ok(all)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<BillRecord>> {
        let bills = self.bills.read();
        Ok(bills.iter().find(|bill| bill.id == id).cloned())
    }

    async fn find_by_range(&self, start: i64, end: i64) -> RepoResult<Vec<BillRecord>> {
        let bills = self.bills.read();
        let mut matching: Vec<BillRecord> = bills
            .iter()
            .filter(|bill| bill.timestamp >= start && bill.timestamp <= end)
            .cloned()
            .collect();
        matching.sort_by_key(|bill| std::cmp::Reverse(bill.timestamp));
        Ok(matching)
    }

    async fn find_by_method(&self, method: PaymentMethod) -> RepoResult<Vec<BillRecord>> {
        let bills = self.bills.read();
        let mut matching: Vec<BillRecord> = bills
            .iter()
            .filter(|bill| bill.payment_method == method)
            .cloned()
            .collect();
        matching.sort_by_key(|bill| std::cmp::Reverse(bill.timestamp));
        Ok(matching)
    }

    async fn update(&self, id: &str, bill: BillRecord) -> RepoResult<Option<BillRecord>> {
        let mut bills = self.bills.write();
        let Some(slot) = bills.iter_mut().find(|existing| existing.id == id) else {
            return Ok(None);
        };
        *slot = bill.clone();
        Ok(Some(bill))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let mut bills = self.bills.write();
        let before = bills.len();
        bills.retain(|bill| bill.id != id);
        Ok(bills.len() < before)
    }
}

#[async_trait]
impl SettingsRepository for MemoryStore {
    async fn get(&self, kind: &str) -> RepoResult<Option<Settings>> {
        let settings = self.settings.read();
        Ok(settings.iter().find(|entry| entry.kind == kind).cloned())
    }

    async fn upsert(&self, kind: &str, data: Value) -> RepoResult<Settings> {
        let mut settings = self.settings.write();
        let entry = Settings {
            kind: kind.to_string(),
            data,
            updated_at: now_millis(),
        };
        if let Some(slot) = settings.iter_mut().find(|entry| entry.kind == kind) {
            *slot = entry.clone();
        } else {
            settings.push(entry.clone());
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn test_item(id: &str, name: &str, stock: f64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Snacks,
            price: 0.025,
            description: String::new(),
            icon: "🍽️".to_string(),
            available: true,
            stock_quantity: stock,
            low_stock_threshold: 100.0,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn deduction(id: &str, grams: f64) -> StockDeduction {
        StockDeduction {
            menu_item_id: id.to_string(),
            quantity_in_grams: grams,
        }
    }

    // MemoryStore implements all three repositories, so the shared method
    // names (find_by_id, update, ...) are called through trait-object refs.

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let store = MemoryStore::new();
        let menu: &dyn MenuRepository = &store;
        menu.create(test_item("item_1", "Samosa", 500.0)).await.unwrap();

        let found = menu.find_by_id("item_1").await.unwrap().unwrap();
        assert_eq!(found.name, "Samosa");
        assert!(menu.find_by_id("item_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let store = MemoryStore::new();
        let menu: &dyn MenuRepository = &store;
        menu.create(test_item("item_1", "Samosa", 500.0)).await.unwrap();
        let err = menu.create(test_item("item_1", "Clone", 1.0)).await;
        assert!(matches!(err, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = MemoryStore::new();
        let menu: &dyn MenuRepository = &store;
        menu.create(test_item("item_1", "Samosa", 500.0)).await.unwrap();

        let updated = menu
            .update(
                "item_1",
                MenuItemUpdate {
                    price: Some(0.05),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 0.05);
        assert_eq!(updated.name, "Samosa");
        assert_eq!(updated.stock_quantity, 500.0);

        // Unknown id is "not found", not an error
        let missing = menu.update("item_x", MenuItemUpdate::default()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn rejected_cart_changes_no_stock() {
        let store = MemoryStore::new();
        let menu: &dyn MenuRepository = &store;
        menu.create(test_item("item_1", "Samosa", 500.0)).await.unwrap();
        menu.create(test_item("item_2", "Jalebi", 80.0)).await.unwrap();

        // Second line exceeds stock; first line must not have been applied.
        let err = menu
            .deduct_stock(&[deduction("item_1", 100.0), deduction("item_2", 100.0)])
            .await;
        assert!(matches!(err, Err(RepoError::InsufficientStock(_))));
        assert_eq!(menu.find_by_id("item_1").await.unwrap().unwrap().stock_quantity, 500.0);
        assert_eq!(menu.find_by_id("item_2").await.unwrap().unwrap().stock_quantity, 80.0);
    }

    #[tokio::test]
    async fn duplicate_lines_are_checked_cumulatively() {
        let store = MemoryStore::new();
        let menu: &dyn MenuRepository = &store;
        menu.create(test_item("item_1", "Samosa", 500.0)).await.unwrap();

        // 300 + 300 > 500 even though each line alone fits
        let err = menu
            .deduct_stock(&[deduction("item_1", 300.0), deduction("item_1", 300.0)])
            .await;
        assert!(matches!(err, Err(RepoError::InsufficientStock(_))));
        assert_eq!(menu.find_by_id("item_1").await.unwrap().unwrap().stock_quantity, 500.0);

        menu.deduct_stock(&[deduction("item_1", 300.0), deduction("item_1", 200.0)])
            .await
            .unwrap();
        assert_eq!(menu.find_by_id("item_1").await.unwrap().unwrap().stock_quantity, 0.0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_full_balance_carts_have_one_winner() {
        let store: Arc<dyn MenuRepository> = Arc::new(MemoryStore::new());
        store.create(test_item("item_1", "Samosa", 500.0)).await.unwrap();

        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.deduct_stock(&[deduction("item_1", 500.0)]).await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.deduct_stock(&[deduction("item_1", 500.0)]).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert_eq!(store.find_by_id("item_1").await.unwrap().unwrap().stock_quantity, 0.0);
    }

    #[tokio::test]
    async fn bills_list_newest_first_and_range_is_inclusive() {
        let store = MemoryStore::new();
        let bills: &dyn BillRepository = &store;
        for (id, ts) in [("bill_1", 1_000), ("bill_2", 3_000), ("bill_3", 2_000)] {
            bills
                .insert(BillRecord {
                    id: id.to_string(),
                    timestamp: ts,
                    items: vec![],
                    subtotal: 0.0,
                    discount: 0.0,
                    total_amount: 0.0,
                    payment_method: PaymentMethod::Cash,
                    notes: String::new(),
                    status: Default::default(),
                    created_at: ts,
                    updated_at: ts,
                })
                .await
                .unwrap();
        }

        let all = bills.find_all().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["bill_2", "bill_3", "bill_1"]);

        // Both bounds are inclusive
        let ranged = bills.find_by_range(1_000, 2_000).await.unwrap();
        let ids: Vec<&str> = ranged.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["bill_3", "bill_1"]);
    }

    #[tokio::test]
    async fn settings_upsert_is_last_write_wins() {
        let store = MemoryStore::new();
        store
            .upsert("payment_config", serde_json::json!({"upi": true}))
            .await
            .unwrap();
        store
            .upsert("payment_config", serde_json::json!({"upi": false}))
            .await
            .unwrap();

        let entry = store.get("payment_config").await.unwrap().unwrap();
        assert_eq!(entry.data, serde_json::json!({"upi": false}));
        assert!(store.get("missing").await.unwrap().is_none());
    }
}
