//! Billing Engine
//!
//! Turns a cart of (menu item, grams) pairs into a priced, persisted bill
//! and keeps updates consistent. Storage-agnostic: everything goes through
//! the repository traits.
//!
//! Totals are derived, never trusted: `total_price = grams × price-per-gram`
//! per line, `subtotal = Σ total_price`, `total_amount = subtotal − discount`.
//! A discount above the subtotal produces a negative total on purpose.

use shared::models::{BillCreate, BillItem, BillRecord, BillUpdate, MenuItem};
use shared::util::{now_millis, prefixed_id};

use crate::db::{BillRepository, MenuRepository, StockDeduction};
use crate::utils::validation::{MAX_TEXT_LEN, validate_non_negative, validate_optional_text};
use crate::utils::{AppError, AppResult};

/// Price a resolved cart: snapshot name, icon and per-gram price per line.
pub fn price_cart(resolved: &[(MenuItem, f64)]) -> Vec<BillItem> {
    resolved
        .iter()
        .map(|(item, quantity_in_grams)| BillItem {
            item_name: item.name.clone(),
            icon: item.icon.clone(),
            quantity_in_grams: *quantity_in_grams,
            price_per_gram: item.price,
            total_price: quantity_in_grams * item.price,
        })
        .collect()
}

/// `(subtotal, total_amount)` for a set of priced lines
pub fn compute_totals(items: &[BillItem], discount: f64) -> (f64, f64) {
    let subtotal: f64 = items.iter().map(|item| item.total_price).sum();
    (subtotal, subtotal - discount)
}

fn validate_cart(request: &BillCreate) -> AppResult<()> {
    if request.cart_items.is_empty() {
        return Err(AppError::validation(
            "Cart items are required and must be a non-empty array",
        ));
    }
    for entry in &request.cart_items {
        if !entry.quantity_in_grams.is_finite() || entry.quantity_in_grams <= 0.0 {
            return Err(AppError::validation(format!(
                "Quantity for {} must be a positive number of grams",
                entry.menu_item_id
            )));
        }
    }
    validate_non_negative(request.discount, "Discount")?;
    if request.notes.len() > MAX_TEXT_LEN {
        return Err(AppError::validation("Notes cannot be more than 500 characters"));
    }
    Ok(())
}

/// Create a bill from a cart.
///
/// Resolves every entry, deducts stock for the whole cart in one
/// all-or-nothing storage operation, prices the lines from the current
/// catalog and persists the record. A stock rejection leaves no partial
/// state behind.
pub async fn create_bill(
    menu: &dyn MenuRepository,
    bills: &dyn BillRepository,
    request: BillCreate,
) -> AppResult<BillRecord> {
    validate_cart(&request)?;

    // Resolve references before touching any stock
    let mut resolved: Vec<(MenuItem, f64)> = Vec::with_capacity(request.cart_items.len());
    for entry in &request.cart_items {
        let item = menu
            .find_by_id(&entry.menu_item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Item not found: {}", entry.menu_item_id)))?;
        resolved.push((item, entry.quantity_in_grams));
    }

    let deductions: Vec<StockDeduction> = request
        .cart_items
        .iter()
        .map(|entry| StockDeduction {
            menu_item_id: entry.menu_item_id.clone(),
            quantity_in_grams: entry.quantity_in_grams,
        })
        .collect();
    menu.deduct_stock(&deductions).await?;

    let items = price_cart(&resolved);
    let (subtotal, total_amount) = compute_totals(&items, request.discount);

    let now = now_millis();
    let bill = BillRecord {
        id: prefixed_id("bill"),
        timestamp: now,
        items,
        subtotal,
        discount: request.discount,
        total_amount,
        payment_method: request.payment_method,
        notes: request.notes,
        status: Default::default(),
        created_at: now,
        updated_at: now,
    };

    let bill = bills.insert(bill).await?;
    tracing::info!(bill_id = %bill.id, total = bill.total_amount, "Bill created");
    Ok(bill)
}

/// Merge an update over a stored bill and re-derive every total.
///
/// Supplied line items get their `total_price` recomputed from quantity ×
/// price, so a caller cannot desynchronize the bill invariants.
pub async fn update_bill(
    bills: &dyn BillRepository,
    id: &str,
    update: BillUpdate,
) -> AppResult<BillRecord> {
    let mut bill = bills
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Bill"))?;

    if let Some(discount) = update.discount {
        validate_non_negative(discount, "Discount")?;
        bill.discount = discount;
    }
    validate_optional_text(&update.notes, "Notes", MAX_TEXT_LEN)?;

    if let Some(items) = update.items {
        for item in &items {
            if !item.quantity_in_grams.is_finite() || item.quantity_in_grams <= 0.0 {
                return Err(AppError::validation(format!(
                    "Quantity for {} must be a positive number of grams",
                    item.item_name
                )));
            }
            validate_non_negative(item.price_per_gram, "Price per gram")?;
        }
        bill.items = items
            .into_iter()
            .map(|mut item| {
                item.total_price = item.quantity_in_grams * item.price_per_gram;
                item
            })
            .collect();
    }
    if let Some(timestamp) = update.timestamp {
        bill.timestamp = timestamp;
    }
    if let Some(payment_method) = update.payment_method {
        bill.payment_method = payment_method;
    }
    if let Some(notes) = update.notes {
        bill.notes = notes;
    }
    if let Some(status) = update.status {
        bill.status = status;
    }

    let (subtotal, total_amount) = compute_totals(&bill.items, bill.discount);
    bill.subtotal = subtotal;
    bill.total_amount = total_amount;
    bill.updated_at = now_millis();

    bills
        .update(id, bill)
        .await?
        .ok_or_else(|| AppError::not_found("Bill"))
}
