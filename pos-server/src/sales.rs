//! Sales Aggregator
//!
//! Pure read-side computations over bill history. Handlers fetch the
//! relevant bills through the repository and the functions here never
//! mutate anything, so summaries work identically on both backends and
//! reflect a best-effort point-in-time view.

use std::collections::BTreeMap;

use serde::Serialize;

use shared::models::{BillRecord, PaymentMethod};

/// Aggregate statistics over a set of bills
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_bills: usize,
    pub total_revenue: f64,
    pub total_discount: f64,
    pub average_order_value: f64,
    pub payment_method_breakdown: BTreeMap<PaymentMethod, f64>,
}

/// Revenue/discount/count for one calendar day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_bills: usize,
    pub total_revenue: f64,
    pub total_discount: f64,
}

/// One entry of the most-sold ranking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub icon: String,
    pub quantity_sold: f64,
    pub revenue: f64,
}

pub const DEFAULT_TOP_ITEMS_LIMIT: usize = 10;

/// Totals, average order value and per-method breakdown.
///
/// `average_order_value` is 0 when there are no bills.
pub fn sales_summary(bills: &[BillRecord]) -> SalesSummary {
    let total_bills = bills.len();
    let total_revenue: f64 = bills.iter().map(|bill| bill.total_amount).sum();
    let total_discount: f64 = bills.iter().map(|bill| bill.discount).sum();
    let average_order_value = if total_bills > 0 {
        total_revenue / total_bills as f64
    } else {
        0.0
    };

    let mut payment_method_breakdown: BTreeMap<PaymentMethod, f64> = BTreeMap::new();
    for bill in bills {
        *payment_method_breakdown
            .entry(bill.payment_method)
            .or_insert(0.0) += bill.total_amount;
    }

    SalesSummary {
        total_bills,
        total_revenue,
        total_discount,
        average_order_value,
        payment_method_breakdown,
    }
}

/// Same aggregation restricted to bills the caller already filtered to one
/// calendar day.
pub fn daily_summary(bills: &[BillRecord]) -> DailySummary {
    DailySummary {
        total_bills: bills.len(),
        total_revenue: bills.iter().map(|bill| bill.total_amount).sum(),
        total_discount: bills.iter().map(|bill| bill.discount).sum(),
    }
}

/// Group line items by name across all bills, sum grams and revenue, rank
/// by grams sold.
///
/// Ordering: quantity_sold descending, ties broken by item name ascending.
pub fn most_sold_items(bills: &[BillRecord], limit: usize) -> Vec<TopItem> {
    // BTreeMap keeps equal-quantity entries in name order; the descending
    // sort below is stable, so the tie-break costs nothing extra.
    let mut by_name: BTreeMap<&str, TopItem> = BTreeMap::new();
    for bill in bills {
        for item in &bill.items {
            let entry = by_name
                .entry(item.item_name.as_str())
                .or_insert_with(|| TopItem {
                    name: item.item_name.clone(),
                    icon: item.icon.clone(),
                    quantity_sold: 0.0,
                    revenue: 0.0,
                });
            entry.quantity_sold += item.quantity_in_grams;
            entry.revenue += item.total_price;
        }
    }

    let mut ranking: Vec<TopItem> = by_name.into_values().collect();
    ranking.sort_by(|a, b| {
        b.quantity_sold
            .partial_cmp(&a.quantity_sold)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranking.truncate(limit);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{BillItem, BillStatus};

    fn bill(id: &str, total: f64, discount: f64, method: PaymentMethod) -> BillRecord {
        BillRecord {
            id: id.to_string(),
            timestamp: 0,
            items: vec![],
            subtotal: total + discount,
            discount,
            total_amount: total,
            payment_method: method,
            notes: String::new(),
            status: BillStatus::Completed,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn line(name: &str, grams: f64, price: f64) -> BillItem {
        BillItem {
            item_name: name.to_string(),
            icon: "🍽️".to_string(),
            quantity_in_grams: grams,
            price_per_gram: price,
            total_price: grams * price,
        }
    }

    #[test]
    fn summary_sums_revenue_discount_and_average() {
        let bills = vec![
            bill("bill_1", 100.0, 10.0, PaymentMethod::Cash),
            bill("bill_2", 50.0, 0.0, PaymentMethod::Upi),
            bill("bill_3", 30.0, 5.0, PaymentMethod::Cash),
        ];
        let summary = sales_summary(&bills);

        assert_eq!(summary.total_bills, 3);
        assert_eq!(summary.total_revenue, 180.0);
        assert_eq!(summary.total_discount, 15.0);
        assert_eq!(summary.average_order_value, 60.0);
        assert_eq!(summary.payment_method_breakdown[&PaymentMethod::Cash], 130.0);
        assert_eq!(summary.payment_method_breakdown[&PaymentMethod::Upi], 50.0);
    }

    #[test]
    fn empty_history_has_zero_average() {
        let summary = sales_summary(&[]);
        assert_eq!(summary.total_bills, 0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.average_order_value, 0.0);
        assert!(summary.payment_method_breakdown.is_empty());
    }

    #[test]
    fn daily_summary_counts_the_given_day() {
        let bills = vec![
            bill("bill_1", 12.5, 0.0, PaymentMethod::Cash),
            bill("bill_2", 7.5, 2.0, PaymentMethod::Card),
        ];
        let daily = daily_summary(&bills);
        assert_eq!(daily.total_bills, 2);
        assert_eq!(daily.total_revenue, 20.0);
        assert_eq!(daily.total_discount, 2.0);
    }

    #[test]
    fn top_items_group_across_bills_and_rank_by_grams() {
        let mut bill_a = bill("bill_1", 0.0, 0.0, PaymentMethod::Cash);
        bill_a.items = vec![line("Samosa", 500.0, 0.025), line("Jalebi", 200.0, 0.04)];
        let mut bill_b = bill("bill_2", 0.0, 0.0, PaymentMethod::Cash);
        bill_b.items = vec![line("Samosa", 300.0, 0.025)];

        let top = most_sold_items(&[bill_a, bill_b], 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Samosa");
        assert_eq!(top[0].quantity_sold, 800.0);
        assert_eq!(top[0].revenue, 800.0 * 0.025);
        assert_eq!(top[1].name, "Jalebi");
    }

    #[test]
    fn top_items_respect_the_limit() {
        let mut b = bill("bill_1", 0.0, 0.0, PaymentMethod::Cash);
        b.items = vec![
            line("A", 300.0, 1.0),
            line("B", 200.0, 1.0),
            line("C", 100.0, 1.0),
        ];
        let top = most_sold_items(&[b], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "A");
        assert_eq!(top[1].name, "B");
    }

    #[test]
    fn ties_break_by_name_ascending() {
        let mut b = bill("bill_1", 0.0, 0.0, PaymentMethod::Cash);
        b.items = vec![
            line("Vada", 200.0, 1.0),
            line("Bhaji", 200.0, 1.0),
            line("Dosa", 200.0, 1.0),
        ];
        let top = most_sold_items(&[b], 10);
        let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Bhaji", "Dosa", "Vada"]);
    }
}
