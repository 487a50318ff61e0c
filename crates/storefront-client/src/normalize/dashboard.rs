use serde_json::Value;
use storefront_core::{
    CategoryStat, DashboardAnalytics, GrowthMetrics, OrderStatus, OrderStatusBreakdown,
    PaymentMethodStat, ProductStat, RevenuePoint,
};

use crate::coalesce::{coalesce, field, field_any_case};
use crate::coerce::{opt_text, to_count, to_number};
use crate::media::MediaResolver;

use super::order::{normalize_order_with_fallback_id, payment_method_label, status_from_value};
use super::synth_id;

/// Normalizes the admin dashboard payload.
///
/// Counters default to `0`; every collection is present (possibly empty);
/// list elements without an ID get one derived from their collection and
/// position.
#[must_use]
pub fn normalize_dashboard(raw: &Value, media: &MediaResolver) -> DashboardAnalytics {
    let breakdown = normalize_breakdown(any_of(
        raw,
        &["orderStatusBreakdown", "orderStatusStats", "ordersByStatus"],
    ));

    DashboardAnalytics {
        total_revenue: amount(raw, &["totalRevenue", "revenue"]),
        total_orders: count(raw, &["totalOrders", "orderCount"]),
        total_customers: count(raw, &["totalCustomers", "customerCount", "totalUsers"]),
        total_products: count(raw, &["totalProducts", "productCount"]),
        total_categories: count(raw, &["totalCategories", "categoryCount"]),
        today_revenue: amount(raw, &["todayRevenue"]),
        today_orders: count(raw, &["todayOrders"]),
        monthly_revenue: amount(raw, &["monthlyRevenue", "thisMonthRevenue"]),
        monthly_orders: count(raw, &["monthlyOrders", "thisMonthOrders"]),
        average_order_value: amount(raw, &["averageOrderValue", "avgOrderValue"]),
        pending_orders: any_of(raw, &["pendingOrders"]).map_or(breakdown.pending, to_count),
        order_status_breakdown: breakdown,
        recent_orders: collection(
            raw,
            &["recentOrders", "latestOrders"],
            "recent-order",
            |item, id| normalize_order_with_fallback_id(item, media, Some(id)),
        ),
        top_categories: collection(
            raw,
            &["topCategories", "categoryStats"],
            "top-category",
            category_stat,
        ),
        top_products: collection(raw, &["topProducts"], "top-product", |item, id| {
            product_stat(item, id, media)
        }),
        top_selling_products: collection(
            raw,
            &["topSellingProducts", "bestSellingProducts", "bestSellers"],
            "top-selling-product",
            |item, id| product_stat(item, id, media),
        ),
        top_revenue_products: collection(
            raw,
            &["topRevenueProducts"],
            "top-revenue-product",
            |item, id| product_stat(item, id, media),
        ),
        payment_method_stats: payment_stats(any_of(
            raw,
            &["paymentMethodStats", "paymentStats", "paymentMethods"],
        )),
        last_7_days_revenue: collection(
            raw,
            &["last7DaysRevenue", "dailyRevenue", "revenueLast7Days"],
            "day",
            revenue_point,
        ),
        last_12_months_revenue: collection(
            raw,
            &["last12MonthsRevenue", "monthlyRevenueChart", "revenueLast12Months"],
            "month",
            revenue_point,
        ),
        growth_metrics: growth(raw),
    }
}

/// First present value among several logical names, each tried in every
/// casing.
fn any_of<'a>(raw: &'a Value, names: &[&str]) -> Option<&'a Value> {
    coalesce(names.iter().map(|name| field_any_case(raw, name)))
}

fn amount(raw: &Value, names: &[&str]) -> f64 {
    any_of(raw, names).map_or(0.0, to_number)
}

fn count(raw: &Value, names: &[&str]) -> u64 {
    any_of(raw, names).map_or(0, to_count)
}

/// Normalizes every element of the first array found under `names`.
fn collection<T, F>(raw: &Value, names: &[&str], prefix: &str, mut normalize: F) -> Vec<T>
where
    F: FnMut(&Value, String) -> T,
{
    any_of(raw, names)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| normalize(item, synth_id(prefix, idx)))
                .collect()
        })
        .unwrap_or_default()
}

fn element_id(item: &Value, keys: &[&str], fallback: String) -> String {
    opt_text(field(item, keys)).unwrap_or(fallback)
}

fn category_stat(item: &Value, fallback_id: String) -> CategoryStat {
    CategoryStat {
        id: element_id(item, &["id", "Id", "categoryId", "CategoryId"], fallback_id),
        name: opt_text(any_of(item, &["name", "categoryName"])).unwrap_or_default(),
        product_count: count(item, &["productCount", "totalProducts"]),
        order_count: count(item, &["orderCount", "totalOrders"]),
        revenue: amount(item, &["revenue", "totalRevenue"]),
    }
}

fn product_stat(item: &Value, fallback_id: String, media: &MediaResolver) -> ProductStat {
    let image = opt_text(any_of(item, &["imageUrl", "image", "thumbnail"]));
    ProductStat {
        id: element_id(item, &["id", "Id", "productId", "ProductId"], fallback_id),
        name: opt_text(any_of(item, &["name", "productName"])).unwrap_or_default(),
        image_url: media.resolve_optional(image.as_deref()),
        quantity_sold: count(
            item,
            &["quantitySold", "totalSold", "soldCount", "sold", "quantity"],
        ),
        revenue: amount(item, &["revenue", "totalRevenue"]),
    }
}

fn revenue_point(item: &Value, fallback_id: String) -> RevenuePoint {
    RevenuePoint {
        label: opt_text(any_of(item, &["label", "date", "day", "month", "name"]))
            .unwrap_or_default(),
        revenue: amount(item, &["revenue", "total", "amount"]),
        orders: count(item, &["orders", "orderCount", "count"]),
        id: element_id(item, &["id", "Id"], fallback_id),
    }
}

/// Accepts an array of `{method, count, revenue}` entries or an object keyed
/// by method whose values are counts or `{count, revenue}` objects.
fn payment_stats(raw: Option<&Value>) -> Vec<PaymentMethodStat> {
    match raw {
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| PaymentMethodStat {
                id: element_id(item, &["id", "Id"], synth_id("payment-method", idx)),
                method: any_of(item, &["method", "paymentMethod"])
                    .map(payment_method_label)
                    .unwrap_or_default(),
                count: count(item, &["count", "orderCount", "totalOrders"]),
                revenue: amount(item, &["revenue", "totalAmount", "total"]),
            })
            .collect(),
        Some(Value::Object(by_method)) => by_method
            .iter()
            .enumerate()
            .map(|(idx, (method, stats))| {
                let (count_value, revenue_value) = if stats.is_object() {
                    (
                        count(stats, &["count", "orderCount"]),
                        amount(stats, &["revenue", "total"]),
                    )
                } else {
                    (to_count(stats), 0.0)
                };
                PaymentMethodStat {
                    id: synth_id("payment-method", idx),
                    method: payment_method_label(&Value::String(method.clone())),
                    count: count_value,
                    revenue: revenue_value,
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Accepts an object keyed by status or an array of `{status, count, revenue}`
/// entries. Statuses outside the known five are ignored.
fn normalize_breakdown(raw: Option<&Value>) -> OrderStatusBreakdown {
    let mut breakdown = OrderStatusBreakdown::default();
    match raw {
        Some(Value::Array(entries)) => {
            for entry in entries {
                let Some(status) = any_of(entry, &["status", "name"]) else {
                    continue;
                };
                let status = status_from_value(status);
                let entry_count = count(entry, &["count", "orderCount", "total"]);
                let entry_revenue = amount(entry, &["revenue", "totalRevenue"]);
                if let Some((slot_count, slot_revenue)) = slots(&mut breakdown, &status) {
                    *slot_count = slot_count.saturating_add(entry_count);
                    *slot_revenue += entry_revenue;
                }
            }
        }
        Some(by_status @ Value::Object(_)) => {
            for status in OrderStatus::KNOWN {
                let name = status.as_str();
                let mut count_names = vec![
                    name.to_string(),
                    format!("{name}Orders"),
                    format!("{name}Count"),
                ];
                let mut revenue_names = vec![format!("{name}Revenue")];
                if status == OrderStatus::Cancelled {
                    count_names.push("canceled".to_string());
                    count_names.push("canceledOrders".to_string());
                    revenue_names.push("canceledRevenue".to_string());
                }
                let count_refs: Vec<&str> = count_names.iter().map(String::as_str).collect();
                let revenue_refs: Vec<&str> = revenue_names.iter().map(String::as_str).collect();
                let status_count = count(by_status, &count_refs);
                let status_revenue = amount(by_status, &revenue_refs);
                if let Some((slot_count, slot_revenue)) = slots(&mut breakdown, &status) {
                    *slot_count = status_count;
                    *slot_revenue = status_revenue;
                }
            }
        }
        _ => {}
    }
    breakdown
}

fn slots<'a>(
    breakdown: &'a mut OrderStatusBreakdown,
    status: &OrderStatus,
) -> Option<(&'a mut u64, &'a mut f64)> {
    match status {
        OrderStatus::Pending => Some((&mut breakdown.pending, &mut breakdown.pending_revenue)),
        OrderStatus::Processing => Some((
            &mut breakdown.processing,
            &mut breakdown.processing_revenue,
        )),
        OrderStatus::Shipped => Some((&mut breakdown.shipped, &mut breakdown.shipped_revenue)),
        OrderStatus::Delivered => Some((
            &mut breakdown.delivered,
            &mut breakdown.delivered_revenue,
        )),
        OrderStatus::Cancelled => Some((
            &mut breakdown.cancelled,
            &mut breakdown.cancelled_revenue,
        )),
        OrderStatus::Other(_) => None,
    }
}

/// Growth deltas from a nested `growthMetrics` object, falling back to
/// top-level fields of the same name.
fn growth(raw: &Value) -> GrowthMetrics {
    let nested = any_of(raw, &["growthMetrics", "growth"]);
    let metric = |name: &str| -> f64 {
        coalesce([
            nested.and_then(|g| field_any_case(g, name)),
            field_any_case(raw, name),
        ])
        .map_or(0.0, to_number)
    };
    GrowthMetrics {
        revenue_growth: metric("revenueGrowth"),
        order_growth: metric("orderGrowth"),
        customer_growth: metric("customerGrowth"),
        product_growth: metric("productGrowth"),
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
