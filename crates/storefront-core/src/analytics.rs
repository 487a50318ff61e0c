//! Admin dashboard analytics.
//!
//! Every field is always present: counters default to `0` and collections to
//! empty, so consumers can sum and iterate without null checks.

use serde::{Deserialize, Serialize};

use crate::orders::CanonicalOrder;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardAnalytics {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub total_customers: u64,
    pub total_products: u64,
    pub total_categories: u64,
    pub today_revenue: f64,
    pub today_orders: u64,
    pub monthly_revenue: f64,
    pub monthly_orders: u64,
    pub average_order_value: f64,
    pub pending_orders: u64,
    pub order_status_breakdown: OrderStatusBreakdown,
    pub recent_orders: Vec<CanonicalOrder>,
    pub top_categories: Vec<CategoryStat>,
    pub top_products: Vec<ProductStat>,
    pub top_selling_products: Vec<ProductStat>,
    pub top_revenue_products: Vec<ProductStat>,
    pub payment_method_stats: Vec<PaymentMethodStat>,
    #[serde(rename = "last7DaysRevenue")]
    pub last_7_days_revenue: Vec<RevenuePoint>,
    #[serde(rename = "last12MonthsRevenue")]
    pub last_12_months_revenue: Vec<RevenuePoint>,
    pub growth_metrics: GrowthMetrics,
}

impl DashboardAnalytics {
    /// Sum of the daily revenue series.
    #[must_use]
    pub fn last_7_days_total(&self) -> f64 {
        self.last_7_days_revenue.iter().map(|p| p.revenue).sum()
    }
}

/// Order counts and revenue per lifecycle status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderStatusBreakdown {
    pub pending: u64,
    pub processing: u64,
    pub shipped: u64,
    pub delivered: u64,
    pub cancelled: u64,
    pub pending_revenue: f64,
    pub processing_revenue: f64,
    pub shipped_revenue: f64,
    pub delivered_revenue: f64,
    pub cancelled_revenue: f64,
}

impl OrderStatusBreakdown {
    #[must_use]
    pub fn total_count(&self) -> u64 {
        [self.processing, self.shipped, self.delivered, self.cancelled]
            .into_iter()
            .fold(self.pending, u64::saturating_add)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryStat {
    pub id: String,
    pub name: String,
    pub product_count: u64,
    pub order_count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductStat {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity_sold: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentMethodStat {
    pub id: String,
    /// Display label, mapped the same way as order payment methods.
    pub method: String,
    pub count: u64,
    pub revenue: f64,
}

/// One bucket of a revenue time series (a day or a month).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevenuePoint {
    pub id: String,
    pub label: String,
    pub revenue: f64,
    pub orders: u64,
}

/// Period-over-period percentage deltas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthMetrics {
    pub revenue_growth: f64,
    pub order_growth: f64,
    pub customer_growth: f64,
    pub product_growth: f64,
}
