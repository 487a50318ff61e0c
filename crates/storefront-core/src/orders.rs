use serde::{Deserialize, Serialize};

/// Customer name used when an order carries none.
pub const GUEST_CUSTOMER_NAME: &str = "Guest";

/// Lifecycle state of an order.
///
/// Serialized as its lower-case name. Codes outside the known vocabulary are
/// kept verbatim in [`OrderStatus::Other`] rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// The five statuses the remote API encodes as `0..=4`, in code order.
    pub const KNOWN: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Maps a numeric status code. Unknown codes pass through as their digits.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::KNOWN.get(idx).cloned())
            .unwrap_or_else(|| OrderStatus::Other(code.to_string()))
    }

    /// Parses a status name or a stringified numeric code, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "pending" => OrderStatus::Pending,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => match lower.parse::<i64>() {
                Ok(code) => Self::from_code(code),
                Err(_) => OrderStatus::Other(lower),
            },
        }
    }

    /// Numeric code the remote API uses for this status, if it has one.
    #[must_use]
    pub fn code(&self) -> Option<i64> {
        Self::KNOWN
            .iter()
            .position(|known| known == self)
            .and_then(|idx| i64::try_from(idx).ok())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        OrderStatus::parse(&raw)
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalOrder {
    pub id: String,
    /// Falls back to `id` when the source has no order number.
    pub order_number: String,
    /// Never empty; [`GUEST_CUSTOMER_NAME`] when absent.
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub status: OrderStatus,
    /// Display label, or the raw code when it is not in the label table.
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_fee: Option<f64>,
    /// ISO-8601 timestamp.
    pub created_at: String,
    pub items: Vec<CanonicalOrderItem>,
}

impl CanonicalOrder {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// `total_amount` when the API supplied one, else the sum of line totals.
    #[must_use]
    pub fn effective_total(&self) -> f64 {
        self.total_amount
            .unwrap_or_else(|| self.items.iter().map(CanonicalOrderItem::line_total).sum())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalOrderItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Default for CanonicalOrderItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            product_id: None,
            name: None,
            quantity: 1,
            price: None,
            image_url: None,
        }
    }
}

impl CanonicalOrderItem {
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price.unwrap_or(0.0) * f64::from(self.quantity)
    }
}
