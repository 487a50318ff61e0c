//! Conversion from raw API payloads to canonical records.
//!
//! Every normalizer is total: missing or malformed fields fall back to
//! defaults, and a payload that is not an object yields the fully-defaulted
//! record. Field reads go exclusively through [`crate::coalesce`].

mod category;
mod dashboard;
mod order;
mod product;

pub use category::normalize_category;
pub use dashboard::normalize_dashboard;
pub use order::{normalize_order, payment_method_label};
pub use product::normalize_product;

pub(crate) use order::normalize_order_with_fallback_id;

/// Identity for a list element whose payload carried none.
///
/// The prefix names the collection so elements of different lists never
/// share an ID.
pub(crate) fn synth_id(prefix: &str, index: usize) -> String {
    format!("{prefix}-{index}")
}

/// Fresh identity for a top-level record whose payload carried none.
pub(crate) fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
