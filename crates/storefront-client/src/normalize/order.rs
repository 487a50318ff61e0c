use serde_json::{Number, Value};
use storefront_core::orders::GUEST_CUSTOMER_NAME;
use storefront_core::{CanonicalOrder, CanonicalOrderItem, OrderStatus};

use crate::coalesce::field;
use crate::coerce::{normalize_date, opt_number, opt_text, to_count};
use crate::media::MediaResolver;

use super::fresh_id;

/// Payment method labels: `(numeric code, label, accepted spellings)`.
///
/// Spellings are compared after lower-casing and dropping spaces, `-`, and `_`.
const PAYMENT_METHODS: &[(i64, &str, &[&str])] = &[
    (0, "Cash on Delivery", &["cod", "cash", "cashondelivery"]),
    (1, "Bank Transfer", &["banktransfer", "bank", "transfer"]),
    (2, "Credit Card", &["creditcard", "card", "visa", "mastercard"]),
    (3, "E-Wallet", &["ewallet", "wallet", "momo", "zalopay"]),
    (4, "PayPal", &["paypal"]),
];

/// Normalizes one order payload.
///
/// A missing `id` falls back to the order number, then to a fresh UUID.
#[must_use]
pub fn normalize_order(raw: &Value, media: &MediaResolver) -> CanonicalOrder {
    normalize_order_with_fallback_id(raw, media, None)
}

/// [`normalize_order`] with a caller-chosen ID for payloads that carry
/// neither an ID nor an order number.
pub(crate) fn normalize_order_with_fallback_id(
    raw: &Value,
    media: &MediaResolver,
    fallback_id: Option<String>,
) -> CanonicalOrder {
    let order_number = opt_text(field(
        raw,
        &["orderNumber", "OrderNumber", "orderCode", "OrderCode", "code", "Code"],
    ));
    let id = opt_text(field(raw, &["id", "Id", "ID", "_id", "orderId", "OrderId"]))
        .or_else(|| order_number.clone())
        .or(fallback_id)
        .unwrap_or_else(fresh_id);

    let items = field(
        raw,
        &["items", "Items", "orderItems", "OrderItems", "orderDetails", "OrderDetails"],
    )
    .and_then(Value::as_array)
    .map(|entries| {
        entries
            .iter()
            .filter(|entry| entry.is_object())
            .enumerate()
            .map(|(idx, entry)| normalize_item(entry, &id, idx, media))
            .collect()
    })
    .unwrap_or_default();

    CanonicalOrder {
        order_number: order_number.unwrap_or_else(|| id.clone()),
        customer_name: opt_text(field(
            raw,
            &[
                "customerName",
                "CustomerName",
                "fullName",
                "FullName",
                "customer.name",
                "customer.fullName",
                "Customer.FullName",
                "user.fullName",
                "shippingName",
            ],
        ))
        .unwrap_or_else(|| GUEST_CUSTOMER_NAME.to_string()),
        customer_email: opt_text(field(
            raw,
            &[
                "customerEmail",
                "CustomerEmail",
                "email",
                "Email",
                "customer.email",
                "user.email",
            ],
        )),
        customer_phone: opt_text(field(
            raw,
            &[
                "customerPhone",
                "CustomerPhone",
                "phone",
                "Phone",
                "phoneNumber",
                "PhoneNumber",
                "customer.phone",
            ],
        )),
        shipping_address: opt_text(field(
            raw,
            &["shippingAddress", "ShippingAddress", "address", "Address"],
        )),
        note: opt_text(field(raw, &["note", "Note", "notes", "Notes"])),
        status: field(raw, &["status", "Status", "orderStatus", "OrderStatus"])
            .map(status_from_value)
            .unwrap_or_default(),
        payment_method: field(
            raw,
            &["paymentMethod", "PaymentMethod", "payment.method", "Payment.Method"],
        )
        .map(payment_method_label)
        .unwrap_or_default(),
        total_amount: opt_number(field(
            raw,
            &[
                "totalAmount",
                "TotalAmount",
                "total",
                "Total",
                "totalPrice",
                "TotalPrice",
                "grandTotal",
            ],
        )),
        subtotal: opt_number(field(raw, &["subtotal", "Subtotal", "subTotal", "SubTotal"])),
        tax: opt_number(field(raw, &["tax", "Tax", "taxAmount", "TaxAmount"])),
        discount: opt_number(field(
            raw,
            &["discount", "Discount", "discountAmount", "DiscountAmount"],
        )),
        shipping_fee: opt_number(field(
            raw,
            &["shippingFee", "ShippingFee", "shippingCost", "ShippingCost"],
        )),
        created_at: normalize_date(field(
            raw,
            &["createdAt", "CreatedAt", "orderDate", "OrderDate", "createdDate"],
        )),
        items,
        id,
    }
}

fn normalize_item(
    raw: &Value,
    order_id: &str,
    index: usize,
    media: &MediaResolver,
) -> CanonicalOrderItem {
    let quantity = field(raw, &["quantity", "Quantity", "qty", "Qty"])
        .map(to_count)
        .filter(|q| *q >= 1)
        .map_or(1, |q| u32::try_from(q).unwrap_or(u32::MAX));
    let image = opt_text(field(
        raw,
        &[
            "imageUrl",
            "ImageUrl",
            "image",
            "Image",
            "productImage",
            "ProductImage",
            "product.imageUrl",
            "product.image",
            "Product.ImageUrl",
        ],
    ));

    CanonicalOrderItem {
        id: opt_text(field(raw, &["id", "Id", "orderItemId", "OrderItemId"]))
            .unwrap_or_else(|| format!("{order_id}-item-{index}")),
        product_id: opt_text(field(
            raw,
            &["productId", "ProductId", "product.id", "Product.Id"],
        )),
        name: opt_text(field(
            raw,
            &[
                "name",
                "Name",
                "productName",
                "ProductName",
                "product.name",
                "Product.Name",
            ],
        )),
        quantity,
        price: opt_number(field(
            raw,
            &["price", "Price", "unitPrice", "UnitPrice", "product.price"],
        )),
        image_url: media.resolve_optional(image.as_deref()),
    }
}

/// Numeric codes map through [`OrderStatus::from_code`]; strings are parsed
/// case-insensitively. Unknown values are kept verbatim.
pub(super) fn status_from_value(value: &Value) -> OrderStatus {
    match value {
        Value::Number(n) => match whole_code(n) {
            Some(code) => OrderStatus::from_code(code),
            None => OrderStatus::Other(n.to_string()),
        },
        Value::String(s) => OrderStatus::parse(s),
        _ => OrderStatus::default(),
    }
}

/// Maps a payment-method code (numeric or a known spelling) to its display
/// label. Unknown codes are returned as their raw text.
#[must_use]
pub fn payment_method_label(value: &Value) -> String {
    let (raw, code) = match value {
        Value::Number(n) => (n.to_string(), whole_code(n)),
        Value::String(s) => {
            let raw = s.trim().to_string();
            let code = raw.parse::<i64>().ok();
            (raw, code)
        }
        _ => return String::new(),
    };

    if let Some(code) = code {
        if let Some((_, label, _)) = PAYMENT_METHODS.iter().find(|(c, _, _)| *c == code) {
            return (*label).to_string();
        }
        return raw;
    }

    let squashed: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect();
    PAYMENT_METHODS
        .iter()
        .find(|(_, _, spellings)| spellings.contains(&squashed.as_str()))
        .map_or(raw, |(_, label, _)| (*label).to_string())
}

/// Integer codes, including floats with no fractional part such as `2.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_code(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract().abs() < f64::EPSILON)
            .filter(|f| (i64::MIN as f64..=i64::MAX as f64).contains(f))
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn media() -> MediaResolver {
        MediaResolver::new("http://media.shop.test")
    }

    #[test]
    fn numeric_status_and_payment_codes_map() {
        let order = normalize_order(&json!({ "id": 1, "status": 2, "paymentMethod": 1 }), &media());
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.payment_method, "Bank Transfer");
    }

    #[test]
    fn whole_float_codes_map_like_integers() {
        let order = normalize_order(
            &json!({ "id": 1, "status": 2.0, "paymentMethod": 1.0 }),
            &media(),
        );
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.payment_method, "Bank Transfer");
        assert_eq!(status_from_value(&json!(4.0)), OrderStatus::from_code(4));
        assert_eq!(payment_method_label(&json!(4.0)), "PayPal");
    }

    #[test]
    fn fractional_codes_are_kept_verbatim() {
        assert_eq!(status_from_value(&json!(2.5)), OrderStatus::Other("2.5".to_string()));
        assert_eq!(payment_method_label(&json!(1.5)), "1.5");
    }

    #[test]
    fn string_status_is_lower_cased() {
        let order = normalize_order(&json!({ "id": 1, "status": "Delivered" }), &media());
        assert_eq!(order.status, OrderStatus::Delivered);
        assert_eq!(order.status.to_string(), "delivered");
    }

    #[test]
    fn unknown_codes_pass_through() {
        let order = normalize_order(
            &json!({ "id": 1, "Status": 7, "PaymentMethod": "crypto" }),
            &media(),
        );
        assert_eq!(order.status, OrderStatus::Other("7".to_string()));
        assert_eq!(order.payment_method, "crypto");
        let order = normalize_order(&json!({ "id": 1, "paymentMethod": 42 }), &media());
        assert_eq!(order.payment_method, "42");
    }

    #[test]
    fn payment_spellings_map_to_labels() {
        assert_eq!(payment_method_label(&json!("COD")), "Cash on Delivery");
        assert_eq!(payment_method_label(&json!("bank_transfer")), "Bank Transfer");
        assert_eq!(payment_method_label(&json!("E-Wallet")), "E-Wallet");
        assert_eq!(payment_method_label(&json!("2")), "Credit Card");
    }

    #[test]
    fn missing_status_defaults_to_pending() {
        let order = normalize_order(&json!({ "id": 1 }), &media());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_method, "");
    }

    #[test]
    fn order_number_falls_back_to_id() {
        let order = normalize_order(&json!({ "Id": 55 }), &media());
        assert_eq!(order.id, "55");
        assert_eq!(order.order_number, "55");
    }

    #[test]
    fn id_falls_back_to_order_number() {
        let order = normalize_order(&json!({ "orderCode": "ORD-9" }), &media());
        assert_eq!(order.id, "ORD-9");
        assert_eq!(order.order_number, "ORD-9");
    }

    #[test]
    fn id_is_synthesized_when_absent() {
        let order = normalize_order(&json!({}), &media());
        assert!(!order.id.is_empty());
        assert_eq!(order.order_number, order.id);
    }

    #[test]
    fn customer_name_never_empty() {
        let order = normalize_order(&json!({ "id": 1, "customerName": "  " }), &media());
        assert_eq!(order.customer_name, GUEST_CUSTOMER_NAME);
        let order = normalize_order(
            &json!({ "id": 1, "customer": { "fullName": "Linh Tran" } }),
            &media(),
        );
        assert_eq!(order.customer_name, "Linh Tran");
    }

    #[test]
    fn items_default_quantity_and_resolve_images() {
        let raw = json!({
            "id": "o-1",
            "OrderItems": [
                { "ProductId": 9, "ProductName": "Santal", "Quantity": 0, "UnitPrice": "50" },
                { "product": { "id": 4, "name": "Oud", "imageUrl": "img\\oud.png" }, "qty": 3 },
                "not an item"
            ]
        });
        let order = normalize_order(&raw, &media());
        assert_eq!(order.items.len(), 2);

        let first = &order.items[0];
        assert_eq!(first.id, "o-1-item-0");
        assert_eq!(first.quantity, 1);
        assert_eq!(first.price, Some(50.0));
        assert_eq!(first.product_id.as_deref(), Some("9"));
        assert!(first.image_url.is_none());

        let second = &order.items[1];
        assert_eq!(second.name.as_deref(), Some("Oud"));
        assert_eq!(second.quantity, 3);
        assert_eq!(
            second.image_url.as_deref(),
            Some("http://media.shop.test/img/oud.png")
        );
    }

    #[test]
    fn amounts_are_coerced() {
        let raw = json!({ "id": 1, "TotalAmount": "250.5", "subTotal": 240, "Discount": null });
        let order = normalize_order(&raw, &media());
        assert_eq!(order.total_amount, Some(250.5));
        assert_eq!(order.subtotal, Some(240.0));
        assert!(order.discount.is_none());
    }

    #[test]
    fn created_at_is_iso() {
        let order = normalize_order(&json!({ "id": 1, "OrderDate": "2024-03-02" }), &media());
        assert_eq!(order.created_at, "2024-03-02T00:00:00.000Z");
    }

    #[test]
    fn non_object_payload_yields_defaulted_record() {
        let order = normalize_order(&json!(null), &media());
        assert!(!order.id.is_empty());
        assert_eq!(order.customer_name, GUEST_CUSTOMER_NAME);
        assert!(order.items.is_empty());
    }

    #[test]
    fn normalizing_canonical_record_is_identity() {
        let raw = json!({
            "id": "o-1",
            "orderNumber": "ORD-1",
            "customerName": "Linh Tran",
            "customerEmail": "linh@example.test",
            "status": "shipped",
            "paymentMethod": "Credit Card",
            "totalAmount": 210.0,
            "subtotal": 200.0,
            "shippingFee": 10.0,
            "createdAt": "2024-05-01T10:00:00.000Z",
            "items": [
                {
                    "id": "i-1",
                    "productId": "p-1",
                    "name": "Santal",
                    "quantity": 2,
                    "price": 100.0,
                    "imageUrl": "https://cdn.test/santal.jpg"
                }
            ]
        });
        let once = normalize_order(&raw, &media());
        let twice = normalize_order(&serde_json::to_value(&once).unwrap(), &media());
        assert_eq!(once, twice);
        assert_eq!(serde_json::to_value(&once).unwrap(), raw);
    }
}
