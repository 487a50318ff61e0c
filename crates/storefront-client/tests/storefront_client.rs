//! Integration tests for `StorefrontClient`.
//!
//! Each test stands up a local `wiremock` server. Unmatched requests get
//! wiremock's default 404, which is exactly the "try the next candidate"
//! signal, so only the routes a scenario cares about are mounted.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefront_client::{
    CandidatePaths, EndpointCatalog, EndpointResolver, FailureCategory, FallbackCatalog,
    StorefrontClient,
};
use storefront_core::{DashboardAnalytics, OrderStatus, PLACEHOLDER_IMAGE_URL};

fn test_client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(
        &server.uri(),
        "http://media.shop.test",
        Some(5),
        "storefront-test/0.1",
    )
    .expect("failed to build test StorefrontClient")
}

/// A base URL on a port nothing is listening on.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ---------------------------------------------------------------------------
// Endpoint candidates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_products_falls_through_not_found_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "items": [{
                    "Id": 7,
                    "Name": "Rose Absolue",
                    "Images": ["uploads\\rose.jpg"],
                    "Variants": [
                        { "Volume": "50ml", "Price": 95 },
                        { "Volume": "100ml", "Price": 150 }
                    ]
                }],
                "total": 1
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .list_products(&Default::default())
        .await
        .expect("list should succeed");

    assert_eq!(products.len(), 1);
    let rose = &products[0];
    assert_eq!(rose.id, "7");
    assert_eq!(rose.name, "Rose Absolue");
    assert!((rose.price - 95.0).abs() < f64::EPSILON);
    assert_eq!(rose.volume, "50ml");
    assert_eq!(rose.images, ["http://media.shop.test/uploads/rose.jpg"]);
}

#[tokio::test]
async fn server_fault_halts_candidates_and_serves_fallback_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .list_products(&Default::default())
        .await
        .expect("fallback catalog should be served");

    assert_eq!(products, FallbackCatalog::bundled().products);
}

#[tokio::test]
async fn configured_candidates_replace_built_in_ones() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/catalog/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c1", "name": "Floral", "image": "/cats/floral.png" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut endpoints = EndpointCatalog::default();
    endpoints.categories = EndpointResolver::new(
        "categories",
        CandidatePaths::new(["/v2/catalog/categories"]),
    );
    let categories = test_client(&server)
        .with_endpoints(endpoints)
        .list_categories()
        .await
        .expect("categories");

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Floral");
    assert_eq!(
        categories[0].image_url.as_deref(),
        Some("http://media.shop.test/cats/floral.png")
    );
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn product_query_is_sent_as_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "rose"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{ "id": "p1", "name": "Rose", "price": "12.5" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .search_products("rose")
        .await
        .expect("search");

    assert_eq!(products.len(), 1);
    assert!((products[0].price - 12.5).abs() < f64::EPSILON);
    assert_eq!(products[0].images, [PLACEHOLDER_IMAGE_URL]);
}

#[tokio::test]
async fn featured_products_drop_explicitly_unfeatured_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("isFeatured", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a", "name": "A", "isFeatured": true },
            { "id": "b", "name": "B", "isFeatured": false },
            { "id": "c", "name": "C" }
        ])))
        .mount(&server)
        .await;

    let ids: Vec<String> = test_client(&server)
        .featured_products()
        .await
        .expect("featured")
        .into_iter()
        .map(|p| p.id)
        .collect();

    assert_eq!(ids, ["a", "c"]);
}

#[tokio::test]
async fn get_product_by_slug_uses_slug_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/slug/cedar-trail"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "id": 3, "name": "Cedar Trail", "slug": "cedar-trail" },
            "success": true,
            "message": "OK"
        })))
        .mount(&server)
        .await;

    let product = test_client(&server)
        .get_product_by_slug("cedar-trail")
        .await
        .expect("product");
    assert_eq!(product.id, "3");
    assert_eq!(product.slug.as_deref(), Some("cedar-trail"));
}

#[tokio::test]
async fn get_product_falls_back_to_bundled_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/fallback-1"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let product = test_client(&server)
        .get_product("fallback-1")
        .await
        .expect("bundled product should be served");
    assert_eq!(product.id, "fallback-1");
}

#[tokio::test]
async fn get_product_missing_everywhere_is_not_found() {
    let server = MockServer::start().await;

    let err = test_client(&server)
        .get_product("no-such-product")
        .await
        .expect_err("nothing should be found");

    assert_eq!(err.category, FailureCategory::NotFound);
    assert_eq!(err.status_code, Some(404));
}

#[tokio::test]
async fn dashboard_failure_yields_zeroed_analytics() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dashboard = test_client(&server)
        .dashboard_analytics()
        .await
        .expect("fallback analytics");
    assert_eq!(dashboard, DashboardAnalytics::default());
}

#[tokio::test]
async fn dashboard_payload_is_normalized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "TotalRevenue": 1200, "TotalOrders": 8, "RecentOrders": [{ "Status": 1 }] }
        })))
        .mount(&server)
        .await;

    let dashboard = test_client(&server)
        .dashboard_analytics()
        .await
        .expect("dashboard");
    assert_eq!(dashboard.total_orders, 8);
    assert_eq!(dashboard.recent_orders.len(), 1);
    assert_eq!(dashboard.recent_orders[0].status, OrderStatus::Processing);
    assert!(dashboard.top_selling_products.is_empty());
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn write_validation_failure_carries_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "title": "One or more validation errors occurred.",
            "errors": { "Name": ["The Name field is required."] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .create_product(&json!({ "price": 10 }))
        .await
        .expect_err("write must not be absorbed");

    assert_eq!(err.category, FailureCategory::Validation);
    assert_eq!(err.message, "One or more validation errors occurred.");
    assert_eq!(err.status_code, Some(400));
}

#[tokio::test]
async fn rejected_envelope_is_a_validation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Cart is empty"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .create_order(&json!({ "items": [] }))
        .await
        .expect_err("rejected");

    assert_eq!(err.category, FailureCategory::Validation);
    assert_eq!(err.message, "Cart is empty");
    assert_eq!(err.status_code, None);
}

#[tokio::test]
async fn update_order_status_sends_numeric_code_and_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/orders/o-1/status"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_json(json!({ "status": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "o-1",
            "status": 2,
            "paymentMethod": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = test_client(&server)
        .with_auth_token("secret-token")
        .update_order_status("o-1", &OrderStatus::Shipped)
        .await
        .expect("status update");

    assert_eq!(order.status, OrderStatus::Shipped);
    assert_eq!(order.payment_method, "Bank Transfer");
}

#[tokio::test]
async fn update_order_status_refetches_when_response_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/orders/o-2/status"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/o-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "o-2",
            "status": "delivered"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = test_client(&server)
        .update_order_status("o-2", &OrderStatus::Delivered)
        .await
        .expect("status update");
    assert_eq!(order.status, OrderStatus::Delivered);
}

#[tokio::test]
async fn update_product_normalizes_enveloped_record() {
    let server = MockServer::start().await;

    let submitted = json!({ "name": "Oud Noir", "price": 120 });
    Mock::given(method("PUT"))
        .and(path("/api/products/p-5"))
        .and(body_json(submitted.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Updated",
            "data": {
                "Id": "p-5",
                "Name": "Oud Noir",
                "Slug": "oud-noir",
                "ImageUrl": "/uploads/oud.jpg",
                "Variants": [{ "Size": "75ml", "Price": "125.5", "OriginalPrice": 140 }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = test_client(&server)
        .update_product("p-5", &submitted)
        .await
        .expect("update");

    assert_eq!(product.id, "p-5");
    assert_eq!(product.slug.as_deref(), Some("oud-noir"));
    assert!((product.price - 125.5).abs() < f64::EPSILON);
    assert_eq!(product.original_price, Some(140.0));
    assert_eq!(product.volume, "75ml");
    assert_eq!(product.images, ["http://media.shop.test/uploads/oud.jpg"]);
}

#[tokio::test]
async fn create_without_echoed_record_normalizes_submitted_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let product = client
        .create_product(&json!({
            "id": "p-new",
            "name": "Vetiver Bloom",
            "price": "89",
            "images": []
        }))
        .await
        .expect("create product");
    assert_eq!(product.id, "p-new");
    assert_eq!(product.name, "Vetiver Bloom");
    assert!((product.price - 89.0).abs() < f64::EPSILON);
    assert_eq!(product.images, [PLACEHOLDER_IMAGE_URL]);

    let order = client
        .create_order(&json!({
            "orderNumber": "ORD-77",
            "status": 1.0,
            "paymentMethod": "paypal",
            "totalAmount": "250"
        }))
        .await
        .expect("create order");
    assert_eq!(order.id, "ORD-77");
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.payment_method, "PayPal");
}

#[tokio::test]
async fn delete_succeeds_on_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/p-9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server)
        .delete_product("p-9")
        .await
        .expect("delete");
}

#[tokio::test]
async fn delete_forbidden_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/orders/o-3"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .delete_order("o-3")
        .await
        .expect_err("forbidden");
    assert_eq!(err.category, FailureCategory::Forbidden);
    assert_eq!(err.message, FailureCategory::Forbidden.default_message());
}

// ---------------------------------------------------------------------------
// Unreachable server
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_server_degrades_reads_and_classifies_failures() {
    let base_url = closed_port_url();
    let client = StorefrontClient::new(&base_url, &base_url, Some(5), "storefront-test/0.1")
        .expect("client");

    let orders = client.list_orders().await.expect("order list degrades");
    assert!(orders.is_empty());

    let categories = client.list_categories().await.expect("categories degrade");
    assert_eq!(categories, FallbackCatalog::bundled().categories);

    let err = client.get_order("o-1").await.expect_err("single order propagates");
    assert_eq!(err.category, FailureCategory::NetworkUnreachable);
    assert_eq!(err.status_code, None);
}
