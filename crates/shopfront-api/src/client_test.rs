use shopfront_core::{Order, OrderDetail, Product};

use super::*;

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 5, "shopfront-test/0.1").expect("client construction should not fail")
}

#[test]
fn endpoint_for_collection() {
    let client = test_client("http://localhost:8000");
    let url = client.endpoint(Product::PATH, None).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/products");
}

#[test]
fn endpoint_with_id() {
    let client = test_client("http://localhost:8000/");
    let url = client.endpoint(OrderDetail::PATH, Some(42)).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8000/order_details/42");
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = test_client("https://shop.example.com/api/v1");
    let url = client.endpoint(Order::PATH, Some(7)).unwrap();
    assert_eq!(url.as_str(), "https://shop.example.com/api/v1/orders/7");
}

#[test]
fn rejects_unparseable_base_url() {
    let result = ApiClient::new("not a url", 5, "ua");
    assert!(
        matches!(result, Err(ApiError::InvalidBaseUrl { .. })),
        "expected InvalidBaseUrl"
    );
}

#[test]
fn extract_detail_from_string_detail() {
    let body = r#"{"detail": "Insufficient stock for product 3"}"#;
    assert_eq!(
        extract_detail(body).as_deref(),
        Some("Insufficient stock for product 3")
    );
}

#[test]
fn extract_detail_joins_validation_messages() {
    let body = r#"{"detail": [{"loc": ["body", "price"], "msg": "must be positive"},
                              {"loc": ["body", "name"], "msg": "field required"}]}"#;
    assert_eq!(
        extract_detail(body).as_deref(),
        Some("must be positive; field required")
    );
}

#[test]
fn extract_detail_falls_back_to_plain_text() {
    assert_eq!(
        extract_detail("  Bad Gateway \n").as_deref(),
        Some("Bad Gateway")
    );
    assert!(extract_detail("   ").is_none());
}

#[test]
fn status_error_maps_404_to_not_found() {
    let err = status_error(StatusCode::NOT_FOUND, "/clients/9", "");
    assert!(err.is_not_found());
}

#[test]
fn status_error_keeps_detail() {
    let err = status_error(
        StatusCode::CONFLICT,
        "/categories/1",
        r#"{"detail": "ForeignKey violation"}"#,
    );
    assert_eq!(err.detail(), Some("ForeignKey violation"));
    assert!(err.to_string().contains("409"));
}
