//! Checkout sequence against a wiremock backend.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use shopfront_api::{ApiClient, ErrorClass};
use shopfront_core::{Action, AppState, DeliveryMethod, PaymentType, Session};
use shopfront_storefront::{checkout, CheckoutError, CheckoutRequest, CheckoutStage};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::new(base_url, 5, "shopfront-test/0.1").expect("client construction should not fail")
}

fn signed_in_state(client_id: i64) -> AppState {
    let mut state = AppState::new();
    state
        .dispatch(Action::LoggedIn(Session {
            client_id,
            email: "ada@example.com".to_string(),
            logged_in_at: Utc::now(),
        }))
        .unwrap();
    state
}

fn add(state: &mut AppState, product_id: i64, price: Decimal) {
    state
        .dispatch(Action::AddToCart {
            product_id,
            name: format!("product-{product_id}"),
            unit_price: price,
        })
        .unwrap();
}

fn request() -> CheckoutRequest {
    CheckoutRequest {
        address_id: Some(9),
        delivery_method: DeliveryMethod::HomeDelivery,
        payment_type: PaymentType::Card,
    }
}

fn bill_json(id: i64, client_id: i64, total: f64) -> serde_json::Value {
    json!({
        "id": id,
        "bill_number": "B-1",
        "discount": null,
        "date": "2026-10-16",
        "total": total,
        "payment_type": 2,
        "client_id": client_id
    })
}

fn order_json(id: i64, client_id: i64, bill_id: i64, total: f64) -> serde_json::Value {
    json!({
        "id": id,
        "date": "2026-10-16T12:00:00Z",
        "total": total,
        "delivery_method": 3,
        "status": 1,
        "client_id": client_id,
        "bill_id": bill_id
    })
}

fn detail_json(id: i64, order_id: i64, product_id: i64, quantity: u32, price: f64) -> serde_json::Value {
    json!({
        "id": id,
        "quantity": quantity,
        "price": price,
        "order_id": order_id,
        "product_id": product_id
    })
}

#[tokio::test]
async fn successful_checkout_creates_records_and_clears_cart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills"))
        .and(body_partial_json(json!({ "client_id": 1, "payment_type": 2, "total": 25.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(10, 1, 25.0)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(body_partial_json(
            json!({ "client_id": 1, "bill_id": 10, "status": 1, "delivery_method": 3 }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(20, 1, 10, 25.0)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/order_details"))
        .and(body_partial_json(json!({ "product_id": 1, "quantity": 2, "order_id": 20 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(30, 20, 1, 2, 10.0)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/order_details"))
        .and(body_partial_json(json!({ "product_id": 2, "quantity": 1, "order_id": 20 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(31, 20, 2, 1, 5.0)))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_client(&server.uri());
    let mut state = signed_in_state(1);
    add(&mut state, 1, Decimal::new(10, 0));
    add(&mut state, 1, Decimal::new(10, 0));
    add(&mut state, 2, Decimal::new(5, 0));
    assert_eq!(state.cart.total(), Decimal::new(25, 0));

    let receipt = checkout(&api, &mut state, &request())
        .await
        .expect("checkout should succeed");

    assert_eq!(receipt.bill.id, 10);
    assert_eq!(receipt.order.id, 20);
    assert_eq!(receipt.details.len(), 2);
    assert!(state.cart.is_empty());
    assert!(state.is_logged_in(), "checkout must not end the session");
}

#[tokio::test]
async fn preconditions_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let api = test_client(&server.uri());

    let mut anonymous = AppState::new();
    add(&mut anonymous, 1, Decimal::new(10, 0));
    let err = checkout(&api, &mut anonymous, &request()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::NotLoggedIn));

    let mut empty = signed_in_state(1);
    let err = checkout(&api, &mut empty, &request()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::EmptyCart));

    let mut no_address = signed_in_state(1);
    add(&mut no_address, 1, Decimal::new(10, 0));
    let req = CheckoutRequest {
        address_id: None,
        ..request()
    };
    let err = checkout(&api, &mut no_address, &req).await.unwrap_err();
    assert!(matches!(err, CheckoutError::NoAddress));
    assert_eq!(no_address.cart.item_count(), 1);

    let mut free = signed_in_state(1);
    add(&mut free, 1, Decimal::ZERO);
    let err = checkout(&api, &mut free, &request()).await.unwrap_err();
    assert!(matches!(err, CheckoutError::NonPositiveTotal(_)));
}

#[tokio::test]
async fn bill_failure_stops_before_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(20, 1, 10, 10.0)))
        .expect(0)
        .mount(&server)
        .await;

    let api = test_client(&server.uri());
    let mut state = signed_in_state(1);
    add(&mut state, 1, Decimal::new(10, 0));

    let err = checkout(&api, &mut state, &request()).await.unwrap_err();
    match &err {
        CheckoutError::Failed {
            stage, orphaned, ..
        } => {
            assert_eq!(*stage, CheckoutStage::Bill);
            assert!(orphaned.is_empty());
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(err.orphan_warning().is_none());
    assert_eq!(state.cart.item_count(), 1, "cart kept for resubmission");
}

#[tokio::test]
async fn order_failure_reports_orphaned_bill() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(10, 1, 10.0)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "ForeignKey violation on bill_id"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/order_details"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = test_client(&server.uri());
    let mut state = signed_in_state(1);
    add(&mut state, 1, Decimal::new(10, 0));

    let err = checkout(&api, &mut state, &request()).await.unwrap_err();
    match &err {
        CheckoutError::Failed {
            stage,
            class,
            orphaned,
            ..
        } => {
            assert_eq!(*stage, CheckoutStage::Order);
            assert_eq!(*class, ErrorClass::ReferenceConflict);
            assert_eq!(orphaned.bill_id, Some(10));
            assert_eq!(orphaned.order_id, None);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(err.orphan_warning().unwrap().contains("bill 10"));
}

#[tokio::test]
async fn insufficient_stock_on_a_detail_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(10, 1, 15.0)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(20, 1, 10, 15.0)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/order_details"))
        .and(body_partial_json(json!({ "product_id": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(30, 20, 1, 1, 10.0)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/order_details"))
        .and(body_partial_json(json!({ "product_id": 2 })))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Insufficient stock for product 2"})),
        )
        .mount(&server)
        .await;

    let api = test_client(&server.uri());
    let mut state = signed_in_state(1);
    add(&mut state, 1, Decimal::new(10, 0));
    add(&mut state, 2, Decimal::new(5, 0));

    let err = checkout(&api, &mut state, &request()).await.unwrap_err();
    match &err {
        CheckoutError::Failed {
            stage,
            class,
            orphaned,
            failed_details,
            ..
        } => {
            assert_eq!(*stage, CheckoutStage::OrderDetails);
            assert_eq!(*class, ErrorClass::InsufficientStock);
            assert_eq!(orphaned.bill_id, Some(10));
            assert_eq!(orphaned.order_id, Some(20));
            assert_eq!(orphaned.detail_ids, vec![30]);
            assert_eq!(*failed_details, 1);
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(err.to_string().contains("Not enough stock"));
    assert_eq!(state.cart.item_count(), 2);
}
