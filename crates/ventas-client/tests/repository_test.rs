mod common;

use chrono::NaiveDate;
use common::{customers_json, products_json, sale_record_json, TestBackend};
use serde_json::json;
use ventas_client::ClientError;
use ventas_core::history::UNKNOWN_CUSTOMER_NAME;
use ventas_core::{DateRange, Money, TaxRate};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

#[tokio::test]
async fn products_decode_backend_shapes() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/productos/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_json()))
        .mount(&backend.server)
        .await;

    let products = backend.client.products().list().await.expect("products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].price, Money::from_pesos(1000));
    assert_eq!(products[0].tax_rate, TaxRate::from_bps(1900));
    assert_eq!(products[1].price, Money::from_pesos(500));
    assert!(products[1].tax_rate.is_zero());
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/productos/77/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&backend.server)
        .await;

    let err = backend.client.products().get_by_id(77).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound { .. }));
}

#[tokio::test]
async fn customer_lookup() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/clientes/3/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_json()[0].clone()))
        .mount(&backend.server)
        .await;

    let customer = backend.client.customers().get_by_id(3).await.expect("customer");
    assert_eq!(customer.name, "Ana Pérez");
    assert_eq!(customer.cedula, "1020304050");
}

#[tokio::test]
async fn unauthorized_is_reported() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/clientes/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Authentication credentials were not provided." })),
        )
        .mount(&backend.server)
        .await;

    let err = backend.client.customers().list().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn history_filters_and_names_customers() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/ventas/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            sale_record_json(1, 3, "2024-05-01T09:00:00Z", "3570.00"),
            sale_record_json(2, 99, "2024-05-03T23:59:59Z", "1000.00"),
            sale_record_json(3, 3, "2024-05-04T00:00:00Z", "500.00"),
        ])))
        .mount(&backend.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/clientes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_json()))
        .expect(1)
        .mount(&backend.server)
        .await;

    let range = DateRange::new(Some(day(1)), Some(day(3))).unwrap();
    let rows = backend.client.sales().summaries(&range).await.expect("history");

    let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(rows[0].customer_name, "Ana Pérez");
    assert_eq!(rows[1].customer_name, UNKNOWN_CUSTOMER_NAME);
    assert_eq!(rows[0].total, Money::from_pesos(3570));
}

#[tokio::test]
async fn sale_detail_unit_price_fallback() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("GET"))
        .and(path("/ventas/1/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sale_record_json(1, 3, "2024-05-01T09:00:00", "3570.00")),
        )
        .mount(&backend.server)
        .await;

    let record = backend.client.sales().get_by_id(1).await.expect("sale");
    let line = &record.details[0];
    assert_eq!(line.display_unit_price(), Money::from_pesos(1000));
    assert_eq!(line.line_total(), Money::from_pesos(3570));
}

#[tokio::test]
async fn login_returns_access_token() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(body_json(json!({ "email": "caja@tienda.co", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "jwt-token" })))
        .mount(&backend.server)
        .await;

    let token = backend
        .client
        .auth()
        .login(" caja@tienda.co ", "s3cret")
        .await
        .expect("login");
    assert_eq!(token.access, "jwt-token");
}

#[tokio::test]
async fn login_failure_surfaces_backend_error() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Credenciales inválidas" })),
        )
        .mount(&backend.server)
        .await;

    let err = backend.client.auth().login("caja@tienda.co", "mala").await.unwrap_err();
    match err {
        ClientError::Rejected { message, .. } => assert_eq!(message, "Credenciales inválidas"),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn register_checks_confirmation_before_request() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("POST"))
        .and(path("/register/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&backend.server)
        .await;

    let err = backend
        .client
        .auth()
        .register("caja@tienda.co", "s3cret", "secret")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}

#[tokio::test]
async fn register_sends_email_as_username() {
    let backend = TestBackend::spawn().await;

    Mock::given(method("POST"))
        .and(path("/register/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 12 })))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend
        .client
        .auth()
        .register("caja@tienda.co", "s3cret", "s3cret")
        .await
        .expect("register");

    let bodies = backend.received_json().await;
    assert_eq!(
        bodies[0],
        json!({ "username": "caja@tienda.co", "email": "caja@tienda.co", "password": "s3cret" })
    );
}
