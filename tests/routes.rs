//! Router-level tests. A lazily-connected pool lets us exercise every
//! code path that fails before touching the database: required-field
//! validation, payload range checks, and route dispatch.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use facturare_api::db::Database;
use facturare_api::http;

fn app() -> Router {
    // connect_lazy builds the pool without opening a connection, so
    // pre-database paths are testable offline.
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy("postgres://postgres@localhost/facturare_test")
        .expect("lazy pool");

    http::router(Arc::new(Database::from_pool(pool)))
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

#[tokio::test]
async fn root_responds() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/allsuppliers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_issuer_without_required_fields_is_400() {
    let (status, body) = send_json(app(), "POST", "/addissuer", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("cui"));
}

#[tokio::test]
async fn add_issuer_reports_only_the_missing_field() {
    let (status, body) =
        send_json(app(), "POST", "/addissuer", json!({ "name": "Acme SRL" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("cui"));
    assert!(!message.contains("name"));
}

#[tokio::test]
async fn blank_required_field_counts_as_missing() {
    let (status, body) = send_json(
        app(),
        "POST",
        "/addissuer",
        json!({ "name": "Acme SRL", "cui": "   " }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("cui"));
}

#[tokio::test]
async fn add_client_without_name_is_400() {
    let (status, _) = send_json(app(), "POST", "/addclient", json!({ "cui": "RO9" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_invoice_without_references_is_400() {
    let (status, body) = send_json(
        app(),
        "POST",
        "/addinvoice",
        json!({ "id_invoice": "F-2026-001" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("id_issuer"));
    assert!(message.contains("id_client"));
}

#[tokio::test]
async fn negative_invoice_amount_is_400() {
    let (status, body) = send_json(
        app(),
        "POST",
        "/addinvoice",
        json!({
            "id_invoice": "F-2026-001",
            "id_issuer": 1,
            "id_client": 1,
            "subtotal": "-10.00",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "subtotal must not be negative.");
}

#[tokio::test]
async fn zero_quantity_item_is_400() {
    let (status, body) = send_json(
        app(),
        "POST",
        "/addinvoiceitem",
        json!({
            "id_item": "F-2026-001/1",
            "id_invoice": "F-2026-001",
            "item_description": "Consulting",
            "item_qt": 0,
            "item_price_without_vat": "100.00",
            "item_value": "100.00",
            "item_vat_value": "19.00",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "item_qt must be a positive integer.");
}

#[tokio::test]
async fn edit_item_with_zero_quantity_is_400() {
    let (status, body) = send_json(
        app(),
        "PUT",
        "/editinvoiceitem/F-2026-001%2F1",
        json!({ "item_qt": -2 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "item_qt must be a positive integer.");
}

#[tokio::test]
async fn non_integer_issuer_id_is_rejected() {
    let (status, _) = send_json(app(), "PUT", "/editissuer/abc", json!({ "phone": "07" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// Full CRUD scenarios need a live PostgreSQL; run with
// `DATABASE_URL=... cargo test -- --ignored`.
#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn issuer_crud_round_trip() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect");
    facturare_api::db::schema::init_schema(&pool)
        .await
        .expect("schema");
    let app = http::router(Arc::new(Database::from_pool(pool)));

    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/addissuer",
        json!({ "name": "Acme SRL", "cui": "RO123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["issuer"]["id"].as_i64().unwrap();
    assert_eq!(body["issuer"]["name"], "Acme SRL");
    assert_eq!(body["issuer"]["nr_reg_com"], Value::Null);

    // Duplicate name/cui conflicts and leaves no second row behind.
    let (status, _) = send_json(
        app.clone(),
        "POST",
        "/addissuer",
        json!({ "name": "Acme SRL", "cui": "RO123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send_json(app.clone(), "GET", "/allissuers", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    let acme_rows = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|row| row["name"] == "Acme SRL")
        .count();
    assert_eq!(acme_rows, 1);

    // Partial update touches only the supplied field.
    let (status, body) = send_json(
        app.clone(),
        "PUT",
        &format!("/editissuer/{id}"),
        json!({ "phone": "0712345" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedIssuer"]["phone"], "0712345");
    assert_eq!(body["updatedIssuer"]["name"], "Acme SRL");

    let (status, body) = send_json(
        app.clone(),
        "DELETE",
        &format!("/deleteissuer/{id}"),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedIssuer"]["id"].as_i64().unwrap(), id);

    let (status, _) = send_json(
        app,
        "DELETE",
        &format!("/deleteissuer/{id}"),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn deleting_an_issuer_cascades_onto_invoices_and_items() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect");
    facturare_api::db::schema::init_schema(&pool)
        .await
        .expect("schema");
    let app = http::router(Arc::new(Database::from_pool(pool)));

    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/addissuer",
        json!({ "name": "Cascade SRL", "cui": "RO777" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let issuer_id = body["issuer"]["id"].as_i64().unwrap();

    let (status, body) = send_json(
        app.clone(),
        "POST",
        "/addclient",
        json!({ "name": "Beta SRL", "cui": "RO888" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let client_id = body["client"]["id"].as_i64().unwrap();

    let (status, _) = send_json(
        app.clone(),
        "POST",
        "/addinvoice",
        json!({
            "id_invoice": "F-CASC-1",
            "id_issuer": issuer_id,
            "id_client": client_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send_json(
        app.clone(),
        "POST",
        "/addinvoiceitem",
        json!({
            "id_item": "F-CASC-1/1",
            "id_invoice": "F-CASC-1",
            "item_description": "Consulting",
            "item_qt": 2,
            "item_price_without_vat": "100.00",
            "item_value": "200.00",
            "item_vat_value": "38.00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // No cascade on invoices.id_client: the delete is refused at the FK
    // while the invoice still references the client.
    let (status, _) = send_json(
        app.clone(),
        "DELETE",
        &format!("/deleteclient/{client_id}"),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Deleting the issuer takes its invoices and their items with it.
    let (status, _) = send_json(
        app.clone(),
        "DELETE",
        &format!("/deleteissuer/{issuer_id}"),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(app.clone(), "GET", "/allinvoices", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        body.as_array()
            .unwrap()
            .iter()
            .all(|row| row["id_invoice"] != "F-CASC-1")
    );

    let (status, body) =
        send_json(app.clone(), "GET", "/allinvoiceitems/F-CASC-1", Value::Null).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);

    // With the invoice gone the client is deletable again.
    let (status, _) = send_json(
        app,
        "DELETE",
        &format!("/deleteclient/{client_id}"),
        Value::Null,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
