use actix_web::{http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use gbp_engine::{events::EventProducers, test_utils::MemoryDatabase, OrderFlowApi};
use serde_json::json;

use super::helpers::{json, send, TestResult};
use crate::routes::SubmitOrderRoute;

const BOUNDARY: &str = "----gbp-endpoint-test-boundary";
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

struct Receipt {
    file_name: &'static str,
    mime_type: &'static str,
    data: &'static [u8],
}

const PNG_RECEIPT: Receipt = Receipt { file_name: "receipt.png", mime_type: "image/png", data: PNG_BYTES };

fn multipart_body(fields: &[(&str, &str)], receipt: Option<&Receipt>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes());
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some(r) = receipt {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"receipt\"; filename=\"{}\"\r\n", r.file_name).as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", r.mime_type).as_bytes());
        body.extend_from_slice(r.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn valid_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("cardId", "1"),
        ("fullName", "Ada Lovelace"),
        ("email", "ada@example.com"),
        ("accountNumber", "GB-0042"),
        ("gbpId", "  "),
        ("cryptoSymbol", "bnb"),
        ("cryptoAmount", "0.8"),
    ]
}

async fn submit(db: &MemoryDatabase, fields: &[(&str, &str)], receipt: Option<&Receipt>) -> TestResult {
    let req = TestRequest::post()
        .uri("/orders")
        .insert_header(("content-type", format!("multipart/form-data; boundary={BOUNDARY}")))
        .set_payload(multipart_body(fields, receipt));
    let db = db.clone();
    send(req, move |cfg: &mut ServiceConfig| {
        cfg.service(SubmitOrderRoute::<MemoryDatabase>::new())
            .app_data(web::Data::new(OrderFlowApi::new(db, EventProducers::default())));
    })
    .await
}

fn seeded_db() -> MemoryDatabase {
    let db = MemoryDatabase::seeded();
    db.force_price("BNB", 500.0);
    db
}

#[actix_web::test]
async fn submit_order() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    let (status, body) = submit(&db, &valid_fields(), Some(&PNG_RECEIPT)).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    let order = json(&body);
    assert_eq!(order["card_id"], 1);
    assert_eq!(order["crypto_symbol"], "BNB");
    // The client's stale amount is ignored
    assert_eq!(order["crypto_amount"], 1.0);
    assert_eq!(order["crypto_address"], "0xf8F9a26aDaEba581099425eCF3Bd52BD19C19e79");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["gbp_id"], serde_json::Value::Null);
    assert_eq!(db.order_count(), 1);
    assert_eq!(db.receipt_count(), 1);
}

#[actix_web::test]
async fn submit_order_without_receipt() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    let (status, body) = submit(&db, &valid_fields(), None).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), json!({ "error": "A payment receipt is required" }));
    assert_eq!(db.order_count(), 0);
}

#[actix_web::test]
async fn submit_order_with_invalid_fields() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    let mut fields = valid_fields();
    fields[1] = ("fullName", " ");
    fields[2] = ("email", "ada-at-example");
    let pdf_as_text = Receipt { file_name: "receipt.txt", mime_type: "text/plain", data: b"paid" };
    let (status, body) = submit(&db, &fields, Some(&pdf_as_text)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json(&body);
    assert_eq!(body["error"], "Invalid order details");
    let fields = body["fields"].as_array().unwrap().iter().map(|f| f["field"].as_str().unwrap()).collect::<Vec<_>>();
    assert_eq!(fields, vec!["fullName", "email", "receipt"]);
    assert_eq!(db.order_count(), 0);
}

#[actix_web::test]
async fn submit_order_in_unsupported_crypto() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    let mut fields = valid_fields();
    fields[5] = ("cryptoSymbol", "XMR");
    let (status, body) = submit(&db, &fields, Some(&PNG_RECEIPT)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "Invalid payment method: 'XMR' is not a supported currency");
}

#[actix_web::test]
async fn submit_order_for_unknown_card() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    let mut fields = valid_fields();
    fields[0] = ("cardId", "77");
    let (status, _) = submit(&db, &fields, Some(&PNG_RECEIPT)).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn submit_order_without_card() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    let (status, body) = submit(&db, &valid_fields()[1..], Some(&PNG_RECEIPT)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "A card must be selected");
    let mut fields = valid_fields();
    fields[0] = ("cardId", "gold");
    let (status, _) = submit(&db, &fields, Some(&PNG_RECEIPT)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn failed_insert_is_a_server_error() {
    let _ = env_logger::try_init();
    let db = seeded_db();
    db.fail_order_inserts();
    let (status, body) = submit(&db, &valid_fields(), Some(&PNG_RECEIPT)).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("simulated"));
    assert_eq!(db.receipt_count(), 0);
}
