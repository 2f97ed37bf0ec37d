use std::time::Duration;

use actix_web::{
    http::{header, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use gbp_engine::{
    db_types::NewReceipt,
    events::EventProducers,
    order_objects::OrderSubmission,
    refresh_objects::default_tracked_assets,
    test_utils::{MemoryDatabase, SlowQuoteSource, StaticQuoteSource},
    CatalogApi,
    OrderFlowApi,
    PriceRefresher,
    PriceStoreApi,
};
use serde_json::json;

use super::{
    cards::cryptos,
    helpers::{admin_key, get_request, json, patch_request, post_request, send, with_admin_token, TEST_ADMIN_KEY},
};
use crate::{
    endpoint_tests::mocks::MockStore,
    middleware::AdminKey,
    routes::{
        AllCryptosRoute,
        CreateCryptoRoute,
        OrderByIdRoute,
        OrdersRoute,
        ReceiptRoute,
        RefreshPricesRoute,
        UpdateCardPriceRoute,
        UpdateCryptoRoute,
        UpdateOrderStatusRoute,
    },
    server::json_config,
};

type TestRefresher = PriceRefresher<MemoryDatabase, StaticQuoteSource>;

fn configure_mock(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_all_cryptos().returning(|| Ok(cryptos()));
    cfg.service(AllCryptosRoute::<MockStore>::new())
        .app_data(web::Data::new(PriceStoreApi::new(store)))
        .app_data(web::Data::new(admin_key()));
}

fn configure_memory(db: MemoryDatabase) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let quotes = StaticQuoteSource::new(&[("bitcoin", 64_000.0), ("ethereum", 3_200.0), ("binancecoin", 600.0)]);
        let refresher = TestRefresher::new(db.clone(), quotes, default_tracked_assets());
        cfg.service(AllCryptosRoute::<MemoryDatabase>::new())
            .service(CreateCryptoRoute::<MemoryDatabase>::new())
            .service(UpdateCryptoRoute::<MemoryDatabase>::new())
            .service(RefreshPricesRoute::<MemoryDatabase, StaticQuoteSource>::new())
            .service(OrdersRoute::<MemoryDatabase>::new())
            .service(OrderByIdRoute::<MemoryDatabase>::new())
            .service(UpdateOrderStatusRoute::<MemoryDatabase>::new())
            .service(ReceiptRoute::<MemoryDatabase>::new())
            .service(UpdateCardPriceRoute::<MemoryDatabase>::new())
            .app_data(web::Data::new(PriceStoreApi::new(db.clone())))
            .app_data(web::Data::new(CatalogApi::new(db.clone())))
            .app_data(web::Data::new(OrderFlowApi::new(db, EventProducers::default())))
            .app_data(web::Data::new(refresher))
            .app_data(web::Data::new(admin_key()));
    }
}

//----------------------------------------------   Admin guard  ----------------------------------------------------

#[actix_web::test]
async fn admin_route_without_token() {
    let _ = env_logger::try_init();
    let (status, message) = get_request("", "/cryptocurrencies", configure_mock).await.expect_err("Expected error");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(message, "Authentication Error. An admin token is required.");
}

#[actix_web::test]
async fn admin_route_with_wrong_token() {
    let _ = env_logger::try_init();
    let (status, message) =
        get_request("not-the-key", "/cryptocurrencies", configure_mock).await.expect_err("Expected error");
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message, "Authentication Error. The admin token is not valid.");
}

#[actix_web::test]
async fn admin_route_with_token() {
    let _ = env_logger::try_init();
    let (status, body) =
        get_request(TEST_ADMIN_KEY, "/cryptocurrencies", configure_mock).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body).as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn admin_route_with_bearer_token() {
    let _ = env_logger::try_init();
    let req = TestRequest::get()
        .uri("/cryptocurrencies")
        .insert_header((header::AUTHORIZATION, format!("Bearer {TEST_ADMIN_KEY}")));
    let (status, _) = send(req, configure_mock).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn admin_routes_are_closed_without_a_key() {
    let _ = env_logger::try_init();
    let configure = |cfg: &mut ServiceConfig| {
        let store = MockStore::new();
        cfg.service(AllCryptosRoute::<MockStore>::new())
            .app_data(web::Data::new(PriceStoreApi::new(store)))
            .app_data(web::Data::new(AdminKey::default()));
    };
    let (status, _) = get_request(TEST_ADMIN_KEY, "/cryptocurrencies", configure).await.expect_err("Expected error");
    assert_eq!(status, StatusCode::FORBIDDEN);
}

//----------------------------------------------   Cryptocurrencies  ------------------------------------------------

#[actix_web::test]
async fn create_and_update_crypto() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::seeded();
    let sol = json!({ "symbol": "sol", "name": "Solana", "usd_price": 150.0, "wallet_address": "So1ana" });
    let (status, body) = post_request(TEST_ADMIN_KEY, "/admin/cryptocurrencies", &sol, configure_memory(db.clone()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    let created = json(&body);
    assert_eq!(created["symbol"], "SOL");
    assert_eq!(created["is_active"], true);

    let (status, _) = post_request(TEST_ADMIN_KEY, "/admin/cryptocurrencies", &sol, configure_memory(db.clone()))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::CONFLICT);

    let path = format!("/admin/cryptocurrencies/{}", created["id"]);
    let update = json!({ "is_active": false });
    let (status, body) =
        patch_request(TEST_ADMIN_KEY, &path, &update, configure_memory(db.clone())).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["is_active"], false);

    let update = json!({ "usd_price": -1.0 });
    let (status, _) =
        patch_request(TEST_ADMIN_KEY, &path, &update, configure_memory(db.clone())).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let rename = json!({ "name": "Wrapped Solana" });
    let (status, _) = patch_request(TEST_ADMIN_KEY, "/admin/cryptocurrencies/99", &rename, configure_memory(db))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_card_price() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::seeded();
    let body = json!({ "base_price_usd": 750.0 });
    let (status, res) =
        patch_request(TEST_ADMIN_KEY, "/admin/cards/1", &body, configure_memory(db.clone())).await.expect("Failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&res)["base_price_usd"], 750.0);
    let body = json!({ "basePriceUsd": 0.0 });
    let (status, _) =
        patch_request(TEST_ADMIN_KEY, "/admin/cards/1", &body, configure_memory(db.clone())).await.expect("Failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json!({ "base_price_usd": 10.0 });
    let (status, _) =
        patch_request(TEST_ADMIN_KEY, "/admin/cards/99", &body, configure_memory(db)).await.expect("Failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//----------------------------------------------   Price refresh  ----------------------------------------------------

#[actix_web::test]
async fn refresh_prices() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::seeded();
    let (status, body) = post_request(TEST_ADMIN_KEY, "/admin/refresh-prices", &json!({}), configure_memory(db))
        .await
        .expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["message"], "Cryptocurrency prices refreshed successfully");
    let outcomes = body["report"]["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[0], json!(["BTC", { "result": "live", "price": 64_000.0 }]));
    // The feed has no price for tron
    assert_eq!(outcomes[3][1]["result"], "fallback");
    let prices = body["cryptocurrencies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["symbol"].as_str().unwrap().to_string(), c["usd_price"].as_f64().unwrap()))
        .collect::<Vec<_>>();
    let expected = [("BNB", 600.0), ("BTC", 64_000.0), ("ETH", 3_200.0), ("TRX", 0.12)];
    assert_eq!(prices, expected.iter().map(|(s, p)| (s.to_string(), *p)).collect::<Vec<_>>());
}

#[actix_web::test]
async fn overlapping_refreshes_conflict() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::seeded();
    let quotes = SlowQuoteSource::new(Duration::from_millis(200), StaticQuoteSource::new(&[("bitcoin", 64_000.0)]));
    let refresher = PriceRefresher::new(db.clone(), quotes, default_tracked_assets());
    let app = App::new()
        .app_data(json_config())
        .app_data(web::Data::new(PriceStoreApi::new(db)))
        .app_data(web::Data::new(refresher))
        .app_data(web::Data::new(admin_key()))
        .service(RefreshPricesRoute::<MemoryDatabase, SlowQuoteSource<StaticQuoteSource>>::new());
    let service = test::init_service(app).await;
    let request = || with_admin_token(TestRequest::post().uri("/admin/refresh-prices"), TEST_ADMIN_KEY).to_request();
    let (first, second) =
        futures::join!(test::call_service(&service, request()), test::call_service(&service, request()));
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::CONFLICT);
    // Once the first cycle is done, a new one may start
    let third = test::call_service(&service, request()).await;
    assert_eq!(third.status(), StatusCode::OK);
}

//----------------------------------------------   Orders  ----------------------------------------------------

async fn place_order(db: &MemoryDatabase) -> i64 {
    let receipt = NewReceipt::new("receipt.pdf", "application/pdf", b"%PDF-1.4 paid".to_vec());
    let submission = OrderSubmission::new(2, "Ada Lovelace", "ada@example.com", "GB-0042", "ETH").with_receipt(receipt);
    let api = OrderFlowApi::new(db.clone(), EventProducers::default());
    api.submit_order(submission).await.expect("Failed to place order").id
}

#[actix_web::test]
async fn review_an_order() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::seeded();
    let first = place_order(&db).await;
    let second = place_order(&db).await;

    let (status, body) = get_request(TEST_ADMIN_KEY, "/admin/orders", configure_memory(db.clone())).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    let ids = json(&body).as_array().unwrap().iter().map(|o| o["id"].as_i64().unwrap()).collect::<Vec<_>>();
    assert_eq!(ids, vec![second, first]);

    let path = format!("/admin/orders/{first}/status");
    let verified = json!({ "status": "verified" });
    let (status, body) =
        patch_request(TEST_ADMIN_KEY, &path, &verified, configure_memory(db.clone())).await.expect("Failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "verified");

    let rejected = json!({ "status": "rejected" });
    let (status, body) =
        patch_request(TEST_ADMIN_KEY, &path, &rejected, configure_memory(db.clone())).await.expect("Failed");
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json(&body)["error"], "An order cannot go from verified to rejected");

    let (status, body) =
        get_request(TEST_ADMIN_KEY, &format!("/admin/orders/{first}"), configure_memory(db.clone())).await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "verified");

    let (status, _) = get_request(TEST_ADMIN_KEY, "/admin/orders/99", configure_memory(db)).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn fetch_receipt() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::seeded();
    place_order(&db).await;
    let req = with_admin_token(TestRequest::get().uri("/admin/receipts/1"), TEST_ADMIN_KEY).to_request();
    let service = test::init_service(App::new().configure(configure_memory(db.clone()))).await;
    let res = test::call_service(&service, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get(header::CONTENT_TYPE).unwrap(), "application/pdf");
    assert_eq!(res.headers().get(header::CONTENT_DISPOSITION).unwrap(), "inline; filename=\"receipt.pdf\"");
    let body = test::read_body(res).await;
    assert_eq!(&body[..], b"%PDF-1.4 paid");

    let (status, _) = get_request(TEST_ADMIN_KEY, "/admin/receipts/5", configure_memory(db)).await.unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);
}
