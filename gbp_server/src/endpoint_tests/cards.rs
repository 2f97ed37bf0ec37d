use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::{TimeZone, Utc};
use gbp_engine::{
    db_types::{Card, Cryptocurrency},
    test_utils::prepare_env::{drop_test_db, prepare_seeded_env, random_db_path},
    CatalogApi,
    PriceStoreApi,
    SqliteDatabase,
    StoreError,
};
use serde_json::json;

use super::helpers::{get_request, json};
use crate::{
    endpoint_tests::mocks::MockStore,
    routes::{ActiveCryptosRoute, CardByIdRoute, CardsRoute},
};

#[actix_web::test]
async fn fetch_priced_cards() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/cards", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let cards = json(&body);
    assert_eq!(cards.as_array().unwrap().len(), 2);
    assert_eq!(
        cards[1],
        json!({
            "id": 2,
            "name": "Gold Visa",
            "description": "Premium card with enhanced benefits",
            "image_url": "https://i.imgur.com/ZKlpSSb.jpg",
            "base_price_usd": 1000.0,
            "crypto_prices": { "BNB": 2.0, "ETH": 0.32767547 }
        })
    );
}

#[actix_web::test]
async fn cryptos_without_a_price_are_left_out() {
    let _ = env_logger::try_init();
    let configure = |cfg: &mut ServiceConfig| {
        let mut store = MockStore::new();
        store.expect_fetch_card().returning(|id| Ok(cards().into_iter().find(|c| c.id == id)));
        store.expect_fetch_active_cryptos().returning(|| {
            let mut cryptos = cryptos();
            cryptos[1].usd_price = 0.0;
            Ok(cryptos)
        });
        cfg.service(CardByIdRoute::<MockStore>::new()).app_data(web::Data::new(CatalogApi::new(store)));
    };
    let (status, body) = get_request("", "/cards/1", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["crypto_prices"], json!({ "BNB": 1.0 }));
}

#[actix_web::test]
async fn fetch_card_by_id() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/cards/1", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let card = json(&body);
    assert_eq!(card["name"], "Basic Premium Visa");
    assert_eq!(card["crypto_prices"]["BNB"], 1.0);
}

#[actix_web::test]
async fn unknown_card() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/cards/99", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body), json!({ "error": "The data was not found. Card #99" }));
}

#[actix_web::test]
async fn invalid_card_id() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/cards/gold", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].as_str().unwrap().starts_with("Could not read request path"));
}

#[actix_web::test]
async fn backend_errors_are_hidden() {
    let _ = env_logger::try_init();
    let configure = |cfg: &mut ServiceConfig| {
        let mut store = MockStore::new();
        store.expect_fetch_active_cryptos().returning(|| Err(StoreError::DatabaseError("disk on fire".into())));
        cfg.service(CardsRoute::<MockStore>::new()).app_data(web::Data::new(CatalogApi::new(store)));
    };
    let (status, body) = get_request("", "/cards", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("disk on fire"));
}

#[actix_web::test]
async fn fetch_active_cryptos() {
    let _ = env_logger::try_init();
    let (status, body) = get_request("", "/cryptocurrencies/active", configure).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    let cryptos = json(&body);
    assert_eq!(cryptos[0]["symbol"], "BNB");
    assert_eq!(cryptos[1]["wallet_address"], "0xd00d");
    assert_eq!(cryptos[1]["last_updated"], "2024-06-01T12:00:00Z");
}

#[actix_web::test]
async fn catalogue_from_a_seeded_database() {
    let db = prepare_seeded_env(&random_db_path()).await;
    let api_db = db.clone();
    let configure = move |cfg: &mut ServiceConfig| {
        cfg.service(CardsRoute::<SqliteDatabase>::new()).app_data(web::Data::new(CatalogApi::new(api_db)));
    };
    let (status, body) = get_request("", "/cards", configure).await.expect("Request failed");
    drop_test_db(db).await;
    assert_eq!(status, StatusCode::OK);
    let cards = json(&body);
    let cards = cards.as_array().unwrap();
    assert_eq!(cards.len(), 6);
    assert_eq!(cards[0]["name"], "Basic Premium Visa");
    let symbols = cards[0]["crypto_prices"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(symbols, vec!["BNB", "BTC", "ETH", "TRX"]);
}

fn configure(cfg: &mut ServiceConfig) {
    let mut store = MockStore::new();
    store.expect_fetch_cards().returning(|| Ok(cards()));
    store.expect_fetch_card().returning(|id| Ok(cards().into_iter().find(|c| c.id == id)));
    store.expect_fetch_active_cryptos().returning(|| Ok(cryptos()));
    let mut prices = MockStore::new();
    prices.expect_fetch_active_cryptos().returning(|| Ok(cryptos()));
    cfg.service(CardsRoute::<MockStore>::new())
        .service(CardByIdRoute::<MockStore>::new())
        .service(ActiveCryptosRoute::<MockStore>::new())
        .app_data(web::Data::new(CatalogApi::new(store)))
        .app_data(web::Data::new(PriceStoreApi::new(prices)));
}

fn cards() -> Vec<Card> {
    vec![
        Card {
            id: 1,
            name: "Basic Premium Visa".into(),
            description: Some("Entry level card with essential benefits".into()),
            base_price_usd: 500.0,
            image_url: "https://i.imgur.com/MxMIwJb.png".into(),
        },
        Card {
            id: 2,
            name: "Gold Visa".into(),
            description: Some("Premium card with enhanced benefits".into()),
            base_price_usd: 1000.0,
            image_url: "https://i.imgur.com/ZKlpSSb.jpg".into(),
        },
    ]
}

pub fn cryptos() -> Vec<Cryptocurrency> {
    let last_updated = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    vec![
        Cryptocurrency {
            id: 1,
            symbol: "BNB".into(),
            name: "Binance Coin".into(),
            usd_price: 500.0,
            wallet_address: "0xbeef".into(),
            is_active: true,
            last_updated,
        },
        Cryptocurrency {
            id: 2,
            symbol: "ETH".into(),
            name: "Ethereum".into(),
            usd_price: 3051.80,
            wallet_address: "0xd00d".into(),
            is_active: true,
            last_updated,
        },
    ]
}
