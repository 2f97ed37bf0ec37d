use std::{sync::Arc, time::Duration};

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use gbp_engine::{
    events::EventProducers,
    refresh_objects::default_tracked_assets,
    CatalogApi,
    ChatFlowApi,
    OrderFlowApi,
    PriceRefresher,
    PriceStoreApi,
    SqliteDatabase,
};
use gbp_price_feed::CoinGeckoApi;
use log::*;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    integrations::chat_support::create_support_event_handlers,
    middleware::AdminKey,
    price_worker::{start_price_worker, SharedRefresher},
    routes::{
        health,
        ActiveCryptosRoute,
        AdminMessageRoute,
        AllCryptosRoute,
        CardByIdRoute,
        CardsRoute,
        CreateCryptoRoute,
        MyMessagesRoute,
        OrderByIdRoute,
        OrdersRoute,
        PostMessageRoute,
        ReceiptRoute,
        RefreshPricesRoute,
        SubmitOrderRoute,
        UpdateCardPriceRoute,
        UpdateCryptoRoute,
        UpdateOrderStatusRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::create_and_connect(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    if config.run_migrations {
        db.run_migrations().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
    }
    if config.seed_data {
        let seeded = db.seed().await.map_err(|e| ServerError::InitializeError(e.to_string()))?;
        info!("🚀️ Seeded {} cryptocurrencies and {} cards", seeded.cryptocurrencies, seeded.cards);
    }
    let feed = CoinGeckoApi::new(config.price_feed.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let refresher =
        PriceRefresher::new(db.clone(), feed, default_tracked_assets()).with_quote_timeout(config.quote_timeout());
    let refresher = Arc::new(refresher);

    let handlers = create_support_event_handlers(db.clone(), config.chat_reply_delay);
    let producers = handlers.producers();
    handlers.start_handlers().await;

    let _worker = start_price_worker(Arc::clone(&refresher), config.price_refresh_interval);
    let srv = create_server_instance(config, db.clone(), refresher, producers)?;
    let result = srv.await.map_err(|e| ServerError::Unspecified(e.to_string()));
    db.close().await;
    result
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    refresher: SharedRefresher,
    producers: EventProducers,
) -> Result<Server, ServerError> {
    let admin_key = AdminKey::new(&config.admin_api_key);
    let srv = HttpServer::new(move || {
        let catalog_api = CatalogApi::new(db.clone());
        let price_api = PriceStoreApi::new(db.clone());
        let orders_api = OrderFlowApi::new(db.clone(), producers.clone());
        let chat_api = ChatFlowApi::new(db.clone(), producers.clone());
        let api_scope = web::scope("/api")
            .service(CardsRoute::<SqliteDatabase>::new())
            .service(CardByIdRoute::<SqliteDatabase>::new())
            .service(ActiveCryptosRoute::<SqliteDatabase>::new())
            .service(SubmitOrderRoute::<SqliteDatabase>::new())
            .service(MyMessagesRoute::<SqliteDatabase>::new())
            .service(PostMessageRoute::<SqliteDatabase>::new())
            // Admin routes
            .service(AllCryptosRoute::<SqliteDatabase>::new())
            .service(CreateCryptoRoute::<SqliteDatabase>::new())
            .service(UpdateCryptoRoute::<SqliteDatabase>::new())
            .service(RefreshPricesRoute::<SqliteDatabase, CoinGeckoApi>::new())
            .service(OrdersRoute::<SqliteDatabase>::new())
            .service(OrderByIdRoute::<SqliteDatabase>::new())
            .service(UpdateOrderStatusRoute::<SqliteDatabase>::new())
            .service(ReceiptRoute::<SqliteDatabase>::new())
            .service(UpdateCardPriceRoute::<SqliteDatabase>::new())
            .service(AdminMessageRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("gbp::access_log"))
            .app_data(json_config())
            .app_data(path_config())
            .app_data(web::Data::new(catalog_api))
            .app_data(web::Data::new(price_api))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(chat_api))
            .app_data(web::Data::from(Arc::clone(&refresher)))
            .app_data(web::Data::new(admin_key.clone()))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed JSON bodies get the same error body as every other bad request.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|e, _| ServerError::InvalidRequestBody(e.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|e, _| ServerError::InvalidRequestPath(e.to_string()).into())
}
