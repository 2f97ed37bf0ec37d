//! Storefront request handlers.
//!
//! Every route here is mounted under `/api`, apart from `/health`. The public routes serve the priced catalogue, take
//! orders and carry the visitor's side of the support chat. Admin routes are wrapped in the admin guard by the
//! `where requires admin` form of [`route!`].
//!
//! Handlers are generic over the storage backend, so the endpoint tests can mount them on a mock or in-memory store.
//! All storage and price feed work is async; nothing in a handler may block the worker thread.
use std::marker::PhantomData;

use actix_multipart::Multipart;
use actix_web::{get, http::header, web, HttpRequest, HttpResponse, Responder};
use gbp_engine::{
    db_types::{CryptocurrencyUpdate, MessageSender, NewCryptocurrency},
    CatalogApi,
    CatalogManagement,
    ChatFlowApi,
    ChatManagement,
    OrderFlowApi,
    OrderManagement,
    PriceQuoteSource,
    PriceRefresher,
    PriceStore,
    PriceStoreApi,
};
use log::*;

use crate::{
    data_objects::{
        AdminMessageParams,
        NewMessageParams,
        RefreshPricesResponse,
        UpdateCardPriceParams,
        UpdateOrderStatusParams,
    },
    errors::ServerError,
    helpers::{get_browser_id, read_order_form},
    middleware::AdminGuardFactory,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro.
// The backend is a single type parameter that must satisfy every listed storage trait.
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };

    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+ where requires admin)  => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds +)+ 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>)
                    .wrap($crate::middleware::AdminGuardFactory::new());
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️")
}

//----------------------------------------------   Catalogue  ----------------------------------------------------
route!(cards => Get "/cards" impl CatalogManagement, PriceStore);
/// Every card, priced in every active cryptocurrency.
pub async fn cards<B>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + PriceStore {
    trace!("💻️ GET cards");
    let cards = api.priced_cards().await?;
    Ok(HttpResponse::Ok().json(cards))
}

route!(card_by_id => Get "/cards/{id}" impl CatalogManagement, PriceStore);
pub async fn card_by_id<B>(path: web::Path<i64>, api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + PriceStore {
    let id = path.into_inner();
    trace!("💻️ GET card #{id}");
    let card = api.priced_card(id).await?.ok_or_else(|| ServerError::NoRecordFound(format!("Card #{id}")))?;
    Ok(HttpResponse::Ok().json(card))
}

route!(update_card_price => Patch "/admin/cards/{id}" impl CatalogManagement, PriceStore where requires admin);
pub async fn update_card_price<B>(
    path: web::Path<i64>,
    body: web::Json<UpdateCardPriceParams>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: CatalogManagement + PriceStore,
{
    let id = path.into_inner();
    debug!("💻️ PATCH card #{id} to ${}", body.base_price_usd);
    let card = api.update_card_price(id, body.base_price_usd).await?;
    Ok(HttpResponse::Ok().json(card))
}

//----------------------------------------------   Cryptocurrencies  -------------------------------------------------
route!(active_cryptos => Get "/cryptocurrencies/active" impl PriceStore);
pub async fn active_cryptos<B>(api: web::Data<PriceStoreApi<B>>) -> Result<HttpResponse, ServerError>
where B: PriceStore {
    trace!("💻️ GET active cryptocurrencies");
    let cryptos = api.fetch_active_cryptos().await?;
    Ok(HttpResponse::Ok().json(cryptos))
}

route!(all_cryptos => Get "/cryptocurrencies" impl PriceStore where requires admin);
pub async fn all_cryptos<B>(api: web::Data<PriceStoreApi<B>>) -> Result<HttpResponse, ServerError>
where B: PriceStore {
    trace!("💻️ GET all cryptocurrencies");
    let cryptos = api.fetch_all_cryptos().await?;
    Ok(HttpResponse::Ok().json(cryptos))
}

route!(create_crypto => Post "/admin/cryptocurrencies" impl PriceStore where requires admin);
pub async fn create_crypto<B>(
    body: web::Json<NewCryptocurrency>,
    api: web::Data<PriceStoreApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PriceStore,
{
    debug!("💻️ POST new cryptocurrency {}", body.symbol);
    let crypto = api.create_crypto(body.into_inner()).await?;
    Ok(HttpResponse::Created().json(crypto))
}

route!(update_crypto => Patch "/admin/cryptocurrencies/{id}" impl PriceStore where requires admin);
pub async fn update_crypto<B>(
    path: web::Path<i64>,
    body: web::Json<CryptocurrencyUpdate>,
    api: web::Data<PriceStoreApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PriceStore,
{
    let id = path.into_inner();
    debug!("💻️ PATCH cryptocurrency #{id}");
    let crypto = api.update_crypto(id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(crypto))
}

/// The refresh handler needs both the store and the quote source, so its route is written out by hand.
pub struct RefreshPricesRoute<B, Q>(PhantomData<fn() -> (B, Q)>);

impl<B, Q> RefreshPricesRoute<B, Q> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<B, Q> actix_web::dev::HttpServiceFactory for RefreshPricesRoute<B, Q>
where
    B: PriceStore + 'static,
    Q: PriceQuoteSource + 'static,
{
    fn register(self, config: &mut actix_web::dev::AppService) {
        let res = actix_web::Resource::new("/admin/refresh-prices")
            .name("refresh_prices")
            .guard(actix_web::guard::Post())
            .to(refresh_prices::<B, Q>)
            .wrap(AdminGuardFactory::new());
        actix_web::dev::HttpServiceFactory::register(res, config);
    }
}

/// Runs one refresh cycle now. The cycle shares its in-flight flag with the scheduled worker, so this returns a
/// conflict if the worker is mid-cycle.
pub async fn refresh_prices<B, Q>(
    refresher: web::Data<PriceRefresher<B, Q>>,
    api: web::Data<PriceStoreApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: PriceStore,
    Q: PriceQuoteSource,
{
    info!("💻️ Manual price refresh requested");
    let report = refresher.refresh_once().await?;
    let cryptos = api.fetch_all_cryptos().await?;
    Ok(HttpResponse::Ok().json(RefreshPricesResponse::new(report, cryptos)))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(submit_order => Post "/orders" impl CatalogManagement, PriceStore, OrderManagement);
pub async fn submit_order<B>(payload: Multipart, api: web::Data<OrderFlowApi<B>>) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + PriceStore + OrderManagement {
    let submission = read_order_form(payload).await?;
    debug!("💻️ POST order for card #{} in {}", submission.card_id, submission.crypto_symbol);
    let order = api.submit_order(submission).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(orders => Get "/admin/orders" impl CatalogManagement, PriceStore, OrderManagement where requires admin);
pub async fn orders<B>(api: web::Data<OrderFlowApi<B>>) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + PriceStore + OrderManagement {
    trace!("💻️ GET all orders");
    let orders = api.fetch_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(
    order_by_id => Get "/admin/orders/{id}"
    impl CatalogManagement, PriceStore, OrderManagement where requires admin
);
pub async fn order_by_id<B>(path: web::Path<i64>, api: web::Data<OrderFlowApi<B>>) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + PriceStore + OrderManagement {
    let id = path.into_inner();
    trace!("💻️ GET order #{id}");
    let order = api.fetch_order(id).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(
    update_order_status => Patch "/admin/orders/{id}/status"
    impl CatalogManagement, PriceStore, OrderManagement where requires admin
);
pub async fn update_order_status<B>(
    path: web::Path<i64>,
    body: web::Json<UpdateOrderStatusParams>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: CatalogManagement + PriceStore + OrderManagement,
{
    let id = path.into_inner();
    debug!("💻️ PATCH order #{id} to {}", body.status);
    let order = api.update_order_status(id, body.status).await?;
    Ok(HttpResponse::Ok().json(order))
}

route!(
    receipt => Get "/admin/receipts/{id}"
    impl CatalogManagement, PriceStore, OrderManagement where requires admin
);
/// The raw receipt file, served with the MIME type it was uploaded with.
pub async fn receipt<B>(path: web::Path<i64>, api: web::Data<OrderFlowApi<B>>) -> Result<HttpResponse, ServerError>
where B: CatalogManagement + PriceStore + OrderManagement {
    let id = path.into_inner();
    trace!("💻️ GET receipt #{id}");
    let receipt = api.fetch_receipt(id).await?;
    let disposition = format!("inline; filename=\"{}\"", receipt.file_name.replace('"', ""));
    Ok(HttpResponse::Ok()
        .content_type(receipt.mime_type)
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .body(receipt.data))
}

//----------------------------------------------   Support chat  ----------------------------------------------------
route!(my_messages => Get "/messages" impl ChatManagement);
/// The conversation of the calling browser, oldest first.
pub async fn my_messages<B>(req: HttpRequest, api: web::Data<ChatFlowApi<B>>) -> Result<HttpResponse, ServerError>
where B: ChatManagement {
    let browser_id = get_browser_id(&req)?;
    trace!("💻️ GET messages for {browser_id}");
    let messages = api.messages_for(&browser_id).await?;
    Ok(HttpResponse::Ok().json(messages))
}

route!(post_message => Post "/messages" impl ChatManagement);
/// Stores the visitor's message. The support reply is written later by the message hook.
pub async fn post_message<B>(
    req: HttpRequest,
    body: web::Json<NewMessageParams>,
    api: web::Data<ChatFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: ChatManagement,
{
    let browser_id = get_browser_id(&req)?;
    trace!("💻️ POST message from {browser_id}");
    let message = api.post_message(&browser_id, &body.content).await?;
    Ok(HttpResponse::Created().json(message))
}

route!(admin_message => Post "/admin/messages" impl ChatManagement where requires admin);
pub async fn admin_message<B>(
    body: web::Json<AdminMessageParams>,
    api: web::Data<ChatFlowApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: ChatManagement,
{
    let AdminMessageParams { browser_id, content } = body.into_inner();
    debug!("💻️ POST admin reply to {browser_id}");
    let message = api.post_reply(&browser_id, &content, MessageSender::Admin).await?;
    Ok(HttpResponse::Created().json(message))
}
