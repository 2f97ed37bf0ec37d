use actix_web::{
    body::MessageBody,
    http::{header::ContentType, StatusCode},
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use gbp_common::Secret;
use log::debug;
use serde::Serialize;

use crate::{
    middleware::{AdminKey, ADMIN_TOKEN_HEADER},
    server::{json_config, path_config},
};

/// The admin key every test app is configured with. DO NOT re-use it anywhere.
pub const TEST_ADMIN_KEY: &str = "the-admin-key-for-endpoint-tests";

/// Status and body of a response, or of an error raised by middleware before any handler ran.
pub type TestResult = Result<(StatusCode, String), (StatusCode, String)>;

pub fn admin_key() -> AdminKey {
    AdminKey::new(&Secret::new(TEST_ADMIN_KEY.to_string()))
}

pub async fn get_request(admin_token: &str, path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> TestResult {
    let req = with_admin_token(TestRequest::get().uri(path), admin_token);
    send(req, configure).await
}

pub async fn post_request<T: Serialize>(
    admin_token: &str,
    path: &str,
    body: &T,
    configure: impl FnOnce(&mut ServiceConfig),
) -> TestResult {
    let req = with_admin_token(TestRequest::post().uri(path).set_json(body), admin_token);
    send(req, configure).await
}

pub async fn patch_request<T: Serialize>(
    admin_token: &str,
    path: &str,
    body: &T,
    configure: impl FnOnce(&mut ServiceConfig),
) -> TestResult {
    let req = with_admin_token(TestRequest::patch().uri(path).set_json(body), admin_token);
    send(req, configure).await
}

/// Posts a raw body, which lets tests send broken JSON.
pub async fn post_raw(path: &str, body: &'static str, configure: impl FnOnce(&mut ServiceConfig)) -> TestResult {
    let req = TestRequest::post().uri(path).insert_header(ContentType::json()).set_payload(body);
    send(req, configure).await
}

pub fn with_admin_token(req: TestRequest, admin_token: &str) -> TestRequest {
    if admin_token.is_empty() {
        req
    } else {
        req.insert_header((ADMIN_TOKEN_HEADER, admin_token))
    }
}

pub async fn send(req: TestRequest, configure: impl FnOnce(&mut ServiceConfig)) -> TestResult {
    let app = App::new().app_data(json_config()).app_data(path_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("🚀️ Making request");
    match test::try_call_service(&service, req.to_request()).await {
        Ok(res) => {
            let (_, res) = res.into_parts();
            let status = res.status();
            let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
            Ok((status, body))
        },
        Err(e) => Err((e.as_response_error().status_code(), e.to_string())),
    }
}

pub fn json(body: &str) -> serde_json::Value {
    serde_json::from_str(body).expect("Response was not valid JSON")
}
