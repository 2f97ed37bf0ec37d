use actix_web::{cookie::Cookie, http::StatusCode, test::TestRequest, web, web::ServiceConfig};
use gbp_engine::{events::EventProducers, test_utils::MemoryDatabase, ChatFlowApi};
use serde_json::json;

use super::helpers::{admin_key, get_request, json, post_raw, post_request, send, TEST_ADMIN_KEY};
use crate::{
    helpers::BROWSER_ID_HEADER,
    routes::{AdminMessageRoute, MyMessagesRoute, PostMessageRoute},
};

fn configure(db: MemoryDatabase) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.service(MyMessagesRoute::<MemoryDatabase>::new())
            .service(PostMessageRoute::<MemoryDatabase>::new())
            .service(AdminMessageRoute::<MemoryDatabase>::new())
            .app_data(web::Data::new(ChatFlowApi::new(db, EventProducers::default())))
            .app_data(web::Data::new(admin_key()));
    }
}

#[actix_web::test]
async fn messages_need_a_browser_id() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::new();
    let (status, body) = get_request("", "/messages", configure(db.clone())).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body), json!({ "error": "Browser ID not found" }));
    let (status, _) =
        post_request("", "/messages", &json!({ "content": "hi" }), configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn post_and_fetch_messages() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::new();
    let req = TestRequest::post()
        .uri("/messages")
        .insert_header((BROWSER_ID_HEADER, "browser-1"))
        .set_json(json!({ "content": "  What cards do you offer?  " }));
    let (status, body) = send(req, configure(db.clone())).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    let message = json(&body);
    assert_eq!(message["content"], "What cards do you offer?");
    assert_eq!(message["sender"], "user");
    assert_eq!(message["browser_id"], "browser-1");

    // The cookie works too
    let req = TestRequest::get().uri("/messages").cookie(Cookie::new("browserId", "browser-1"));
    let (status, body) = send(req, configure(db.clone())).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body).as_array().unwrap().len(), 1);

    let req = TestRequest::get().uri("/messages").insert_header((BROWSER_ID_HEADER, "browser-2"));
    let (status, body) = send(req, configure(db)).await.expect("Request failed");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");
}

#[actix_web::test]
async fn empty_messages_are_rejected() {
    let _ = env_logger::try_init();
    let req = TestRequest::post()
        .uri("/messages")
        .insert_header((BROWSER_ID_HEADER, "browser-1"))
        .set_json(json!({ "content": "   " }));
    let (status, body) = send(req, configure(MemoryDatabase::new())).await.expect("Request failed");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json(&body)["error"], "The message cannot be empty");
}

#[actix_web::test]
async fn malformed_json() {
    let _ = env_logger::try_init();
    let (status, body) = post_raw("/messages", "{\"content\": ", configure(MemoryDatabase::new())).await.unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json(&body)["error"].as_str().unwrap().starts_with("Could not read request body"));
}

#[actix_web::test]
async fn admin_replies() {
    let _ = env_logger::try_init();
    let db = MemoryDatabase::new();
    let reply = json!({ "browserId": "browser-1", "content": "An agent will call you shortly." });
    let (status, _) =
        post_request("", "/admin/messages", &reply, configure(db.clone())).await.expect_err("Expected error");
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) =
        post_request(TEST_ADMIN_KEY, "/admin/messages", &reply, configure(db.clone())).await.expect("Request failed");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json(&body)["sender"], "admin");

    let req = TestRequest::get().uri("/messages").insert_header((BROWSER_ID_HEADER, "browser-1"));
    let (_, body) = send(req, configure(db)).await.expect("Request failed");
    assert_eq!(json(&body)[0]["content"], "An agent will call you shortly.");
}
