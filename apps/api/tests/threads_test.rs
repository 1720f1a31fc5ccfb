use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use api::config::Config;
use api::handlers;
use api::middleware::auth::AuthMiddleware;
use api::state::AppState;
use application::auth::issue_access_token;
use application::chat::dtos::{MarkReadResponse, MessageResponse, ThreadResponse};
use application::ErrorResponse;
use infrastructure::repositories::{InMemoryStore, MessageRepository, NewMessage, NewThread, ThreadRepository};
use serde_json::json;
use uuid::Uuid;

const SECRET: &str = "integration-test-secret";

fn config() -> Config {
    Config {
        database_url: String::new(),
        redis_url: String::new(),
        jwt_secret: SECRET.to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        run_migrations: false,
    }
}

fn bearer(user_id: Uuid) -> (&'static str, String) {
    let token = issue_access_token(SECRET, user_id, 300).expect("token");
    ("Authorization", format!("Bearer {}", token))
}

macro_rules! init_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .app_data(web::Data::new(config()))
                .app_data(web::Data::new(AppState::in_memory($store.clone())))
                .configure(handlers::configure),
        )
        .await
    };
}

async fn seed_thread(store: &InMemoryStore, messages: usize) -> bazaar_core::entities::threads::Model {
    let thread = store
        .create(NewThread {
            listing_id: Uuid::new_v4(),
            buyer_id: Uuid::new_v4(),
            seller_id: Uuid::new_v4(),
        })
        .await
        .unwrap();
    for i in 0..messages {
        store
            .insert(NewMessage {
                thread_id: thread.thread_id,
                sender_id: thread.buyer_id,
                body: Some(format!("Is it still for sale? ({})", i)),
                image_urls: vec![],
            })
            .await
            .unwrap();
    }
    thread
}

#[actix_web::test]
async fn test_mark_read_then_idempotent() {
    let store = Arc::new(InMemoryStore::new());
    let thread = seed_thread(&store, 3).await;
    let app = init_app!(store);
    let uri = format!("/api/v1/threads/{}/read", thread.thread_id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(thread.seller_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: MarkReadResponse = test::read_body_json(resp).await;
    assert_eq!(body, MarkReadResponse { ok: true, updated: 3 });

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(thread.seller_id))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "ok": true, "updated": 0 }));
}

#[actix_web::test]
async fn test_mark_read_requires_identity() {
    let store = Arc::new(InMemoryStore::new());
    let thread = seed_thread(&store, 1).await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/read", thread.thread_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code, "AUTHENTICATION_FAILED");

    // Nothing was marked
    let message = store.list_recent(thread.thread_id, 10).await.unwrap();
    assert!(message[0].read_by.is_empty());
}

#[actix_web::test]
async fn test_forged_token_is_rejected() {
    let store = Arc::new(InMemoryStore::new());
    let thread = seed_thread(&store, 1).await;
    let app = init_app!(store);

    let forged = issue_access_token("some-other-secret", thread.seller_id, 300).unwrap();
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/read", thread.thread_id))
        .insert_header(("Authorization", format!("Bearer {}", forged)))
        .to_request();
    let err = test::try_call_service(&app, req).await.err().expect("middleware rejects");
    assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_mark_read_rejects_malformed_thread_id() {
    let store = Arc::new(InMemoryStore::new());
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/v1/threads/not-a-uuid/read")
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code, "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_missing_thread_id_is_a_bad_request() {
    let store = Arc::new(InMemoryStore::new());
    let app = init_app!(store);

    for uri in ["/api/v1/threads//read", "/api/v1/threads/%20/read"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(bearer(Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error_code, "VALIDATION_ERROR");
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/threads//unread")
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_mark_read_checks_participation() {
    let store = Arc::new(InMemoryStore::new());
    let thread = seed_thread(&store, 2).await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/read", thread.thread_id))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/read", Uuid::new_v4()))
        .insert_header(bearer(thread.seller_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_mark_read_surfaces_store_failure() {
    let store = Arc::new(InMemoryStore::new());
    let thread = seed_thread(&store, 2).await;
    store.fail_listing();
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/read", thread.thread_id))
        .insert_header(bearer(thread.seller_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code, "STORE_ERROR");
    assert!(body.error.contains("message store unavailable"));
}

#[actix_web::test]
async fn test_conversation_flow() {
    let store = Arc::new(InMemoryStore::new());
    let app = init_app!(store);
    let buyer = Uuid::new_v4();
    let seller = Uuid::new_v4();

    // Buyer opens a thread about a listing
    let req = test::TestRequest::post()
        .uri("/api/v1/threads")
        .insert_header(bearer(buyer))
        .set_json(json!({ "listing_id": Uuid::new_v4(), "seller_id": seller }))
        .to_request();
    let thread: ThreadResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(thread.buyer_id, buyer);

    // Buyer sends two messages
    for body in ["Hello!", "Can you ship it?"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/threads/{}/messages", thread.id))
            .insert_header(bearer(buyer))
            .set_json(json!({ "body": body }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let message: MessageResponse = test::read_body_json(resp).await;
        assert_eq!(message.body.as_deref(), Some(body));
    }

    // Seller sees them as unread
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/threads/{}/unread", thread.id))
        .insert_header(bearer(seller))
        .to_request();
    let unread: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(unread, json!({ "unread": 2 }));

    // Seller reads the thread
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/read", thread.id))
        .insert_header(bearer(seller))
        .to_request();
    let read: MarkReadResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(read.updated, 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/threads/{}", thread.id))
        .insert_header(bearer(seller))
        .to_request();
    let detail: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["unread"], 0);
    assert_eq!(detail["last_message"], "Can you ship it?");

    // Newest first, with read receipts
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/threads/{}/messages?limit=1", thread.id))
        .insert_header(bearer(buyer))
        .to_request();
    let page: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["messages"][0]["body"], "Can you ship it?");
    assert_eq!(page["messages"][0]["read_by"], json!([seller]));
    assert!(page["next_cursor"].is_string());
}

#[actix_web::test]
async fn test_send_message_validation_error_shape() {
    let store = Arc::new(InMemoryStore::new());
    let thread = seed_thread(&store, 0).await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/messages", thread.thread_id))
        .insert_header(bearer(thread.buyer_id))
        .set_json(json!({ "body": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error_code, "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/threads/{}/messages", thread.thread_id))
        .insert_header(bearer(thread.buyer_id))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_check() {
    let store = Arc::new(InMemoryStore::new());
    let app = init_app!(store);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "status": "ok" }));
}
