use crate::e2e::helpers;

use helpers::{TestApp, TestContext};
use hyper::StatusCode;
use meditation_backend::domain::speech::ProviderKind;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.app.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    let body = String::from_utf8(response.body_bytes.clone()).unwrap();
    assert_eq!(body, "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_configured_providers_when_ready(ctx: &TestContext) {
    let response = ctx.app.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap(),
        &json!({
            "status": "ready",
            "database": "connected",
            "tts_providers": ["elevenlabs", "openai", "groq"]
        })
    );
}

#[tokio::test]
async fn it_should_list_only_providers_with_keys() {
    let app = TestApp::spawn(&[ProviderKind::Groq]).await;

    let response = app.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["tts_providers"],
        json!(["groq"])
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_be_unavailable_when_store_is_down(ctx: &TestContext) {
    ctx.app.store.set_reachable(false);

    let response = ctx.app.client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["database"], "disconnected");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.app.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = ctx.app.client.get("/api/meditations/abc").await.unwrap();
    response.assert_header_exists("x-request-id");

    let first = ctx.app.client.get("/health").await.unwrap();
    let second = ctx.app.client.get("/health").await.unwrap();
    assert_ne!(first.header("x-request-id"), second.header("x-request-id"));
}
