//! HTTP-level tests for the chat relay endpoint.
//!
//! The upstream is replaced by `MockCompletionClient`, so these run offline.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Response, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use nur_relay::{
    build_app, CompletionClient, CompletionOutcome, Container, MockCompletionClient, ModeKey,
    PromptTable, CHAT_PATH,
};

fn app_with(client: Option<Arc<MockCompletionClient>>) -> axum::Router {
    let client = client.map(|c| c as Arc<dyn CompletionClient>);
    build_app(Arc::new(Container::with_client(client)))
}

async fn send(app: axum::Router, method: &str, body: Body) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(CHAT_PATH)
        .header(CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();
    app.oneshot(req).await.unwrap()
}

async fn post_json(app: axum::Router, payload: Value) -> Response<Body> {
    send(app, "POST", Body::from(payload.to_string())).await
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn assert_cors_headers(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

fn user_turns(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| json!({ "role": "user", "content": format!("question {i}") }))
        .collect()
}

#[tokio::test]
async fn test_options_is_empty_success() {
    let client = Arc::new(MockCompletionClient::new());
    let response = send(
        app_with(Some(client.clone())),
        "OPTIONS",
        Body::from(r#"{"messages": [{"role": "user", "content": "ignored"}]}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    for method in ["GET", "PUT", "PATCH", "DELETE"] {
        let client = Arc::new(MockCompletionClient::new());
        let response = send(app_with(Some(client.clone())), method, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_cors_headers(&response);
        assert_eq!(json_body(response).await, json!({ "error": "Method not allowed" }));
        assert_eq!(client.call_count(), 0);
    }
}

#[tokio::test]
async fn test_reply_round_trip() {
    let client = Arc::new(MockCompletionClient::replying("الصلاة عماد الدين"));
    let response = post_json(
        app_with(Some(client)),
        json!({ "messages": user_turns(1), "mode": "fiqh" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    assert_eq!(json_body(response).await, json!({ "reply": "الصلاة عماد الدين" }));
}

#[tokio::test]
async fn test_each_mode_sends_its_prompt() {
    let table = PromptTable::builtin();

    for mode in ModeKey::ALL {
        let client = Arc::new(MockCompletionClient::replying("ok"));
        let response = post_json(
            app_with(Some(client.clone())),
            json!({ "messages": user_turns(2), "mode": mode.as_str() }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let sent = serde_json::to_value(client.last_request().unwrap()).unwrap();
        assert_eq!(sent["messages"][0]["role"], "system");
        assert_eq!(sent["messages"][0]["content"], table.template(mode).text());
    }
}

#[tokio::test]
async fn test_unknown_or_missing_mode_uses_general() {
    let general = PromptTable::builtin().template(ModeKey::General).text().to_string();

    for payload in [
        json!({ "messages": user_turns(1), "mode": "astronomy" }),
        json!({ "messages": user_turns(1), "mode": 7 }),
        json!({ "messages": user_turns(1) }),
    ] {
        let client = Arc::new(MockCompletionClient::replying("ok"));
        post_json(app_with(Some(client.clone())), payload).await;

        let sent = serde_json::to_value(client.last_request().unwrap()).unwrap();
        assert_eq!(sent["messages"][0]["content"], general.as_str());
    }
}

#[tokio::test]
async fn test_history_over_limit_keeps_last_ten() {
    let client = Arc::new(MockCompletionClient::replying("ok"));
    let turns = user_turns(14);
    post_json(app_with(Some(client.clone())), json!({ "messages": turns })).await;

    let sent = serde_json::to_value(client.last_request().unwrap()).unwrap();
    let forwarded = sent["messages"].as_array().unwrap();
    assert_eq!(forwarded.len(), 11);
    assert_eq!(&forwarded[1..], &turns[4..]);
}

#[tokio::test]
async fn test_history_within_limit_is_forwarded_verbatim() {
    let client = Arc::new(MockCompletionClient::replying("ok"));
    let turns = vec![
        json!({ "role": "user", "content": "ما هي شروط الصلاة؟" }),
        json!({ "role": "assistant", "content": "【الحكم】: ..." }),
        json!({ "role": "user", "content": 42 }),
        json!({ "role": "narrator", "content": "raw entry" }),
    ];
    post_json(app_with(Some(client.clone())), json!({ "messages": turns })).await;

    let sent = serde_json::to_value(client.last_request().unwrap()).unwrap();
    let forwarded = sent["messages"].as_array().unwrap();
    assert_eq!(&forwarded[1..], turns.as_slice());
}

#[tokio::test]
async fn test_missing_credential_is_configuration_error() {
    let response = post_json(app_with(None), json!({ "messages": user_turns(1) })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&response);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("GROQ_API_KEY"));
}

#[tokio::test]
async fn test_upstream_rejections_are_translated() {
    let cases = [
        (401, StatusCode::UNAUTHORIZED, "❌ مفتاح GROQ_API_KEY غير صالح. تحقق منه."),
        (429, StatusCode::TOO_MANY_REQUESTS, "⏳ تجاوزت الحد اليومي المجاني. حاول غداً أو حسّن حسابك."),
        (503, StatusCode::SERVICE_UNAVAILABLE, "upstream says no"),
    ];

    for (status, expected_status, expected_message) in cases {
        let client = Arc::new(MockCompletionClient::with_outcome(
            CompletionOutcome::Rejected {
                status,
                message: Some("upstream says no".to_string()),
            },
        ));
        let response = post_json(app_with(Some(client)), json!({ "messages": user_turns(1) })).await;

        assert_eq!(response.status(), expected_status);
        assert_eq!(json_body(response).await, json!({ "error": expected_message }));
    }
}

#[tokio::test]
async fn test_transport_failure_is_server_error() {
    let client = Arc::new(MockCompletionClient::failing("dns error: no such host"));
    let response = post_json(app_with(Some(client)), json!({ "messages": user_turns(1) })).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&response);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("dns error: no such host"));
}

#[tokio::test]
async fn test_missing_reply_text_uses_placeholder() {
    let client = Arc::new(MockCompletionClient::with_outcome(CompletionOutcome::Reply(
        None,
    )));
    let response = post_json(app_with(Some(client)), json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "reply": "لم أتمكن من توليد إجابة." })
    );
}

#[tokio::test]
async fn test_missing_credential_wins_over_malformed_body() {
    let response = send(app_with(None), "POST", Body::from("{bad")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors_headers(&response);
    assert_eq!(
        json_body(response).await,
        json!({ "error": "❌ أضف GROQ_API_KEY إلى متغيرات البيئة" })
    );
}

fn oversized_body() -> Body {
    Body::from(vec![b' '; 3 * 1024 * 1024])
}

#[tokio::test]
async fn test_options_ignores_oversized_body() {
    let client = Arc::new(MockCompletionClient::new());
    let response = send(app_with(Some(client.clone())), "OPTIONS", oversized_body()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors_headers(&response);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_other_methods_with_oversized_body_are_not_allowed() {
    let response = send(app_with(None), "PUT", oversized_body()).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors_headers(&response);
    assert_eq!(json_body(response).await, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn test_oversized_post_body_is_bad_request() {
    let client = Arc::new(MockCompletionClient::new());
    let response = send(app_with(Some(client.clone())), "POST", oversized_body()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(&response);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("طلب غير صالح: "));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_body_is_bad_request() {
    let client = Arc::new(MockCompletionClient::new());
    let response = send(
        app_with(Some(client.clone())),
        "POST",
        Body::from("{\"messages\": [unterminated"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors_headers(&response);
    assert!(json_body(response).await["error"].is_string());
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_empty_post_body_uses_defaults() {
    let client = Arc::new(MockCompletionClient::replying("ok"));
    let response = send(app_with(Some(client.clone())), "POST", Body::empty()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let sent = client.last_request().unwrap();
    assert!(sent.conversation().is_empty());
}

#[tokio::test]
async fn test_health_endpoint() {
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app_with(None).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
