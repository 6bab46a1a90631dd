use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{header, Method, Request, StatusCode};
use keeper::Session;
use keeper_runtime::server::router;
use llm::{LLMClient, LLMError};
use serde_json::{json, Value};
use tokio::sync::Notify;
use tower::ServiceExt;

struct Storyteller;

#[async_trait]
impl LLMClient for Storyteller {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        if prompt.contains("Person: fail please") {
            Err(LLMError::ApiStatus {
                status: 500,
                reason: "Internal Server Error".into(),
            })
        } else {
            Ok("A story.".into())
        }
    }
}

/// Blocks inside `generate` until released.
struct GatedClient {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

#[async_trait]
impl LLMClient for GatedClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LLMError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok("done".into())
    }
}

fn gated() -> (Arc<Session>, Arc<Notify>, Arc<Notify>) {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let client = GatedClient {
        entered: entered.clone(),
        release: release.clone(),
    };
    let session = Arc::new(Session::new(Arc::new(client)));
    session.submit("the harvest");
    (session, entered, release)
}

fn app() -> axum::Router {
    router(Arc::new(Session::new(Arc::new(Storyteller))))
}

async fn call(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn root_responds() {
    let resp = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn transcript_starts_with_greeting() {
    let app = app();
    let (status, turns) = call(&app, Method::GET, "/api/transcript", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turns.as_array().unwrap().len(), 1);
    assert_eq!(turns[0]["speaker"], "asker");
}

#[tokio::test]
async fn messages_grow_transcript_by_two() {
    let app = app();
    let blank = Some(json!({"text": "   "}));
    let (_, turns) = call(&app, Method::POST, "/api/messages", blank).await;
    assert_eq!(turns.as_array().unwrap().len(), 1);

    let (status, turns) = call(
        &app,
        Method::POST,
        "/api/messages",
        Some(json!({"text": "I grew up on a farm"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turns.as_array().unwrap().len(), 3);
    assert_eq!(turns[1], json!({"speaker": "responder", "text": "I grew up on a farm"}));
    assert_eq!(turns[2]["speaker"], "asker");
}

#[tokio::test]
async fn story_requires_a_memory() {
    let app = app();
    let (status, body) = call(&app, Method::POST, "/api/story", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
    let (_, current) = call(&app, Method::GET, "/api/story", None).await;
    assert_eq!(current, json!({"status": "idle"}));
}

#[tokio::test]
async fn story_round_trip() {
    let app = app();
    call(&app, Method::POST, "/api/messages", Some(json!({"text": "my dog"}))).await;
    let (status, result) = call(&app, Method::POST, "/api/story", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result, json!({"status": "success", "text": "A story."}));
    let (_, current) = call(&app, Method::GET, "/api/story", None).await;
    assert_eq!(current, result);
}

#[tokio::test]
async fn failed_story_is_reported_in_body() {
    let app = app();
    call(&app, Method::POST, "/api/messages", Some(json!({"text": "fail please"}))).await;
    let (status, result) = call(&app, Method::POST, "/api/story", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "failure");
    assert!(result["message"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn concurrent_story_request_conflicts() {
    let (session, entered, release) = gated();
    let app = router(session);

    let background = app.clone();
    let first =
        tokio::spawn(async move { call(&background, Method::POST, "/api/story", None).await });
    entered.notified().await;

    let (status, body) = call(&app, Method::POST, "/api/story", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
    let (_, current) = call(&app, Method::GET, "/api/story", None).await;
    assert_eq!(current, json!({"status": "pending"}));

    release.notify_one();
    let (status, result) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result, json!({"status": "success", "text": "done"}));
}

#[tokio::test]
async fn disconnected_client_does_not_cancel_story() {
    let (session, entered, release) = gated();
    let app = router(session.clone());

    let dropped = tokio::time::timeout(
        Duration::from_millis(50),
        call(&app, Method::POST, "/api/story", None),
    )
    .await;
    assert!(dropped.is_err());
    entered.notified().await;
    assert!(session.current_result().is_pending());

    let mut updates = session.subscribe();
    release.notify_one();
    let settled = updates.wait_for(|r| !r.is_pending()).await.unwrap().clone();
    assert_eq!(settled.story(), Some("done"));
}
