//! JSON API over a single [`Session`].
//!
//! | Route | Effect |
//! |-------|--------|
//! | `GET /api/transcript` | every turn so far |
//! | `POST /api/messages` | submit `{"text": ...}`, returns the transcript |
//! | `POST /api/story` | generate a story, returns the result |
//! | `GET /api/story` | current generation result |

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use keeper::{GenerationResult, Session, SessionError, Turn};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Rejected story request.
pub struct ApiError(SessionError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SessionError::GenerationInFlight => StatusCode::CONFLICT,
            SessionError::NothingToTell => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub async fn index() -> &'static str {
    "Memory keeper is running. The API lives under /api"
}

pub async fn transcript(State(state): State<AppState>) -> Json<Vec<Turn>> {
    Json(state.session.transcript())
}

pub async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Json<Vec<Turn>> {
    state.session.submit(&req.text);
    Json(state.session.transcript())
}

/// Generate a story. The generation runs on its own task so a client that
/// disconnects mid-request does not cancel it for the shared session.
pub async fn generate_story(
    State(state): State<AppState>,
) -> Result<Json<GenerationResult>, ApiError> {
    let session = state.session.clone();
    match tokio::spawn(async move { session.generate().await }).await {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(e)) => {
            warn!(error = %e, "story request refused");
            Err(ApiError(e))
        }
        Err(e) => {
            error!(error = %e, "story task failed");
            Ok(Json(state.session.current_result()))
        }
    }
}

pub async fn current_story(State(state): State<AppState>) -> Json<GenerationResult> {
    Json(state.session.current_result())
}

/// Build the application router around `session`.
pub fn router(session: Arc<Session>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/transcript", get(transcript))
        .route("/api/messages", post(submit_message))
        .route("/api/story", get(current_story).post(generate_story))
        .with_state(AppState { session })
}

/// Serve the API on `addr` until the process stops.
pub async fn serve(addr: SocketAddr, session: Arc<Session>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(session).into_make_service()).await?;
    Ok(())
}
