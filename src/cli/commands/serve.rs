//! HTTP API server for integration with other systems.
//!
//! Exposes the draft pipeline as JSON endpoints plus a markdown download.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::DraftError;
use crate::pipeline::{DraftInput, Pipeline};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared application state.
struct AppState {
    pipeline: Pipeline,
    file_name: String,
}

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Draft, &settings) {
        Output::fail(&e)
    }

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let file_name = settings.output.file_name.clone();

    let state = Arc::new(AppState {
        pipeline: Pipeline::new(settings)?,
        file_name,
    });

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("draftcast API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Draft", "POST /draft");
    Output::kv("Download", "POST /draft/download");
    Output::kv("Transcript", "POST /transcript");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/draft", post(draft))
        .route("/draft/download", post(download))
        .route("/transcript", post(transcript))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct DraftRequest {
    /// YouTube URL or video ID
    #[serde(default)]
    url: Option<String>,
    /// Pasted transcript or notes
    #[serde(default)]
    text: Option<String>,
}

impl DraftRequest {
    fn into_input(self) -> Result<DraftInput, DraftError> {
        match (self.url, self.text) {
            (Some(url), None) => Ok(DraftInput::Url(url)),
            (None, Some(text)) => Ok(DraftInput::Text(text)),
            _ => Err(DraftError::InvalidInput(
                "provide exactly one of \"url\" or \"text\"".to_string(),
            )),
        }
    }
}

#[derive(Serialize)]
struct DraftResponse {
    markdown: String,
    model: String,
    file_name: String,
}

#[derive(Deserialize)]
struct TranscriptRequest {
    url: String,
}

#[derive(Serialize)]
struct TranscriptResponse {
    video_id: String,
    language_code: String,
    kind: String,
    text: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

fn status_for(err: &DraftError) -> StatusCode {
    match err {
        DraftError::IdentifierNotFound(_)
        | DraftError::IdentifierInvalid(_)
        | DraftError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DraftError::NoTranscriptAvailable(_) => StatusCode::NOT_FOUND,
        DraftError::TranscriptProvider(_) | DraftError::Completion(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: DraftError) -> Response {
    warn!("Request failed ({}): {}", err.kind(), err);
    (
        status_for(&err),
        Json(ErrorResponse {
            error: err.to_string(),
            kind: err.kind(),
            hint: err.hint(),
        }),
    )
        .into_response()
}

/// Unwrap a JSON body, answering malformed ones with the usual error shape.
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(value)| value)
        .map_err(|rejection| error_response(DraftError::InvalidInput(rejection.body_text())))
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn draft(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DraftRequest>, JsonRejection>,
) -> Response {
    let input = match json_body(body).and_then(|req| req.into_input().map_err(error_response)) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.pipeline.draft(&input).await {
        Ok(draft) => Json(DraftResponse {
            model: draft.model.clone(),
            markdown: draft.into_markdown(),
            file_name: state.file_name.clone(),
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn download(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DraftRequest>, JsonRejection>,
) -> Response {
    let input = match json_body(body).and_then(|req| req.into_input().map_err(error_response)) {
        Ok(input) => input,
        Err(response) => return response,
    };

    match state.pipeline.draft(&input).await {
        Ok(draft) => (
            [
                (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", state.file_name),
                ),
            ],
            draft.into_markdown(),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TranscriptRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(body) {
        Ok(req) => req,
        Err(response) => return response,
    };

    match state.pipeline.transcript_from_url(&req.url).await {
        Ok(t) => Json(TranscriptResponse {
            video_id: t.video.to_string(),
            language_code: t.language_code,
            kind: t.kind.to_string(),
            text: t.text,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}
