//! # API REST
//!
//! HTTP listener for the person intake form.
//!
//! Handles:
//! - Serving the form page for every request that is not a form submission
//! - Running `POST /submit` bodies through the [`SubmissionPipeline`]
//! - A JSON health endpoint for monitoring
//!
//! Every pipeline outcome, including a storage failure, is answered with `200 OK` and the
//! re-rendered form; the outcome is shown on the page.

#![warn(rust_2018_idioms)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use intake_core::constants::SUBMIT_PATH;
use intake_core::page::render_page;
use intake_core::{RenderedForm, SubmissionPipeline, SubmittedFields};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<SubmissionPipeline>,
}

impl AppState {
    pub fn new(pipeline: SubmissionPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Status, content type and body handed back to the listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: StatusCode,
    pub content_type: &'static str,
    pub body: String,
}

impl RenderedResponse {
    fn page(form: &RenderedForm) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: HTML_CONTENT_TYPE,
            body: render_page(form),
        }
    }
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type)],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Answers one request.
///
/// Only `POST /submit` runs the pipeline. Anything else gets the default page with empty fields
/// and no message. Blocks on the store, so async callers should run it off the runtime threads.
pub fn handle_submission(
    pipeline: &SubmissionPipeline,
    method: &Method,
    path: &str,
    body: &[u8],
) -> RenderedResponse {
    if *method != Method::POST || path != SUBMIT_PATH {
        return RenderedResponse::page(&RenderedForm::initial());
    }

    let submitted = parse_form(body);
    let outcome = pipeline.run(&submitted);
    RenderedResponse::page(&RenderedForm::from_outcome(&outcome, &submitted))
}

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// Missing keys stay empty. When a key repeats, its first value wins. Unknown keys are ignored.
pub fn parse_form(body: &[u8]) -> SubmittedFields {
    let pairs: Vec<(String, String)> = match serde_urlencoded::from_bytes(body) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::warn!("unreadable form body treated as empty: {}", e);
            Vec::new()
        }
    };

    let mut fields = SubmittedFields::default();
    let mut seen = [false; 4];
    for (key, value) in pairs {
        let (slot, index) = match key.as_str() {
            "name" => (&mut fields.name, 0),
            "surname" => (&mut fields.surname, 1),
            "idNumber" => (&mut fields.id_number, 2),
            "dob" => (&mut fields.date_of_birth, 3),
            _ => continue,
        };
        if !seen[index] {
            *slot = value;
            seen[index] = true;
        }
    }
    fields
}

/// Builds the router: `/health` plus a fallback that serves the form.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(form))
        .fallback(form)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Intake service is alive".into(),
    })
}

async fn form(State(state): State<AppState>, method: Method, uri: Uri, body: Bytes) -> Response {
    let pipeline = Arc::clone(&state.pipeline);
    let path = uri.path().to_owned();

    let result = tokio::task::spawn_blocking(move || {
        handle_submission(&pipeline, &method, &path, &body)
    })
    .await;

    match result {
        Ok(rendered) => rendered.into_response(),
        Err(e) => {
            tracing::error!("submission task failed: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}
