//! HTTP routes
//!
//! Every form posts, updates the session, then redirects back to `/` so a
//! browser refresh never resubmits.

use std::sync::Arc;

use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Form, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use ledger_core::{Ledger, LoadError};
use serde::Deserialize;
use shared::CONFIG;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::pages::{DashboardView, render_dashboard};
use crate::session::{Notice, SessionCookie, SourceMode};
use crate::state::AppState;

/// Multipart field carrying the CSV file
const UPLOAD_FIELD: &str = "ledger";

/// Room for multipart boundaries and headers on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

const UPLOAD_PROMPT: &str = "Please upload a CSV file or use the sample data.";

pub fn router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(dashboard))
        .route("/source", post(select_source))
        .route("/upload", post(upload))
        .route("/report", post(generate_report))
        .route("/report/download", get(download_report))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

async fn dashboard(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let session = state.sessions.checkout(cookie.id);
    let page = DashboardView::from_session(session, &state.sample, &state.config.currency_symbol);
    cookie.wrap(Html(render_dashboard(page)))
}

#[derive(Debug, Deserialize)]
struct SourceForm {
    source: SourceMode,
}

async fn select_source(
    State(state): State<AppState>,
    cookie: SessionCookie,
    Form(form): Form<SourceForm>,
) -> Response {
    state.sessions.update(cookie.id, |session| {
        session.mode = form.source;
        if form.source == SourceMode::Sample {
            session.notice = Some(Notice::Success("Sample data loaded.".to_string()));
        }
    });
    cookie.wrap(Redirect::to("/"))
}

#[derive(Debug, Error)]
enum UploadError {
    #[error("could not read the upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("could not load {name}: {source}")]
    Load {
        name: String,
        #[source]
        source: LoadError,
    },
}

/// Pull the CSV field out of the form. Ok(None) means no file was chosen.
async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<Option<Ledger>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or("upload.csv")
            .to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        let ledger = Ledger::from_upload(&name, &bytes, limit).map_err(|source| UploadError::Load {
            name: name.clone(),
            source,
        })?;
        info!(file = %name, transactions = ledger.len(), "Ledger uploaded");
        return Ok(Some(ledger));
    }
    Ok(None)
}

async fn upload(State(state): State<AppState>, cookie: SessionCookie, mut multipart: Multipart) -> Response {
    let outcome = read_upload(&mut multipart, state.config.max_upload_bytes).await;

    state.sessions.update(cookie.id, |session| {
        session.mode = SourceMode::Upload;
        let notice = match outcome {
            Ok(Some(ledger)) => {
                let message = format!("Uploaded {} successfully.", ledger.source);
                session.upload = Some(Arc::new(ledger));
                Notice::Success(message)
            }
            Ok(None) => Notice::Info(UPLOAD_PROMPT.to_string()),
            Err(e) => {
                warn!(error = %e, "Upload rejected");
                // Keep whatever ledger the session already had
                Notice::Error(e.to_string())
            }
        };
        session.notice = Some(notice);
    });
    cookie.wrap(Redirect::to("/"))
}

async fn generate_report(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let session = state.sessions.snapshot(cookie.id);

    let Some(ledger) = session.active_ledger(&state.sample) else {
        state.sessions.update(cookie.id, |session| {
            session.notice = Some(Notice::Info(UPLOAD_PROMPT.to_string()));
        });
        return cookie.wrap(Redirect::to("/"));
    };

    // The session lock is not held while waiting on the remote service
    let result = state.reports.generate(&ledger.transactions).await;
    state.sessions.update(cookie.id, |session| session.record_report(result));

    cookie.wrap(Redirect::to("/"))
}

async fn download_report(State(state): State<AppState>, cookie: SessionCookie) -> Response {
    let response = match state.sessions.snapshot(cookie.id).report {
        Some(report) => (
            [
                (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", CONFIG.report.download_filename),
                ),
            ],
            report,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "No report has been generated yet").into_response(),
    };
    cookie.wrap(response)
}

async fn health() -> &'static str {
    "ok"
}
