//! Per-browser session state
//!
//! Each browser gets a random id in a cookie. The server keeps the chosen
//! data source, any uploaded ledger, the last report and a one-shot notice
//! in memory, keyed by that id.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use ledger_core::{Ledger, ReportError};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "ledger_session";

/// Sessions untouched for this long are dropped
const SESSION_IDLE_LIMIT: Duration = Duration::from_secs(24 * 60 * 60);

/// Which ledger the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Sample,
    Upload,
}

/// Message shown once on the next page render
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Info(String),
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub mode: SourceMode,
    pub upload: Option<Arc<Ledger>>,
    /// Last successfully generated report
    pub report: Option<String>,
    pub notice: Option<Notice>,
}

impl Session {
    /// The ledger the page and report work from. None in upload mode
    /// until a file has been uploaded.
    pub fn active_ledger(&self, sample: &Arc<Ledger>) -> Option<Arc<Ledger>> {
        match self.mode {
            SourceMode::Sample => Some(Arc::clone(sample)),
            SourceMode::Upload => self.upload.clone(),
        }
    }

    /// Store the outcome of a report request. A failure keeps any earlier
    /// report on screen.
    pub fn record_report(&mut self, result: Result<String, ReportError>) {
        match result {
            Ok(report) => {
                self.report = Some(report);
                self.notice = None;
            }
            Err(e) => {
                self.notice = Some(Notice::Error(format!("Report generation failed: {}", e)));
            }
        }
    }
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

/// In-memory session map shared by all handlers
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        // Sessions hold plain data, so a poisoned map is still usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the session, without creating it
    pub fn snapshot(&self, id: Uuid) -> Session {
        self.lock()
            .get(&id)
            .map(|entry| entry.session.clone())
            .unwrap_or_default()
    }

    /// Copy of the session for rendering; the pending notice is consumed.
    /// Unknown ids get a default session and nothing is stored.
    pub fn checkout(&self, id: Uuid) -> Session {
        let mut sessions = self.lock();
        match sessions.get_mut(&id) {
            Some(entry) => {
                entry.last_seen = Instant::now();
                let snapshot = entry.session.clone();
                entry.session.notice = None;
                snapshot
            }
            None => Session::default(),
        }
    }

    /// Mutate the session, creating it if needed
    pub fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let now = Instant::now();
        let mut sessions = self.lock();

        if !sessions.contains_key(&id) {
            let before = sessions.len();
            sessions.retain(|_, entry| now.duration_since(entry.last_seen) < SESSION_IDLE_LIMIT);
            if sessions.len() < before {
                debug!(evicted = before - sessions.len(), "Dropped idle sessions");
            }
        }

        let entry = sessions.entry(id).or_insert_with(|| Entry {
            session: Session::default(),
            last_seen: now,
        });
        entry.last_seen = now;
        f(&mut entry.session)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Cookie Handling
// =============================================================================

/// Session id taken from the request cookie, or freshly minted
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    pub id: Uuid,
    pub is_new: bool,
}

impl SessionCookie {
    fn from_headers(headers: &HeaderMap) -> Self {
        match find_session_id(headers) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: Uuid::new_v4(),
                is_new: true,
            },
        }
    }

    /// Attach Set-Cookie when the id was just minted
    pub fn wrap(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.is_new {
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

fn find_session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
