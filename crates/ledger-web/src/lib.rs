//! Ledger Lens web dashboard
//!
//! Server-rendered pages built with leptos, served by axum. Pick the sample
//! ledger or upload a CSV, review the totals and category chart, and ask the
//! chat-completion service for a financial health report.

mod components;
mod format;
mod markdown;
mod pages;
mod routes;
pub mod session;
mod state;

pub use routes::router;
pub use state::AppState;
