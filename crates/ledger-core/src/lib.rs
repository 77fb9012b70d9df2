//! Ledger Lens core
//!
//! Loads a personal transaction ledger from CSV, aggregates it into summary
//! metrics and per-category totals, and asks a chat-completion service for a
//! financial health report.

pub mod config;
pub mod constants;
pub mod error;
pub mod prompt;
pub mod report;
pub mod summary;
pub mod transactions;

pub use config::{ApiKeySource, Config, FileConfig, ReportSettings};
pub use error::{LoadError, ReportError};
pub use report::ReportClient;
pub use summary::{CategoryTotal, SummaryMetrics, expenses_by_category, summarize};
pub use transactions::{Ledger, Transaction};
