//! Centralized constants for the ledger dashboard
//!
//! Built-in defaults. Deployment-specific values are loaded from ledger.toml
//! and the environment (see `config`).

// =============================================================================
// Chat Completion API
// =============================================================================

/// DeepSeek chat-completion endpoint
pub const DEFAULT_CHAT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";

/// Model identifier sent with every report request
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Sampling temperature for report generation
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Environment variable holding the bearer credential
pub const DEFAULT_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

// =============================================================================
// Server
// =============================================================================

/// Bind address for the dashboard
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Dashboard port when neither PORT nor config sets one
pub const DEFAULT_PORT: u16 = 8501;

/// Environment variable hosting platforms use to assign the port
pub const PORT_ENV: &str = "PORT";

/// Largest accepted CSV upload (2 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

// =============================================================================
// Data
// =============================================================================

/// Bundled sample ledger, relative to the working directory
pub const DEFAULT_SAMPLE_PATH: &str = "data/sample_transactions.csv";

/// Currency symbol used when displaying amounts
pub const DEFAULT_CURRENCY_SYMBOL: &str = "¥";

/// Date format used when rendering records into the prompt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date formats accepted in CSV input
pub const ACCEPTED_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

// =============================================================================
// File Names
// =============================================================================

/// Config file looked up in the working directory when --config is not given
pub const CONFIG_FILENAME: &str = "ledger.toml";
