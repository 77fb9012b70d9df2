//! Configuration for the ledger dashboard
//!
//! Precedence, lowest first: built-in constants, ledger.toml, environment.
//! CLI flags are applied on top by the binary.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants;

// =============================================================================
// File-based Configuration (ledger.toml)
// =============================================================================

/// Configuration loaded from ledger.toml. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerSection,
    pub data: DataSection,
    pub report: ReportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_upload_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DataSection {
    pub sample_path: Option<PathBuf>,
    pub currency_symbol: Option<String>,
}

/// Chat-completion settings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    /// Environment variable to read the API key from
    pub api_key_env: Option<String>,
    /// Used only when the environment variable is unset
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load an explicitly requested file, or ledger.toml if present, or defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(constants::CONFIG_FILENAME);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Bundled ledger shown in sample mode
    pub sample_path: PathBuf,
    pub currency_symbol: String,
    pub report: ReportSettings,
}

/// Everything the report client needs
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub api_key: ApiKeySource,
    /// None leaves the HTTP client's default in place
    pub timeout: Option<Duration>,
}

/// Where the bearer credential comes from. Resolved on every request so a
/// key exported after start-up is picked up without a restart.
#[derive(Clone, Default)]
pub struct ApiKeySource {
    pub env_var: Option<String>,
    pub fallback: Option<String>,
}

impl ApiKeySource {
    /// A fixed key that ignores the environment
    pub fn fixed(key: impl Into<String>) -> Self {
        Self {
            env_var: None,
            fallback: Some(key.into()),
        }
    }

    pub fn resolve(&self) -> Option<String> {
        self.env_var
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.fallback.clone())
    }

    /// Name to show the user when no key is found
    pub fn describe(&self) -> String {
        self.env_var
            .clone()
            .unwrap_or_else(|| "report.api_key in ledger.toml".to_string())
    }
}

// Keys never show up in Debug output (and therefore never in logs)
impl std::fmt::Debug for ApiKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeySource")
            .field("env_var", &self.env_var)
            .field("fallback", &self.fallback.as_ref().map(|_| "****"))
            .finish()
    }
}

impl Config {
    /// Resolve file settings against the process environment
    pub fn from_file(file: FileConfig) -> Result<Self> {
        Self::resolve(file, std::env::var(constants::PORT_ENV).ok())
    }

    /// Resolve file settings, with `port_env` standing in for $PORT
    pub fn resolve(file: FileConfig, port_env: Option<String>) -> Result<Self> {
        let env_port = port_env
            .map(|p| {
                p.trim()
                    .parse::<u16>()
                    .with_context(|| format!("Invalid {} value: {}", constants::PORT_ENV, p))
            })
            .transpose()?;

        let FileConfig { server, data, report } = file;

        Ok(Self {
            host: server.host.unwrap_or_else(|| constants::DEFAULT_HOST.to_string()),
            port: env_port.or(server.port).unwrap_or(constants::DEFAULT_PORT),
            max_upload_bytes: server
                .max_upload_bytes
                .unwrap_or(constants::DEFAULT_MAX_UPLOAD_BYTES),
            sample_path: data
                .sample_path
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SAMPLE_PATH)),
            currency_symbol: data
                .currency_symbol
                .unwrap_or_else(|| constants::DEFAULT_CURRENCY_SYMBOL.to_string()),
            report: ReportSettings {
                endpoint: report
                    .endpoint
                    .unwrap_or_else(|| constants::DEFAULT_CHAT_ENDPOINT.to_string()),
                model: report.model.unwrap_or_else(|| constants::DEFAULT_MODEL.to_string()),
                temperature: report.temperature.unwrap_or(constants::DEFAULT_TEMPERATURE),
                api_key: ApiKeySource {
                    env_var: Some(
                        report
                            .api_key_env
                            .unwrap_or_else(|| constants::DEFAULT_API_KEY_ENV.to_string()),
                    ),
                    fallback: report.api_key.filter(|k| !k.trim().is_empty()),
                },
                timeout: report.timeout_secs.map(Duration::from_secs),
            },
        })
    }
}
