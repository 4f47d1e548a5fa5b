//! CallGuard configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How intercepted calls are routed to the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// Evaluate in-process, before delegating to the original entrypoint
    #[default]
    Inline,
    /// Route the call to a remote decision endpoint over HTTP
    Proxy,
}

impl GuardMode {
    /// Resolve the mode from the `CALLGUARD_MODE` environment variable.
    ///
    /// `proxy` (case-insensitive) selects proxy mode; anything else, including
    /// an unset variable, selects inline mode. The choice is made once at
    /// setup time and never reconsidered per call.
    pub fn from_env() -> Self {
        match std::env::var("CALLGUARD_MODE") {
            Ok(v) if v.eq_ignore_ascii_case("proxy") => Self::Proxy,
            _ => Self::Inline,
        }
    }
}

impl std::fmt::Display for GuardMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Proxy => write!(f, "proxy"),
        }
    }
}

/// Main CallGuard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuardConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Durable store locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Proxy-mode client configuration
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Alert delivery configuration
    #[serde(default)]
    pub alerts: AlertConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = allow any)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

/// Durable store locations.
///
/// Each store is an independently named file under `data_dir`. Environment
/// variables override individual file names so deployments can point stores
/// at existing paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base directory for all stores
    pub data_dir: PathBuf,

    /// Event log file name (JSON Lines, append-only)
    pub events_file: String,

    /// Policy document file name
    pub policy_file: String,

    /// Integration config file name
    pub integrations_file: String,

    /// Agent registry file name
    pub agents_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            events_file: "callguard_events.jsonl".to_string(),
            policy_file: "callguard_policy.json".to_string(),
            integrations_file: "callguard_integrations.json".to_string(),
            agents_file: "callguard_agents.json".to_string(),
        }
    }
}

impl StorageConfig {
    /// Apply `CALLGUARD_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("CALLGUARD_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Ok(f) = std::env::var("CALLGUARD_EVENT_LOG") {
            self.events_file = f;
        }
        if let Ok(f) = std::env::var("CALLGUARD_POLICY_FILE") {
            self.policy_file = f;
        }
        if let Ok(f) = std::env::var("CALLGUARD_INTEGRATION_FILE") {
            self.integrations_file = f;
        }
        if let Ok(f) = std::env::var("CALLGUARD_AGENTS_FILE") {
            self.agents_file = f;
        }
        self
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(&self.events_file)
    }

    pub fn policy_path(&self) -> PathBuf {
        self.data_dir.join(&self.policy_file)
    }

    pub fn integrations_path(&self) -> PathBuf {
        self.data_dir.join(&self.integrations_file)
    }

    pub fn agents_path(&self) -> PathBuf {
        self.data_dir.join(&self.agents_file)
    }
}

/// Proxy-mode client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Remote decision endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/proxy".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Alert delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Webhook request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Default base directory (~/.callguard/)
fn default_data_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".callguard")
}

impl GuardConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("invalid config {}: {}", path.display(), e)))
    }
}
