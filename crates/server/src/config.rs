use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Environment variable honoured for the allowed origin, overriding `ALMA_ALLOWED_ORIGIN`.
pub const LEGACY_ALLOWED_ORIGIN_ENV: &str = "ALLOWED_ORIGIN";
pub const DEFAULT_SRU_HOST: &str = "bibsys.alma.exlibrisgroup.com";
pub const DEFAULT_SRU_PATH: &str = "view/sru/47BIBSYS_NETWORK";

/// Process-wide configuration.
///
/// Built once at startup and shared read-only; nothing mutates it after
/// [`AppConfig::load`] returns. Tests construct their own instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Alma SRU host name
    #[serde(default = "default_sru_host")]
    pub sru_host: String,

    /// Path of the SRU service on the host, naming the target network
    #[serde(default = "default_sru_path")]
    pub sru_path: String,

    /// Value for `Access-Control-Allow-Origin`; empty means no header
    #[serde(default)]
    pub allowed_origin: Option<String>,

    /// Timeout for the outbound SRU request in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Inbound request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            sru_host: default_sru_host(),
            sru_path: default_sru_path(),
            allowed_origin: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, an optional `alma` config file and `ALMA_*`
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }

        Self::load_from(None, std::env::var(LEGACY_ALLOWED_ORIGIN_ENV).ok())
    }

    /// Same as [`AppConfig::load`] but reads `ALMA_*` variables from `env` when
    /// given instead of the process environment.
    pub fn load_from(
        env: Option<HashMap<String, String>>,
        legacy_allowed_origin: Option<String>,
    ) -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("alma").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("ALMA")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .set_override_option("allowed_origin", legacy_allowed_origin)?;

        let mut config: AppConfig = builder.build()?.try_deserialize()?;

        if config.sru_host.trim().is_empty() {
            anyhow::bail!("sru_host must not be empty");
        }
        if config.fetch_timeout_secs == 0 {
            tracing::warn!("fetch_timeout_secs is 0, using default");
            config.fetch_timeout_secs = default_fetch_timeout_secs();
        }
        // The request timeout must leave room for a full SRU fetch.
        if config.request_timeout_secs <= config.fetch_timeout_secs {
            anyhow::bail!(
                "request_timeout_secs ({}) must exceed fetch_timeout_secs ({})",
                config.request_timeout_secs,
                config.fetch_timeout_secs
            );
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Allowed origin for CORS, `None` when unset or empty.
    pub fn cors_origin(&self) -> Option<&str> {
        self.allowed_origin.as_deref().filter(|origin| !origin.is_empty())
    }

    /// Base URL of the SRU service, e.g. `https://bibsys.alma.exlibrisgroup.com/view/sru/47BIBSYS_NETWORK`.
    pub fn sru_base_url(&self) -> String {
        format!(
            "https://{}/{}",
            self.sru_host.trim_end_matches('/'),
            self.sru_path.trim_start_matches('/')
        )
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_sru_host() -> String {
    DEFAULT_SRU_HOST.to_string()
}

fn default_sru_path() -> String {
    DEFAULT_SRU_PATH.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
