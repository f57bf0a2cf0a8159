use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime mode. Controls log format and how much detail a 500 response carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Server configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Shared bearer secret every protected request must present
    #[serde(default)]
    pub api_token: Option<String>,

    /// Runtime mode
    #[serde(default)]
    pub environment: Environment,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Absolute prefix for `Location` headers, e.g. `http://localhost:8000`
    #[serde(default)]
    pub public_url: Option<String>,

    /// Start with the three default bookmarks
    #[serde(default = "default_true")]
    pub seed_bookmarks: bool,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_body_size_kb", &self.max_body_size_kb)
            .field("enable_cors", &self.enable_cors)
            .field("log_level", &self.log_level)
            .field("public_url", &self.public_url)
            .field("seed_bookmarks", &self.seed_bookmarks)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            api_token: None,
            environment: Environment::default(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            public_url: None,
            seed_bookmarks: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `bookmarks.*` file and
    /// `BOOKMARKS_*` environment variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env is the normal case outside local development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("bookmarks").required(false))
            .add_source(
                config::Environment::with_prefix("BOOKMARKS")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the service cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_token().is_none() {
            anyhow::bail!("BOOKMARKS_API_TOKEN must be set to a non-empty value");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Configured bearer secret, ignoring a blank value.
    pub fn api_token(&self) -> Option<&str> {
        self.api_token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    64
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
