use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
    pub api: ApiConfig,
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub address: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub json_format: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_path: String,
    pub additional_base_paths: Vec<String>,
    pub enable_swagger: bool,
}

/// Where the opaque REST collaborators live.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UpstreamConfig {
    /// Campaign, client and feed endpoints.
    pub api_base_url: String,
    /// Programmatic reporting endpoints (job stats, campaign stats).
    pub reporting_base_url: String,
    /// Sent verbatim as the `Authorization` header on reporting calls.
    pub reporting_api_key: Option<String>,
    pub timeout_seconds: u64,
}

/// Freshness windows for the response cache, one per request namespace.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    pub campaigns_ttl_seconds: u64,
    pub job_stats_ttl_seconds: u64,
    pub feed_fields_ttl_seconds: u64,
    pub feed_nodes_ttl_seconds: u64,
    pub clients_ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
    pub max_entries: usize,
}

impl CacheConfig {
    pub fn campaigns_ttl(&self) -> Duration {
        Duration::from_secs(self.campaigns_ttl_seconds)
    }

    pub fn job_stats_ttl(&self) -> Duration {
        Duration::from_secs(self.job_stats_ttl_seconds)
    }

    pub fn feed_fields_ttl(&self) -> Duration {
        Duration::from_secs(self.feed_fields_ttl_seconds)
    }

    pub fn feed_nodes_ttl(&self) -> Duration {
        Duration::from_secs(self.feed_nodes_ttl_seconds)
    }

    pub fn clients_ttl(&self) -> Duration {
        Duration::from_secs(self.clients_ttl_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            address: "127.0.0.1".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:5173".to_string()],
            allow_credentials: false,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_API_BASE_PATH.to_string(),
            additional_base_paths: Vec::new(),
            enable_swagger: true,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3001/api".to_string(),
            reporting_base_url: "http://localhost:3002/api/v3".to_string(),
            reporting_api_key: None,
            timeout_seconds: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            campaigns_ttl_seconds: 60,
            job_stats_ttl_seconds: 300,
            feed_fields_ttl_seconds: 600,
            feed_nodes_ttl_seconds: 300,
            clients_ttl_seconds: 60,
            cleanup_interval_seconds: 60,
            max_entries: 1024,
        }
    }
}

impl Config {
    /// Load configuration from multiple sources in priority order:
    /// 1. Built-in defaults
    /// 2. Dashboard.toml (if present)
    /// 3. Environment variables prefixed with DASHBOARD_, nested with `__`
    ///    (e.g. DASHBOARD_UPSTREAM__API_BASE_URL)
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("Dashboard.toml").nested())
            .merge(Env::prefixed("DASHBOARD_").split("__"))
            .extract()
    }
}
