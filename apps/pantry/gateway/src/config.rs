use core_config::{
    AppInfo, ConfigError, Environment, FromEnv, app_info, env_or_default, server::ServerConfig,
};

/// Port the gateway listens on unless `PORT` says otherwise
pub const DEFAULT_PORT: u16 = 3000;

/// Default location of the Items Service API prefix
pub const DEFAULT_UPSTREAM: &str = "http://localhost:5001/api";

/// Where requests are forwarded to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Base URL including the `/api` prefix, without a trailing slash
    pub base_url: String,
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl FromEnv for UpstreamConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = env_or_default("PANTRY_API_BASE_URL", DEFAULT_UPSTREAM);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ParseError {
                key: "PANTRY_API_BASE_URL".to_string(),
                details: format!("expected an http(s) URL, got '{}'", base_url),
            });
        }
        Ok(Self::new(base_url))
    }
}

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env_with_default_port(DEFAULT_PORT)?,
            upstream: UpstreamConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
