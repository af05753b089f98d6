/*
 * Responsibility
 * - Load settings from the environment (.env is honoured via dotenvy)
 * - Validate them once at start-up (missing/invalid values fail the boot)
 * - Hand explicit values to the components; nothing re-reads the env later
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

const DEV_JWT_SECRET: &str = "dev-secret-change-in-production";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub api_version: String,

    pub jwt_secret: String,
    pub access_token_leeway_seconds: u64,

    pub cors_allowed_origins: Vec<String>,

    // None => in-process memory cache
    pub redis_url: Option<String>,

    pub rate_limit_window: Duration,
    pub rate_limit_max_requests: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a map lookup instead
    /// of mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3001,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let api_version = lookup("API_VERSION")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "v1".to_string());

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if app_env.is_production() => return Err(ConfigError::Missing("JWT_SECRET")),
            None => {
                tracing::warn!("JWT_SECRET is not set; using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let access_token_leeway_seconds = lookup("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .or_else(|| lookup("FRONTEND_URL"))
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let redis_url = lookup("REDIS_URL").filter(|s| !s.trim().is_empty());

        let rate_limit_window_ms = match lookup("RATE_LIMIT_WINDOW_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid("RATE_LIMIT_WINDOW_MS"))?,
            None => 900_000, // 15 min
        };

        let rate_limit_max_requests = match lookup("RATE_LIMIT_MAX_REQUESTS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("RATE_LIMIT_MAX_REQUESTS"))?,
            None => 100,
        };

        Ok(Self {
            addr,
            app_env,
            api_version,
            jwt_secret,
            access_token_leeway_seconds,
            cors_allowed_origins,
            redis_url,
            rate_limit_window: Duration::from_millis(rate_limit_window_ms),
            rate_limit_max_requests,
        })
    }
}
