use crate::domain::WeekPolicy;
use movievote_errors::AppError;
use std::net::SocketAddr;

const DEFAULT_SITE_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
        }
    }

    /// SQLite in memory. Pinned to one connection, since every pooled
    /// connection would otherwise open its own empty database.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseSettings,
    pub google: GoogleSettings,
    pub site_addr: SocketAddr,
    pub week_policy: WeekPolicy,
    pub cookie_secure: bool,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        let mut database = DatabaseSettings::new(required("DATABASE_URL")?);
        if let Some(raw) = lookup("DATABASE_MAX_CONNECTIONS") {
            database.max_connections = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))
            })?;
        }

        let google = GoogleSettings {
            client_id: required("GOOGLE_CLIENT_ID")?,
            client_secret: required("GOOGLE_CLIENT_SECRET")?,
            redirect_uri: required("GOOGLE_REDIRECT_URI")?,
        };

        let site_addr = lookup("SITE_ADDR")
            .unwrap_or_else(|| DEFAULT_SITE_ADDR.to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("SITE_ADDR is invalid: {e}")))?;

        let week_policy = match lookup("WEEK_WINDOW_POLICY") {
            Some(raw) => raw.parse()?,
            None => WeekPolicy::default(),
        };

        let cookie_secure = lookup("COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database,
            google,
            site_addr,
            week_policy,
            cookie_secure,
        })
    }
}
