//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "library_token";

const DEFAULT_SESSION_TTL_HOURS: u64 = 7 * 24;

/// Which backend serves user lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStoreKind {
    Firestore,
    /// In-process map, optionally seeded from `USERS_SEED_PATH`
    Memory,
}

impl FromStr for UserStoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(UserStoreKind::Firestore),
            "memory" => Ok(UserStoreKind::Memory),
            _ => Err(ConfigError::Invalid("USER_STORE", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    pub user_store: UserStoreKind,
    /// JSON array of users loaded into the memory store at startup
    pub users_seed_path: Option<PathBuf>,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Lifetime of newly issued session tokens
    pub session_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let user_store = match env::var("USER_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => UserStoreKind::Firestore,
        };

        let gcp_project_id = match (env::var("GCP_PROJECT_ID"), user_store) {
            (Ok(id), _) => id,
            (Err(_), UserStoreKind::Memory) => "local-dev".to_string(),
            (Err(_), UserStoreKind::Firestore) => {
                return Err(ConfigError::Missing("GCP_PROJECT_ID"))
            }
        };

        let session_ttl_hours = match env::var("SESSION_TTL_HOURS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("SESSION_TTL_HOURS", raw))?,
            Err(_) => DEFAULT_SESSION_TTL_HOURS,
        };
        let session_ttl_secs = session_ttl_hours.checked_mul(60 * 60).ok_or_else(|| {
            ConfigError::Invalid("SESSION_TTL_HOURS", session_ttl_hours.to_string())
        })?;

        let jwt_signing_key = env::var("JWT_SIGNING_KEY")
            .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
            .trim()
            .to_string()
            .into_bytes();
        if jwt_signing_key.is_empty() {
            return Err(ConfigError::Invalid("JWT_SIGNING_KEY", String::new()));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            user_store,
            users_seed_path: env::var("USERS_SEED_PATH").ok().map(PathBuf::from),
            jwt_signing_key,
            session_ttl: Duration::from_secs(session_ttl_secs),
        })
    }

    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            user_store: UserStoreKind::Memory,
            users_seed_path: None,
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_HOURS * 60 * 60),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
