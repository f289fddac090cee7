use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub geolocation: GeolocationConfig,
    pub tracking: TrackingConfig,
    pub migration: MigrationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Where the primary store lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    Postgres(String),
    Sqlite(String),
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
}

// Keep the signing secret out of debug output
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct GeolocationConfig {
    /// Lookup base URL, the client IP is appended as a path segment
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Sources idle for longer than this are no longer counted as active
    pub active_window: Duration,
    /// Interval between `/visitor-count` pushes
    pub push_interval: Duration,
    /// Number of recent visitors listed on the stats page
    pub stats_limit: i64,
}

#[derive(Debug, Clone)]
pub struct MigrationConfig {
    pub legacy_db_path: PathBuf,
    pub pause: Duration,
    pub visitor_page_size: i64,
    pub contact_page_size: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            session: SessionConfig::from_env(),
            geolocation: GeolocationConfig::from_env()?,
            tracking: TrackingConfig::from_env()?,
            migration: MigrationConfig::from_env()?,
        })
    }
}

/// Read a variable and parse it, falling back to `default` when unset
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseTarget {
    const DEFAULT_SQLITE_PATH: &'static str = "instance/site.db";

    /// Pick the backend from a connection string, or fall back to the embedded file store
    pub fn resolve(url: Option<String>, fallback_path: Option<String>) -> Self {
        match url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            Some(url) if url.starts_with("sqlite:") => DatabaseTarget::Sqlite(url),
            Some(url) => DatabaseTarget::Postgres(url),
            None => {
                let path = fallback_path.unwrap_or_else(|| Self::DEFAULT_SQLITE_PATH.to_string());
                DatabaseTarget::Sqlite(format!("sqlite://{}?mode=rwc", path))
            }
        }
    }

    /// Connection string with credentials stripped, for logging
    pub fn redacted(&self) -> String {
        match self {
            DatabaseTarget::Postgres(url) => format!(
                "postgres://***@{}",
                url.split('@').next_back().unwrap_or("***")
            ),
            DatabaseTarget::Sqlite(url) => url.clone(),
        }
    }
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let target = DatabaseTarget::resolve(
            env::var("DATABASE_URL").ok(),
            env::var("SQLITE_FALLBACK_PATH").ok(),
        );

        Ok(Self {
            target,
            max_connections: parse_var("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_var(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_var("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl SessionConfig {
    const DEV_SECRET: &'static str = "dev-secret-key";

    pub fn from_env() -> Self {
        Self::resolve(env::var("SESSION_SECRET").ok())
    }

    /// Use `secret` when non-empty, otherwise the development secret
    pub fn resolve(secret: Option<String>) -> Self {
        let secret = secret.filter(|s| !s.is_empty()).unwrap_or_else(|| {
            tracing::warn!("SESSION_SECRET not set, using development secret");
            Self::DEV_SECRET.to_string()
        });

        Self { secret }
    }
}

impl GeolocationConfig {
    const DEFAULT_BASE_URL: &'static str = "http://ip-api.com/json";
    const DEFAULT_TIMEOUT_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("GEOLOCATION_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeout_secs = parse_var("GEOLOCATION_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl TrackingConfig {
    const DEFAULT_ACTIVE_WINDOW_SECS: u64 = 30;
    const DEFAULT_PUSH_INTERVAL_SECS: u64 = 2;
    const DEFAULT_STATS_LIMIT: i64 = 100;

    pub fn from_env() -> Result<Self, String> {
        let window = parse_var(
            "ACTIVE_VISITOR_WINDOW_SECS",
            Self::DEFAULT_ACTIVE_WINDOW_SECS,
        )?;
        let interval = parse_var(
            "VISITOR_COUNT_INTERVAL_SECS",
            Self::DEFAULT_PUSH_INTERVAL_SECS,
        )?;
        if interval == 0 {
            return Err("VISITOR_COUNT_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            active_window: Duration::from_secs(window),
            push_interval: Duration::from_secs(interval),
            stats_limit: parse_var("VISITOR_STATS_LIMIT", Self::DEFAULT_STATS_LIMIT)?,
        })
    }
}

impl MigrationConfig {
    const DEFAULT_LEGACY_DB_PATH: &'static str = "instance/visitors.db";
    const DEFAULT_PAUSE_MS: u64 = 500;
    const DEFAULT_VISITOR_PAGE_SIZE: i64 = 10;
    const DEFAULT_CONTACT_PAGE_SIZE: i64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let legacy_db_path = env::var("LEGACY_DB_PATH")
            .unwrap_or_else(|_| Self::DEFAULT_LEGACY_DB_PATH.to_string())
            .into();
        let pause_ms = parse_var("MIGRATION_PAUSE_MS", Self::DEFAULT_PAUSE_MS)?;
        let visitor_page_size =
            parse_var("MIGRATION_VISITOR_PAGE_SIZE", Self::DEFAULT_VISITOR_PAGE_SIZE)?;
        let contact_page_size =
            parse_var("MIGRATION_CONTACT_PAGE_SIZE", Self::DEFAULT_CONTACT_PAGE_SIZE)?;

        if visitor_page_size < 1 || contact_page_size < 1 {
            return Err("Migration page sizes must be at least 1".to_string());
        }

        Ok(Self {
            legacy_db_path,
            pause: Duration::from_millis(pause_ms),
            visitor_page_size,
            contact_page_size,
        })
    }
}
