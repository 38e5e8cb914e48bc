//! Store and password-hashing configuration.
//!
//! The store location is a single database URL. The default points at the
//! local MySQL server with the `root` account, an empty credential and the
//! `Project` schema.

use crate::{Result, error::YatvError};
use std::time::Duration;
use url::Url;

/// Database URL used when none is given on the command line
pub const DEFAULT_DATABASE_URL: &str = "mysql://root@localhost:3306/Project";

/// Default MySQL port
const MYSQL_DEFAULT_PORT: u16 = 3306;

/// Store engines the CLI can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// MySQL server (production schema)
    MySql,
    /// SQLite file or in-memory database
    Sqlite,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MySql => write!(f, "MySQL"),
            Self::Sqlite => write!(f, "SQLite"),
        }
    }
}

/// Configuration for the store connection.
///
/// Passwords are never kept here; they stay inside the URL handed to the
/// driver.
///
/// # Example
/// ```rust
/// use yatv_core::config::StoreConfig;
///
/// let config = StoreConfig::from_url("mysql://root@localhost:3306/Project")?;
/// assert_eq!(config.database.as_deref(), Some("Project"));
/// assert_eq!(config.max_connections, 1);
/// # Ok::<(), yatv_core::YatvError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store engine selected by the URL scheme
    pub kind: StoreKind,
    /// Database host address
    pub host: String,
    /// Optional port number
    pub port: Option<u16>,
    /// Schema (MySQL) or file name (SQLite)
    pub database: Option<String>,
    /// Optional username (password handled separately)
    pub username: Option<String>,
    /// Connection timeout duration
    pub connect_timeout: Duration,
    /// Maximum number of connections; one session uses one connection
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::MySql,
            host: "localhost".to_string(),
            port: Some(MYSQL_DEFAULT_PORT),
            database: Some("Project".to_string()),
            username: Some("root".to_string()),
            connect_timeout: Duration::from_secs(30),
            max_connections: 1,
        }
    }
}

impl std::fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}{}{})",
            self.kind,
            self.host,
            self.port.map_or_else(String::new, |p| format!(":{p}")),
            self.database
                .as_ref()
                .map_or_else(String::new, |db| format!("/{db}"))
        )
    }
}

impl StoreConfig {
    /// Parses a database URL into a validated configuration.
    ///
    /// # Errors
    /// Returns error if the scheme is unsupported or a component is invalid
    pub fn from_url(database_url: &str) -> Result<Self> {
        match detect_store_kind(database_url)? {
            StoreKind::MySql => parse_mysql_url(database_url),
            StoreKind::Sqlite => Ok(Self {
                kind: StoreKind::Sqlite,
                port: None,
                username: None,
                database: Some(sqlite_database_name(database_url)),
                ..Self::default()
            }),
        }
    }

    /// Validates configuration parameters.
    ///
    /// # Errors
    /// Returns error if configuration values are invalid
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(YatvError::configuration("host cannot be empty"));
        }

        if self.port == Some(0) {
            return Err(YatvError::configuration("port must be greater than 0"));
        }

        if self.max_connections == 0 {
            return Err(YatvError::configuration(
                "max_connections must be greater than 0",
            ));
        }

        if self.connect_timeout.is_zero() {
            return Err(YatvError::configuration(
                "connect_timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// Detects the store engine from the URL scheme.
///
/// # Errors
/// Returns error for schemes other than `mysql` and `sqlite`
pub fn detect_store_kind(database_url: &str) -> Result<StoreKind> {
    if database_url.starts_with("mysql://") {
        Ok(StoreKind::MySql)
    } else if database_url.starts_with("sqlite:") {
        Ok(StoreKind::Sqlite)
    } else {
        Err(YatvError::configuration(
            "Unsupported database URL: expected mysql:// or sqlite:",
        ))
    }
}

fn parse_mysql_url(database_url: &str) -> Result<StoreConfig> {
    let url = Url::parse(database_url).map_err(|e| {
        YatvError::configuration(format!("Invalid MySQL connection string format: {e}"))
    })?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| YatvError::configuration("Connection string must specify a host"))?;

    let mut config = StoreConfig {
        host: host.to_string(),
        port: Some(url.port().unwrap_or(MYSQL_DEFAULT_PORT)),
        database: None,
        username: None,
        ..StoreConfig::default()
    };

    let database = url.path().trim_start_matches('/');
    if !database.is_empty() {
        if database.len() > 64 {
            return Err(YatvError::configuration(
                "Database name too long: maximum 64 characters",
            ));
        }
        config.database = Some(database.to_string());
    }

    if !url.username().is_empty() {
        config.username = Some(url.username().to_string());
    }

    for (key, value) in url.query_pairs() {
        if key == "connect_timeout"
            && let Ok(secs) = value.parse::<u64>()
            && (1..=300).contains(&secs)
        {
            config.connect_timeout = Duration::from_secs(secs);
        }
    }

    config.validate()?;
    Ok(config)
}

fn sqlite_database_name(database_url: &str) -> String {
    if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        return ":memory:".to_string();
    }

    let path = database_url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("main")
        .to_string()
}

/// Work factor used for password hashes at registration
pub const DEFAULT_HASH_WORK_FACTOR: u32 = 9;

/// Parameters for the salted password hash stored at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    /// Argon2 time cost (iterations)
    pub work_factor: u32,
    /// Argon2 memory cost in KiB
    pub memory_kib: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            work_factor: DEFAULT_HASH_WORK_FACTOR,
            memory_kib: argon2::Params::DEFAULT_M_COST,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url_matches_default_config() {
        let parsed = StoreConfig::from_url(DEFAULT_DATABASE_URL).unwrap();
        let default = StoreConfig::default();

        assert_eq!(parsed.kind, default.kind);
        assert_eq!(parsed.host, default.host);
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.database, default.database);
        assert_eq!(parsed.username, default.username);
    }

    #[test]
    fn test_mysql_url_without_port_uses_default() {
        let config = StoreConfig::from_url("mysql://root@db.internal/Project").unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, Some(3306));
    }

    #[test]
    fn test_mysql_connect_timeout_parameter() {
        let config =
            StoreConfig::from_url("mysql://root@localhost/Project?connect_timeout=5").unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(5));

        let config =
            StoreConfig::from_url("mysql://root@localhost/Project?connect_timeout=0").unwrap();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_mysql_database_name_too_long() {
        let url = format!("mysql://root@localhost/{}", "x".repeat(65));
        assert!(StoreConfig::from_url(&url).is_err());
    }

    #[test]
    fn test_sqlite_urls() {
        let config = StoreConfig::from_url("sqlite::memory:").unwrap();
        assert_eq!(config.kind, StoreKind::Sqlite);
        assert_eq!(config.database.as_deref(), Some(":memory:"));

        let config = StoreConfig::from_url("sqlite:///var/data/yatv.db").unwrap();
        assert_eq!(config.database.as_deref(), Some("yatv.db"));
    }

    #[test]
    fn test_unsupported_scheme() {
        assert!(detect_store_kind("postgres://localhost/db").is_err());
        assert!(StoreConfig::from_url("not a url").is_err());
    }

    #[test]
    fn test_validation() {
        assert!(StoreConfig::default().validate().is_ok());

        let config = StoreConfig {
            host: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StoreConfig {
            port: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StoreConfig {
            max_connections: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_display_has_no_username() {
        let config = StoreConfig::from_url("mysql://operator@localhost:3307/Project").unwrap();
        let display = config.to_string();

        assert_eq!(display, "MySQL(localhost:3307/Project)");
        assert!(!display.contains("operator"));
    }

    #[test]
    fn test_default_hashing_config() {
        let config = HashingConfig::default();
        assert_eq!(config.work_factor, 9);
        assert_eq!(config.memory_kib, argon2::Params::DEFAULT_M_COST);
    }
}
