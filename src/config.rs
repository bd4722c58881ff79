use crate::error::{BadEnvVarSnafu, OpenDatabaseSnafu, ParseEnvVarSnafu, RosterResult};
use snafu::ResultExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{env::VarError, str::FromStr, sync::Arc};

const DEFAULT_DATABASE_URL: &str = "sqlite://students.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SERVER_IP: &str = "127.0.0.1:5000";
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    db_config: Arc<DbConfig>,
    server_config: Arc<ServerConfig>,
}

impl RuntimeConfiguration {
    pub fn new() -> RosterResult<Self> {
        Ok(Self {
            db_config: Arc::new(DbConfig::new()?),
            server_config: Arc::new(ServerConfig::new()?),
        })
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            db_config: Arc::new(DbConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            }),
            server_config: Arc::new(ServerConfig {
                server_ip: DEFAULT_SERVER_IP.to_string(),
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            }),
        }
    }

    pub fn db_config(&self) -> Arc<DbConfig> {
        self.db_config.clone()
    }

    pub fn server_config(&self) -> Arc<ServerConfig> {
        self.server_config.clone()
    }
}

/// Reads `name`, treating an unset variable as `None`.
fn optional_env_var(name: &'static str) -> RosterResult<Option<String>> {
    match dotenvy::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
        Err(e) => Err(e).context(BadEnvVarSnafu { name }),
    }
}

fn parse_or<T: FromStr<Err = std::num::ParseIntError>>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> RosterResult<T> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .context(ParseEnvVarSnafu { name, value }),
        None => Ok(default),
    }
}

#[derive(Debug)]
pub struct DbConfig {
    url: String,
    max_connections: u32,
}

impl DbConfig {
    pub fn new() -> RosterResult<Self> {
        Self::from_vars(
            optional_env_var("ROSTER_DATABASE_URL")?,
            optional_env_var("ROSTER_MAX_CONNECTIONS")?,
        )
    }

    fn from_vars(url: Option<String>, max_connections: Option<String>) -> RosterResult<Self> {
        Ok(Self {
            url: url.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_or(
                "ROSTER_MAX_CONNECTIONS",
                max_connections,
                DEFAULT_MAX_CONNECTIONS,
            )?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn pool_options(&self) -> SqlitePoolOptions {
        SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            // an in-memory database only lives as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
    }

    pub fn connect_options(&self) -> RosterResult<SqliteConnectOptions> {
        Ok(SqliteConnectOptions::from_str(&self.url)
            .context(OpenDatabaseSnafu)?
            .create_if_missing(true))
    }
}

#[derive(Debug)]
pub struct ServerConfig {
    server_ip: String,
    max_body_bytes: usize,
}

impl ServerConfig {
    pub fn new() -> RosterResult<Self> {
        Self::from_vars(
            optional_env_var("ROSTER_SERVER_IP")?,
            optional_env_var("ROSTER_MAX_BODY_BYTES")?,
        )
    }

    fn from_vars(server_ip: Option<String>, max_body_bytes: Option<String>) -> RosterResult<Self> {
        Ok(Self {
            server_ip: server_ip.unwrap_or_else(|| DEFAULT_SERVER_IP.to_string()),
            max_body_bytes: parse_or(
                "ROSTER_MAX_BODY_BYTES",
                max_body_bytes,
                DEFAULT_MAX_BODY_BYTES,
            )?,
        })
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }

    pub const fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RosterError;

    #[test]
    fn unset_vars_fall_back_to_defaults() {
        let db = DbConfig::from_vars(None, None).unwrap();
        assert_eq!(db.url(), "sqlite://students.db");
        assert_eq!(db.max_connections, 5);

        let server = ServerConfig::from_vars(None, None).unwrap();
        assert_eq!(server.server_ip(), "127.0.0.1:5000");
        assert_eq!(server.max_body_bytes(), 65536);
    }

    #[test]
    fn set_vars_override_defaults() {
        let db = DbConfig::from_vars(Some("sqlite://other.db".into()), Some(" 2 ".into())).unwrap();
        assert_eq!(db.url(), "sqlite://other.db");
        assert_eq!(db.max_connections, 2);

        let server =
            ServerConfig::from_vars(Some("0.0.0.0:8080".into()), Some("1024".into())).unwrap();
        assert_eq!(server.server_ip(), "0.0.0.0:8080");
        assert_eq!(server.max_body_bytes(), 1024);
    }

    #[test]
    fn garbage_numbers_are_rejected() {
        let err = DbConfig::from_vars(None, Some("lots".into())).unwrap_err();
        assert!(matches!(
            err,
            RosterError::ParseEnvVar {
                name: "ROSTER_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn database_urls_become_connect_options() {
        let db = DbConfig::from_vars(Some("sqlite::memory:".into()), None).unwrap();
        assert!(db.connect_options().is_ok());
    }
}
