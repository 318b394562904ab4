//! Connection configuration.
//!
//! Settings form a flat mapping with the keys `db_host`, `db_port`, `db_user`,
//! `db_pass` and `db_name`. They can come from a map, a TOML file holding a
//! `[connection_info]` table, or `MINIDB_`-prefixed environment variables.
//!
//! ```toml
//! [connection_info]
//! db_host = "localhost"
//! db_user = "app"
//! db_pass = "secret"
//! db_name = "app_db"
//! ```

use crate::error::{DbError, DbResult};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Prefix for environment variables read by [`ConnectionConfig::from_env`].
pub const ENV_PREFIX: &str = "MINIDB_";

const DEFAULT_PORT: u16 = 5432;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Where and how to connect.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionConfig {
    #[serde(rename = "db_host")]
    pub host: String,
    #[serde(rename = "db_port", default = "default_port")]
    pub port: u16,
    #[serde(rename = "db_user")]
    pub user: String,
    #[serde(rename = "db_pass", default)]
    pub password: String,
    #[serde(rename = "db_name")]
    pub dbname: String,
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("dbname", &self.dbname)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    connection_info: ConnectionConfig,
}

impl ConnectionConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
        dbname: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            dbname: dbname.into(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Build from a flat key/value mapping.
    ///
    /// `db_host`, `db_user` and `db_name` are required; `db_pass` defaults to
    /// empty and `db_port` to 5432. Unknown keys are ignored.
    pub fn from_map<I, K, V>(entries: I) -> DbResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut host = None;
        let mut port = None;
        let mut user = None;
        let mut password = None;
        let mut dbname = None;

        for (key, value) in entries {
            let value = value.into();
            match key.as_ref() {
                "db_host" => host = Some(value),
                "db_port" => {
                    let parsed = value.trim().parse::<u16>().map_err(|e| {
                        DbError::config(format!("invalid db_port '{}': {}", value, e))
                    })?;
                    port = Some(parsed);
                }
                "db_user" => user = Some(value),
                "db_pass" => password = Some(value),
                "db_name" => dbname = Some(value),
                _ => {}
            }
        }

        let required = |v: Option<String>, key: &str| {
            v.filter(|s| !s.is_empty())
                .ok_or_else(|| DbError::config(format!("missing required setting '{}'", key)))
        };

        Ok(Self {
            host: required(host, "db_host")?,
            port: port.unwrap_or(DEFAULT_PORT),
            user: required(user, "db_user")?,
            password: password.unwrap_or_default(),
            dbname: required(dbname, "db_name")?,
        })
    }

    /// Parse a TOML document with a `[connection_info]` table.
    pub fn from_toml_str(raw: &str) -> DbResult<Self> {
        let file: ConfigFile = toml::from_str(raw)
            .map_err(|e| DbError::config(format!("failed to parse config: {e}")))?;
        Ok(file.connection_info)
    }

    /// Load a TOML config file with a `[connection_info]` table.
    pub fn from_toml_file(path: impl AsRef<Path>) -> DbResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DbError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            DbError::Config(msg) => DbError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })
    }

    /// Load from `MINIDB_DB_HOST`, `MINIDB_DB_PORT`, `MINIDB_DB_USER`,
    /// `MINIDB_DB_PASS` and `MINIDB_DB_NAME`, reading a `.env` file first if present.
    pub fn from_env() -> DbResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_map(std::env::vars().filter_map(|(k, v)| {
            k.strip_prefix(ENV_PREFIX)
                .map(|rest| (rest.to_ascii_lowercase(), v))
        }))
    }

    /// Convert into a `tokio_postgres` connection config.
    pub fn to_pg_config(&self) -> tokio_postgres::Config {
        let mut cfg = tokio_postgres::Config::new();
        cfg.host(self.host.as_str())
            .port(self.port)
            .user(self.user.as_str())
            .dbname(self.dbname.as_str());
        if !self.password.is_empty() {
            cfg.password(self.password.as_str());
        }
        cfg
    }
}
