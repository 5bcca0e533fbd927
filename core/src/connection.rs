//! PostgreSQL connection bootstrap

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tracing::info;

use crate::error::{CoreError, Result};

fn default_max_connections() -> u32 {
    5
}

/// Flat database settings consumed by [`connect`]
#[derive(Clone, Deserialize)]
pub struct DbConfig {
    pub dbname: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    /// One of `disable`, `allow`, `prefer`, `require`, `verify-ca`, `verify-full`
    pub sslmode: String,
    /// Never read from config files, only from the environment
    #[serde(skip)]
    pub password: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("dbname", &self.dbname)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("sslmode", &self.sslmode)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DbConfig {
    /// Build sqlx connect options from the flat settings
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        let ssl_mode = PgSslMode::from_str(&self.sslmode)
            .map_err(|_| CoreError::Config(format!("invalid sslmode '{}'", self.sslmode)))?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.dbname)
            .ssl_mode(ssl_mode);

        if let Some(ref password) = self.password {
            options = options.password(password);
        }

        Ok(options)
    }
}

/// Open a pool and verify the server answers before returning it
pub async fn connect(config: &DbConfig) -> Result<PgPool> {
    let options = config.connect_options()?;

    info!(
        "Connecting to PostgreSQL at {}:{}/{}",
        config.host, config.port, config.dbname
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;

    info!("Database connection verified");
    Ok(pool)
}
