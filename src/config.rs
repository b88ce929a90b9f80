use anyhow::{Context, Result};

/// Connection parameters for the articles database, one env var each.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub listen_port: u16,
}

impl DbConfig {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("PGHOST").context("PGHOST must be set")?;
        let user = std::env::var("PGUSER").context("PGUSER must be set")?;
        let password = std::env::var("PGPASSWORD").context("PGPASSWORD must be set")?;
        let database = std::env::var("PGDATABASE").context("PGDATABASE must be set")?;
        let port = std::env::var("PGPORT")
            .context("PGPORT must be set")?
            .parse()
            .context("PGPORT must be a valid port number")?;
        Ok(DbConfig {
            host,
            user,
            password,
            database,
            port,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let db = DbConfig::from_env()?;
        let listen_port = std::env::var("PORT")
            .context("PORT must be set")?
            .parse()
            .context("PORT must be a valid port number")?;
        Ok(Config { db, listen_port })
    }
}
