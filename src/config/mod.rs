use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application, loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on the database connection pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_port() -> u16 {
    8000
}

fn default_max_connections() -> u32 {
    10
}

impl Config {
    /// Load configuration from environment variables, reading a .env file
    /// first if one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    dotenv().ok();

    let config = Config::load()?;

    Ok(config)
}
