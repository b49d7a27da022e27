//! Application configuration, loaded once at startup.

use anyhow::{Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub port: u16,
    /// JWT signing secret. Required: a deployment without one refuses to
    /// start instead of falling back to a baked-in default.
    pub jwt_secret: String,
    /// Optional bootstrap pair for seeding a first admin account
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./eroz.db".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let jwt_secret = std::env::var("JWT_SECRET")
            .context("JWT_SECRET must be set; refusing to start without a signing secret")?;

        let admin_email = std::env::var("ADMIN_EMAIL").ok();
        let admin_password = std::env::var("ADMIN_PASSWORD").ok();

        Ok(Self {
            database_path,
            port,
            jwt_secret,
            admin_email,
            admin_password,
        })
    }
}
