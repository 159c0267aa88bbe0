use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Target server
    pub server_url: String,
    pub username: String,
    pub password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_url: std::env::var("DHIS2_URL")
                .unwrap_or_else(|_| "https://play.dhis2.org/2.32".to_string())
                .trim_end_matches('/')
                .to_string(),
            username: std::env::var("DHIS2_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: std::env::var("DHIS2_PASSWORD").context("DHIS2_PASSWORD not set")?,
        })
    }
}
