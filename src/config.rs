use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_api_per_min: u32,
    pub rate_import_per_min: u32,

    /// largest CSV body accepted by the import endpoint
    pub import_max_bytes: usize,

    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: text("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: text("API_PREFIX", "/api/v1"),
            rate_api_per_min: parse(&lookup, "RATE_API_PER_MIN", "600")?,
            rate_import_per_min: parse(&lookup, "RATE_IMPORT_PER_MIN", "30")?,
            import_max_bytes: parse(&lookup, "IMPORT_MAX_BYTES", "2097152")?,
            log_dir: text("LOG_DIR", "logs"),
            log_level: parse(&lookup, "LOG_LEVEL", "debug")?,
        })
    }
}

fn parse<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .with_context(|| format!("{} has an invalid value: {:?}", key, raw))
}
