use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    File,
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            other => bail!("STORE_BACKEND must be 'file' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
    pub store_backend: StoreBackend,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            bind_addr: var("BIND_ADDR", "127.0.0.1")
                .parse()
                .context("BIND_ADDR must be a valid IP address")?,
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            data_dir: PathBuf::from(var("DATA_DIR", "./data")),
            store_backend: StoreBackend::parse(&var("STORE_BACKEND", "file"))?,
            rust_log: var("RUST_LOG", "info"),
        })
    }
}
