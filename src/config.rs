use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub spoonacular_api_key: Option<String>,
    pub spoonacular_base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let spoonacular_api_key = lookup("SPOONACULAR_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let spoonacular_base_url = lookup("SPOONACULAR_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| AppError::Config(format!("Invalid upstream timeout: {}", raw)))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        // Load server configuration with defaults
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "5000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            spoonacular_api_key,
            spoonacular_base_url,
            upstream_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
