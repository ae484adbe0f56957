use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use log::warn;
use crate::error::{Error, Result};
use crate::validation::validate_credential;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MARKET_DATA_URL: &str =
    "https://api.coinmarketcap.com/v2/ticker/?sort=percent_change_24h&structure=array";
pub const DEFAULT_STATUS_UPDATE_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 5 * 60;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub twitter: TwitterConfig,
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    pub market_data_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TwitterConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
    pub status_update_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SchedulerConfig {
    pub interval_secs: u64,
}

impl SchedulerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Config {
    /// Builds the configuration from the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| Error::ConfigError(format!("Invalid PORT '{}': {}", raw, e)))?,
            None => {
                warn!("PORT is not set, falling back to {}", DEFAULT_PORT);
                DEFAULT_PORT
            }
        };

        let timeout_secs = parse_u64(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let interval_secs = parse_u64(&lookup, "CYCLE_INTERVAL_SECS", DEFAULT_CYCLE_INTERVAL_SECS)?;
        if interval_secs == 0 {
            return Err(Error::ConfigError("CYCLE_INTERVAL_SECS must be positive".to_string()));
        }

        Ok(Config {
            server: ServerConfig { port },
            api: ApiConfig {
                market_data_url: lookup("MARKET_DATA_URL")
                    .unwrap_or_else(|| DEFAULT_MARKET_DATA_URL.to_string()),
                timeout_secs,
            },
            twitter: TwitterConfig {
                consumer_key: required(&lookup, "TWITTER_CONSUMER_KEY")?,
                consumer_secret: required(&lookup, "TWITTER_CONSUMER_SECRET")?,
                access_token: required(&lookup, "TWITTER_ACCESS_TOKEN")?,
                access_secret: required(&lookup, "TWITTER_ACCESS_SECRET")?,
                status_update_url: lookup("STATUS_UPDATE_URL")
                    .unwrap_or_else(|| DEFAULT_STATUS_UPDATE_URL.to_string()),
                timeout_secs,
            },
            scheduler: SchedulerConfig { interval_secs },
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key)
        .ok_or_else(|| Error::ConfigError(format!("{} is not set", key)))?;
    validate_credential(key, &value)?;
    Ok(value)
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::ConfigError(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
