use crate::api::MarketDataSource;
use crate::config::ApiConfig;
use crate::error::{Result, Error};
use crate::models::market::MarketSnapshot;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("coin-tweet-bot/", env!("CARGO_PKG_VERSION"));

/// Ticker client for the public CoinMarketCap v2 endpoint.
#[derive(Debug, Clone)]
pub struct CoinMarketCapClient {
    client: Client,
    url: String,
}

impl CoinMarketCapClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, url })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(config.market_data_url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MarketDataSource for CoinMarketCapClient {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        info!("Making request to: {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ApiError(format!(
                "CoinMarketCap API error: {}",
                status
            )));
        }

        let body = response.text().await?;
        let snapshot: MarketSnapshot = serde_json::from_str(&body)?;

        if let Some(message) = snapshot.metadata.error.as_ref() {
            return Err(Error::ApiError(format!("CoinMarketCap reported: {}", message)));
        }

        debug!(
            "Received {} entries (upstream tracks {:?})",
            snapshot.len(),
            snapshot.metadata.num_cryptocurrencies
        );
        Ok(snapshot)
    }
}
