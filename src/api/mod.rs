use crate::error::Result;
use crate::models::market::MarketSnapshot;
use async_trait::async_trait;

pub mod coinmarketcap;

pub use coinmarketcap::CoinMarketCapClient;

/// Source of ranked market data, queried once per scheduler cycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot>;
}
