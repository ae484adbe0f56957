use async_trait::async_trait;
use coin_tweet_bot::api::MarketDataSource;
use coin_tweet_bot::bot::Bot;
use coin_tweet_bot::error::{Error, Result};
use coin_tweet_bot::models::market::MarketSnapshot;
use coin_tweet_bot::models::PostResult;
use coin_tweet_bot::twitter::StatusPoster;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Market data source whose fetch never completes
pub struct StalledSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl MarketDataSource for StalledSource {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

// Market data source that always fails
pub struct FailingSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl MarketDataSource for FailingSource {
    async fn fetch_snapshot(&self) -> Result<MarketSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::ApiError("CoinMarketCap API error: 500 Internal Server Error".to_string()))
    }
}

// Poster that records every status it is asked to publish
#[derive(Default)]
pub struct RecordingPoster {
    pub posts: Mutex<Vec<String>>,
}

#[async_trait]
impl StatusPoster for RecordingPoster {
    async fn post_status(&self, text: &str) -> Result<PostResult> {
        let mut posts = self.posts.lock().unwrap();
        posts.push(text.to_string());
        Ok(PostResult {
            id: posts.len().to_string(),
            text: text.to_string(),
        })
    }
}

pub fn create_test_bot(source: Arc<dyn MarketDataSource>, poster: Arc<dyn StatusPoster>) -> Arc<Bot> {
    Arc::new(Bot::new(source, poster, Duration::from_millis(20)))
}

pub async fn wait_until<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
