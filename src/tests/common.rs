#![cfg(test)]
use super::super::config::{Config, ServerConfig, ApiConfig, TwitterConfig, SchedulerConfig};
use super::super::models::market::{CoinEntry, MarketSnapshot, Quotes, SnapshotMetadata, UsdQuote};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use warp::http::StatusCode;
use warp::Filter;

// Helper to create a default test config pointing at the given upstreams
pub fn create_test_config(market_data_url: &str, status_update_url: &str) -> Config {
    Config {
        server: ServerConfig { port: 0 },
        api: ApiConfig {
            market_data_url: market_data_url.to_string(),
            timeout_secs: 5,
        },
        twitter: TwitterConfig {
            consumer_key: "test-consumer-key".to_string(),
            consumer_secret: "test-consumer-secret".to_string(),
            access_token: "test-access-token".to_string(),
            access_secret: "test-access-secret".to_string(),
            status_update_url: status_update_url.to_string(),
            timeout_secs: 5,
        },
        scheduler: SchedulerConfig { interval_secs: 1 },
    }
}

pub fn create_test_coin(name: &str, symbol: &str, percent_change_24h: Option<f64>) -> CoinEntry {
    CoinEntry {
        id: 1,
        name: name.to_string(),
        symbol: symbol.to_string(),
        website_slug: Some(name.to_lowercase()),
        rank: 1,
        circulating_supply: Some(1_000_000.0),
        total_supply: Some(1_000_000.0),
        max_supply: None,
        quotes: Quotes {
            usd: UsdQuote {
                price: Some(1.0),
                volume_24h: Some(1000.0),
                market_cap: Some(1_000_000.0),
                percent_change_1h: Some(0.0),
                percent_change_24h,
                percent_change_7d: Some(0.0),
            },
        },
        last_updated: Some(1_529_000_000),
    }
}

pub fn snapshot_from(data: Vec<CoinEntry>) -> MarketSnapshot {
    let count = data.len() as u64;
    MarketSnapshot {
        data,
        metadata: SnapshotMetadata {
            timestamp: 1_529_000_100,
            num_cryptocurrencies: Some(count),
            error: None,
        },
    }
}

// Snapshot of `n` coins named Coin0.., symbols C0.., with distinct 24h changes
pub fn create_test_snapshot(n: usize) -> MarketSnapshot {
    snapshot_from(
        (0..n)
            .map(|i| {
                let mut coin = create_test_coin(
                    &format!("Coin{}", i),
                    &format!("C{}", i),
                    Some(100.0 - i as f64),
                );
                coin.id = i as u64 + 1;
                coin.rank = i as u32 + 1;
                coin
            })
            .collect(),
    )
}

// Local stand-in for the ticker endpoint. Records the raw query string of every hit.
pub async fn spawn_upstream(status: StatusCode, body: String) -> (String, Arc<Mutex<Vec<String>>>) {
    let hits = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&hits);
    let route = warp::get()
        .and(warp::query::raw())
        .map(move |query: String| {
            recorded.lock().unwrap().push(query);
            warp::reply::with_status(body.clone(), status)
        });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (
        format!("http://{}/v2/ticker/?sort=percent_change_24h&structure=array", addr),
        hits,
    )
}

// Upstream that accepts any request but answers only after `delay`.
pub async fn spawn_stalled_upstream(delay: Duration) -> String {
    let route = warp::any().and_then(move || async move {
        tokio::time::sleep(delay).await;
        Ok::<_, warp::Rejection>("too late")
    });

    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    format!("http://{}/stalled", addr)
}
