use crate::api::{CoinMarketCapClient, MarketDataSource};
use crate::config::Config;
use crate::error::Result;
use crate::models::market::MarketSnapshot;
use crate::models::PostResult;
use crate::summary::format_summary;
use crate::twitter::{StatusPoster, TwitterClient};
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// What a single fetch-then-post cycle ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Posted(PostResult),
    FetchFailed,
    InvalidSnapshot,
    PostFailed,
    Aborted,
}

/// Scheduler: every interval, fetches a snapshot and posts its summary.
pub struct Bot {
    source: Arc<dyn MarketDataSource>,
    poster: Arc<dyn StatusPoster>,
    interval: Duration,
    running: AtomicBool,
}

impl Bot {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        poster: Arc<dyn StatusPoster>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            poster,
            interval,
            running: AtomicBool::new(false),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let source = CoinMarketCapClient::from_config(&config.api)?;
        let poster = TwitterClient::from_config(&config.twitter)?;
        Ok(Self::new(Arc::new(source), Arc::new(poster), config.scheduler.interval()))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawns the scheduler loop unless one is already running. Returns whether this call started it.
    pub fn start(self: &Arc<Self>) -> bool {
        if self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Scheduler loop already running, ignoring start request");
            return false;
        }

        let bot = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = RunningGuard(Arc::clone(&bot));
            bot.run().await
        });
        info!("Scheduler loop started, interval {:?}", self.interval);
        true
    }

    /// Runs cycles forever. A cycle is awaited before sleeping, so cycles never overlap.
    pub async fn run(&self) {
        loop {
            match self.run_cycle().await {
                CycleOutcome::Posted(post) => info!("Cycle complete, posted status {}", post.id),
                outcome => warn!("Cycle skipped: {:?}", outcome),
            }
            debug!("Sleeping for {:?}", self.interval);
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Launches the fetch and the post as two tasks joined by a single-slot handoff.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let (tx, rx) = oneshot::channel::<MarketSnapshot>();

        let source = Arc::clone(&self.source);
        let fetcher = tokio::spawn(async move {
            match source.fetch_snapshot().await {
                Ok(snapshot) => {
                    // Receiver only goes away if the post task died.
                    if tx.send(snapshot).is_err() {
                        warn!("Post task gone before snapshot was handed off");
                    }
                }
                Err(e) => error!("Could not fetch market data: {}", e),
            }
        });

        let poster = Arc::clone(&self.poster);
        let publisher = tokio::spawn(async move {
            match rx.await {
                Ok(snapshot) => publish(poster.as_ref(), &snapshot).await,
                Err(_) => CycleOutcome::FetchFailed,
            }
        });

        let (fetched, published) = tokio::join!(fetcher, publisher);
        if let Err(e) = fetched {
            error!("Fetch task aborted: {}", e);
        }
        match published {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Post task aborted: {}", e);
                CycleOutcome::Aborted
            }
        }
    }
}

/// Clears the running flag when the loop task ends, including by panic or abort.
struct RunningGuard(Arc<Bot>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        if self.0.running.swap(false, Ordering::SeqCst) {
            warn!("Scheduler loop exited, a new trigger will restart it");
        }
    }
}

async fn publish(poster: &dyn StatusPoster, snapshot: &MarketSnapshot) -> CycleOutcome {
    let text = match format_summary(snapshot) {
        Ok(text) => text,
        Err(e) => {
            warn!("Snapshot rejected: {}", e);
            return CycleOutcome::InvalidSnapshot;
        }
    };

    match poster.post_status(&text).await {
        Ok(post) => {
            info!("Tweeted: {}", post.text);
            CycleOutcome::Posted(post)
        }
        Err(e) => {
            error!("Could not tweet: {}", e);
            CycleOutcome::PostFailed
        }
    }
}
