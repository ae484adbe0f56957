use anyhow::Result;
use log::info;
use std::sync::Arc;

use coin_tweet_bot::bot::Bot;
use coin_tweet_bot::config::Config;
use coin_tweet_bot::logging;
use coin_tweet_bot::web::WebServer;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    info!("Starting coin tweet bot...");

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            return Err(anyhow::anyhow!("Configuration loading failed: {}", e));
        }
    };
    info!(
        "Configuration loaded: port {}, market data {}, interval {}s",
        config.server.port, config.api.market_data_url, config.scheduler.interval_secs
    );

    // The scheduler is started by the first hit on `/`, never more than once.
    let bot = Arc::new(Bot::from_config(&config)?);
    let server = WebServer::new(bot);
    server.start(([0, 0, 0, 0], config.server.port)).await;

    Ok(())
}
