use crate::bot::Bot;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use log::info;
use warp::path::FullPath;
use warp::{Filter, Reply};

/// Body returned by the trigger endpoint.
pub const ACKNOWLEDGEMENT: &str = "Starting bot...";

pub struct WebServer {
    bot: Arc<Bot>,
}

impl WebServer {
    pub fn new(bot: Arc<Bot>) -> Self {
        Self { bot }
    }

    /// Any path, any method: acknowledges immediately and makes sure the scheduler is running.
    pub fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
        warp::any()
            .and(with_bot(self.bot.clone()))
            .and(warp::method())
            .and(warp::path::full())
            .map(|bot: Arc<Bot>, method: warp::http::Method, path: FullPath| {
                info!("{} {} received", method, path.as_str());
                bot.start();
                ACKNOWLEDGEMENT
            })
    }

    pub async fn start(&self, addr: impl Into<SocketAddr>) {
        let addr = addr.into();
        info!("Starting web server on {}", addr);
        warp::serve(self.routes().with(warp::log("coin_tweet_bot::web")))
            .run(addr)
            .await;
    }
}

fn with_bot(bot: Arc<Bot>) -> impl Filter<Extract = (Arc<Bot>,), Error = Infallible> + Clone {
    warp::any().map(move || bot.clone())
}
