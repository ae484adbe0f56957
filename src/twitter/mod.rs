use crate::config::TwitterConfig;
use crate::error::{Result, Error};
use crate::models::PostResult;
use crate::security::{OAuthCredentials, OAuthSigner};
use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Publishes a status update on behalf of the configured account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusPoster: Send + Sync {
    async fn post_status(&self, text: &str) -> Result<PostResult>;
}

#[derive(Debug, Deserialize)]
struct TweetResponse {
    id: Option<u64>,
    id_str: Option<String>,
    text: Option<String>,
    full_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwitterErrorBody {
    errors: Vec<TwitterErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct TwitterErrorDetail {
    code: Option<i64>,
    message: String,
}

#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    url: String,
    signer: OAuthSigner,
}

impl TwitterClient {
    pub fn new(url: String, credentials: OAuthCredentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            signer: OAuthSigner::new(credentials),
        })
    }

    pub fn from_config(config: &TwitterConfig) -> Result<Self> {
        Self::new(
            config.status_update_url.clone(),
            OAuthCredentials::from(config),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl StatusPoster for TwitterClient {
    async fn post_status(&self, text: &str) -> Result<PostResult> {
        let params = [("status", text)];
        let authorization = self.signer.authorization_header("POST", &self.url, &params)?;

        debug!("Posting status update to {}", self.url);
        let response = self.client
            .post(&self.url)
            .header(AUTHORIZATION, authorization)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::PostRejected(format!("{}: {}", status, upstream_message(&body))));
        }

        let tweet: TweetResponse = serde_json::from_str(&body)?;
        let id = tweet.id_str
            .or_else(|| tweet.id.map(|id| id.to_string()))
            .ok_or_else(|| Error::ApiInvalidFormat("Status response has no id".to_string()))?;
        let text = tweet.full_text
            .or(tweet.text)
            .unwrap_or_else(|| text.to_string());

        Ok(PostResult { id, text })
    }
}

fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<TwitterErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors
            .iter()
            .map(|e| match e.code {
                Some(code) => format!("{} (code {})", e.message, code),
                None => e.message.clone(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}
