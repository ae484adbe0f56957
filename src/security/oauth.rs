//! OAuth 1.0a request signing (HMAC-SHA1), as required by the Twitter v1.1 write endpoints.

use crate::config::TwitterConfig;
use crate::error::{Result, Error};
use base64::{engine::general_purpose, Engine as _};
use chrono::Utc;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};

const SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";
const NONCE_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl From<&TwitterConfig> for OAuthCredentials {
    fn from(config: &TwitterConfig) -> Self {
        Self {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            token: config.access_token.clone(),
            token_secret: config.access_secret.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OAuthSigner {
    credentials: OAuthCredentials,
    rng: SystemRandom,
}

impl OAuthSigner {
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self {
            credentials,
            rng: SystemRandom::new(),
        }
    }

    /// Builds the `Authorization` header value for a request with a fresh nonce and timestamp.
    ///
    /// `params` are the form body parameters; query parameters are taken from `url`.
    pub fn authorization_header(&self, method: &str, url: &str, params: &[(&str, &str)]) -> Result<String> {
        let nonce = self.generate_nonce()?;
        let timestamp = Utc::now().timestamp().to_string();
        self.authorization_header_with(method, url, params, &nonce, &timestamp)
    }

    pub fn authorization_header_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: &str,
    ) -> Result<String> {
        let mut oauth_params = self.oauth_params(nonce, timestamp);
        let signature = self.signature(method, url, params, &oauth_params)?;
        oauth_params.push(("oauth_signature".to_string(), signature));
        oauth_params.sort();

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("OAuth {}", fields))
    }

    fn oauth_params(&self, nonce: &str, timestamp: &str) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".to_string(), self.credentials.consumer_key.clone()),
            ("oauth_nonce".to_string(), nonce.to_string()),
            ("oauth_signature_method".to_string(), SIGNATURE_METHOD.to_string()),
            ("oauth_timestamp".to_string(), timestamp.to_string()),
            ("oauth_token".to_string(), self.credentials.token.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ]
    }

    fn signature(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        oauth_params: &[(String, String)],
    ) -> Result<String> {
        let base = signature_base(method, url, params, oauth_params)?;
        let signing_key = format!(
            "{}&{}",
            percent_encode(&self.credentials.consumer_secret),
            percent_encode(&self.credentials.token_secret)
        );
        let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, signing_key.as_bytes());
        let tag = hmac::sign(&key, base.as_bytes());
        Ok(general_purpose::STANDARD.encode(tag.as_ref()))
    }

    fn generate_nonce(&self) -> Result<String> {
        let mut bytes = [0u8; NONCE_BYTES];
        self.rng.fill(&mut bytes)?;
        Ok(general_purpose::STANDARD
            .encode(bytes)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect())
    }
}

fn signature_base(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(String, String)],
) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::SecurityError(format!("Cannot sign invalid URL '{}': {}", url, e)))?;
    let base_url = format!("{}{}", parsed.origin().ascii_serialization(), parsed.path());

    let mut encoded: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| (percent_encode(&k), percent_encode(&v)))
        .chain(params.iter().map(|(k, v)| (percent_encode(k), percent_encode(v))))
        .chain(oauth_params.iter().map(|(k, v)| (percent_encode(k), percent_encode(v))))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    Ok(format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        percent_encode(&base_url),
        percent_encode(&parameter_string)
    ))
}

/// Everything outside the RFC 3986 unreserved set.
const OAUTH_RESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// RFC 3986 percent-encoding as OAuth 1.0a requires.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_RESERVED).to_string()
}
