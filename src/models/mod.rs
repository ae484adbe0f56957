use serde::{Deserialize, Serialize};

pub mod market;

pub use market::{CoinEntry, MarketSnapshot, Quotes, SnapshotMetadata, UsdQuote};

/// A status update accepted by the posting API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResult {
    pub id: String,
    pub text: String,
}
