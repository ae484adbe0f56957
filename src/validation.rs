use crate::error::{Result, Error};
use crate::models::market::MarketSnapshot;

/// Number of entries the summary is built from.
pub const SUMMARY_SIZE: usize = 5;

pub fn validate_credential(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigError(format!("{} cannot be empty", name)));
    }
    if value.chars().any(|c| c.is_control()) {
        return Err(Error::ConfigError(format!("{} contains control characters", name)));
    }
    Ok(())
}

pub fn validate_snapshot(snapshot: &MarketSnapshot) -> Result<()> {
    if snapshot.data.len() < SUMMARY_SIZE {
        return Err(Error::ValidationError(format!(
            "Snapshot has {} entries, at least {} required",
            snapshot.data.len(),
            SUMMARY_SIZE
        )));
    }
    Ok(())
}
