pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod security;
pub mod summary;
pub mod twitter;
pub mod validation;
pub mod web;

pub use error::{Error, Result};

// Declare tests module only when testing
#[cfg(test)]
pub mod tests;
