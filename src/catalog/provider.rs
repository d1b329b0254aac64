use std::fmt;

use async_trait::async_trait;

use super::types::{CardBrief, SetResume};

/// Errors that can occur while talking to the card database.
#[derive(Debug)]
pub enum CatalogError {
    /// Client misconfigured (bad base URL, TLS setup). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Config(msg) => write!(f, "config error: {msg}"),
            CatalogError::Network(msg) => write!(f, "network error: {msg}"),
            CatalogError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            CatalogError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Everything a card finder needs for one search.
#[derive(Debug, Clone, Copy)]
pub struct CardQuery<'a> {
    pub name: &'a str,
    pub set_id: &'a str,
}

/// Lists all known sets.
#[async_trait]
pub trait SetDirectory: Send + Sync {
    fn name(&self) -> &str;

    async fn list_sets(&self) -> Result<Vec<SetResume>, CatalogError>;
}

/// Finds cards by name within one set.
#[async_trait]
pub trait CardFinder: Send + Sync {
    fn name(&self) -> &str;

    /// An empty vector means "no matches", never an error.
    async fn find_cards(&self, query: CardQuery<'_>) -> Result<Vec<CardBrief>, CatalogError>;
}
