//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{CardBrief, CardFinder, CardQuery, CatalogError, SetDirectory, SetResume};
use crate::core::state::SelectionSession;

/// In-memory catalog serving fixed sets and cards.
pub struct StubCatalog {
    sets: Vec<SetResume>,
    cards: Vec<CardBrief>,
    fail: bool,
    delay: Option<Duration>,
    last_query: Mutex<Option<(String, String)>>,
}

impl StubCatalog {
    pub fn new(sets: Vec<SetResume>, cards: Vec<CardBrief>) -> Self {
        Self {
            sets,
            cards,
            fail: false,
            delay: None,
            last_query: Mutex::new(None),
        }
    }

    /// A catalog whose every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new(), Vec::new())
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The (name, set_id) of the most recent card search.
    pub fn last_query(&self) -> Option<(String, String)> {
        self.last_query.lock().unwrap().clone()
    }

    async fn respond<T: Clone>(&self, items: &[T]) -> Result<Vec<T>, CatalogError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(CatalogError::Network("stub catalog unreachable".into()));
        }
        Ok(items.to_vec())
    }
}

#[async_trait]
impl SetDirectory for StubCatalog {
    fn name(&self) -> &str {
        "stub"
    }

    async fn list_sets(&self) -> Result<Vec<SetResume>, CatalogError> {
        self.respond(&self.sets).await
    }
}

#[async_trait]
impl CardFinder for StubCatalog {
    fn name(&self) -> &str {
        "stub"
    }

    async fn find_cards(&self, query: CardQuery<'_>) -> Result<Vec<CardBrief>, CatalogError> {
        *self.last_query.lock().unwrap() = Some((query.name.to_string(), query.set_id.to_string()));
        self.respond(&self.cards).await
    }
}

pub fn sample_sets() -> Vec<SetResume> {
    vec![
        SetResume::new("base1", "Base Set"),
        SetResume::new("base2", "Jungle"),
        SetResume::new("base3", "Fossil"),
        SetResume::new("base4", "Base Set 2"),
        SetResume::new("sv03.5", "151"),
    ]
}

/// A card with the given id and a predictable image base URL.
pub fn card(id: &str) -> CardBrief {
    CardBrief::new(
        id,
        "1",
        format!("Card {id}"),
        Some(format!("https://assets.tcgdex.net/en/test/{id}")),
    )
}

/// Creates a test session backed by an empty StubCatalog.
pub fn test_session() -> SelectionSession {
    let catalog = Arc::new(StubCatalog::new(Vec::new(), Vec::new()));
    SelectionSession::new(catalog.clone(), catalog)
}
