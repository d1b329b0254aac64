//! TCGdex REST client.
//!
//! One client serves both collaborator roles:
//! - `GET {base}/{lang}/sets` for the set directory
//! - `GET {base}/{lang}/cards?name=..&set=..` for card search
//!
//! The API answers a search with a JSON array, or `null` in some languages
//! when nothing matches. Both decode to a (possibly empty) `Vec`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use crate::Language;
use crate::catalog::{CardBrief, CardFinder, CardQuery, CatalogError, SetDirectory, SetResume};

pub const DEFAULT_TCGDEX_BASE_URL: &str = "https://api.tcgdex.net/v2";

/// TCGdex API client (shared by the set directory and the card finder).
pub struct TcgdexProvider {
    base_url: String,
    language: Language,
    client: reqwest::Client,
}

impl TcgdexProvider {
    /// Builds a client with a per-request timeout and a `User-Agent` header.
    pub fn new(
        base_url: Option<String>,
        language: Language,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_TCGDEX_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        Ok(Self {
            base_url,
            language,
            client,
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.language.code(), resource)
    }

    /// GETs `url` and decodes a JSON array that may also arrive as `null`.
    async fn get_list<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<Vec<T>, CatalogError> {
        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        debug!("TCGdex {} response status: {}", what, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("TCGdex {} error: {} - {}", what, status, body);
            return Err(CatalogError::Api {
                status,
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let list: Option<Vec<T>> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Ok(list.unwrap_or_default())
    }
}

#[async_trait]
impl SetDirectory for TcgdexProvider {
    fn name(&self) -> &str {
        "tcgdex"
    }

    async fn list_sets(&self) -> Result<Vec<SetResume>, CatalogError> {
        let url = self.endpoint("sets");
        info!("Fetching set list: {}", url);
        let sets: Vec<SetResume> = self.get_list(self.client.get(&url), "sets").await?;
        info!("Set list loaded: {} sets", sets.len());
        Ok(sets)
    }
}

#[async_trait]
impl CardFinder for TcgdexProvider {
    fn name(&self) -> &str {
        "tcgdex"
    }

    async fn find_cards(&self, query: CardQuery<'_>) -> Result<Vec<CardBrief>, CatalogError> {
        let url = self.endpoint("cards");
        info!(
            "Searching cards: name={:?}, set={:?} ({})",
            query.name, query.set_id, url
        );
        let request = self
            .client
            .get(&url)
            .query(&[("name", query.name), ("set", query.set_id)]);
        let cards: Vec<CardBrief> = self.get_list(request, "cards").await?;
        info!("Card search returned {} cards", cards.len());
        Ok(cards)
    }
}
