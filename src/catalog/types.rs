use std::fmt;

use serde::{Deserialize, Serialize};

/// Path segment appended to a card's base `image` to get the high resolution PNG.
/// This is the image host's URL scheme, not something we choose.
pub const HIGH_RES_IMAGE_SUFFIX: &str = "high.png";

/// Card totals the set listing reports. Not used by the session, kept for display.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CardCount {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub official: u32,
}

/// One entry of the set listing (an expansion).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SetResume {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, rename = "cardCount", skip_serializing_if = "Option::is_none")]
    pub card_count: Option<CardCount>,
}

impl SetResume {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
            symbol: None,
            card_count: None,
        }
    }
}

/// A card's number within its set. The API sends either `"025"` or `25`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum LocalId {
    Number(u64),
    Text(String),
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalId::Number(n) => write!(f, "{n}"),
            LocalId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for LocalId {
    fn from(value: &str) -> Self {
        LocalId::Text(value.to_string())
    }
}

impl From<u64> for LocalId {
    fn from(value: u64) -> Self {
        LocalId::Number(value)
    }
}

/// Minimal identifying and display data for a single card.
///
/// Search responses carry more fields than this; serde drops the rest.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CardBrief {
    pub id: String,
    #[serde(rename = "localId")]
    pub local_id: LocalId,
    pub name: String,
    /// Base URL of the card art, without quality or extension.
    /// Some promo cards have no art yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CardBrief {
    pub fn new(
        id: impl Into<String>,
        local_id: impl Into<LocalId>,
        name: impl Into<String>,
        image: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            local_id: local_id.into(),
            name: name.into(),
            image,
        }
    }

    /// Returns `{image}/high.png`, or None if the card has no art.
    pub fn high_res_image_url(&self) -> Option<String> {
        self.image
            .as_deref()
            .map(|base| format!("{base}/{HIGH_RES_IMAGE_SUFFIX}"))
    }
}
