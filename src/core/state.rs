//! # Session State
//!
//! Core browsing state for the card browser. Domain logic only, no
//! terminal types. Presentation state (cursor rows, input buffers) lives in
//! the `tui` module.
//!
//! ```text
//! SelectionSession
//! ├── set_directory: Arc<dyn SetDirectory>   // lists sets
//! ├── card_finder: Arc<dyn CardFinder>       // searches cards
//! ├── sets: Vec<SetResume>                   // fetched once
//! ├── set_filter: String                     // typed filter / picked set name
//! ├── selected_set_id: Option<String>        // None = still choosing
//! ├── card_query: String                     // typed card name
//! ├── search_results: Vec<CardBrief>         // latest search, replaced wholesale
//! ├── my_selection: Vec<CardBrief>           // unique by id, insertion order
//! ├── is_searching: bool                     // latest search pending
//! ├── search_seq: u64                        // ticket of the latest search
//! ├── reviewing_selection: bool              // selection overlay open
//! └── error: Option<String>                  // last provider failure
//! ```
//!
//! Mutations go through `update(session, action)` in action.rs, which calls
//! the methods below.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::Language;
use crate::catalog::{CardBrief, CardFinder, SetDirectory, SetResume};
use crate::core::config::{DEFAULT_REQUEST_TIMEOUT_SECS, ResolvedConfig};

/// The two browsing phases. The selection overlay is a separate flag
/// and can be open in either phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No set picked yet: the user is filtering the set list.
    ChoosingSet,
    /// A set is picked: the user searches cards inside it.
    BrowsingCards,
}

/// A card search the session has committed to. `seq` identifies it so a
/// late answer to an older search can be recognized and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub name: String,
    pub set_id: String,
}

/// Sets whose name contains `term`, ignoring case, in their original order.
///
/// An empty term yields nothing: "not typed yet" is not the same as
/// "matches everything".
pub fn filter_sets<'a>(sets: &'a [SetResume], term: &str) -> Vec<&'a SetResume> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    sets.iter()
        .filter(|set| set.name.to_lowercase().contains(&needle))
        .collect()
}

pub struct SelectionSession {
    pub set_directory: Arc<dyn SetDirectory>,
    pub card_finder: Arc<dyn CardFinder>,
    pub language: Language,
    pub request_timeout: Duration,
    pub sets: Vec<SetResume>,
    /// True while the set listing request is in flight.
    pub sets_loading: bool,
    pub set_filter: String,
    pub selected_set_id: Option<String>,
    pub card_query: String,
    pub search_results: Vec<CardBrief>,
    pub my_selection: Vec<CardBrief>,
    pub is_searching: bool,
    pub search_seq: u64,
    pub reviewing_selection: bool,
    pub status_message: String,
    pub error: Option<String>,
}

impl SelectionSession {
    pub fn new(set_directory: Arc<dyn SetDirectory>, card_finder: Arc<dyn CardFinder>) -> Self {
        Self {
            set_directory,
            card_finder,
            language: Language::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            sets: Vec::new(),
            sets_loading: false,
            set_filter: String::new(),
            selected_set_id: None,
            card_query: String::new(),
            search_results: Vec::new(),
            my_selection: Vec::new(),
            is_searching: false,
            search_seq: 0,
            reviewing_selection: false,
            status_message: String::from("Type to find a set"),
            error: None,
        }
    }

    pub fn from_config(
        set_directory: Arc<dyn SetDirectory>,
        card_finder: Arc<dyn CardFinder>,
        config: &ResolvedConfig,
    ) -> Self {
        let mut session = Self::new(set_directory, card_finder);
        session.language = config.language;
        session.request_timeout = Duration::from_secs(config.request_timeout_secs);
        session
    }

    pub fn phase(&self) -> Phase {
        if self.selected_set_id.is_some() {
            Phase::BrowsingCards
        } else {
            Phase::ChoosingSet
        }
    }

    /// Returns true if the caller should fetch the set list now.
    ///
    /// No-op once sets are loaded or while a fetch is already running, so
    /// it can be called again after a failure to retry.
    pub fn initialize(&mut self) -> bool {
        if !self.sets.is_empty() || self.sets_loading {
            debug!(
                "Initialize skipped (sets={}, loading={})",
                self.sets.len(),
                self.sets_loading
            );
            return false;
        }
        self.sets_loading = true;
        self.error = None;
        self.status_message = String::from("Loading sets...");
        true
    }

    pub fn apply_sets(&mut self, sets: Vec<SetResume>) {
        info!("Session received {} sets", sets.len());
        self.sets_loading = false;
        self.sets = sets;
        self.status_message = format!("{} sets available", self.sets.len());
    }

    pub fn apply_sets_failure(&mut self, error: String) {
        warn!("Set listing failed: {}", error);
        self.sets_loading = false;
        self.sets.clear();
        self.status_message = String::from("Could not load sets (Ctrl+L to retry)");
        self.error = Some(error);
    }

    pub fn filter_sets(&self, term: &str) -> Vec<&SetResume> {
        filter_sets(&self.sets, term)
    }

    /// Sets matching the current filter text.
    pub fn filtered_sets(&self) -> Vec<&SetResume> {
        self.filter_sets(&self.set_filter)
    }

    pub fn set_set_filter(&mut self, term: impl Into<String>) {
        self.set_filter = term.into();
    }

    /// Moves to browsing the given set. The set is not checked against `sets`.
    pub fn pick_set(&mut self, set: &SetResume) {
        debug!("Picked set {} ({})", set.id, set.name);
        self.selected_set_id = Some(set.id.clone());
        self.set_filter = set.name.clone();
        self.status_message = format!("Browsing {}", set.name);
    }

    pub fn set_card_query(&mut self, term: impl Into<String>) {
        self.card_query = term.into();
    }

    /// Commits to a card search, or returns None (and does nothing) when
    /// there is no picked set or the query is blank.
    pub fn search_cards(&mut self) -> Option<SearchRequest> {
        let Some(set_id) = self.selected_set_id.clone() else {
            debug!("Card search skipped: no set selected");
            return None;
        };
        let name = self.card_query.trim();
        if name.is_empty() {
            debug!("Card search skipped: empty query");
            return None;
        }
        let name = name.to_string();

        self.search_seq += 1;
        self.is_searching = true;
        self.error = None;
        self.status_message = format!("Searching for \"{name}\"...");
        info!(
            "Card search #{} issued: name={:?}, set={}",
            self.search_seq, name, set_id
        );

        Some(SearchRequest {
            seq: self.search_seq,
            name,
            set_id,
        })
    }

    /// Maps a key name to an action: only "Enter" with a non-empty query searches.
    pub fn submit_on_enter(&mut self, key: &str) -> Option<SearchRequest> {
        if key == "Enter" && !self.card_query.is_empty() {
            self.search_cards()
        } else {
            None
        }
    }

    /// Applies search results if they answer the latest search.
    /// Returns false for a stale answer, which is dropped.
    pub fn apply_search_results(&mut self, seq: u64, cards: Vec<CardBrief>) -> bool {
        if seq != self.search_seq {
            debug!(
                "Discarding stale search #{} (latest is #{})",
                seq, self.search_seq
            );
            return false;
        }
        self.search_results = cards;
        self.is_searching = false;
        self.status_message = match self.search_results.len() {
            0 => String::from("No cards found"),
            1 => String::from("1 card found"),
            n => format!("{n} cards found"),
        };
        true
    }

    /// Records a failed search if it is the latest one. The result list is
    /// emptied and the failure is kept for display.
    pub fn apply_search_failure(&mut self, seq: u64, error: String) -> bool {
        if seq != self.search_seq {
            debug!(
                "Discarding stale search failure #{} (latest is #{}): {}",
                seq, self.search_seq, error
            );
            return false;
        }
        warn!("Card search #{} failed: {}", seq, error);
        self.search_results.clear();
        self.is_searching = false;
        self.status_message = String::from("Search failed");
        self.error = Some(error);
        true
    }

    /// Adds the card to the selection, or removes it if a card with the
    /// same id is already there. Returns whether the card is now selected.
    pub fn toggle_card(&mut self, card: &CardBrief) -> bool {
        if let Some(pos) = self.my_selection.iter().position(|c| c.id == card.id) {
            self.my_selection.remove(pos);
            debug!("Deselected {} ({} selected)", card.id, self.my_selection.len());
            false
        } else {
            self.my_selection.push(card.clone());
            debug!("Selected {} ({} selected)", card.id, self.my_selection.len());
            true
        }
    }

    pub fn is_selected(&self, card_id: &str) -> bool {
        self.my_selection.iter().any(|c| c.id == card_id)
    }

    /// Back to choosing a set. Keeps the selection and the loaded sets.
    ///
    /// Any search still in flight is invalidated by bumping the ticket.
    pub fn reset(&mut self) {
        info!("Session reset ({} cards stay selected)", self.my_selection.len());
        self.selected_set_id = None;
        self.set_filter.clear();
        self.card_query.clear();
        self.search_results.clear();
        self.is_searching = false;
        self.search_seq += 1;
        self.error = None;
        self.status_message = String::from("Type to find a set");
    }

    /// Opens the selection overlay. Refused while nothing is selected.
    pub fn show_selection(&mut self) -> bool {
        if self.my_selection.is_empty() {
            return false;
        }
        self.reviewing_selection = true;
        true
    }

    pub fn hide_selection(&mut self) {
        self.reviewing_selection = false;
    }
}
