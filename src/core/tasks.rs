//! Effect executors.
//!
//! Each function performs one provider call and turns the outcome into the
//! `Action` that reports it. Failures never escape as errors: they become
//! `SetsFailed` / `CardsFailed` so the session can show them.
//!
//! The adapter decides where these run (the TUI spawns them on tokio).

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

use crate::catalog::{CardFinder, CardQuery, SetDirectory};
use crate::core::action::Action;
use crate::core::state::SearchRequest;

pub async fn fetch_sets(directory: Arc<dyn SetDirectory>, timeout: Duration) -> Action {
    info!("Fetching sets via {}", directory.name());
    match tokio::time::timeout(timeout, directory.list_sets()).await {
        Ok(Ok(sets)) => Action::SetsLoaded(sets),
        Ok(Err(e)) => {
            warn!("Set listing via {} failed: {}", directory.name(), e);
            Action::SetsFailed(e.to_string())
        }
        Err(_) => {
            warn!("Set listing timed out after {:?}", timeout);
            Action::SetsFailed(format!("timed out after {}s", timeout.as_secs()))
        }
    }
}

pub async fn search_cards(
    finder: Arc<dyn CardFinder>,
    request: SearchRequest,
    timeout: Duration,
) -> Action {
    let query = CardQuery {
        name: &request.name,
        set_id: &request.set_id,
    };
    match tokio::time::timeout(timeout, finder.find_cards(query)).await {
        Ok(Ok(cards)) => Action::CardsLoaded {
            seq: request.seq,
            cards,
        },
        Ok(Err(e)) => {
            warn!("Card search #{} via {} failed: {}", request.seq, finder.name(), e);
            Action::CardsFailed {
                seq: request.seq,
                error: e.to_string(),
            }
        }
        Err(_) => {
            warn!("Card search #{} timed out after {:?}", request.seq, timeout);
            Action::CardsFailed {
                seq: request.seq,
                error: format!("timed out after {}s", timeout.as_secs()),
            }
        }
    }
}
