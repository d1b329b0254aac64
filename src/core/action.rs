//! # Actions
//!
//! Everything that can happen in the browser becomes an `Action`.
//! User types in the set box? That's `Action::SetFilterChanged(text)`.
//! The card search answers? That's `Action::CardsLoaded { seq, cards }`.
//!
//! `update()` applies an action to the session and returns an `Effect`:
//! the I/O the caller must perform next. No I/O happens here.
//!
//! ```text
//! Session + Action  →  update()  →  Session' + Effect
//! ```

use log::debug;

use crate::catalog::{CardBrief, SetResume};
use crate::core::state::{SearchRequest, SelectionSession};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Entry action: fetch the set list if we don't have it.
    Initialize,
    SetFilterChanged(String),
    PickSet(SetResume),
    CardQueryChanged(String),
    SearchCards,
    /// A key name from the view. Only "Enter" does anything.
    KeyPressed(String),
    ToggleCard(CardBrief),
    Reset,
    ShowSelection,
    HideSelection,
    SetsLoaded(Vec<SetResume>),
    SetsFailed(String),
    CardsLoaded { seq: u64, cards: Vec<CardBrief> },
    CardsFailed { seq: u64, error: String },
    Quit,
}

/// Side effects requested by `update()`, performed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchSets,
    SearchCards(SearchRequest),
}

impl From<Option<SearchRequest>> for Effect {
    fn from(request: Option<SearchRequest>) -> Self {
        request.map_or(Effect::None, Effect::SearchCards)
    }
}

pub fn update(session: &mut SelectionSession, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Initialize => {
            if session.initialize() {
                Effect::FetchSets
            } else {
                Effect::None
            }
        }
        Action::SetFilterChanged(term) => {
            session.set_set_filter(term);
            Effect::None
        }
        Action::PickSet(set) => {
            session.pick_set(&set);
            Effect::None
        }
        Action::CardQueryChanged(term) => {
            session.set_card_query(term);
            Effect::None
        }
        Action::SearchCards => session.search_cards().into(),
        Action::KeyPressed(key) => session.submit_on_enter(&key).into(),
        Action::ToggleCard(card) => {
            session.toggle_card(&card);
            Effect::None
        }
        Action::Reset => {
            session.reset();
            Effect::None
        }
        Action::ShowSelection => {
            session.show_selection();
            Effect::None
        }
        Action::HideSelection => {
            session.hide_selection();
            Effect::None
        }
        Action::SetsLoaded(sets) => {
            session.apply_sets(sets);
            Effect::None
        }
        Action::SetsFailed(error) => {
            session.apply_sets_failure(error);
            Effect::None
        }
        Action::CardsLoaded { seq, cards } => {
            session.apply_search_results(seq, cards);
            Effect::None
        }
        Action::CardsFailed { seq, error } => {
            session.apply_search_failure(seq, error);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Phase;
    use crate::test_support::{card, sample_sets, test_session};

    #[test]
    fn test_initialize_requests_fetch_once() {
        let mut session = test_session();
        assert_eq!(update(&mut session, Action::Initialize), Effect::FetchSets);
        assert_eq!(update(&mut session, Action::Initialize), Effect::None);
        update(&mut session, Action::SetsLoaded(sample_sets()));
        assert_eq!(update(&mut session, Action::Initialize), Effect::None);
    }

    #[test]
    fn test_sets_failed_then_retry() {
        let mut session = test_session();
        update(&mut session, Action::Initialize);
        update(&mut session, Action::SetsFailed("network error: down".into()));
        assert!(session.sets.is_empty());
        assert_eq!(update(&mut session, Action::Initialize), Effect::FetchSets);
    }

    #[test]
    fn test_full_browse_flow() {
        let mut session = test_session();
        update(&mut session, Action::Initialize);
        update(&mut session, Action::SetsLoaded(sample_sets()));

        update(&mut session, Action::SetFilterChanged("base".into()));
        let picked = session.filtered_sets()[0].clone();
        assert_eq!(picked.id, "base1");

        update(&mut session, Action::PickSet(picked));
        assert_eq!(session.phase(), Phase::BrowsingCards);

        update(&mut session, Action::CardQueryChanged("Pikachu".into()));
        let effect = update(&mut session, Action::KeyPressed("Enter".into()));
        let Effect::SearchCards(request) = effect else {
            panic!("Expected SearchCards effect, got {:?}", effect);
        };
        assert_eq!(request.name, "Pikachu");
        assert_eq!(request.set_id, "base1");
        assert!(session.is_searching);

        update(
            &mut session,
            Action::CardsLoaded {
                seq: request.seq,
                cards: vec![card("cardX"), card("cardY")],
            },
        );
        assert!(!session.is_searching);
        assert_eq!(session.search_results, vec![card("cardX"), card("cardY")]);

        update(&mut session, Action::ToggleCard(card("cardX")));
        assert!(session.is_selected("cardX"));

        update(&mut session, Action::Reset);
        assert_eq!(session.phase(), Phase::ChoosingSet);
        assert_eq!(session.my_selection, vec![card("cardX")]);
    }

    #[test]
    fn test_search_without_set_is_noop() {
        let mut session = test_session();
        update(&mut session, Action::CardQueryChanged("Pikachu".into()));
        assert_eq!(update(&mut session, Action::SearchCards), Effect::None);
        assert!(!session.is_searching);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut session = test_session();
        update(&mut session, Action::PickSet(SetResume::new("base1", "Base Set")));
        update(&mut session, Action::CardQueryChanged("Pikachu".into()));
        assert_eq!(update(&mut session, Action::KeyPressed("Escape".into())), Effect::None);
    }

    #[test]
    fn test_stale_cards_failed_ignored() {
        let mut session = test_session();
        update(&mut session, Action::PickSet(SetResume::new("base1", "Base Set")));
        update(&mut session, Action::CardQueryChanged("Pikachu".into()));
        update(&mut session, Action::SearchCards);
        let latest = match update(&mut session, Action::SearchCards) {
            Effect::SearchCards(request) => request,
            other => panic!("Expected SearchCards effect, got {:?}", other),
        };

        update(
            &mut session,
            Action::CardsFailed {
                seq: latest.seq - 1,
                error: "timeout".into(),
            },
        );
        assert!(session.error.is_none());
        assert!(session.is_searching);
    }

    #[test]
    fn test_selection_overlay_actions() {
        let mut session = test_session();
        update(&mut session, Action::ShowSelection);
        assert!(!session.reviewing_selection);

        update(&mut session, Action::ToggleCard(card("c1")));
        update(&mut session, Action::ShowSelection);
        assert!(session.reviewing_selection);

        update(&mut session, Action::HideSelection);
        assert!(!session.reviewing_selection);
    }

    #[test]
    fn test_quit() {
        let mut session = test_session();
        assert_eq!(update(&mut session, Action::Quit), Effect::Quit);
    }
}
