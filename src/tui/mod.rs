//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (sets loading, search in flight): draws every ~80ms so the
//!   spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, finished requests
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.
//!
//! ## Effects
//!
//! `update` never does I/O. `FetchSets` and `SearchCards` effects are run
//! on the tokio runtime by the functions in `core::tasks`; their resulting
//! action comes back over an mpsc channel and goes through `update` like any
//! key press. Only one search task is kept alive: a new search (or a reset)
//! aborts the previous one.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::catalog::TcgdexProvider;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{Phase, SearchRequest, SelectionSession};
use crate::core::tasks;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CardListState, InputBox, InputEvent, SelectionEvent, SelectionOverlayState, SetListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate the list below the inputs. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the active input. Esc or Down switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub set_input: InputBox,
    pub card_input: InputBox,
    pub set_list: SetListState,
    pub card_list: CardListState,
    pub selection_overlay: SelectionOverlayState,
    pub input_mode: InputMode,
    /// Search ticket last seen, to scroll back up when results change
    seen_search_seq: u64,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            set_input: InputBox::new("Set", "Type a set name, e.g. Jungle"),
            card_input: InputBox::new("Card", "Type a card name and press Enter"),
            set_list: SetListState::new(),
            card_list: CardListState::new(),
            selection_overlay: SelectionOverlayState::new(),
            input_mode: InputMode::Input, // User expects to type immediately
            seen_search_seq: 0,
        }
    }

    /// Copy session values into the component props before drawing.
    pub fn sync_from(&mut self, session: &SelectionSession) {
        let phase = session.phase();
        let typing = self.input_mode == InputMode::Input && !session.reviewing_selection;

        self.set_input.set_text(&session.set_filter);
        self.set_input.locked = phase == Phase::BrowsingCards;
        self.set_input.focused = typing && phase == Phase::ChoosingSet;

        self.card_input.set_text(&session.card_query);
        self.card_input.focused = typing && phase == Phase::BrowsingCards;

        if self.seen_search_seq != session.search_seq {
            self.seen_search_seq = session.search_seq;
            self.card_list.reset();
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// Build the TCGdex client shared by the set directory and the card finder.
pub fn build_catalog(config: &ResolvedConfig) -> std::io::Result<Arc<TcgdexProvider>> {
    let provider = TcgdexProvider::new(
        Some(config.base_url.clone()),
        config.language,
        Duration::from_secs(config.request_timeout_secs),
        &config.user_agent,
    )
    .map_err(std::io::Error::other)?;
    Ok(Arc::new(provider))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let catalog = build_catalog(&config)?;
    let mut session = SelectionSession::from_config(catalog.clone(), catalog, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut active_search: Option<tokio::task::AbortHandle> = None;

    let effect = update(&mut session, Action::Initialize);
    run_effect(effect, &session, &tx, &mut active_search);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = session.is_searching || session.sets_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.sync_from(&session);
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &session, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = handle_tui_event(&mut session, &mut tui, event);
            if run_effect(effect, &session, &tx, &mut active_search) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // A reset invalidates the running search
        if !session.is_searching
            && let Some(handle) = active_search.take()
        {
            handle.abort();
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut session, action);
            if run_effect(effect, &session, &tx, &mut active_search) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    if let Some(handle) = active_search.take() {
        handle.abort();
    }
    info!("Exiting with {} cards selected", session.my_selection.len());
    ratatui::restore();
    Ok(())
}

/// Start whatever `effect` asks for. Returns true on Quit.
fn run_effect(
    effect: Effect,
    session: &SelectionSession,
    tx: &mpsc::Sender<Action>,
    active_search: &mut Option<tokio::task::AbortHandle>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchSets => {
            spawn_fetch_sets(session, tx.clone());
            false
        }
        Effect::SearchCards(request) => {
            if let Some(previous) = active_search.take() {
                debug!("Aborting superseded search");
                previous.abort();
            }
            *active_search = Some(spawn_search(session, request, tx.clone()));
            false
        }
    }
}

fn spawn_fetch_sets(session: &SelectionSession, tx: mpsc::Sender<Action>) {
    info!("Spawning set listing via {}", session.set_directory.name());
    let directory = session.set_directory.clone();
    let timeout = session.request_timeout;
    tokio::spawn(async move {
        let action = tasks::fetch_sets(directory, timeout).await;
        if tx.send(action).is_err() {
            warn!("Failed to send set listing result: receiver dropped");
        }
    });
}

fn spawn_search(
    session: &SelectionSession,
    request: SearchRequest,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!(
        "Spawning card search #{} via {}",
        request.seq,
        session.card_finder.name()
    );
    let finder = session.card_finder.clone();
    let timeout = session.request_timeout;
    let handle = tokio::spawn(async move {
        let seq = request.seq;
        let action = tasks::search_cards(finder, request, timeout).await;
        if tx.send(action).is_err() {
            warn!("Failed to send results of search #{}: receiver dropped", seq);
        }
    });
    handle.abort_handle()
}

/// Translate one terminal event into session actions.
///
/// Returns the effect of the last action dispatched; at most one event in
/// any branch produces a non-None effect.
pub fn handle_tui_event(session: &mut SelectionSession, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(session, Action::Quit),
        _ => {}
    }

    if session.reviewing_selection {
        let len = session.my_selection.len();
        match tui.selection_overlay.handle_event(&event, len) {
            Some(SelectionEvent::Toggle(index)) => {
                if let Some(card) = session.my_selection.get(index).cloned() {
                    update(session, Action::ToggleCard(card));
                }
                if session.my_selection.is_empty() {
                    update(session, Action::HideSelection);
                }
                tui.selection_overlay.clamp(session.my_selection.len());
            }
            Some(SelectionEvent::Dismiss) => {
                update(session, Action::HideSelection);
            }
            None => {}
        }
        return Effect::None;
    }

    match event {
        TuiEvent::Reset => {
            tui.input_mode = InputMode::Input;
            tui.set_list = SetListState::new();
            return update(session, Action::Reset);
        }
        TuiEvent::ShowSelection => {
            tui.selection_overlay = SelectionOverlayState::new();
            return update(session, Action::ShowSelection);
        }
        TuiEvent::ReloadSets => return update(session, Action::Initialize),
        _ => {}
    }

    match session.phase() {
        Phase::ChoosingSet => handle_choosing_set(session, tui, event),
        Phase::BrowsingCards => handle_browsing_cards(session, tui, event),
    }
}

fn handle_choosing_set(session: &mut SelectionSession, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let match_count = session.filtered_sets().len();
    tui.set_list.clamp(match_count);

    if matches!(event, TuiEvent::Submit) {
        let picked = tui
            .set_list
            .selected_index(match_count)
            .and_then(|i| session.filtered_sets().get(i).map(|set| (*set).clone()));
        return match picked {
            Some(set) => {
                tui.input_mode = InputMode::Input;
                update(session, Action::PickSet(set))
            }
            None => Effect::None,
        };
    }

    match tui.input_mode {
        InputMode::Input => match event {
            TuiEvent::Escape => tui.input_mode = InputMode::Cursor,
            TuiEvent::CursorDown if match_count > 0 => tui.input_mode = InputMode::Cursor,
            TuiEvent::CursorUp | TuiEvent::PageUp | TuiEvent::PageDown => {
                tui.set_list.navigate(&event, match_count);
            }
            _ => return edit_set_filter(session, tui, &event),
        },
        InputMode::Cursor => {
            if !tui.set_list.navigate(&event, match_count) && is_editing(&event) {
                tui.input_mode = InputMode::Input;
                return edit_set_filter(session, tui, &event);
            }
        }
    }
    Effect::None
}

fn handle_browsing_cards(session: &mut SelectionSession, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let result_count = session.search_results.len();

    match tui.input_mode {
        InputMode::Input => match event {
            TuiEvent::Escape => tui.input_mode = InputMode::Cursor,
            TuiEvent::CursorDown if result_count > 0 => tui.input_mode = InputMode::Cursor,
            TuiEvent::Submit => return update(session, Action::KeyPressed(String::from("Enter"))),
            _ => {
                if let Some(InputEvent::ContentChanged) = tui.card_input.handle_event(&event) {
                    return update(
                        session,
                        Action::CardQueryChanged(tui.card_input.buffer.clone()),
                    );
                }
            }
        },
        InputMode::Cursor => match event {
            TuiEvent::InputChar(' ') => {
                let index = tui.card_list.selected;
                if let Some(card) = session.search_results.get(index).cloned() {
                    return update(session, Action::ToggleCard(card));
                }
            }
            TuiEvent::Submit => tui.input_mode = InputMode::Input,
            _ => {
                if !tui.card_list.navigate(&event, result_count) && is_editing(&event) {
                    tui.input_mode = InputMode::Input;
                    if let Some(InputEvent::ContentChanged) = tui.card_input.handle_event(&event) {
                        return update(
                            session,
                            Action::CardQueryChanged(tui.card_input.buffer.clone()),
                        );
                    }
                }
            }
        },
    }
    Effect::None
}

fn edit_set_filter(session: &mut SelectionSession, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match tui.set_input.handle_event(event) {
        Some(InputEvent::ContentChanged) => {
            let effect = update(session, Action::SetFilterChanged(tui.set_input.buffer.clone()));
            tui.set_list.clamp(session.filtered_sets().len());
            effect
        }
        _ => Effect::None,
    }
}

/// Events that belong to a text field rather than a list.
fn is_editing(event: &TuiEvent) -> bool {
    matches!(
        event,
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) | TuiEvent::Backspace | TuiEvent::Delete
    )
}
