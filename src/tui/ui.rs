//! Frame layout.
//!
//! ```text
//! ┌ title bar ─────────────────────────────┐ 1
//! │ Set input                              │ 3
//! │ Card input (BrowsingCards only)        │ 3
//! │ Set suggestions / card results         │ rest
//! └ key help ──────────────────────────────┘ 1
//! ```
//!
//! The selection overlay is drawn last, on top of everything.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::{Phase, SelectionSession};
use crate::tui::component::Component;
use crate::tui::components::{
    CardList, INPUT_HEIGHT, SelectionOverlay, SetList, TitleBar,
};
use crate::tui::{InputMode, TuiState};

pub fn draw_ui(frame: &mut Frame, session: &SelectionSession, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let phase = session.phase();
    let card_input_height = match phase {
        Phase::ChoosingSet => 0,
        Phase::BrowsingCards => INPUT_HEIGHT,
    };
    let [title_area, set_area, card_area, main_area, help_area] = Layout::vertical([
        Length(1),
        Length(INPUT_HEIGHT),
        Length(card_input_height),
        Min(0),
        Length(1),
    ])
    .areas(frame.area());

    let busy = session.is_searching || session.sets_loading;
    TitleBar {
        language: session.language.code(),
        status_message: &session.status_message,
        error: session.error.as_deref(),
        selected_count: session.my_selection.len(),
        busy_frame: busy.then_some(spinner_frame),
    }
    .render(frame, title_area);

    tui.set_input.render(frame, set_area);
    if phase == Phase::BrowsingCards {
        tui.card_input.render(frame, card_area);
    }

    let list_focused = tui.input_mode == InputMode::Cursor && !session.reviewing_selection;
    match phase {
        Phase::ChoosingSet => {
            let matches = session.filtered_sets();
            SetList {
                sets: &matches,
                filter: &session.set_filter,
                loading: session.sets_loading,
                focused: list_focused,
                state: &mut tui.set_list,
            }
            .render(frame, main_area);
        }
        Phase::BrowsingCards => {
            let is_selected = |id: &str| session.is_selected(id);
            CardList {
                cards: &session.search_results,
                is_selected: &is_selected,
                is_searching: session.is_searching,
                spinner_frame,
                focused: list_focused,
                state: &mut tui.card_list,
            }
            .render(frame, main_area);
        }
    }

    frame.render_widget(
        Line::from(help_text(phase, tui.input_mode)).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if session.reviewing_selection {
        SelectionOverlay::new(&session.my_selection, &mut tui.selection_overlay)
            .render(frame, frame.area());
    }
}

fn help_text(phase: Phase, mode: InputMode) -> &'static str {
    match (phase, mode) {
        (Phase::ChoosingSet, InputMode::Input) => {
            " Enter Pick set  ↓ Browse sets  Ctrl+S My cards  Ctrl+L Reload  Ctrl+C Quit"
        }
        (Phase::ChoosingSet, InputMode::Cursor) => {
            " ↑↓ Move  Enter Pick set  type to filter  Ctrl+C Quit"
        }
        (Phase::BrowsingCards, InputMode::Input) => {
            " Enter Search  ↓ Results  Ctrl+S My cards  Ctrl+R Change set  Ctrl+C Quit"
        }
        (Phase::BrowsingCards, InputMode::Cursor) => {
            " ↑↓ Move  Space Select  Ctrl+S My cards  Ctrl+R Change set  Ctrl+C Quit"
        }
    }
}
