//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, language, status or error, selection count
//!
//! ### Stateful Components
//!
//! Persistent state lives in `TuiState`; the widget is a transient wrapper
//! built each frame over borrowed state and session data:
//! - `InputBox`: single-line text field (set filter, card name)
//! - `SetList` / `SetListState`: set suggestions for the filter
//! - `CardList` / `CardListState`: scrollable search results with marks
//! - `SelectionOverlay` / `SelectionOverlayState`: "my cards" review
//!
//! Components receive session data as props and never reach into
//! `SelectionSession` themselves; the event loop turns their events into
//! core actions.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── title_bar.rs
//! ├── input_box/
//! ├── set_list.rs
//! ├── card_list.rs
//! └── selection_overlay.rs
//! ```

pub mod card_list;
pub mod input_box;
pub mod selection_overlay;
pub mod set_list;
pub mod title_bar;

pub use card_list::{CardList, CardListState};
pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use selection_overlay::{SelectionEvent, SelectionOverlay, SelectionOverlayState};
pub use set_list::{SetList, SetListState};
pub use title_bar::TitleBar;
