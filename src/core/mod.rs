//! # Core Session Logic
//!
//! This module contains the browser's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • SelectionSession     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • tasks (effect I/O)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │  catalog   │
//!         │  Adapter   │                  │ (TCGdex    │
//!         │ (ratatui)  │                  │  client)   │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `SelectionSession`, all browsing state in one place
//! - [`action`]: the `Action` enum and the `update()` reducer
//! - [`tasks`]: async executors for the `Effect`s `update()` returns
//! - [`config`]: config file loading and resolution

pub mod action;
pub mod config;
pub mod state;
pub mod tasks;

pub use action::{Action, Effect, update};
pub use state::{Phase, SearchRequest, SelectionSession, filter_sets};
