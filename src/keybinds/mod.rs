//! Keybind system for the search page.
//!
//! Two keys are bound: `Escape` closes the detail overlay and `/` jumps to
//! the search input unless the user is already typing in one.

pub mod actions;

pub use actions::{Focus, Key, KeyAction, resolve_key};
