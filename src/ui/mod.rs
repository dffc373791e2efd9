//! Render and clipboard collaborators
//!
//! The session issues render requests through [`Renderer`] and copies
//! text through [`Clipboard`]; it never prints or touches the system
//! clipboard itself. The binary plugs in [`TerminalRenderer`] and
//! [`ArboardClipboard`]; tests use the recording doubles in `mock`.
//!
//! ```text
//! ┌──────────────────────────┐
//! │  Session (state engine)  │
//! └────────────┬─────────────┘
//!              │ Renderer / Clipboard
//!      ┌───────┴─────────┐
//!      ▼                 ▼
//! TerminalRenderer   RecordingRenderer
//! ArboardClipboard   MemoryClipboard
//! ```

mod clipboard;
mod error;
mod traits;
mod types;

pub mod output;

#[cfg(test)]
pub mod mock;

pub use clipboard::ArboardClipboard;
pub use error::{Result, UiError};
pub use output::TerminalRenderer;
pub use traits::{Clipboard, Renderer};
pub use types::{MessageLevel, Notice, Overlay, OverlayKind, ResultCard};
