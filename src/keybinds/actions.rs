//! Keyboard surface of the search page.

/// Keys the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// `/`
    Slash,
    Other(char),
}

impl Key {
    /// Map a typed character to a key.
    #[must_use]
    pub const fn from_char(c: char) -> Self {
        match c {
            '/' => Self::Slash,
            '\u{1b}' => Self::Escape,
            other => Self::Other(other),
        }
    }
}

/// Where keyboard focus currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// A text input (search box, filter field) has focus
    TextInput,
    #[default]
    Elsewhere,
}

/// Actions that can be triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Close the dataset detail overlay - Escape
    CloseDetail,
    /// Move focus to the search input - /
    FocusSearch,
    /// Key is not bound in this context
    None,
}

impl KeyAction {
    /// Returns a human-readable description of the action.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::CloseDetail => "Detailansicht schließen",
            Self::FocusSearch => "Suche fokussieren",
            Self::None => "",
        }
    }
}

/// Resolve a key press in the given focus context.
///
/// `/` is left to the text input when one has focus so it can be typed.
#[must_use]
pub const fn resolve_key(key: Key, focus: Focus) -> KeyAction {
    match (key, focus) {
        (Key::Escape, _) => KeyAction::CloseDetail,
        (Key::Slash, Focus::Elsewhere) => KeyAction::FocusSearch,
        (Key::Slash, Focus::TextInput) | (Key::Other(_), _) => KeyAction::None,
    }
}
