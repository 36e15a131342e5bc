//! Explicit theme descriptors.
//!
//! The rendering surface applies these foreground/background pairs to its
//! widgets; the core never pokes widget attributes directly.

/// Color pair for a rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub foreground: &'static str,
}

pub const LIGHT: Theme = Theme {
    background: "#f0f0f0",
    foreground: "#000000",
};

pub const DARK: Theme = Theme {
    background: "#2e2e2e",
    foreground: "#ffffff",
};

impl Theme {
    /// Theme for the given dark-mode flag.
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            DARK
        } else {
            LIGHT
        }
    }
}
