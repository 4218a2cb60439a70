//! Two-state visibility model driven by the inline `display` style.

use std::fmt;

use crate::constants::{DISPLAY_HIDDEN, DISPLAY_VISIBLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Inline `display` is `none` or unset.
    #[default]
    Hidden,
    /// Any other inline `display` value.
    Visible,
}

impl Visibility {
    /// Classify an inline `display` value. An unset style reads as the empty
    /// string and counts as hidden.
    pub fn from_display(display: &str) -> Self {
        match display.trim() {
            "" | DISPLAY_HIDDEN => Visibility::Hidden,
            _ => Visibility::Visible,
        }
    }

    /// The inline `display` value written for this state.
    pub fn as_display(self) -> &'static str {
        match self {
            Visibility::Hidden => DISPLAY_HIDDEN,
            Visibility::Visible => DISPLAY_VISIBLE,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Visibility::Hidden => Visibility::Visible,
            Visibility::Visible => Visibility::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Hidden => write!(f, "hidden"),
            Visibility::Visible => write!(f, "visible"),
        }
    }
}
