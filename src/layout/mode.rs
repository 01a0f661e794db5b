//! Grouping modes and the per-depth rotation policy.

use crate::error::LayoutError;
use crate::host::SplitHint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the children of one layout level are arranged on the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Each sibling opens a new window
    Window,
    /// Each sibling opens a new tab
    #[default]
    Tab,
    /// Siblings are stacked top to bottom
    Horizontal,
    /// Siblings are placed side by side
    Vertical,
}

impl Mode {
    /// Parse a mode name, case-insensitively.
    ///
    /// `pane` is accepted as an alias for [`Mode::Horizontal`].
    pub fn parse(name: &str) -> Result<Self, LayoutError> {
        match name.trim().to_ascii_uppercase().as_str() {
            "WINDOW" => Ok(Mode::Window),
            "TAB" => Ok(Mode::Tab),
            "HORIZONTAL" | "PANE" => Ok(Mode::Horizontal),
            "VERTICAL" => Ok(Mode::Vertical),
            _ => Err(LayoutError::UnknownMode(name.to_string())),
        }
    }

    /// Mode used one nesting level deeper.
    ///
    /// Window → Tab → Horizontal → Vertical → Horizontal → …
    pub fn next(self) -> Mode {
        match self {
            Mode::Tab | Mode::Vertical => Mode::Horizontal,
            Mode::Horizontal => Mode::Vertical,
            Mode::Window => Mode::Tab,
        }
    }

    /// Orientation hint for a split in this mode.
    ///
    /// Window and tab splits carry none; where the new session lands is
    /// entirely up to the host.
    pub fn split_hint(self) -> Option<SplitHint> {
        match self {
            Mode::Horizontal => Some(SplitHint::Horizontal),
            Mode::Vertical => Some(SplitHint::Vertical),
            Mode::Window | Mode::Tab => None,
        }
    }

    /// Upper-case name as used in layout requests
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Window => "WINDOW",
            Mode::Tab => "TAB",
            Mode::Horizontal => "HORIZONTAL",
            Mode::Vertical => "VERTICAL",
        }
    }
}

impl FromStr for Mode {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::parse(s)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
