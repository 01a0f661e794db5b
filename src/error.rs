//! Typed errors for layout compilation.
//!
//! Compilation errors are terminal: when any of these is returned no
//! sequencer is started, so a partially compiled queue never reaches the
//! host.

use par_layout_config::ConfigError;
use thiserror::Error;

/// Errors produced while turning a layout request into an instruction queue
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A layout node was neither a command string nor a list.
    #[error("Malformed layout node at '{path}': expected a command or a list, found {found}")]
    MalformedNode {
        /// Location of the node, e.g. `/1/0`
        path: String,
        /// The offending value, rendered as JSON
        found: String,
    },

    /// A list in the layout had no children, so it has no pane to anchor on.
    #[error("Empty layout group at '{path}'")]
    EmptyGroup {
        /// Location of the group, e.g. `/2`
        path: String,
    },

    /// The requested entry mode is not a known mode name.
    #[error("Unknown layout mode '{0}' (expected window, tab, horizontal, vertical or pane)")]
    UnknownMode(String),

    /// The layout request or settings could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Render a child-index path the way errors report it
pub(crate) fn format_path(path: &[usize]) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.iter().map(|i| format!("/{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_path() {
        assert_eq!(format_path(&[]), "/");
        assert_eq!(format_path(&[1, 0]), "/1/0");
    }

    #[test]
    fn test_malformed_node_display() {
        let err = LayoutError::MalformedNode {
            path: "/1".to_string(),
            found: "42".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed layout node at '/1': expected a command or a list, found 42"
        );
    }
}
