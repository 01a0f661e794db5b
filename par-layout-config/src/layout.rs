//! Layout request data model.
//!
//! A layout is a nested list whose leaves are shell commands:
//!
//! ```yaml
//! entry: tab
//! layout:
//!   - htop
//!   - [ "npm run watch", "npm test -- --watch" ]
//! ```
//!
//! Each nesting level becomes one grouping level on the host (window, tab,
//! then alternating horizontal/vertical splits).

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A node in a layout tree, exactly as supplied by the user.
///
/// Anything that is neither a string nor a list is kept as
/// [`LayoutNode::Invalid`] so the compiler can report where it sits instead
/// of failing the whole document at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutNode {
    /// A leaf: the command to run in its own pane
    Command(String),
    /// An ordered group of nodes sharing one grouping level
    Group(Vec<LayoutNode>),
    /// Any other JSON/YAML value (number, object, bool, null)
    Invalid(serde_json::Value),
}

impl LayoutNode {
    /// Count the command leaves in this subtree
    pub fn command_count(&self) -> usize {
        match self {
            LayoutNode::Command(_) => 1,
            LayoutNode::Group(children) => children.iter().map(Self::command_count).sum(),
            LayoutNode::Invalid(_) => 0,
        }
    }

    /// Check if this node is a group
    pub fn is_group(&self) -> bool {
        matches!(self, LayoutNode::Group(_))
    }
}

impl From<&str> for LayoutNode {
    fn from(command: &str) -> Self {
        LayoutNode::Command(command.to_string())
    }
}

impl<T: Into<LayoutNode>> From<Vec<T>> for LayoutNode {
    fn from(children: Vec<T>) -> Self {
        LayoutNode::Group(children.into_iter().map(Into::into).collect())
    }
}

/// A layout together with the grouping mode used at its outermost level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// The layout tree
    pub layout: LayoutNode,
    /// Entry mode name (`window`, `tab`, `horizontal`, `vertical`, `pane`).
    /// Case-insensitive; `None` falls back to the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

impl LayoutConfig {
    /// Create a config with no explicit entry mode
    pub fn new(layout: impl Into<LayoutNode>) -> Self {
        Self {
            layout: layout.into(),
            entry: None,
        }
    }

    /// Set the entry mode
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Parse a config from a JSON document
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a config from a YAML document
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml_ng::from_str(s)?)
    }
}

/// A complete request to build a layout: what to build and where.
///
/// This is the payload printed after the marker by the companion tool:
/// `{"config": {"layout": [...], "entry": "tab"}, "cwd": "/home/me/project"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRequest {
    /// The layout to build
    pub config: LayoutConfig,
    /// Working directory every new session is started in
    pub cwd: PathBuf,
}

/// Load a layout config from a file.
///
/// `.json` files are parsed as JSON, `.yaml`/`.yml` as YAML. Other
/// extensions are tried as JSON first, then YAML.
pub fn load_layout_file(path: &Path) -> Result<LayoutConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file {:?}", path))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("json") => LayoutConfig::from_json_str(&contents),
        Some("yaml") | Some("yml") => LayoutConfig::from_yaml_str(&contents),
        _ => LayoutConfig::from_json_str(&contents)
            .or_else(|_| LayoutConfig::from_yaml_str(&contents)),
    }
    .with_context(|| format!("Failed to parse layout file {:?}", path))?;

    log::info!(
        "Loaded layout with {} commands from {:?}",
        config.layout.command_count(),
        path
    );
    Ok(config)
}
