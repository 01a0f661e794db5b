//! Configuration layer for par-layout.
//!
//! This crate provides the data model and I/O for layout automation:
//!
//! - Layout trees and layout requests (serde, JSON and YAML)
//! - Extraction of a request embedded in raw session output
//! - Persisted user settings
//! - Typed config errors

pub mod error;
pub mod extract;
pub mod layout;
pub mod settings;

pub use error::ConfigError;
pub use extract::{MARKER, find_layout_request, format_request_line, strip_ansi};
pub use layout::{LayoutConfig, LayoutNode, LayoutRequest, load_layout_file};
pub use settings::{
    ENTRY_MODE_NAMES, LayoutSettings, load_settings, load_settings_from, save_settings_to,
    settings_path,
};
