//! Extraction of layout requests embedded in raw host output.
//!
//! The companion tool prints a single line of the form
//! `[par-layout config]:{"config": {...}, "cwd": "..."}` into a session.
//! By the time the host hands that output to us it may be decorated with
//! color/cursor control sequences and hard-wrapped at the terminal width, so
//! both are removed before the JSON payload is parsed.

use crate::error::ConfigError;
use crate::layout::LayoutRequest;
use regex::Regex;
use std::sync::OnceLock;

/// Marker that precedes a layout request in session output
pub const MARKER: &str = "[par-layout config]:";

/// ANSI/VT control sequence pattern
static ANSI_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get the compiled control sequence regex
fn ansi_regex() -> &'static Regex {
    ANSI_REGEX.get_or_init(|| {
        // ESC or 8-bit CSI, optional intermediate/private bytes, optional
        // numeric parameters, then a single final byte.
        Regex::new(
            r"[\x1b\x{9b}][\[()#;?]*(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-ORZcf-nqry=><]",
        )
        .expect("Failed to compile control sequence regex")
    })
}

/// Remove ANSI/VT control sequences from `text`.
pub fn strip_ansi(text: &str) -> String {
    ansi_regex().replace_all(text, "").into_owned()
}

/// Format the line a companion tool prints to request a layout.
pub fn format_request_line(request: &LayoutRequest) -> Result<String, ConfigError> {
    Ok(format!("{}{}", MARKER, serde_json::to_string(request)?))
}

/// Look for a layout request in raw session output.
///
/// Returns `Ok(None)` when the output carries no marker, or when the marker
/// is present but no closing brace has arrived yet. Returns an error when a
/// complete payload follows the marker but is not a valid request.
pub fn find_layout_request(text: &str) -> Result<Option<LayoutRequest>, ConfigError> {
    let cleaned = strip_ansi(text);
    let cleaned = cleaned.trim();

    // The last marker wins: earlier ones may be echoes of the command line.
    let Some(marker_pos) = cleaned.rfind(MARKER) else {
        return Ok(None);
    };
    let after = &cleaned[marker_pos + MARKER.len()..];

    let Some(end) = after.rfind('}') else {
        log::debug!("Layout marker found without a complete payload");
        return Ok(None);
    };

    // Hard wraps from the terminal land in the middle of the payload
    let payload: String = after[..=end]
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    let request: LayoutRequest =
        serde_json::from_str(&payload).map_err(|source| ConfigError::Payload { source })?;

    log::info!(
        "Found layout request with {} commands for {:?}",
        request.config.layout.command_count(),
        request.cwd
    );
    Ok(Some(request))
}
