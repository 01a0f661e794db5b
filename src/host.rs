//! Contract between the layout sequencer and the session host.
//!
//! The host owns real sessions (tabs, windows, split panes). The sequencer
//! only ever talks to it through [`SessionHost`], and only ever hears back
//! through [`HostEvent`]s delivered by whoever wires the host's event stream
//! to a [`LayoutDriver`](crate::driver::LayoutDriver).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Host-assigned identifier of a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Orientation hint attached to a split request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitHint {
    /// New session is stacked below the current one
    Horizontal,
    /// New session is placed beside the current one
    Vertical,
}

/// A request for the host to create and activate a new session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRequest {
    /// Working directory of the new session
    pub cwd: PathBuf,
    /// Split orientation; `None` leaves placement to the host
    /// (a new tab or window)
    pub split: Option<SplitHint>,
}

/// Operations the sequencer needs from a session host.
///
/// All mutating calls are fire-and-forget. `request_session` in particular
/// returns before the session exists; the host reports it later with a
/// [`HostEvent`] naming the new session.
pub trait SessionHost {
    /// Ask the host to create a new session next to the active one.
    fn request_session(&mut self, request: SessionRequest);

    /// Write `text` into a session as if typed.
    fn send_input(&mut self, session_id: &SessionId, text: &str);

    /// Move input focus to a session.
    fn set_active_session(&mut self, session_id: &SessionId);

    /// The session that currently has input focus, if any.
    fn active_session_id(&self) -> Option<SessionId>;
}

/// Session lifecycle notifications delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A session produced output
    DataReceived { session_id: SessionId, data: String },
    /// A session's title changed (a new shell sets its title on startup)
    TitleChanged { session_id: SessionId, title: String },
    /// A session became the active one
    SessionActivated { session_id: SessionId },
    /// A session was closed
    SessionClosed { session_id: SessionId },
}

impl HostEvent {
    /// The session this event is about
    pub fn session_id(&self) -> &SessionId {
        match self {
            HostEvent::DataReceived { session_id, .. }
            | HostEvent::TitleChanged { session_id, .. }
            | HostEvent::SessionActivated { session_id }
            | HostEvent::SessionClosed { session_id } => session_id,
        }
    }

    /// The session id if this event signals that a session now exists and
    /// is live, `None` for every other kind.
    pub fn activation_id(&self) -> Option<&SessionId> {
        match self {
            HostEvent::TitleChanged { session_id, .. }
            | HostEvent::SessionActivated { session_id } => Some(session_id),
            HostEvent::DataReceived { .. } | HostEvent::SessionClosed { .. } => None,
        }
    }
}
