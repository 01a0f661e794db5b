//! Shared integration test helpers for par-layout.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{HostCall, RecordingHost};
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use par_layout::config::{LayoutConfig, LayoutRequest, format_request_line};
use par_layout::{HostEvent, LayoutDriver, SessionHost, SessionId, SessionRequest};
use std::collections::VecDeque;
use std::path::PathBuf;

/// One call the sequencer made into the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Request(SessionRequest),
    Input(SessionId, String),
    Focus(SessionId),
}

/// A session host that records every call and only creates sessions when
/// the test says so.
///
/// Sessions are named `s0`, `s1`, … in creation order; `s0` exists from the
/// start and is active.
#[derive(Debug)]
pub struct RecordingHost {
    pub active: Option<SessionId>,
    pub sessions: Vec<SessionId>,
    pub calls: Vec<HostCall>,
    pending: VecDeque<SessionRequest>,
}

impl RecordingHost {
    pub fn new() -> Self {
        let first = SessionId::from("s0");
        Self {
            active: Some(first.clone()),
            sessions: vec![first],
            calls: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Split requests not yet fulfilled
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    /// Fulfil the oldest split request: create and activate a session
    pub fn complete_request(&mut self) -> Option<SessionId> {
        self.pending.pop_front()?;
        let id = SessionId::new(format!("s{}", self.sessions.len()));
        self.sessions.push(id.clone());
        self.active = Some(id.clone());
        Some(id)
    }

    pub fn requests(&self) -> Vec<&SessionRequest> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Request(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn inputs(&self) -> Vec<(&str, &str)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Input(id, text) => Some((id.as_str(), text.as_str())),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHost for RecordingHost {
    fn request_session(&mut self, request: SessionRequest) {
        self.calls.push(HostCall::Request(request.clone()));
        self.pending.push_back(request);
    }

    fn send_input(&mut self, session_id: &SessionId, text: &str) {
        self.calls
            .push(HostCall::Input(session_id.clone(), text.to_string()));
    }

    fn set_active_session(&mut self, session_id: &SessionId) {
        self.calls.push(HostCall::Focus(session_id.clone()));
        self.active = Some(session_id.clone());
    }

    fn active_session_id(&self) -> Option<SessionId> {
        self.active.clone()
    }
}

/// Output event carrying a layout request, as printed into session `s0`
pub fn request_event(config: LayoutConfig, cwd: &str) -> HostEvent {
    let request = LayoutRequest {
        config,
        cwd: PathBuf::from(cwd),
    };
    HostEvent::DataReceived {
        session_id: SessionId::from("s0"),
        data: format!(
            "\x1b[32m{}\x1b[0m\r\n",
            format_request_line(&request).expect("request serializes")
        ),
    }
}

/// Play the host side until no split is outstanding: each new session
/// announces itself with an activation and a title change, then the host
/// loop turn runs the scheduled resumption.
pub fn drive_to_completion(driver: &mut LayoutDriver, host: &mut RecordingHost) {
    while let Some(id) = host.complete_request() {
        driver.handle_event(
            &HostEvent::SessionActivated {
                session_id: id.clone(),
            },
            host,
        );
        driver.handle_event(
            &HostEvent::TitleChanged {
                session_id: id,
                title: "zsh".to_string(),
            },
            host,
        );
        driver.run_scheduled(host);
    }
}
