//! Driver: connects a host's event stream to at most one live sequencer.
//!
//! The driver sits in the host's event dispatch path. It watches session
//! output for layout requests, owns the sequencer built from the most recent
//! one, and turns "a new session exists" notifications into resumptions.
//!
//! Resumptions are never run from inside [`LayoutDriver::handle_event`]:
//! the host is still dispatching that event when it calls us. The driver
//! only marks a resumption as pending, and the host runs it on its next
//! loop turn with [`LayoutDriver::run_scheduled`].

use crate::error::LayoutError;
use crate::host::{HostEvent, SessionHost, SessionId};
use crate::layout::LayoutPlan;
use crate::sequencer::{Sequencer, SequencerOptions};
use par_layout_config::{LayoutRequest, LayoutSettings, find_layout_request};

/// What the host should do with an event after the driver saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event carried a layout request; do not show it in the session
    Consumed,
    /// Continue normal dispatch
    Forward,
}

/// Owns the live sequencer and feeds it host notifications
#[derive(Debug, Default)]
pub struct LayoutDriver {
    settings: LayoutSettings,
    sequencer: Option<Sequencer>,
    resume_pending: bool,
}

impl LayoutDriver {
    /// Create a driver with no sequencer
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            settings,
            sequencer: None,
            resume_pending: false,
        }
    }

    /// Current settings
    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Replace settings; applies to sequencers started afterwards.
    ///
    /// Invalid settings are rejected and the current ones kept.
    pub fn set_settings(&mut self, settings: LayoutSettings) -> Result<(), LayoutError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// The live sequencer, if a layout was started
    pub fn sequencer(&self) -> Option<&Sequencer> {
        self.sequencer.as_ref()
    }

    /// Check if a resumption is waiting for [`run_scheduled`](Self::run_scheduled)
    pub fn is_resume_pending(&self) -> bool {
        self.resume_pending
    }

    /// Compile `request` and start executing it, replacing any live
    /// sequencer.
    ///
    /// The previous sequencer is only detached once the new layout compiled,
    /// so a bad request leaves a running layout alone.
    pub fn start<H: SessionHost + ?Sized>(
        &mut self,
        request: &LayoutRequest,
        host: &mut H,
    ) -> Result<(), LayoutError> {
        let plan = LayoutPlan::build(&request.config, &self.settings.default_entry)?;

        if let Some(previous) = self.detach()
            && !previous.is_finished()
        {
            log::warn!(
                "Replacing unfinished layout ({} instructions left)",
                previous.remaining().len()
            );
        }

        let options = SequencerOptions {
            hide_from_history: self.settings.hide_from_history,
        };
        let mut sequencer = Sequencer::new(plan, request.cwd.clone(), options);

        // The session that printed the request already exists
        if let Some(active) = host.active_session_id() {
            sequencer.observe_session(active);
        }

        log::info!(
            "Starting layout: {} panes in {:?}",
            sequencer.panes().len(),
            request.cwd
        );
        sequencer.advance(host);
        self.sequencer = Some(sequencer);
        Ok(())
    }

    /// Drop the live sequencer and any pending resumption.
    ///
    /// Notifications for its sessions arriving later find nothing to resume.
    pub fn detach(&mut self) -> Option<Sequencer> {
        self.resume_pending = false;
        self.sequencer.take()
    }

    /// Inspect one host event.
    ///
    /// Output containing a layout request starts a new layout and is
    /// consumed. Lifecycle events for a session the live sequencer has not
    /// seen schedule a resumption. Everything else is forwarded untouched.
    pub fn handle_event<H: SessionHost + ?Sized>(
        &mut self,
        event: &HostEvent,
        host: &mut H,
    ) -> EventOutcome {
        if !self.settings.enabled {
            return EventOutcome::Forward;
        }

        if let HostEvent::DataReceived { data, session_id } = event {
            match find_layout_request(data) {
                Ok(Some(request)) => {
                    crate::debug_info!("DRIVER", "Layout request from session {}", session_id);
                    if let Err(e) = self.start(&request, host) {
                        crate::debug_error!("DRIVER", "Layout rejected: {}", e);
                        log::error!("Layout request from session {} rejected: {}", session_id, e);
                    }
                    return EventOutcome::Consumed;
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Ignoring layout request from session {}: {}", session_id, e);
                }
            }
            return EventOutcome::Forward;
        }

        if let Some(session_id) = event.activation_id() {
            self.observe(session_id);
        }
        EventOutcome::Forward
    }

    fn observe(&mut self, session_id: &SessionId) {
        let Some(sequencer) = self.sequencer.as_mut() else {
            return;
        };
        if sequencer.is_finished() {
            return;
        }
        if sequencer.observe_session(session_id.clone()) {
            crate::debug_log!("DRIVER", "New session {}, resumption scheduled", session_id);
            self.resume_pending = true;
        } else {
            crate::debug_trace!("DRIVER", "Session {} already known", session_id);
        }
    }

    /// Run a resumption scheduled by [`handle_event`](Self::handle_event).
    ///
    /// Returns whether the sequencer advanced.
    pub fn run_scheduled<H: SessionHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if !std::mem::take(&mut self.resume_pending) {
            return false;
        }
        let Some(sequencer) = self.sequencer.as_mut() else {
            return false;
        };
        sequencer.resume(host)
    }
}
