//! Sequencer: executes a compiled layout against an asynchronous host.
//!
//! `Cmd` and `Jump` instructions complete immediately. A `Split` only asks
//! the host for a new session; the sequencer then stops in
//! [`SequencerState::AwaitingSession`] until whoever owns it observes a new
//! session id and calls [`Sequencer::resume`]. Exactly one split is ever in
//! flight.
//!
//! The host gives no handle back for a requested session, so panes are
//! bound lazily: at each step the pane the previous instruction moved into
//! is bound to whatever session the host reports as active.

use crate::host::{SessionHost, SessionId, SessionRequest};
use crate::layout::{Instruction, LayoutPlan, Mode, PaneIndex, PaneRegistry};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

/// Execution state of a [`Sequencer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    /// Not started, or every instruction has run
    Idle,
    /// Executing instructions
    Advancing,
    /// A split was requested; waiting for the host to report the session
    AwaitingSession,
}

/// Behavior switches for a [`Sequencer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequencerOptions {
    /// Prefix commands with a space to keep them out of shell history
    pub hide_from_history: bool,
}

/// Drives one compiled layout to completion
#[derive(Debug)]
pub struct Sequencer {
    queue: VecDeque<Instruction>,
    panes: PaneRegistry,
    cwd: PathBuf,
    options: SequencerOptions,
    state: SequencerState,
    /// Pane the last instruction moved into; the host is showing it
    last_index: PaneIndex,
    /// Host's active session when the last instruction ran
    last_uid: Option<SessionId>,
    /// Every session id this sequencer has already reacted to
    known_session_ids: HashSet<SessionId>,
}

impl Sequencer {
    /// Create an idle sequencer for `plan`; new sessions start in `cwd`.
    pub fn new(plan: LayoutPlan, cwd: impl Into<PathBuf>, options: SequencerOptions) -> Self {
        Self {
            queue: plan.queue,
            panes: plan.panes,
            cwd: cwd.into(),
            options,
            state: SequencerState::Idle,
            last_index: 0,
            last_uid: None,
            known_session_ids: HashSet::new(),
        }
    }

    /// Current execution state
    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Check if every instruction has run
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty() && self.state == SequencerState::Idle
    }

    /// Instructions not yet executed
    pub fn remaining(&self) -> &VecDeque<Instruction> {
        &self.queue
    }

    /// Panes with whatever sessions have been bound so far
    pub fn panes(&self) -> &PaneRegistry {
        &self.panes
    }

    /// Working directory for new sessions
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Pane the most recent instruction targeted
    pub fn last_index(&self) -> PaneIndex {
        self.last_index
    }

    /// Active session when the most recent instruction ran
    pub fn last_uid(&self) -> Option<&SessionId> {
        self.last_uid.as_ref()
    }

    /// Record a session id reported by the host.
    ///
    /// Returns `true` the first time an id is seen. Repeated notifications
    /// for the same session return `false` and must not resume anything.
    pub fn observe_session(&mut self, session_id: SessionId) -> bool {
        self.known_session_ids.insert(session_id)
    }

    /// Check if a session id was already observed
    pub fn knows_session(&self, session_id: &SessionId) -> bool {
        self.known_session_ids.contains(session_id)
    }

    /// Continue after the host reported the session for the pending split.
    ///
    /// Ignored unless a split is actually pending. Returns whether the
    /// sequencer advanced.
    pub fn resume<H: SessionHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.state != SequencerState::AwaitingSession {
            crate::debug_log!(
                "SEQ",
                "Resume ignored in state {:?} ({} instructions left)",
                self.state,
                self.queue.len()
            );
            return false;
        }
        self.run(host);
        true
    }

    /// Execute instructions until a split suspends execution or the queue
    /// is empty.
    ///
    /// Does nothing while a split is pending; only [`resume`](Self::resume)
    /// continues past a split.
    pub fn advance<H: SessionHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == SequencerState::AwaitingSession {
            crate::debug_log!(
                "SEQ",
                "Advance ignored: split pending ({} instructions left)",
                self.queue.len()
            );
            return;
        }
        self.run(host);
    }

    fn run<H: SessionHost + ?Sized>(&mut self, host: &mut H) {
        self.state = SequencerState::Advancing;

        while let Some(instruction) = self.queue.pop_front() {
            let active = host.active_session_id();
            self.bind_active_pane(active.as_ref());

            self.last_index = instruction.pane();
            self.last_uid = active.clone();

            crate::debug_log!(
                "SEQ",
                "{:?} (active={:?}, {} left)",
                instruction,
                active,
                self.queue.len()
            );

            match instruction {
                Instruction::Split { mode, .. } => {
                    self.request_split(host, mode);
                    self.state = SequencerState::AwaitingSession;
                    return;
                }
                Instruction::Cmd { pane } => self.run_command(host, pane, active.as_ref()),
                Instruction::Jump { pane } => self.focus_pane(host, pane),
            }
        }

        self.state = SequencerState::Idle;
        log::info!("Layout complete ({} panes)", self.panes.len());
    }

    /// The host is showing the pane last moved into; remember its session.
    fn bind_active_pane(&mut self, active: Option<&SessionId>) {
        let Some(active) = active else {
            return;
        };
        if let Some(pane) = self.panes.get_mut(self.last_index)
            && pane.bind_session(active.clone())
        {
            crate::debug_log!("SEQ", "Pane {} bound to session {}", pane.index, active);
        }
    }

    fn request_split<H: SessionHost + ?Sized>(&self, host: &mut H, mode: Mode) {
        host.request_session(SessionRequest {
            cwd: self.cwd.clone(),
            split: mode.split_hint(),
        });
    }

    fn run_command<H: SessionHost + ?Sized>(
        &self,
        host: &mut H,
        pane: PaneIndex,
        active: Option<&SessionId>,
    ) {
        let Some(pane) = self.panes.get(pane) else {
            log::warn!("Layout instruction targets unknown pane {}", pane);
            return;
        };
        let Some(active) = active else {
            log::warn!(
                "No active session to run pane {} command: {}",
                pane.index,
                pane.command
            );
            return;
        };
        let prefix = if self.options.hide_from_history { " " } else { "" };
        host.send_input(active, &format!("{}{}\n", prefix, pane.command));
    }

    /// Focus the pane's session; panes without one yet are reached later.
    fn focus_pane<H: SessionHost + ?Sized>(&self, host: &mut H, pane: PaneIndex) {
        match self.panes.get(pane).and_then(|p| p.session_id()) {
            Some(session_id) => host.set_active_session(session_id),
            None => crate::debug_trace!("SEQ", "Jump to pane {} skipped: no session yet", pane),
        }
    }
}
