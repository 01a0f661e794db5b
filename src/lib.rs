//! par-layout: build multi-pane terminal workspaces from a declarative
//! layout tree.
//!
//! A layout such as `["htop", ["cargo watch", "cargo test"]]` is compiled
//! into a queue of split/jump/cmd instructions, which a sequencer then plays
//! against a session host, one split at a time, waiting for the host to
//! report each new session before moving on.
//!
//! - `layout`: tree conversion, modes and queue compilation
//! - `sequencer`: the state machine executing a compiled queue
//! - `host`: the contract a session host implements
//! - `driver`: wires a host's event stream to the live sequencer
//! - `runner`: tokio event pump around the driver
//! - `debug`: category-tagged debug log file

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod driver;
pub mod error;
pub mod host;
pub mod layout;
pub mod runner;
pub mod sequencer;

pub use driver::{EventOutcome, LayoutDriver};
pub use error::LayoutError;
pub use host::{HostEvent, SessionHost, SessionId, SessionRequest, SplitHint};
pub use layout::{ConvertedNode, Instruction, LayoutPlan, Mode, Pane, PaneIndex, PaneRegistry};
pub use runner::{run_event_loop, spawn_event_loop};
pub use sequencer::{Sequencer, SequencerOptions, SequencerState};

pub use par_layout_config as config;
