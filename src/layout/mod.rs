//! Layout compilation
//!
//! Turns a declarative layout tree into a flat instruction queue:
//! - `convert`: command leaves become indexed panes
//! - `compile`: the converted tree becomes split/jump/cmd instructions
//! - `mode`: grouping modes and how they rotate with depth
//! - `types`: panes, the pane registry and the converted tree

pub mod compile;
pub mod convert;
pub mod mode;
pub mod types;

pub use compile::{Instruction, compile, representative};
pub use convert::{convert, convert_into};
pub use mode::Mode;
pub use types::{ConvertedNode, Pane, PaneIndex, PaneRegistry};

use crate::error::LayoutError;
use par_layout_config::LayoutConfig;
use std::collections::VecDeque;

/// A compiled layout, ready to be handed to a sequencer
#[derive(Debug, Clone)]
pub struct LayoutPlan {
    /// Mode of the outermost level
    pub entry: Mode,
    /// Every pane of the layout, in discovery order
    pub panes: PaneRegistry,
    /// Instructions in execution order
    pub queue: VecDeque<Instruction>,
}

impl LayoutPlan {
    /// Convert and compile a layout config.
    ///
    /// `default_entry` is used when the config names no entry mode. Any
    /// error aborts the whole plan.
    pub fn build(config: &LayoutConfig, default_entry: &str) -> Result<Self, LayoutError> {
        let entry = Mode::parse(config.entry.as_deref().unwrap_or(default_entry))?;
        let (tree, panes) = convert(&config.layout)?;
        let queue: VecDeque<Instruction> = compile(&tree, entry, true)?.into();

        crate::debug_info!(
            "LAYOUT",
            "Compiled {} panes into {} instructions (entry={})",
            panes.len(),
            queue.len(),
            entry
        );
        if crate::debug::is_enabled(crate::debug::DebugLevel::Trace) {
            let rendered = serde_json::to_string(&queue).unwrap_or_default();
            crate::debug_trace!("LAYOUT", "Queue: {}", rendered);
        }

        Ok(Self {
            entry,
            panes,
            queue,
        })
    }
}
