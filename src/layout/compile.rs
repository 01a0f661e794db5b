//! Queue compilation: a converted tree becomes a flat instruction list.
//!
//! At each group the compiler first emits the instructions that create
//! (or select) every direct child, then the instructions of each child
//! group one mode deeper, then a jump back to the group's representative
//! pane so the parent's next split starts from a known session.

use super::mode::Mode;
use super::types::{ConvertedNode, PaneIndex};
use crate::error::{LayoutError, format_path};
use serde::Serialize;

/// One step for the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Instruction {
    /// Split a new session off the active one; it will show `pane`
    Split { mode: Mode, pane: PaneIndex },
    /// Focus the session showing `pane`, if it exists yet
    Jump { pane: PaneIndex },
    /// Run `pane`'s command in the active session
    Cmd { pane: PaneIndex },
}

impl Instruction {
    /// The pane this instruction targets
    pub fn pane(&self) -> PaneIndex {
        match self {
            Instruction::Split { pane, .. }
            | Instruction::Jump { pane }
            | Instruction::Cmd { pane } => *pane,
        }
    }

    /// Check if executing this instruction suspends the sequencer
    pub fn is_split(&self) -> bool {
        matches!(self, Instruction::Split { .. })
    }
}

/// Leftmost pane of a subtree: follow the first child until a pane is hit.
///
/// Returns `None` only for a tree containing an empty group on its left
/// spine, which the converter never produces.
pub fn representative(node: &ConvertedNode) -> Option<PaneIndex> {
    let mut node = node;
    loop {
        match node {
            ConvertedNode::Pane(index) => return Some(*index),
            ConvertedNode::Group(children) => node = children.first()?,
        }
    }
}

/// Compile a converted tree into an instruction list.
///
/// `is_root` marks the outermost call: only there does the first child get
/// an explicit `Cmd`, since in nested groups the first child's session was
/// created, and its command run, one level up.
pub fn compile(
    tree: &ConvertedNode,
    mode: Mode,
    is_root: bool,
) -> Result<Vec<Instruction>, LayoutError> {
    let mut queue = Vec::new();
    let mut path = Vec::new();
    compile_node(tree, mode, is_root, &mut path, &mut queue)?;
    Ok(queue)
}

fn compile_node(
    node: &ConvertedNode,
    mode: Mode,
    is_root: bool,
    path: &mut Vec<usize>,
    queue: &mut Vec<Instruction>,
) -> Result<(), LayoutError> {
    let children = match node {
        ConvertedNode::Pane(index) => {
            queue.push(Instruction::Jump { pane: *index });
            return Ok(());
        }
        ConvertedNode::Group(children) => children,
    };

    let anchor = anchor_of(node, path)?;

    for (i, child) in children.iter().enumerate() {
        path.push(i);
        let target = anchor_of(child, path)?;
        path.pop();

        if i == 0 {
            queue.push(Instruction::Jump { pane: target });
        } else {
            queue.push(Instruction::Split { mode, pane: target });
        }
        if is_root || i > 0 {
            queue.push(Instruction::Cmd { pane: target });
        }
    }

    // Leaf children were fully handled above; only groups recurse
    let inner = mode.next();
    for (i, child) in children.iter().enumerate() {
        if let ConvertedNode::Group(_) = child {
            path.push(i);
            compile_node(child, inner, false, path, queue)?;
            path.pop();
        }
    }

    queue.push(Instruction::Jump { pane: anchor });
    Ok(())
}

fn anchor_of(node: &ConvertedNode, path: &[usize]) -> Result<PaneIndex, LayoutError> {
    representative(node).ok_or_else(|| LayoutError::EmptyGroup {
        path: format_path(path),
    })
}
