//! Panes and the converted layout tree.

use crate::host::SessionId;

/// Stable identity of a pane: its position in left-to-right discovery order
pub type PaneIndex = usize;

/// One command leaf of a layout, bound to a host session once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    /// Command to run in the pane's session
    pub command: String,
    /// Discovery index, dense in `0..N`
    pub index: PaneIndex,
    /// Session showing this pane (unset until the sequencer learns it)
    session_id: Option<SessionId>,
}

impl Pane {
    /// Create a pane with no session yet
    pub fn new(command: impl Into<String>, index: PaneIndex) -> Self {
        Self {
            command: command.into(),
            index,
            session_id: None,
        }
    }

    /// Session bound to this pane, if known
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Bind this pane to a session.
    ///
    /// A pane is bound at most once; later calls are ignored and return
    /// `false`.
    pub fn bind_session(&mut self, session_id: SessionId) -> bool {
        if self.session_id.is_some() {
            return false;
        }
        self.session_id = Some(session_id);
        true
    }
}

/// Every pane discovered in a layout, indexed by [`PaneIndex`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneRegistry {
    panes: Vec<Pane>,
}

impl PaneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next pane for `command` and return its index
    pub fn allocate(&mut self, command: impl Into<String>) -> PaneIndex {
        let index = self.panes.len();
        self.panes.push(Pane::new(command, index));
        index
    }

    /// Get a pane by index
    pub fn get(&self, index: PaneIndex) -> Option<&Pane> {
        self.panes.get(index)
    }

    /// Get a pane by index for binding
    pub fn get_mut(&mut self, index: PaneIndex) -> Option<&mut Pane> {
        self.panes.get_mut(index)
    }

    /// Number of panes
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    /// Check if no panes were discovered
    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    /// Iterate panes in index order
    pub fn iter(&self) -> impl Iterator<Item = &Pane> {
        self.panes.iter()
    }
}

/// A layout tree whose leaves have been replaced by pane indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertedNode {
    /// A leaf, referring to a pane in the registry
    Pane(PaneIndex),
    /// An ordered group of nodes
    Group(Vec<ConvertedNode>),
}

impl ConvertedNode {
    /// Pane indices of all leaves, left to right
    pub fn pane_indices(&self) -> Vec<PaneIndex> {
        let mut indices = Vec::new();
        Self::collect_pane_indices(self, &mut indices);
        indices
    }

    fn collect_pane_indices(node: &ConvertedNode, indices: &mut Vec<PaneIndex>) {
        match node {
            ConvertedNode::Pane(index) => indices.push(*index),
            ConvertedNode::Group(children) => {
                for child in children {
                    Self::collect_pane_indices(child, indices);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_session_once() {
        let mut pane = Pane::new("htop", 0);
        assert!(pane.session_id().is_none());
        assert!(pane.bind_session(SessionId::from("s0")));
        assert!(!pane.bind_session(SessionId::from("s1")));
        assert_eq!(pane.session_id(), Some(&SessionId::from("s0")));
    }

    #[test]
    fn test_registry_allocates_dense_indices() {
        let mut registry = PaneRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.allocate("a"), 0);
        assert_eq!(registry.allocate("b"), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).map(|p| p.command.as_str()), Some("b"));
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn test_pane_indices_left_to_right() {
        let tree = ConvertedNode::Group(vec![
            ConvertedNode::Group(vec![ConvertedNode::Pane(0), ConvertedNode::Pane(1)]),
            ConvertedNode::Pane(2),
        ]);
        assert_eq!(tree.pane_indices(), vec![0, 1, 2]);
    }
}
