//! Tree conversion: command leaves become indexed panes.
//!
//! The walk is strict pre-order with children left to right, so pane
//! indices follow the reading order of the layout. The pane registry is an
//! explicit accumulator threaded through every call and handed back to the
//! caller together with the converted tree.

use super::types::{ConvertedNode, PaneRegistry};
use crate::error::{LayoutError, format_path};
use par_layout_config::LayoutNode;

/// Convert a layout tree, allocating panes into a fresh registry.
pub fn convert(node: &LayoutNode) -> Result<(ConvertedNode, PaneRegistry), LayoutError> {
    convert_into(node, PaneRegistry::new())
}

/// Convert a layout tree, allocating panes after those already in `registry`.
pub fn convert_into(
    node: &LayoutNode,
    registry: PaneRegistry,
) -> Result<(ConvertedNode, PaneRegistry), LayoutError> {
    let mut path = Vec::new();
    convert_node(node, &mut path, registry)
}

fn convert_node(
    node: &LayoutNode,
    path: &mut Vec<usize>,
    mut registry: PaneRegistry,
) -> Result<(ConvertedNode, PaneRegistry), LayoutError> {
    match node {
        LayoutNode::Command(command) => {
            let index = registry.allocate(command.as_str());
            crate::debug_trace!("LAYOUT", "Pane {} at {}: {}", index, format_path(path), command);
            Ok((ConvertedNode::Pane(index), registry))
        }
        LayoutNode::Group(children) => {
            if children.is_empty() {
                let path = format_path(path);
                log::error!("Empty layout group at {}", path);
                return Err(LayoutError::EmptyGroup { path });
            }
            let mut converted = Vec::with_capacity(children.len());
            for (i, child) in children.iter().enumerate() {
                path.push(i);
                let (child_node, next_registry) = convert_node(child, path, registry)?;
                path.pop();
                converted.push(child_node);
                registry = next_registry;
            }
            Ok((ConvertedNode::Group(converted), registry))
        }
        LayoutNode::Invalid(value) => {
            let path = format_path(path);
            log::error!("Wrong layout node type at {}: {}", path, value);
            Err(LayoutError::MalformedNode {
                path,
                found: value.to_string(),
            })
        }
    }
}
