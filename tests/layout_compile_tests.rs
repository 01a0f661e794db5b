//! Tests for layout conversion and queue compilation through the public API.
//!
//! These cover the pane numbering and instruction shapes hosts rely on:
//! - Pane indices are dense and follow reading order
//! - Each group emits one jump/split per child plus one trailing jump
//! - Mode rotation per nesting depth
//! - Malformed layouts abort compilation

use par_layout::config::{LayoutConfig, LayoutNode, load_layout_file};
use par_layout::layout::{compile, convert, representative};
use par_layout::{ConvertedNode, Instruction, LayoutError, LayoutPlan, Mode};
use std::collections::VecDeque;
use tempfile::tempdir;

use Instruction::{Cmd, Jump, Split};

fn split(mode: Mode, pane: usize) -> Instruction {
    Split { mode, pane }
}

fn plan(json: &str) -> LayoutPlan {
    let config = LayoutConfig::from_json_str(json).unwrap();
    LayoutPlan::build(&config, "tab").unwrap()
}

fn sample_layouts() -> Vec<LayoutNode> {
    vec![
        LayoutNode::from("bash"),
        LayoutNode::from(vec!["a", "b"]),
        LayoutNode::from(vec![
            LayoutNode::from("echo a"),
            LayoutNode::from(vec!["echo b", "echo c"]),
        ]),
        LayoutNode::from(vec![
            LayoutNode::from(vec![LayoutNode::from(vec!["1", "2"]), LayoutNode::from("3")]),
            LayoutNode::from("4"),
            LayoutNode::from(vec![
                LayoutNode::from("5"),
                LayoutNode::from(vec![LayoutNode::from(vec!["6", "7", "8"])]),
            ]),
        ]),
    ]
}

/// Every group in `node`, with whether it is the root
fn groups(node: &ConvertedNode, is_root: bool, out: &mut Vec<(ConvertedNode, bool)>) {
    if let ConvertedNode::Group(children) = node {
        out.push((node.clone(), is_root));
        for child in children {
            groups(child, false, out);
        }
    }
}

#[test]
fn test_pane_count_matches_leaf_count() {
    for layout in sample_layouts() {
        let (tree, panes) = convert(&layout).unwrap();
        assert_eq!(panes.len(), layout.command_count());
        let indices: Vec<_> = panes.iter().map(|p| p.index).collect();
        assert_eq!(indices, (0..panes.len()).collect::<Vec<_>>());
        assert_eq!(tree.pane_indices(), indices);
    }
}

#[test]
fn test_nested_group_layout() {
    let plan = plan(r#"{"layout": ["echo a", ["echo b", "echo c"]], "entry": "tab"}"#);

    let commands: Vec<_> = plan.panes.iter().map(|p| p.command.as_str()).collect();
    assert_eq!(commands, vec!["echo a", "echo b", "echo c"]);

    assert_eq!(
        plan.queue,
        VecDeque::from(vec![
            Jump { pane: 0 },
            Cmd { pane: 0 },
            split(Mode::Tab, 1),
            Cmd { pane: 1 },
            Jump { pane: 1 },
            split(Mode::Horizontal, 2),
            Cmd { pane: 2 },
            Jump { pane: 1 },
            Jump { pane: 0 },
        ])
    );
}

#[test]
fn test_single_command_window_layout() {
    let plan = plan(r#"{"layout": "bash", "entry": "WINDOW"}"#);
    assert_eq!(plan.entry, Mode::Window);
    assert_eq!(plan.queue, VecDeque::from(vec![Jump { pane: 0 }]));
}

#[test]
fn test_two_siblings_default_entry() {
    let plan = plan(r#"{"layout": ["a", "b"]}"#);
    assert_eq!(plan.entry, Mode::Tab);
    assert_eq!(
        plan.queue,
        VecDeque::from(vec![
            Jump { pane: 0 },
            Cmd { pane: 0 },
            split(Mode::Tab, 1),
            Cmd { pane: 1 },
            Jump { pane: 0 },
        ])
    );
}

#[test]
fn test_pane_entry_alias() {
    let plan = plan(r#"{"layout": ["a", ["b", "c"]], "entry": "pane"}"#);
    assert_eq!(plan.entry, Mode::Horizontal);
    assert!(plan.queue.contains(&split(Mode::Horizontal, 1)));
    assert!(plan.queue.contains(&split(Mode::Vertical, 2)));
}

#[test]
fn test_non_root_groups_emit_one_step_per_child_and_one_trailing_jump() {
    for layout in sample_layouts() {
        let (tree, _) = convert(&layout).unwrap();
        let mut all = Vec::new();
        groups(&tree, true, &mut all);

        for (group, is_root) in all.into_iter().filter(|(_, root)| !root) {
            let ConvertedNode::Group(children) = &group else {
                unreachable!();
            };
            let queue = compile(&group, Mode::Horizontal, is_root).unwrap();
            let own_steps = &queue[..children.len() * 2 - 1];

            let selects = own_steps
                .iter()
                .filter(|i| matches!(i, Jump { .. } | Split { .. }))
                .count();
            assert_eq!(selects, children.len());
            assert_eq!(
                queue.last(),
                Some(&Jump {
                    pane: representative(&group).unwrap()
                })
            );
        }
    }
}

#[test]
fn test_depth_rotation_from_window() {
    let plan = plan(r#"{"layout": ["a", ["b", ["c", ["d", "e"]]]], "entry": "window"}"#);
    let modes: Vec<_> = plan
        .queue
        .iter()
        .filter_map(|i| match i {
            Split { mode, .. } => Some(*mode),
            _ => None,
        })
        .collect();
    assert_eq!(
        modes,
        vec![Mode::Window, Mode::Tab, Mode::Horizontal, Mode::Vertical]
    );
}

#[test]
fn test_compile_is_deterministic() {
    for layout in sample_layouts() {
        let config = LayoutConfig::new(layout).with_entry("window");
        let first = LayoutPlan::build(&config, "tab").unwrap();
        let second = LayoutPlan::build(&config, "tab").unwrap();
        assert_eq!(first.queue, second.queue);
    }
}

#[test]
fn test_instructions_only_reference_converted_panes() {
    for layout in sample_layouts() {
        let plan = LayoutPlan::build(&LayoutConfig::new(layout), "tab").unwrap();
        assert!(plan.queue.iter().all(|i| i.pane() < plan.panes.len()));
    }
}

#[test]
fn test_malformed_layout_aborts() {
    let config = LayoutConfig::from_json_str(r#"{"layout": ["a", ["b", 7]]}"#).unwrap();
    let err = LayoutPlan::build(&config, "tab").unwrap_err();
    assert!(matches!(err, LayoutError::MalformedNode { ref path, .. } if path == "/1/1"));
    assert!(err.to_string().contains("found 7"));
}

#[test]
fn test_empty_layout_aborts() {
    let config = LayoutConfig::from_json_str(r#"{"layout": []}"#).unwrap();
    assert!(matches!(
        LayoutPlan::build(&config, "tab"),
        Err(LayoutError::EmptyGroup { .. })
    ));
}

#[test]
fn test_plan_from_yaml_layout_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("dev.yaml");
    std::fs::write(
        &path,
        "entry: tab\nlayout:\n  - nvim .\n  - - cargo watch -x check\n    - cargo test\n",
    )
    .unwrap();

    let config = load_layout_file(&path).unwrap();
    let plan = LayoutPlan::build(&config, "window").unwrap();
    assert_eq!(plan.entry, Mode::Tab);
    assert_eq!(plan.panes.len(), 3);
    assert_eq!(plan.queue.len(), 9);

    let yaml = serde_yaml_ng::to_string(&config).unwrap();
    assert!(yaml.contains("cargo watch -x check"));
}
