use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::sample::Sample;

/// Arena index of the root node.
pub const ROOT: usize = 0;

/// A node in the aggregated call tree. Samples whose stacks share a prefix
/// merge into the same chain of nodes; distinct call paths reaching the same
/// frame name at the same depth merge into one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameNode {
    pub name: String,
    /// Accumulated value of every sample whose stack passes through here.
    pub value: u64,
    /// Arena index of the parent; `None` only for the root.
    pub parent: Option<usize>,
    /// Arena indices of children, in insertion order. Names are unique
    /// within one parent.
    pub children: Vec<usize>,
}

/// An aggregated, value-weighted call tree built from profiling samples.
///
/// Nodes live in a single arena and refer to each other by index, so the
/// parent back-reference carries no ownership. The tree is append-only
/// during `build` and read-only afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameTree {
    nodes: Vec<FlameNode>,
}

impl FlameTree {
    /// Aggregate samples into a tree. Never fails: a sample with an empty
    /// stack contributes only to the root value, and unresolved frames fall
    /// back to their hexadecimal address label.
    pub fn build(samples: &[Sample]) -> Self {
        let mut nodes = vec![FlameNode {
            name: "root".to_string(),
            value: 0,
            parent: None,
            children: Vec::new(),
        }];
        // (parent, child name) -> child index; only needed while building.
        let mut index: HashMap<(usize, String), usize> = HashMap::new();

        for sample in samples {
            nodes[ROOT].value += sample.value;
            let mut current = ROOT;

            // Stacks are leaf-first; walk from the outermost caller down so
            // the root represents "all samples" and depth grows toward
            // leaf frames.
            for frame in sample.frames.iter().rev() {
                let name = frame.resolved_name();
                let child = match index.get(&(current, name.clone())) {
                    Some(&id) => id,
                    None => {
                        let id = nodes.len();
                        nodes.push(FlameNode {
                            name: name.clone(),
                            value: 0,
                            parent: Some(current),
                            children: Vec::new(),
                        });
                        nodes[current].children.push(id);
                        index.insert((current, name), id);
                        id
                    }
                };
                nodes[child].value += sample.value;
                current = child;
            }
        }

        Self { nodes }
    }

    pub fn root(&self) -> usize {
        ROOT
    }

    pub fn node(&self, id: usize) -> &FlameNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id` ordered by descending value. The sort is stable, so
    /// equal values keep insertion order and repeated calls agree exactly.
    pub fn sorted_children(&self, id: usize) -> Vec<usize> {
        let mut kids = self.nodes[id].children.clone();
        kids.sort_by(|a, b| self.nodes[*b].value.cmp(&self.nodes[*a].value));
        kids
    }

    /// Length of the longest root-to-leaf chain; 0 for a childless root.
    pub fn max_depth(&self) -> usize {
        self.depth_below(ROOT)
    }

    fn depth_below(&self, id: usize) -> usize {
        self.nodes[id]
            .children
            .iter()
            .map(|&child| 1 + self.depth_below(child))
            .max()
            .unwrap_or(0)
    }

    /// All nodes at `level` in left-to-right layout order (level 0 = root).
    /// This is the column enumeration the cursor indexes into.
    pub fn nodes_at_level(&self, level: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_level(ROOT, level, &mut out);
        out
    }

    fn collect_level(&self, id: usize, remaining: usize, out: &mut Vec<usize>) {
        if remaining == 0 {
            out.push(id);
            return;
        }
        for child in self.sorted_children(id) {
            self.collect_level(child, remaining - 1, out);
        }
    }

    pub fn count_at_level(&self, level: usize) -> usize {
        self.nodes_at_level(level).len()
    }

    /// Percentage of the immediate parent's value; `None` at the root.
    pub fn percent_of_parent(&self, id: usize) -> Option<f64> {
        let parent = self.nodes[id].parent?;
        let parent_value = self.nodes[parent].value;
        if parent_value == 0 {
            return Some(0.0);
        }
        Some(self.nodes[id].value as f64 / parent_value as f64 * 100.0)
    }

    /// Percentage of the root's total value; `None` when the root value is 0.
    pub fn percent_of_total(&self, id: usize) -> Option<f64> {
        let total = self.nodes[ROOT].value;
        if total == 0 {
            return None;
        }
        Some(self.nodes[id].value as f64 / total as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Frame;

    fn named(symbol: &str) -> Frame {
        Frame {
            address: 0,
            symbol: Some(symbol.to_string()),
        }
    }

    fn sample(stack_root_first: &[&str], value: u64) -> Sample {
        Sample {
            frames: stack_root_first.iter().rev().map(|s| named(s)).collect(),
            value,
        }
    }

    /// Every non-leaf node's value must equal the sum of its children.
    fn assert_conserved(tree: &FlameTree, id: usize) {
        let node = tree.node(id);
        if !node.children.is_empty() {
            let child_sum: u64 = node.children.iter().map(|&c| tree.node(c).value).sum();
            assert_eq!(node.value, child_sum, "leaked weight at {}", node.name);
        }
        for &child in &node.children {
            assert_conserved(tree, child);
        }
    }

    #[test]
    fn merges_shared_prefixes() {
        let samples = vec![sample(&["A", "B"], 10), sample(&["A", "C"], 5)];
        let tree = FlameTree::build(&samples);

        assert_eq!(tree.node(tree.root()).value, 15);
        let a = tree.node(tree.root()).children[0];
        assert_eq!(tree.node(a).name, "A");
        assert_eq!(tree.node(a).value, 15);

        let kids = tree.sorted_children(a);
        assert_eq!(kids.len(), 2);
        assert_eq!(tree.node(kids[0]).name, "B");
        assert_eq!(tree.node(kids[0]).value, 10);
        assert_eq!(tree.node(kids[1]).name, "C");
        assert_eq!(tree.node(kids[1]).value, 5);

        assert_conserved(&tree, tree.root());
    }

    #[test]
    fn empty_stack_contributes_only_to_root() {
        let samples = vec![Sample {
            frames: vec![],
            value: 7,
        }];
        let tree = FlameTree::build(&samples);
        assert_eq!(tree.node(tree.root()).value, 7);
        assert!(tree.node(tree.root()).children.is_empty());
        assert_eq!(tree.max_depth(), 0);
    }

    #[test]
    fn unresolved_frames_merge_by_address() {
        let unresolved = Frame {
            address: 0x1000,
            symbol: None,
        };
        let samples = vec![
            Sample {
                frames: vec![unresolved.clone()],
                value: 3,
            },
            Sample {
                frames: vec![unresolved],
                value: 4,
            },
        ];
        let tree = FlameTree::build(&samples);
        let kids = tree.sorted_children(tree.root());
        assert_eq!(kids.len(), 1);
        assert_eq!(tree.node(kids[0]).name, "0x1000");
        assert_eq!(tree.node(kids[0]).value, 7);
    }

    #[test]
    fn same_name_different_paths_stay_separate() {
        // "work" under A and "work" under B are different nodes.
        let samples = vec![sample(&["A", "work"], 1), sample(&["B", "work"], 2)];
        let tree = FlameTree::build(&samples);
        assert_eq!(tree.count_at_level(1), 2);
        assert_eq!(tree.count_at_level(2), 2);
        assert_conserved(&tree, tree.root());
    }

    #[test]
    fn max_depth_is_longest_chain() {
        let samples = vec![sample(&["A"], 1), sample(&["A", "B", "C"], 1)];
        let tree = FlameTree::build(&samples);
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn level_enumeration_orders_by_value_per_parent() {
        let samples = vec![
            sample(&["A", "x"], 1),
            sample(&["A", "y"], 9),
            sample(&["B", "z"], 5),
        ];
        let tree = FlameTree::build(&samples);

        // Level 1: A (10) before B (5).
        let level1: Vec<&str> = tree
            .nodes_at_level(1)
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(level1, vec!["A", "B"]);

        // Level 2: A's children heaviest-first, then B's.
        let level2: Vec<&str> = tree
            .nodes_at_level(2)
            .iter()
            .map(|&id| tree.node(id).name.as_str())
            .collect();
        assert_eq!(level2, vec!["y", "x", "z"]);
    }

    #[test]
    fn percentages() {
        let samples = vec![sample(&["A", "B"], 10), sample(&["A", "C"], 30)];
        let tree = FlameTree::build(&samples);
        let a = tree.nodes_at_level(1)[0];
        let c = tree.nodes_at_level(2)[0];

        assert_eq!(tree.percent_of_parent(tree.root()), None);
        assert_eq!(tree.percent_of_parent(a), Some(100.0));
        assert_eq!(tree.percent_of_parent(c), Some(75.0));
        assert_eq!(tree.percent_of_total(c), Some(75.0));

        let empty = FlameTree::build(&[]);
        assert_eq!(tree.percent_of_total(tree.root()), Some(100.0));
        assert_eq!(empty.percent_of_total(empty.root()), None);
    }
}
