//! Proportional width partitioning for flame rows.
//!
//! A parent's columns are divided among its children in proportion to value,
//! floor-rounded, with two corrections: a nonzero-valued child never drops
//! below one column while there is width left to grant it, and no child may
//! exceed the width still unused on its row. Leftover columns after the last
//! sibling stay as trailing padding, so a row always sums to exactly the
//! width it was given.

use crate::model::FlameTree;

/// One laid-out block at a requested level.
///
/// `node` is `None` for padding: width a branch could not fill because of
/// floor-rounding. Padding never counts as a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSpan {
    pub node: Option<usize>,
    pub width: u16,
    pub selected: bool,
}

/// Column widths for the direct children of `node`, heaviest first.
///
/// A zero-valued parent allocates zero width to every child rather than
/// dividing by zero.
pub fn widths(tree: &FlameTree, node: usize, total: u16) -> Vec<(usize, u16)> {
    let kids = tree.sorted_children(node);
    let parent_value = tree.node(node).value;
    if parent_value == 0 {
        return kids.into_iter().map(|k| (k, 0)).collect();
    }

    let mut remaining = total;
    let mut out = Vec::with_capacity(kids.len());
    for kid in kids {
        let value = tree.node(kid).value;
        let mut w = (u128::from(value) * u128::from(total) / u128::from(parent_value)) as u16;
        if w == 0 && value > 0 {
            w = 1;
        }
        let w = w.min(remaining);
        remaining -= w;
        out.push((kid, w));
    }
    out
}

/// Spans for every node at `level`, left to right, recursively subdividing
/// each parent's width among its children.
///
/// `selected_column` picks which column (counting real nodes only) gets the
/// `selected` flag; the offset is threaded down the recursion as "target
/// index minus nodes already consumed" and fires when it reaches zero.
pub fn level_spans(
    tree: &FlameTree,
    level: usize,
    total: u16,
    selected_column: Option<usize>,
) -> Vec<LevelSpan> {
    let offset = selected_column.map_or(-1, |c| c as i64);
    let mut spans = Vec::new();
    descend(tree, tree.root(), level, total, offset, &mut spans);
    spans
}

fn descend(
    tree: &FlameTree,
    node: usize,
    remaining_levels: usize,
    width: u16,
    select_offset: i64,
    out: &mut Vec<LevelSpan>,
) -> usize {
    if remaining_levels == 0 {
        out.push(LevelSpan {
            node: Some(node),
            width,
            selected: select_offset == 0,
        });
        return 1;
    }

    let mut consumed = 0usize;
    let mut used = 0u16;
    for (child, w) in widths(tree, node, width) {
        consumed += descend(
            tree,
            child,
            remaining_levels - 1,
            w,
            select_offset - consumed as i64,
            out,
        );
        used += w;
    }
    if used < width {
        out.push(LevelSpan {
            node: None,
            width: width - used,
            selected: false,
        });
    }
    consumed
}
