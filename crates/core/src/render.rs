//! Markup-stream renderer: flame rows and the detail panel.
//!
//! Output is plain text interleaved with inline style directives; an
//! external front-end turns the stream into screen cells.

use flamebar_protocol::{Color, MarkupCommand};

use crate::layout;
use crate::model::FlameTree;
use crate::nav::Cursor;

/// Fixed foreground palette. Every entry contrasts with the warm background
/// family produced by `colors_for`.
const FOREGROUNDS: [Color; 3] = [
    Color {
        r: 255,
        g: 255,
        b: 255,
    },
    Color {
        r: 236,
        g: 236,
        b: 220,
    },
    Color {
        r: 255,
        g: 244,
        b: 200,
    },
];

fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for b in s.as_bytes() {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Deterministic per-name block colors: a warm background derived from a
/// hash of the name, and a foreground picked from a small fixed palette
/// keyed by the same hash. The same function name always gets the same
/// colors within a session.
pub fn colors_for(name: &str) -> (Color, Color) {
    let h = fnv1a(name);
    let bg = Color {
        r: 160 + (h & 0x5f) as u8,
        g: ((h >> 8) & 0x7f) as u8,
        b: ((h >> 16) & 0x3f) as u8,
    };
    let fg = FOREGROUNDS[((h >> 24) % FOREGROUNDS.len() as u64) as usize];
    (bg, fg)
}

/// Truncate a label to fit a block of `width` columns.
///
/// Wide blocks keep `width - 5` characters plus an ellipsis; blocks of 3 or
/// 4 columns keep `width - 2` characters with no ellipsis; anything
/// narrower renders as an unlabeled colored block.
fn block_label(name: &str, width: u16) -> String {
    let width = width as usize;
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= width {
        return name.to_string();
    }
    if width >= 5 {
        let mut kept: String = chars[..width - 5].iter().collect();
        kept.push('…');
        kept
    } else if width >= 3 {
        chars[..width - 2].iter().collect()
    } else {
        String::new()
    }
}

/// Render one level of the tree as a fixed-width row of colored blocks.
///
/// `selected_column` marks the block to wrap in underline toggles, or
/// `None` when this row carries no highlight.
pub fn render_row(
    tree: &FlameTree,
    level: usize,
    total_width: u16,
    selected_column: Option<usize>,
) -> Vec<MarkupCommand> {
    let spans = layout::level_spans(tree, level, total_width, selected_column);
    let mut out = Vec::new();

    for span in spans {
        if span.width == 0 {
            continue;
        }
        let Some(id) = span.node else {
            // Rounding leftover: plain blanks in the default style.
            out.push(MarkupCommand::Text {
                text: " ".repeat(span.width as usize),
            });
            continue;
        };

        let name = &tree.node(id).name;
        let (bg, fg) = colors_for(name);
        out.push(MarkupCommand::SetBackground { color: bg });
        out.push(MarkupCommand::SetForeground { color: fg });
        if span.selected {
            out.push(MarkupCommand::Underline { on: true });
        }
        let label = block_label(name, span.width);
        out.push(MarkupCommand::Text {
            text: format!("{label:^width$}", width = span.width as usize),
        });
        if span.selected {
            out.push(MarkupCommand::Underline { on: false });
        }
        out.push(MarkupCommand::Reset);
    }

    out
}

/// Render the whole graph, one row per depth from 1 to `max_depth`.
/// Only the cursor's level carries the highlight.
pub fn render_flame(tree: &FlameTree, cursor: &Cursor, total_width: u16) -> Vec<Vec<MarkupCommand>> {
    (1..=tree.max_depth())
        .map(|level| {
            let selected = (level == cursor.level).then_some(cursor.column);
            render_row(tree, level, total_width, selected)
        })
        .collect()
}

/// Detail panel text for the node under the cursor.
pub fn describe(tree: &FlameTree, id: usize) -> String {
    let node = tree.node(id);
    let mut text = format!("Function: {}\nValue: {}\n", node.name, node.value);
    if let Some(pct) = tree.percent_of_parent(id) {
        text.push_str(&format!("Percentage of parent: {pct:.2}%\n"));
    }
    if let Some(pct) = tree.percent_of_total(id) {
        text.push_str(&format!("Percentage of total: {pct:.2}%\n"));
    }
    text.push_str(&format!("Children: {}\n", node.children.len()));
    text
}
