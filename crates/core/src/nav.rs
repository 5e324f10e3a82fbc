//! Level/column cursor over an immutable flame tree.

use flamebar_protocol::NavCommand;

use crate::model::FlameTree;
use crate::model::flame_tree::ROOT;

/// Cursor state: a depth in the tree and a column within that depth.
/// Starts at `(0, 0)`, the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub level: usize,
    pub column: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one navigation command against the tree's bounds.
    ///
    /// Moves that would leave the tree are silently ignored; level changes
    /// reset the column to the leftmost node. Returns whether the cursor
    /// changed. `Quit` and `ToggleHelp` are not cursor moves and never
    /// change it.
    pub fn apply(&mut self, cmd: NavCommand, tree: &FlameTree) -> bool {
        match cmd {
            NavCommand::IncreaseLevel if self.level < tree.max_depth() => {
                self.level += 1;
                self.column = 0;
                true
            }
            NavCommand::DecreaseLevel if self.level > 0 => {
                self.level -= 1;
                self.column = 0;
                true
            }
            NavCommand::NextColumn if self.column + 1 < tree.count_at_level(self.level) => {
                self.column += 1;
                true
            }
            NavCommand::PrevColumn if self.column > 0 => {
                self.column -= 1;
                true
            }
            _ => false,
        }
    }

    /// The node under the cursor. The column is clamped to the last node at
    /// the level in case the enumeration is shorter than expected.
    pub fn selected_node(&self, tree: &FlameTree) -> usize {
        let nodes = tree.nodes_at_level(self.level);
        let index = self.column.min(nodes.len().saturating_sub(1));
        nodes.get(index).copied().unwrap_or(ROOT)
    }
}
