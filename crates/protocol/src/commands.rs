use serde::{Deserialize, Serialize};

use crate::types::Color;

/// One inline style directive or text run in the rendered output stream.
///
/// The core emits a `Vec<MarkupCommand>` per flame row. Front-ends consume
/// the list sequentially, carrying the active style forward until the next
/// directive changes it — the core never draws to a screen buffer itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkupCommand {
    /// A run of plain text rendered in the active style.
    Text { text: String },

    /// Set the active foreground color.
    SetForeground { color: Color },

    /// Set the active background color.
    SetBackground { color: Color },

    /// Toggle underline highlighting for the selected block.
    Underline { on: bool },

    /// Clear all active style state back to the terminal default.
    Reset,
}

/// A decoded navigation command.
///
/// Input front-ends translate key presses into these; the core has no
/// notion of keyboard scan codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavCommand {
    /// Move the cursor one level deeper (toward leaf frames).
    IncreaseLevel,
    /// Move the cursor one level up (toward the root).
    DecreaseLevel,
    /// Move to the next column on the current level.
    NextColumn,
    /// Move to the previous column on the current level.
    PrevColumn,
    /// End the session.
    Quit,
    /// Show or hide the help footer.
    ToggleHelp,
}
