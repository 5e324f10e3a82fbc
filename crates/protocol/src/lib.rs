pub mod commands;
pub mod types;

pub use commands::{MarkupCommand, NavCommand};
pub use types::Color;
