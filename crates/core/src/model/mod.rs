pub mod flame_tree;
pub mod sample;

pub use flame_tree::{FlameNode, FlameTree};
pub use sample::{Frame, Sample};
