pub mod layout;
pub mod model;
pub mod nav;
pub mod parsers;
pub mod render;
