use serde::{Deserialize, Serialize};

/// A 24-bit RGB color as carried in the markup stream.
///
/// The core picks colors; front-ends map them onto whatever the terminal
/// supports (true color, a 256-color approximation, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
