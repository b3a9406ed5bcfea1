//! Palette of named colors and their display configuration

/// Color handles, palette ordering and hex display values
pub mod color;

pub use color::{Color, Palette};
