//! Fill colors.

mod color;

pub use color::Color;
