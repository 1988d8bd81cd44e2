//! Paint model produced by resource loaders.
//!
//! Scope:
//! - packed ARGB colors as stored in resources
//! - shader descriptors (linear gradients today)
//! - path fill state that consumes them

pub mod color;
pub mod fill;
pub mod shader;

pub use color::ColorInt;
pub use fill::{Fill, FillSource};
pub use shader::{LinearGradientShader, Shader, TileMode};
