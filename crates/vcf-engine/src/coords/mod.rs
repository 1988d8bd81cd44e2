//! Coordinate types.
//!
//! Canonical space is device pixels, origin top-left, +X right, +Y down.
//! Density-independent inputs are converted before they reach these types.

mod point;

pub use point::Point;
