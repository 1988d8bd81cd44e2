//! vcf engine crate.
//!
//! Owns the value types that gradient resources are turned into (points,
//! packed colors, shaders) plus the process-wide logging setup.

pub mod coords;
pub mod logging;
pub mod paint;
