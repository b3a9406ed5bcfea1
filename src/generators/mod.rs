//! Grid generators and the generate-then-balance pipeline
//!
//! Each generator builds a fresh grid from dimensions and a palette. Only
//! the random fill and the sandbox shuffle draw from the RNG.

/// Diagonal stripe generator
pub mod diagonal;
/// Block-diagonal "log cabin" generator
pub mod log_cabin;
/// Pattern kinds and the generate-then-balance pipeline
pub mod pipeline;
/// Two-center radial band generator
pub mod radial;
/// Neighbor-exclusion random fill generator
pub mod random_fill;
/// Exact-quota Fisher-Yates shuffle for the sandbox
pub mod shuffle;

pub use diagonal::diagonal;
pub use log_cabin::log_cabin;
pub use pipeline::{PatternKind, generate};
pub use radial::radial_two_center;
pub use random_fill::{RandomFill, random_fill};
pub use shuffle::uniform_shuffle;
