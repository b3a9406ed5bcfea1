//! Spatial data structures and quota arithmetic
//!
//! This module contains:
//! - The fixed-size color grid and its persisted form
//! - Per-color quota derivation

/// Grid storage, traversal order and persisted representation
pub mod grid;
/// Per-color quota derivation and the exact-balance check
pub mod quota;

pub use grid::{Grid, GridRecord};
pub use quota::Quota;
