//! Balanced color-grid pattern designer
//!
//! Fills a fixed-size grid with colored cells using several generators
//! (diagonal stripes, neighbor-exclusion random fill, two-center radial
//! bands, block-diagonal "log cabin" and an exact-quota shuffle), brings the
//! output to an exact per-color count with a greedy balancer, and keeps the
//! results in a pattern store mirrored to durable storage.

#![forbid(unsafe_code)]

/// Color balancing and per-color validation
pub mod algorithm;
/// Designer session and command interface
pub mod designer;
/// Grid generators and the generate-then-balance pipeline
pub mod generators;
/// Input/output operations and error handling
pub mod io;
/// Named colors and display configuration
pub mod palette;
/// Grid storage and quota arithmetic
pub mod spatial;
/// Pattern collection and persistence
pub mod store;

pub use io::error::{DesignerError, Result};
