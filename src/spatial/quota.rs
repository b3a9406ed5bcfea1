//! Per-color cell quotas and the exact-balance precondition

use crate::io::error::{DesignerError, Result};

/// Even split of a grid's cells across a palette
///
/// Every color receives `base` cells; the first `extra` colors in palette
/// order receive one more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    /// Cells every color receives
    pub base: usize,
    /// Number of leading colors receiving one extra cell
    pub extra: usize,
}

impl Quota {
    /// Split `cells` across `palette_len` colors
    pub const fn new(cells: usize, palette_len: usize) -> Self {
        if palette_len == 0 {
            return Self { base: 0, extra: 0 };
        }
        Self {
            base: cells / palette_len,
            extra: cells % palette_len,
        }
    }

    /// Number of cells assigned to the color at `index`
    pub const fn for_color(&self, index: usize) -> usize {
        if index < self.extra {
            self.base + 1
        } else {
            self.base
        }
    }
}

/// Check that every color can reach exactly `target` cells
///
/// # Errors
///
/// Returns `Unbalanceable` unless `cells == palette_len * target`
pub fn ensure_balanceable(cells: usize, palette_len: usize, target: usize) -> Result<()> {
    if matches!(palette_len.checked_mul(target), Some(total) if total == cells) {
        Ok(())
    } else {
        Err(DesignerError::Unbalanceable {
            cells,
            palette_size: palette_len,
            target,
        })
    }
}
