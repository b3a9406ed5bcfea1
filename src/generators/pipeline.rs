use std::fmt;

use rand::Rng;

use crate::algorithm::balance_colors;
use crate::designer::DesignerConfig;
use crate::generators::{diagonal, log_cabin, radial_two_center, random_fill};
use crate::io::error::Result;
use crate::palette::Palette;
use crate::spatial::Grid;

/// The four algorithmic patterns kept in every collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Diagonal stripes
    Diagonal,
    /// Local-exclusion random fill
    RandomFill,
    /// Two-center radial bands
    BugEye,
    /// Block-diagonal layout
    LogCabin,
}

impl PatternKind {
    /// Every kind in display order
    pub const ALL: [Self; 4] = [Self::Diagonal, Self::RandomFill, Self::BugEye, Self::LogCabin];

    /// Well-known pattern id of this kind
    pub const fn id(self) -> &'static str {
        match self {
            Self::Diagonal => "patternA",
            Self::RandomFill => "patternB",
            Self::BugEye => "patternC",
            Self::LogCabin => "patternD",
        }
    }

    /// Human-readable name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diagonal => "Diagonal",
            Self::RandomFill => "Random",
            Self::BugEye => "Bug Eye",
            Self::LogCabin => "Log Cabin",
        }
    }

    /// Kind owning a well-known pattern id
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Whether the generator output goes through the balancer
    pub const fn is_balanced(self) -> bool {
        !matches!(self, Self::LogCabin)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Run one generator and, except for the log cabin, balance its output
///
/// # Errors
///
/// Returns `Unbalanceable` for balanced kinds when the configured grid size
/// is not `palette.len() * target`
pub fn generate(
    kind: PatternKind,
    config: &DesignerConfig,
    palette: &Palette,
    rng: &mut impl Rng,
) -> Result<Grid> {
    let (rows, cols) = (config.rows, config.cols);

    let mut grid = match kind {
        PatternKind::Diagonal => diagonal(rows, cols, palette),
        PatternKind::RandomFill => {
            let fill = random_fill(rows, cols, palette, config.target, rng);
            let fallbacks = fill.fallback_positions();
            if !fallbacks.is_empty() {
                log::debug!("random fill used the fallback color at {fallbacks:?}");
            }
            fill.grid
        }
        PatternKind::BugEye => radial_two_center(rows, cols, palette, config.radial_centers),
        PatternKind::LogCabin => log_cabin(rows, cols, palette, config.block_size),
    };

    if kind.is_balanced() {
        let changes = balance_colors(&mut grid, palette.len(), config.target)?;
        log::debug!("{kind}: {} cells recolored by balancing", changes.len());
    }

    Ok(grid)
}
