//! Top-level designer session and its command interface
//!
//! A [`Designer`] owns everything a session mutates: the pattern store (and
//! through it the palette), the RNG and the rendering collaborator. UI
//! adapters translate user actions into [`Command`]s; the designer never
//! reaches into a rendering layer except through [`Renderer::render`].

use rand::{SeedableRng, rngs::StdRng};

use crate::algorithm::{ColorCounts, count_colors};
use crate::generators::{PatternKind, generate, uniform_shuffle};
use crate::io::configuration::{
    BLOCK_SIZE, DEFAULT_SEED, GRID_COLS, GRID_ROWS, MAX_GRID_DIMENSION, RADIAL_CENTERS,
    TARGET_COUNT,
};
use crate::io::error::{DesignerError, Result, invalid_parameter, not_found};
use crate::io::image::Renderer;
use crate::palette::Palette;
use crate::spatial::quota::ensure_balanceable;
use crate::store::{PatternStore, SANDBOX_ID, Storage};

/// Session parameters shared by every generator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignerConfig {
    /// Number of grid rows
    pub rows: usize,
    /// Number of grid columns
    pub cols: usize,
    /// Required cells per color
    pub target: usize,
    /// Seed of the session RNG
    pub seed: u64,
    /// Centers of the radial generator as (row, col)
    pub radial_centers: [(f64, f64); 2],
    /// Edge length of log cabin blocks
    pub block_size: usize,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            target: TARGET_COUNT,
            seed: DEFAULT_SEED,
            radial_centers: RADIAL_CENTERS,
            block_size: BLOCK_SIZE,
        }
    }
}

impl DesignerConfig {
    /// Check the configuration against a palette size
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dimension is zero or exceeds the maximum grid dimension
    /// - The block size is zero
    /// - The palette has fewer than two colors
    /// - `rows * cols` differs from `palette_len * target` (`Unbalanceable`)
    pub fn validate(&self, palette_len: usize) -> Result<()> {
        for (parameter, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.block_size == 0 {
            return Err(invalid_parameter(
                "block_size",
                &self.block_size,
                &"must be positive",
            ));
        }
        if palette_len < 2 {
            return Err(invalid_parameter(
                "palette",
                &palette_len,
                &"at least two colors are required",
            ));
        }
        ensure_balanceable(self.rows * self.cols, palette_len, self.target)
    }
}

/// User action forwarded by a UI adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Rebuild one algorithmic pattern
    Regenerate(PatternKind),
    /// Recolor a single cell
    EditCell {
        /// Pattern holding the cell
        pattern_id: String,
        /// Row of the cell
        row: usize,
        /// Column of the cell
        col: usize,
        /// Palette name of the new color
        color: String,
    },
    /// Refill the sandbox with an exact-quota shuffle
    ShuffleSandbox,
    /// Save the sandbox as a new named pattern
    SaveSandbox {
        /// Name of the new pattern
        name: String,
    },
    /// Change the display value of a palette color
    SetColor {
        /// Palette name of the color
        name: String,
        /// Hex display value, `#` optional
        hex: String,
    },
    /// Clear everything and regenerate all patterns
    Reset,
}

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The pattern with this id changed
    Updated(String),
    /// A new pattern was saved under this id
    Saved(String),
    /// Every pattern was redrawn
    Redrawn,
}

/// Designer session owning patterns, palette, RNG and renderer
pub struct Designer {
    config: DesignerConfig,
    store: PatternStore,
    rng: StdRng,
    renderer: Box<dyn Renderer>,
}

impl Designer {
    /// Create a session; call [`Designer::initialize`] to populate it
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for the palette
    pub fn new(
        config: DesignerConfig,
        palette: Palette,
        storage: Box<dyn Storage>,
        renderer: Box<dyn Renderer>,
    ) -> Result<Self> {
        config.validate(palette.len())?;
        Ok(Self {
            config,
            store: PatternStore::new(palette, storage),
            rng: StdRng::seed_from_u64(config.seed),
            renderer,
        })
    }

    /// Session configuration
    pub const fn config(&self) -> &DesignerConfig {
        &self.config
    }

    /// Pattern collection
    pub const fn store(&self) -> &PatternStore {
        &self.store
    }

    /// Current palette
    pub const fn palette(&self) -> &Palette {
        self.store.palette()
    }

    /// Clear the store, regenerate every algorithmic pattern, shuffle the
    /// sandbox and draw everything
    ///
    /// # Errors
    ///
    /// Returns an error if generation or rendering fails
    pub fn initialize(&mut self) -> Result<()> {
        self.store.reset();
        for kind in PatternKind::ALL {
            self.regenerate(kind)?;
        }
        self.shuffle_sandbox()?;
        log::info!(
            "initialized {} patterns on a {}x{} grid",
            self.store.len(),
            self.config.rows,
            self.config.cols
        );
        Ok(())
    }

    /// Rebuild one algorithmic pattern
    ///
    /// # Errors
    ///
    /// Returns an error if generation or rendering fails
    pub fn regenerate(&mut self, kind: PatternKind) -> Result<()> {
        let grid = generate(kind, &self.config, self.store.palette(), &mut self.rng)?;
        self.store.set_generated(kind, grid);
        self.render(kind.id())
    }

    /// Refill the sandbox with an exact-quota shuffle
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    pub fn shuffle_sandbox(&mut self) -> Result<()> {
        let grid = uniform_shuffle(
            self.config.rows,
            self.config.cols,
            self.store.palette(),
            &mut self.rng,
        );
        self.store.set_sandbox(grid);
        self.render(SANDBOX_ID)
    }

    /// Recolor one cell of a stored pattern by color name
    ///
    /// Unknown patterns, colors and coordinates are contract violations: they
    /// are logged as errors and returned without changing anything.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown pattern, color or cell, or an error
    /// if rendering fails
    pub fn apply_cell_edit(
        &mut self,
        pattern_id: &str,
        row: usize,
        col: usize,
        color_name: &str,
    ) -> Result<()> {
        let edit = self
            .store
            .palette()
            .resolve(color_name)
            .and_then(|color| self.store.apply_cell_edit(pattern_id, row, col, color));

        if let Err(err) = edit {
            log::error!("cell edit on {pattern_id} ({row}, {col}) rejected: {err}");
            return Err(err);
        }
        self.render(pattern_id)
    }

    /// Reload a pattern from storage and draw it
    ///
    /// Returns `false` when storage holds nothing under this id.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data is unreadable or rendering fails
    pub fn restore(&mut self, pattern_id: &str) -> Result<bool> {
        if !self.store.restore(pattern_id)? {
            return Ok(false);
        }
        self.render(pattern_id)?;
        Ok(true)
    }

    /// Reload every saved pattern from storage and draw them, oldest first
    ///
    /// Returns the number of patterns restored.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data is unreadable or rendering fails
    pub fn restore_saved(&mut self) -> Result<usize> {
        let ids = self.store.restore_saved()?;
        for id in &ids {
            self.render(id)?;
        }
        Ok(ids.len())
    }

    /// Save the sandbox as a new named pattern and return its id
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank name, `NotFound` if the sandbox was
    /// never filled, or an error if rendering fails
    pub fn save_sandbox(&mut self, name: &str) -> Result<String> {
        let grid = self
            .store
            .sandbox()
            .map(|pattern| pattern.grid.clone())
            .ok_or_else(|| not_found(&format!("pattern '{SANDBOX_ID}'")))?;
        let id = self.store.save_as_new(name, grid)?;
        self.render(&id)?;
        Ok(id)
    }

    /// Change a palette display value and redraw every pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the color is unknown, the hex value is malformed
    /// or rendering fails; rejected values leave the palette unchanged
    pub fn set_color(&mut self, name: &str, hex: &str) -> Result<()> {
        self.store.palette_mut().set_display(name, hex)?;
        self.render_all()
    }

    /// Count colors of a stored pattern against the session target
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown pattern
    pub fn audit(&self, pattern_id: &str) -> Result<ColorCounts> {
        let pattern = self
            .store
            .get(pattern_id)
            .ok_or_else(|| not_found(&format!("pattern '{pattern_id}'")))?;
        Ok(count_colors(
            &pattern.grid,
            self.store.palette().len(),
            self.config.target,
        ))
    }

    /// Run a command from the UI adapter
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Regenerate(kind) => {
                self.regenerate(kind)?;
                Ok(Outcome::Updated(kind.id().to_string()))
            }
            Command::EditCell {
                pattern_id,
                row,
                col,
                color,
            } => {
                self.apply_cell_edit(&pattern_id, row, col, &color)?;
                Ok(Outcome::Updated(pattern_id))
            }
            Command::ShuffleSandbox => {
                self.shuffle_sandbox()?;
                Ok(Outcome::Updated(SANDBOX_ID.to_string()))
            }
            Command::SaveSandbox { name } => self.save_sandbox(&name).map(Outcome::Saved),
            Command::SetColor { name, hex } => {
                self.set_color(&name, &hex)?;
                Ok(Outcome::Redrawn)
            }
            Command::Reset => {
                self.initialize()?;
                Ok(Outcome::Redrawn)
            }
        }
    }

    /// Drain persistence failures reported by the store
    pub fn take_persistence_failures(&mut self) -> Vec<DesignerError> {
        self.store.take_persistence_failures()
    }

    /// Draw every stored pattern
    ///
    /// # Errors
    ///
    /// Returns the first rendering error
    pub fn render_all(&mut self) -> Result<()> {
        let ids: Vec<String> = self.store.ids().into_iter().map(str::to_string).collect();
        for id in &ids {
            self.render(id)?;
        }
        Ok(())
    }

    fn render(&mut self, pattern_id: &str) -> Result<()> {
        let pattern = self
            .store
            .get(pattern_id)
            .ok_or_else(|| not_found(&format!("pattern '{pattern_id}'")))?;
        self.renderer
            .render(pattern_id, &pattern.grid, self.store.palette())
    }
}
