//! Owned collection of generated, sandbox and saved patterns
//!
//! The store is the single owner of every grid. Readers get shared
//! references; the only write paths are whole-pattern replacement for
//! generated kinds and the sandbox, single-cell edits, and saving a copy
//! under a new id. Every write is mirrored to the [`Storage`] collaborator.
//! Persistence failures are logged and queued for the caller but never undo
//! the in-memory change.

use std::collections::{BTreeSet, HashMap};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::generators::PatternKind;
use crate::io::error::{DesignerError, Result, invalid_input, not_found};
use crate::palette::{Color, Palette};
use crate::spatial::Grid;
use crate::store::storage::{PatternRecord, Storage};

/// Id of the free-form sandbox pattern
pub const SANDBOX_ID: &str = "sandbox";

/// Display name of the sandbox pattern
pub const SANDBOX_NAME: &str = "Sandbox";

/// Id prefix shared by every saved pattern
pub const SAVED_PREFIX: &str = "saved-";

/// Milliseconds since the Unix epoch, used to mint saved ids
pub fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis())
}

// Position of a saved id in save order: `saved-<millis>[-<n>]`
fn saved_order(id: &str) -> Option<(u128, usize)> {
    let rest = id.strip_prefix(SAVED_PREFIX)?;
    match rest.split_once('-') {
        Some((millis, suffix)) => Some((millis.parse().ok()?, suffix.parse().ok()?)),
        None => Some((rest.parse().ok()?, 0)),
    }
}

/// A named grid held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Unique pattern id, also the storage key
    pub id: String,
    /// Display name; always present for saved patterns
    pub name: Option<String>,
    /// Cell colors
    pub grid: Grid,
}

/// In-memory pattern collection mirrored to durable storage
pub struct PatternStore {
    palette: Palette,
    patterns: HashMap<String, Pattern>,
    saved: Vec<String>,
    storage: Box<dyn Storage>,
    persistence_failures: Vec<DesignerError>,
    clock: fn() -> u128,
}

impl PatternStore {
    /// Create an empty store persisting through `storage`
    pub fn new(palette: Palette, storage: Box<dyn Storage>) -> Self {
        Self::with_clock(palette, storage, unix_millis)
    }

    /// Create an empty store whose saved ids are minted from `clock`
    pub fn with_clock(palette: Palette, storage: Box<dyn Storage>, clock: fn() -> u128) -> Self {
        Self {
            palette,
            patterns: HashMap::new(),
            saved: Vec::new(),
            storage,
            persistence_failures: Vec::new(),
            clock,
        }
    }

    /// Palette used to name colors in persisted grids
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable palette access for display value changes
    pub const fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Remove every pattern, saved ones included, and their persisted copies
    ///
    /// Keys persisted by earlier sessions are removed as well, even when they
    /// were never loaded into memory.
    pub fn reset(&mut self) {
        let mut ids: BTreeSet<String> = self.patterns.keys().cloned().collect();
        ids.extend(PatternKind::ALL.iter().map(|kind| kind.id().to_string()));
        ids.insert(SANDBOX_ID.to_string());
        match self.storage.keys() {
            Ok(keys) => ids.extend(keys),
            Err(err) => self.report_failure(err),
        }

        for id in &ids {
            if let Err(err) = self.storage.remove(id) {
                self.report_failure(err);
            }
        }

        self.patterns.clear();
        self.saved.clear();
        log::debug!("pattern store reset, {} keys removed", ids.len());
    }

    /// Store or overwrite one of the algorithmic patterns
    pub fn set_generated(&mut self, kind: PatternKind, grid: Grid) {
        self.insert(kind.id(), Some(kind.label().to_string()), grid);
    }

    /// Store or overwrite the sandbox pattern
    pub fn set_sandbox(&mut self, grid: Grid) {
        self.insert(SANDBOX_ID, Some(SANDBOX_NAME.to_string()), grid);
    }

    /// Replace exactly one cell of a stored pattern
    ///
    /// Returns the color the cell held before.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` without changing anything if:
    /// - No pattern has this id
    /// - The coordinates are outside the pattern's grid
    /// - The color is not part of the palette
    pub fn apply_cell_edit(
        &mut self,
        pattern_id: &str,
        row: usize,
        col: usize,
        color: Color,
    ) -> Result<Option<Color>> {
        if color.index() >= self.palette.len() {
            return Err(not_found(&format!("color index {}", color.index())));
        }

        let pattern = self
            .patterns
            .get_mut(pattern_id)
            .ok_or_else(|| not_found(&format!("pattern '{pattern_id}'")))?;
        let previous = pattern.grid.set(row, col, color)?;

        self.persist(pattern_id);
        Ok(previous)
    }

    /// Save a copy of `grid` as a new named pattern and return its id
    ///
    /// The name is trimmed. Ids have the form `saved-<unix millis>`, with a
    /// numeric suffix when that id is already taken.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` without changing anything if the name is empty
    /// or whitespace only
    pub fn save_as_new(&mut self, name: &str, grid: Grid) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid_input("name", &"please enter a pattern name"));
        }

        let id = self.fresh_saved_id();
        self.insert(&id, Some(name.to_string()), grid);
        self.saved.push(id.clone());
        log::info!("saved pattern '{name}' as {id}");
        Ok(id)
    }

    /// Reload a pattern from storage
    ///
    /// Returns `false` when storage holds nothing under this id. The stored
    /// name wins; without one the in-memory name or the built-in label is
    /// kept. Saved patterns rejoin the saved sequence and always end up with
    /// a name, their id if nothing else.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data cannot be read or names colors missing
    /// from the palette
    pub fn restore(&mut self, pattern_id: &str) -> Result<bool> {
        let Some(record) = self.storage.retrieve(pattern_id)? else {
            return Ok(false);
        };
        let grid = Grid::from_record(&record.grid, &self.palette)?;
        let is_saved = saved_order(pattern_id).is_some();

        let name = record
            .name
            .or_else(|| self.patterns.get(pattern_id).and_then(|p| p.name.clone()))
            .or_else(|| PatternKind::from_id(pattern_id).map(|kind| kind.label().to_string()))
            .or_else(|| (pattern_id == SANDBOX_ID).then(|| SANDBOX_NAME.to_string()))
            .or_else(|| is_saved.then(|| pattern_id.to_string()));

        self.patterns.insert(
            pattern_id.to_string(),
            Pattern {
                id: pattern_id.to_string(),
                name,
                grid,
            },
        );
        if is_saved && !self.saved.iter().any(|id| id == pattern_id) {
            self.saved.push(pattern_id.to_string());
        }
        Ok(true)
    }

    /// Reload every saved pattern found in storage, oldest first
    ///
    /// Returns the ids restored, in save order.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored keys cannot be listed or a saved
    /// pattern cannot be read
    pub fn restore_saved(&mut self) -> Result<Vec<String>> {
        let mut ids: Vec<(u128, usize, String)> = self
            .storage
            .keys()?
            .into_iter()
            .filter_map(|key| saved_order(&key).map(|(millis, n)| (millis, n, key)))
            .collect();
        ids.sort();

        let mut restored = Vec::with_capacity(ids.len());
        for (_, _, id) in ids {
            if self.restore(&id)? {
                restored.push(id);
            }
        }
        Ok(restored)
    }

    /// Pattern with the given id
    pub fn get(&self, pattern_id: &str) -> Option<&Pattern> {
        self.patterns.get(pattern_id)
    }

    /// The sandbox pattern
    pub fn sandbox(&self) -> Option<&Pattern> {
        self.patterns.get(SANDBOX_ID)
    }

    /// Saved patterns in the order they were saved
    pub fn saved(&self) -> impl Iterator<Item = &Pattern> + '_ {
        self.saved.iter().filter_map(|id| self.patterns.get(id))
    }

    /// All ids: generated kinds, then the sandbox, then saved patterns
    pub fn ids(&self) -> Vec<&str> {
        PatternKind::ALL
            .iter()
            .map(|kind| kind.id())
            .chain(std::iter::once(SANDBOX_ID))
            .filter(|id| self.patterns.contains_key(*id))
            .chain(self.saved.iter().map(String::as_str))
            .collect()
    }

    /// Number of stored patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the store holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Drain the persistence failures reported since the last call
    pub fn take_persistence_failures(&mut self) -> Vec<DesignerError> {
        std::mem::take(&mut self.persistence_failures)
    }

    fn insert(&mut self, id: &str, name: Option<String>, grid: Grid) {
        self.patterns.insert(
            id.to_string(),
            Pattern {
                id: id.to_string(),
                name,
                grid,
            },
        );
        self.persist(id);
    }

    fn persist(&mut self, id: &str) {
        let Some(pattern) = self.patterns.get(id) else {
            return;
        };
        let record = PatternRecord {
            name: pattern.name.clone(),
            grid: pattern.grid.to_record(&self.palette),
        };
        if let Err(err) = self.storage.persist(id, &record) {
            self.report_failure(err);
        }
    }

    fn report_failure(&mut self, err: DesignerError) {
        log::warn!("{err}");
        self.persistence_failures.push(err);
    }

    fn fresh_saved_id(&self) -> String {
        let base = format!("{SAVED_PREFIX}{}", (self.clock)());

        if !self.patterns.contains_key(&base) {
            return base;
        }
        let mut suffix = 1_usize;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.patterns.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
