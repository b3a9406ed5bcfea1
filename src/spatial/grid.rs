//! Fixed-size cell storage with row-major traversal and neighborhood queries
//!
//! Every algorithm in the crate depends on the scan order exposed here:
//! [`Grid::cells`] walks rows top to bottom and columns left to right, and
//! [`Grid::neighbors`] yields the 8-neighborhood in a fixed order. Generators
//! and the balancer rely on this for reproducible output.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::io::error::{Result, invalid_parameter, not_found};
use crate::palette::{Color, Palette};

/// Offsets of the 8-neighborhood as (row delta, col delta)
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Two-dimensional grid of optionally colored cells
///
/// Dimensions are fixed at construction. Cells start unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Option<Color>>,
}

impl Grid {
    /// Create a grid with every cell unset
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), None),
        }
    }

    /// Build a grid by evaluating `f(row, col)` for every cell
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> Option<Color>,
    ) -> Self {
        Self {
            cells: Array2::from_shape_fn((rows, cols), |(row, col)| f(row, col)),
        }
    }

    /// Build a grid from row-major colors, `rows` rows of `cols` cells
    ///
    /// # Errors
    ///
    /// Returns an error if the number of colors differs from `rows * cols`
    pub fn from_row_major(rows: usize, cols: usize, colors: Vec<Option<Color>>) -> Result<Self> {
        let len = colors.len();
        let cells = Array2::from_shape_vec((rows, cols), colors).map_err(|e| {
            invalid_parameter(
                "cells",
                &len,
                &format!("cannot shape into {rows}x{cols}: {e}"),
            )
        })?;
        Ok(Self { cells })
    }

    /// Get the number of rows in the grid
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Get the number of columns in the grid
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether the coordinates fall inside the grid
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    /// Color at a cell, `None` when unset or out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Color> {
        self.cells.get([row, col]).copied().flatten()
    }

    /// Mutable access to a cell, `None` when out of bounds
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Option<Color>> {
        self.cells.get_mut([row, col])
    }

    /// Set a cell and return its previous value
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the coordinates are outside the grid
    pub fn set(&mut self, row: usize, col: usize, color: Color) -> Result<Option<Color>> {
        let (rows, cols) = self.dimensions();
        let cell = self.cells.get_mut([row, col]).ok_or_else(|| {
            not_found(&format!("cell ({row}, {col}) in {rows}x{cols} grid"))
        })?;
        Ok(cell.replace(color))
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Option<Color>)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row, col), *cell))
    }

    /// Coordinates of the in-bounds 8-neighborhood of a cell
    pub fn neighbors(
        &self,
        row: usize,
        col: usize,
    ) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.contains(r, c).then_some((r, c))
        })
    }

    /// Whether any of the 8 neighbors currently holds `color`
    ///
    /// Unset neighbors never match.
    pub fn has_neighbor_with(&self, row: usize, col: usize, color: Color) -> bool {
        self.neighbors(row, col)
            .any(|(r, c)| self.get(r, c) == Some(color))
    }

    /// Row-major index of a cell
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    /// Convert to the persisted representation using palette names
    pub fn to_record(&self, palette: &Palette) -> GridRecord {
        let rows = self
            .cells
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        cell.and_then(|color| palette.name(color))
                            .map(str::to_string)
                    })
                    .collect()
            })
            .collect();
        GridRecord(rows)
    }

    /// Rebuild a grid from its persisted representation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Rows have differing lengths
    /// - A color name is not in the palette
    pub fn from_record(record: &GridRecord, palette: &Palette) -> Result<Self> {
        let rows = record.0.len();
        let cols = record.0.first().map_or(0, Vec::len);

        let mut colors = Vec::with_capacity(rows * cols);
        for (index, row) in record.0.iter().enumerate() {
            if row.len() != cols {
                return Err(invalid_parameter(
                    "grid",
                    &format!("row {index}"),
                    &format!("has {} cells, expected {cols}", row.len()),
                ));
            }
            for name in row {
                let color = name
                    .as_deref()
                    .map(|name| palette.resolve(name))
                    .transpose()?;
                colors.push(color);
            }
        }

        Self::from_row_major(rows, cols, colors)
    }
}

/// Persisted grid: row-major nested sequence of color names, `null` when unset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridRecord(pub Vec<Vec<Option<String>>>);
