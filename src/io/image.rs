//! Rendering collaborator and PNG swatch export

use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba};

use crate::io::configuration::MAX_CELL_PIXELS;
use crate::io::error::{DesignerError, Result, invalid_parameter};
use crate::palette::Palette;
use crate::spatial::Grid;

/// Drawing collaborator notified whenever a pattern changes
pub trait Renderer {
    /// Draw the current state of a pattern
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern cannot be drawn
    fn render(&mut self, pattern_id: &str, grid: &Grid, palette: &Palette) -> Result<()>;
}

/// Renderer that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _pattern_id: &str, _grid: &Grid, _palette: &Palette) -> Result<()> {
        Ok(())
    }
}

/// Writes each pattern to `<dir>/<pattern id>.png`
#[derive(Debug, Clone)]
pub struct PngRenderer {
    dir: PathBuf,
    cell_pixels: u32,
}

impl PngRenderer {
    /// Create a renderer drawing `cell_pixels` square cells into `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if `cell_pixels` is outside `1..=MAX_CELL_PIXELS`
    pub fn new(dir: impl Into<PathBuf>, cell_pixels: u32) -> Result<Self> {
        check_cell_pixels(cell_pixels)?;
        Ok(Self {
            dir: dir.into(),
            cell_pixels,
        })
    }

    /// Path the given pattern is written to
    pub fn path_for(&self, pattern_id: &str) -> PathBuf {
        self.dir.join(format!("{pattern_id}.png"))
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, pattern_id: &str, grid: &Grid, palette: &Palette) -> Result<()> {
        let path = self.path_for(pattern_id);
        export_grid_as_png(grid, palette, self.cell_pixels, &path)
    }
}

fn check_cell_pixels(cell_pixels: u32) -> Result<()> {
    if (1..=MAX_CELL_PIXELS).contains(&cell_pixels) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "cell_size",
            &cell_pixels,
            &format!("must be between 1 and {MAX_CELL_PIXELS}"),
        ))
    }
}

// Image edge length for `cells` cells, if it fits in u32
fn edge_pixels(cells: usize, cell_pixels: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|count| count.checked_mul(cell_pixels))
        .ok_or_else(|| {
            invalid_parameter(
                "cell_size",
                &cell_pixels,
                &format!("{cells} cells of this size overflow the image dimensions"),
            )
        })
}

/// Export a grid as a PNG with one `cell_pixels` square per cell
///
/// Unset cells are transparent.
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells
/// - `cell_pixels` is outside `1..=MAX_CELL_PIXELS` or the image size
///   overflows
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &Grid,
    palette: &Palette,
    cell_pixels: u32,
    output_path: &Path,
) -> Result<()> {
    if grid.cell_count() == 0 {
        return Err(invalid_parameter(
            "grid",
            &"0 cells",
            &"cannot render an empty grid",
        ));
    }
    check_cell_pixels(cell_pixels)?;

    let width = edge_pixels(grid.cols(), cell_pixels)?;
    let height = edge_pixels(grid.rows(), cell_pixels)?;

    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let row = (y / cell_pixels) as usize;
        let col = (x / cell_pixels) as usize;
        let rgba = grid
            .get(row, col)
            .and_then(|color| palette.rgba(color))
            .unwrap_or([0, 0, 0, 0]);
        Rgba(rgba)
    });

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DesignerError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| DesignerError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    log::debug!("rendered {}", output_path.display());
    Ok(())
}
