//! Designer constants and runtime configuration defaults

/// Default number of grid rows
pub const GRID_ROWS: usize = 6;
/// Default number of grid columns
pub const GRID_COLS: usize = 14;

/// Required number of cells per color in a balanced grid
pub const TARGET_COUNT: usize = 12;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

/// Default palette as (name, display hex) pairs in palette order
pub const DEFAULT_PALETTE: [(&str, &str); 7] = [
    ("silver-gray", "#C0C0C8"),
    ("deep-purple", "#4B2A7B"),
    ("lime-green", "#8CD13C"),
    ("pale-yellow", "#F6EBA4"),
    ("bright-blue", "#1E6FE8"),
    ("light-cyan", "#A8E6F0"),
    ("magenta", "#D0318C"),
];

/// Centers of the two radial "eyes" as (row, col)
pub const RADIAL_CENTERS: [(f64, f64); 2] = [(2.0, 4.0), (2.0, 8.0)];

/// Edge length of the square blocks in the log cabin layout
pub const BLOCK_SIZE: usize = 2;

/// Fixed seed for reproducible sessions
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// Directory receiving rendered patterns when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "patterns";
/// Edge length in pixels of one rendered cell
pub const CELL_PIXELS: u32 = 32;
/// Largest accepted cell edge length in pixels
pub const MAX_CELL_PIXELS: u32 = 256;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
