/// Greedy post-process bringing every color to its exact target count
pub mod balance;
/// Per-color counting and surplus/deficit reporting
pub mod validation;

pub use balance::{Recolor, balance_colors};
pub use validation::{ColorCounts, count_colors};
