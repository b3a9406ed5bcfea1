//! Plain-text audit of per-color counts

use std::fmt::Write;

use crate::algorithm::ColorCounts;
use crate::palette::{Color, Palette};

fn describe(palette: &Palette, entries: &[(Color, usize)]) -> String {
    if entries.is_empty() {
        return "-".to_string();
    }
    entries
        .iter()
        .map(|&(color, count)| format!("{}: {count}", palette.name(color).unwrap_or("?")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summarize a pattern's counts against the target
///
/// Balanced grids get a single confirmation line; otherwise colors below and
/// above the target are listed separately.
pub fn format_audit(title: &str, counts: &ColorCounts, palette: &Palette) -> String {
    let target = counts.target();
    let mut report = format!("{title}\n");

    if counts.is_balanced() {
        let _ = writeln!(report, "  All colors have exactly {target} squares");
    } else {
        let _ = writeln!(
            report,
            "  Less than {target}: {}",
            describe(palette, &counts.deficits())
        );
        let _ = writeln!(
            report,
            "  More than {target}: {}",
            describe(palette, &counts.surpluses())
        );
    }

    if counts.unset() > 0 {
        let _ = writeln!(report, "  Unset: {}", counts.unset());
    }

    report
}
