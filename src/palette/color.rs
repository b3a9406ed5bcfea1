//! Ordered named colors with user-editable display values
//!
//! A [`Color`] is only an index into its [`Palette`]. Ordering by index is the
//! tie-break used by every generator and by the balancer, so the palette order
//! must stay fixed for the lifetime of a session. Display values are pure
//! presentation and may change at any time without touching stored grids.

use crate::io::configuration::DEFAULT_PALETTE;
use crate::io::error::{Result, invalid_input, invalid_parameter, not_found};

/// Palette color identified by its position in palette order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(usize);

impl Color {
    /// Create a color from a palette index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of this color in palette order
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PaletteEntry {
    name: String,
    display: String,
}

/// Fixed ordered set of named colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PALETTE
                .iter()
                .map(|&(name, display)| PaletteEntry {
                    name: name.to_string(),
                    display: display.to_string(),
                })
                .collect(),
        }
    }
}

impl Palette {
    /// Build a palette from (name, hex display value) pairs in palette order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two colors are given
    /// - A name is blank or appears twice
    /// - A display value is not a six digit hex color
    pub fn new<N, D>(colors: impl IntoIterator<Item = (N, D)>) -> Result<Self>
    where
        N: Into<String>,
        D: AsRef<str>,
    {
        let mut entries: Vec<PaletteEntry> = Vec::new();

        for (name, display) in colors {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(invalid_parameter(
                    "palette",
                    &name,
                    &"color names must not be blank",
                ));
            }
            if entries.iter().any(|entry| entry.name == name) {
                return Err(invalid_parameter(
                    "palette",
                    &name,
                    &"color names must be unique",
                ));
            }
            let display = normalize_hex(display.as_ref()).ok_or_else(|| {
                invalid_input(
                    "color",
                    &format!("'{}' is not a hex color", display.as_ref()),
                )
            })?;
            entries.push(PaletteEntry { name, display });
        }

        if entries.len() < 2 {
            return Err(invalid_parameter(
                "palette",
                &entries.len(),
                &"at least two colors are required",
            ));
        }

        Ok(Self { entries })
    }

    /// Number of colors in the palette
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no colors (never true for a constructed palette)
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All colors in palette order
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        (0..self.entries.len()).map(Color::new)
    }

    /// First color in palette order
    pub const fn first(&self) -> Color {
        Color::new(0)
    }

    /// Name of a color
    pub fn name(&self, color: Color) -> Option<&str> {
        self.entries.get(color.index()).map(|entry| entry.name.as_str())
    }

    /// Current display value of a color, always `#`-prefixed
    pub fn display(&self, color: Color) -> Option<&str> {
        self.entries
            .get(color.index())
            .map(|entry| entry.display.as_str())
    }

    /// Look up a color by name
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no palette color has this name
    pub fn resolve(&self, name: &str) -> Result<Color> {
        self.entries
            .iter()
            .position(|entry| entry.name == name)
            .map(Color::new)
            .ok_or_else(|| not_found(&format!("color '{name}'")))
    }

    /// Change the display value of a named color
    ///
    /// Accepts six hex digits with or without a leading `#`. Rejected input
    /// leaves the last valid value in place.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The color name is not in the palette
    /// - The input is not a six digit hex color
    pub fn set_display(&mut self, name: &str, input: &str) -> Result<&str> {
        let color = self.resolve(name)?;
        let normalized = normalize_hex(input).ok_or_else(|| {
            invalid_input("color", &format!("'{}' is not a hex color", input.trim()))
        })?;

        let entry = self
            .entries
            .get_mut(color.index())
            .ok_or_else(|| not_found(&format!("color '{name}'")))?;
        log::debug!("display value of {name} set to {normalized}");
        entry.display = normalized;
        Ok(entry.display.as_str())
    }

    /// Display value of a color as opaque RGBA
    pub fn rgba(&self, color: Color) -> Option<[u8; 4]> {
        self.display(color).and_then(parse_hex_rgba)
    }
}

/// Validate and normalize a hex color to `#RRGGBB` form
///
/// Surrounding whitespace is ignored; digit case is preserved.
pub fn normalize_hex(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    (digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()))
        .then(|| format!("#{digits}"))
}

/// Parse a hex color (with or without `#`) into opaque RGBA
pub fn parse_hex_rgba(input: &str) -> Option<[u8; 4]> {
    let normalized = normalize_hex(input)?;
    let digits = normalized.strip_prefix('#')?;

    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };

    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255])
}
