use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};

use crate::error::ConfigError;

/// Series colours used when no palette is configured.
pub const DEFAULT_HEX: [&str; 6] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#0088fe", "#00c49f",
];

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series palette: series position → colour
// ---------------------------------------------------------------------------

/// A non-empty, cyclic list of series colours.
///
/// Colour depends only on a series' position in the list, never on its
/// identity, so reordering the series reorders the colours.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPalette {
    colors: Vec<Srgb<u8>>,
}

impl Default for SeriesPalette {
    fn default() -> Self {
        let colors = DEFAULT_HEX
            .iter()
            .filter_map(|hex| Srgb::<u8>::from_str(hex).ok())
            .collect();
        Self { colors }
    }
}

impl SeriesPalette {
    /// Parse `#rrggbb` / `#rgb` entries. An empty list gives the default palette.
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Ok(Self::default());
        }
        let colors = entries
            .iter()
            .map(|hex| {
                let hex = hex.as_ref();
                Srgb::<u8>::from_str(hex).map_err(|_| ConfigError::InvalidColor(hex.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    /// `n` evenly spaced hues; `n == 0` gives the default palette.
    pub fn hue_wheel(n: usize) -> Self {
        if n == 0 {
            return Self::default();
        }
        Self {
            colors: generate_palette(n),
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour of the series at position `index`.
    pub fn color_for(&self, index: usize) -> Srgb<u8> {
        self.colors[index % self.colors.len()]
    }

    /// Pair every series with its colour, in order.
    pub fn assign<'a, T>(&self, series: &'a [T]) -> Vec<(&'a T, Srgb<u8>)> {
        series
            .iter()
            .enumerate()
            .map(|(i, s)| (s, self.color_for(i)))
            .collect()
    }
}
