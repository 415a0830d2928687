//! Tag coloring: color providers and the border/fill assignment rule.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use taglayout_core::Color;

/// Two related colors: a strong tone and a light tone of the same hue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorPair {
    /// Strong tone, used for the border
    pub primary: Color,
    /// Light tone
    pub secondary: Color,
}

impl ColorPair {
    /// Create a pair.
    #[must_use]
    pub const fn new(primary: Color, secondary: Color) -> Self {
        Self { primary, secondary }
    }
}

/// Source of color pairs for tags created with random coloring on.
pub trait ColorProvider: Send + Sync {
    /// Next pair to apply.
    fn provide(&mut self) -> ColorPair;
}

/// Where the primary-or-secondary color lands besides the border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorTarget {
    /// Label color (press feedback on)
    Text(Color),
    /// Fill color (press feedback off)
    Background(Color),
}

/// Result of [`assign_colors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorAssignment {
    /// Border color, always the primary tone
    pub border: Color,
    /// Second color and where it goes
    pub target: ColorTarget,
}

/// Map a pair onto a tag.
///
/// With press feedback the label takes the primary tone so the pressed state
/// (border color as fill) keeps contrast; otherwise the fill takes the light
/// tone. The border is the primary tone in both cases.
#[must_use]
pub const fn assign_colors(pair: ColorPair, press_feedback: bool) -> ColorAssignment {
    let target = if press_feedback {
        ColorTarget::Text(pair.primary)
    } else {
        ColorTarget::Background(pair.secondary)
    };
    ColorAssignment {
        border: pair.primary,
        target,
    }
}

const DEFAULT_PALETTE: [(u32, u32); 10] = [
    (0xF4_43_36, 0xFF_EB_EE),
    (0xE9_1E_63, 0xFC_E4_EC),
    (0x9C_27_B0, 0xF3_E5_F5),
    (0x3F_51_B5, 0xE8_EA_F6),
    (0x21_96_F3, 0xE3_F2_FD),
    (0x00_96_88, 0xE0_F2_F1),
    (0x4C_AF_50, 0xE8_F5_E9),
    (0xFF_98_00, 0xFF_F3_E0),
    (0x79_55_48, 0xEF_EB_E9),
    (0x60_7D_8B, 0xEC_EF_F1),
];

fn rgb(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::from_rgb8(r, g, b)
}

/// The built-in palette of ten hue pairs.
#[must_use]
pub fn default_palette() -> Vec<ColorPair> {
    DEFAULT_PALETTE
        .iter()
        .map(|&(p, s)| ColorPair::new(rgb(p), rgb(s)))
        .collect()
}

/// Picks pairs uniformly at random from a palette.
#[derive(Debug, Clone)]
pub struct RandomPalette {
    rng: StdRng,
    palette: Vec<ColorPair>,
}

impl RandomPalette {
    /// Entropy-seeded provider over the default palette.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            palette: default_palette(),
        }
    }

    /// Deterministic provider, for tests and reproducible screenshots.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            palette: default_palette(),
        }
    }

    /// Replace the palette. An empty palette keeps the default one.
    #[must_use]
    pub fn with_palette(mut self, palette: Vec<ColorPair>) -> Self {
        if !palette.is_empty() {
            self.palette = palette;
        }
        self
    }

    /// Current palette.
    #[must_use]
    pub fn palette(&self) -> &[ColorPair] {
        &self.palette
    }
}

impl Default for RandomPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorProvider for RandomPalette {
    fn provide(&mut self) -> ColorPair {
        let index = self.rng.gen_range(0..self.palette.len());
        self.palette[index]
    }
}

/// Always returns the same pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedColors(pub ColorPair);

impl ColorProvider for FixedColors {
    fn provide(&mut self) -> ColorPair {
        self.0
    }
}
