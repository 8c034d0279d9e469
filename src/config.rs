//! Rendering alphabet and generation settings.

use crate::grid::{Position, Shade};

/// Smallest dimension picked when a grid is sized at random.
pub const MIN_RANDOM_DIMENSION: usize = 10;

/// Largest dimension picked when a grid is sized at random.
pub const MAX_RANDOM_DIMENSION: usize = 50;

/// The two symbols a grid is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub light: char,
    pub dark: char,
}

impl Glyphs {
    pub const fn new(light: char, dark: char) -> Self {
        Self { light, dark }
    }

    pub const fn glyph(&self, shade: Shade) -> char {
        match shade {
            Shade::Light => self.light,
            Shade::Dark => self.dark,
        }
    }

    pub fn shade(&self, glyph: char) -> Option<Shade> {
        if glyph == self.light {
            Some(Shade::Light)
        } else if glyph == self.dark {
            Some(Shade::Dark)
        } else {
            None
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::new('░', '▓')
    }
}

/// Settings for scattering caverns across a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseConfig {
    /// Caverns per 100 grid cells. Also divides the grid dimensions to
    /// bound the size of each cavern, so denser noise means smaller caverns.
    pub density: f64,
    /// Shade written into every cavern.
    pub fill: Shade,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            density: 3.0,
            fill: Shade::Light,
        }
    }
}

/// Settings for carving the staircase path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathConfig {
    pub start: Position,
    pub fill: Shade,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            start: Position::ORIGIN,
            fill: Shade::Light,
        }
    }
}
