//! Two-shade grids carved with random caverns and a staircase path, rendered
//! as block glyphs.

pub mod carver;
pub mod config;
pub mod error;
pub mod grid;

pub use carver::Carver;
pub use config::{Glyphs, NoiseConfig, PathConfig};
pub use error::{MazeError, Result};
pub use grid::{Grid, Position, Rectangle, Shade};
