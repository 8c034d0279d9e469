#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use rand::Rng;
use tracing::{debug, trace};

use crate::{
    config::{NoiseConfig, PathConfig},
    error::{MazeError, Result},
    grid::{Grid, Position, Rectangle, Shade},
};

/// Runs the randomized carving operations against a borrowed grid.
pub struct Carver<'a, R: Rng> {
    grid: &'a mut Grid,
    rng: R,
}

impl<'a, R: Rng> Carver<'a, R> {
    pub fn new(grid: &'a mut Grid, rng: R) -> Self {
        Self { grid, rng }
    }

    pub fn grid(&self) -> &Grid {
        &*self.grid
    }

    /// Sets every cell to light or dark with an independent coin flip.
    pub fn fill_random(&mut self) {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let shade = Shade::from(self.rng.gen_bool(0.5));
                self.grid.set(Position::new(x, y), shade);
            }
        }
    }

    /// Scatters `density` caverns per 100 cells across the grid and returns
    /// them in the order they were carved.
    ///
    /// Each cavern is at least 2x2 and at most `dimension / density` on
    /// each axis. Caverns may overlap each other and hang off the grid edge.
    pub fn add_noise(&mut self, config: &NoiseConfig) -> Result<Vec<Rectangle>> {
        let density = config.density;
        if !density.is_finite() || density <= 0.0 {
            return Err(MazeError::InvalidDensity(density));
        }

        let (width, height) = (self.grid.width(), self.grid.height());
        let area = (width * height) as f64;
        let n_caverns = (area / 100.0 * density).round();
        if n_caverns >= usize::MAX as f64 {
            return Err(MazeError::InvalidDensity(density));
        }
        let n_caverns = n_caverns as usize;
        let max_width = ((width as f64 / density).floor() as usize).max(2);
        let max_height = ((height as f64 / density).floor() as usize).max(2);
        debug!(n_caverns, max_width, max_height, "adding noise");

        let mut caverns = Vec::new();
        for _ in 0..n_caverns {
            let cavern = Rectangle {
                x: self.rng.gen_range(0..width),
                y: self.rng.gen_range(0..height),
                w: self.rng.gen_range(2..=max_width),
                h: self.rng.gen_range(2..=max_height),
            };
            trace!(?cavern, "carving cavern");
            self.grid
                .draw_cavern(cavern.top_left(), cavern.w, cavern.h, config.fill);
            caverns.push(cavern);
        }
        Ok(caverns)
    }

    /// Carves a staircase of alternating right and down runs from
    /// `config.start` to the bottom-right corner, returning the position
    /// reached after each step.
    ///
    /// Runs are drawn from `0..=round(width / 2)` and `0..=round(height / 2)`.
    /// A step whose draws would both leave the position unchanged moves one
    /// cell instead, right if possible and otherwise down, so every step gets
    /// closer to the exit.
    pub fn draw_path(&mut self, config: &PathConfig) -> Vec<Position> {
        let exit = self.grid.exit();
        let max_run_x = self.grid.width().div_ceil(2);
        let max_run_y = self.grid.height().div_ceil(2);

        let mut pos = Position::new(config.start.x.min(exit.x), config.start.y.min(exit.y));
        let mut steps = Vec::new();
        while pos != exit {
            let from = pos;
            pos = self
                .grid
                .draw_horizontal(pos, self.rng.gen_range(0..=max_run_x), config.fill);
            pos = self
                .grid
                .draw_vertical(pos, self.rng.gen_range(0..=max_run_y), config.fill);

            if pos == from {
                pos = if pos.x < exit.x {
                    self.grid.draw_horizontal(pos, 1, config.fill)
                } else {
                    self.grid.draw_vertical(pos, 1, config.fill)
                };
            }
            trace!(?pos, "path step");
            steps.push(pos);
        }
        self.grid.set(exit, config.fill);
        debug!(steps = steps.len(), "path reached exit");
        steps
    }
}
