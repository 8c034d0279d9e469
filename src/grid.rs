use std::{fmt::Display, str::FromStr};

use rand::Rng;
use tracing::debug;

use crate::{
    config::{Glyphs, MAX_RANDOM_DIMENSION, MIN_RANDOM_DIMENSION},
    error::{MazeError, Result},
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shade {
    /// Open space.
    Light,
    /// Solid rock.
    #[default]
    Dark,
}

impl Shade {
    pub const fn to_bit(self) -> u8 {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
        }
    }
}

impl From<bool> for Shade {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl TryFrom<u8> for Shade {
    type Error = MazeError;

    fn try_from(bit: u8) -> Result<Self> {
        match bit {
            0 => Ok(Self::Light),
            1 => Ok(Self::Dark),
            other => Err(MazeError::MalformedInput(format!(
                "cell value {other} is neither 0 nor 1"
            ))),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned block of cells, anchored at its upper-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rectangle {
    pub const fn top_left(self) -> Position {
        Position::new(self.x, self.y)
    }
    pub const fn right(self) -> usize {
        self.x + self.w
    }
    pub const fn bottom(self) -> usize {
        self.y + self.h
    }
}

/// A fixed-size buffer of light and dark cells, stored row-major.
///
/// Every mutating operation keeps `cells.len() == width * height`, and every
/// coordinate a drawing operation touches is clamped into the grid first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Shade>,
}

impl Grid {
    /// Builds a `width` x `height` grid filled with `fill`.
    pub fn new(width: usize, height: usize, fill: Shade) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(MazeError::InvalidDimension { width, height })?;
        debug!(width, height, ?fill, "created grid");
        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
        })
    }

    /// Like [`Grid::new`], but a zero dimension is replaced by one drawn
    /// uniformly from `MIN_RANDOM_DIMENSION..=MAX_RANDOM_DIMENSION`.
    pub fn create(width: usize, height: usize, fill: Shade, rng: &mut impl Rng) -> Result<Self> {
        let width = if width == 0 {
            rng.gen_range(MIN_RANDOM_DIMENSION..=MAX_RANDOM_DIMENSION)
        } else {
            width
        };
        let height = if height == 0 {
            rng.gen_range(MIN_RANDOM_DIMENSION..=MAX_RANDOM_DIMENSION)
        } else {
            height
        };
        Self::new(width, height, fill)
    }

    pub fn from_rows(rows: Vec<Vec<Shade>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MazeError::MalformedInput(
                "grid content has no cells".to_string(),
            ));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(MazeError::MalformedInput(format!(
                "row {y} has {} cells, expected {width}",
                row.len()
            )));
        }
        let height = rows.len();
        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Builds a grid from rows of `0` (light) and `1` (dark) values.
    pub fn from_bits(rows: &[&[u8]]) -> Result<Self> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&bit| Shade::try_from(bit)).collect())
            .collect::<Result<Vec<Vec<_>>>>()?;
        Self::from_rows(rows)
    }

    /// Parses a rendered block back into a grid.
    pub fn parse_with(text: &str, glyphs: &Glyphs) -> Result<Self> {
        let rows = text
            .lines()
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .map(|c| {
                        glyphs.shade(c).ok_or_else(|| {
                            MazeError::MalformedInput(format!("unknown glyph {c:?} on line {y}"))
                        })
                    })
                    .collect()
            })
            .collect::<Result<Vec<Vec<_>>>>()?;
        Self::from_rows(rows)
    }

    /// Replaces the whole grid, dimensions included, with `rows`.
    /// On error the grid is left untouched.
    pub fn load_from_rows(&mut self, rows: Vec<Vec<Shade>>) -> Result<()> {
        *self = Self::from_rows(rows)?;
        debug!(width = self.width, height = self.height, "loaded grid");
        Ok(())
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// The bottom-right corner, where the staircase path ends.
    pub const fn exit(&self) -> Position {
        Position::new(self.width - 1, self.height - 1)
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Shade> {
        if !self.contains(pos) {
            return None;
        }
        self.cells.get(pos.y * self.width + pos.x).copied()
    }

    /// Returns false if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, shade: Shade) -> bool {
        if !self.contains(pos) {
            return false;
        }
        self.cells[pos.y * self.width + pos.x] = shade;
        true
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Shade]> {
        self.cells.chunks(self.width)
    }

    pub fn count(&self, shade: Shade) -> usize {
        self.cells.iter().filter(|&&c| c == shade).count()
    }

    pub fn fill_uniform(&mut self, fill: Shade) {
        self.cells.fill(fill);
    }

    fn clamp(&self, pos: Position) -> Position {
        Position::new(pos.x.min(self.width - 1), pos.y.min(self.height - 1))
    }

    /// Fills from `start` rightwards for `length` cells past it, stopping at
    /// the right edge. Returns the last cell written.
    pub fn draw_horizontal(&mut self, start: Position, length: usize, fill: Shade) -> Position {
        let start = self.clamp(start);
        let end = Position::new(start.x.saturating_add(length).min(self.width - 1), start.y);
        let row = start.y * self.width;
        self.cells[row + start.x..=row + end.x].fill(fill);
        end
    }

    /// Fills from `start` downwards for `length` cells past it, stopping at
    /// the bottom edge. Returns the last cell written.
    pub fn draw_vertical(&mut self, start: Position, length: usize, fill: Shade) -> Position {
        let start = self.clamp(start);
        let end = Position::new(start.x, start.y.saturating_add(length).min(self.height - 1));
        for y in start.y..=end.y {
            self.cells[y * self.width + start.x] = fill;
        }
        end
    }

    /// Fills a `width` x `height` block whose upper-left corner is `start`.
    /// Rows past the bottom edge are skipped and each row is clipped at the
    /// right edge. A zero-sized cavern, or one starting past the right edge,
    /// draws nothing.
    pub fn draw_cavern(&mut self, start: Position, width: usize, height: usize, fill: Shade) {
        if width == 0 || start.x >= self.width {
            return;
        }
        // A row draws `width` cells, i.e. `width - 1` past its first cell.
        let length = width.saturating_sub(1);
        for y in start.y..start.y.saturating_add(height) {
            if y > self.height - 1 {
                return;
            }
            self.draw_horizontal(Position::new(start.x, y), length, fill);
        }
    }

    pub fn render(&self) -> String {
        self.render_with(&Glyphs::default())
    }

    pub fn render_with(&self, glyphs: &Glyphs) -> String {
        self.rows()
            .map(|row| row.iter().map(|&c| glyphs.glyph(c)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for Grid {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with(s, &Glyphs::default())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn dark(width: usize, height: usize) -> Grid {
        Grid::new(width, height, Shade::Dark).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 5, Shade::Dark),
            Err(MazeError::InvalidDimension {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(5, 0, Shade::Dark).is_err());
        assert!(Grid::new(usize::MAX, 2, Shade::Dark).is_err());
    }

    #[test]
    fn test_create_randomizes_missing_dimensions() {
        let mut rng = StdRng::seed_from_u64(12345);
        for _ in 0..100 {
            let grid = Grid::create(0, 0, Shade::Dark, &mut rng).unwrap();
            assert!((MIN_RANDOM_DIMENSION..=MAX_RANDOM_DIMENSION).contains(&grid.width()));
            assert!((MIN_RANDOM_DIMENSION..=MAX_RANDOM_DIMENSION).contains(&grid.height()));
        }

        let grid = Grid::create(7, 0, Shade::Light, &mut rng).unwrap();
        assert_eq!(grid.width(), 7);
        assert!(grid.height() >= MIN_RANDOM_DIMENSION);
        assert_eq!(grid.count(Shade::Light), 7 * grid.height());
    }

    #[test]
    fn test_fill_uniform_keeps_dimensions() {
        let mut grid = dark(4, 3);
        grid.fill_uniform(Shade::Light);
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid.count(Shade::Light), 12);
    }

    #[test]
    fn test_from_rows_rejects_bad_shapes() {
        assert!(matches!(
            Grid::from_rows(vec![]),
            Err(MazeError::MalformedInput(_))
        ));
        assert!(matches!(
            Grid::from_rows(vec![vec![]]),
            Err(MazeError::MalformedInput(_))
        ));
        assert!(matches!(
            Grid::from_bits(&[&[0, 1], &[1]]),
            Err(MazeError::MalformedInput(_))
        ));
        assert!(matches!(
            Grid::from_bits(&[&[0, 2]]),
            Err(MazeError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_load_from_rows_replaces_dimensions() {
        let mut grid = dark(10, 10);
        grid.load_from_rows(vec![vec![Shade::Light, Shade::Dark]]).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 1));

        // A failed load leaves the grid as it was.
        assert!(grid.load_from_rows(vec![]).is_err());
        assert_eq!((grid.width(), grid.height()), (2, 1));
    }

    #[test]
    fn test_draw_horizontal_clamps_to_right_edge() {
        let mut grid = dark(5, 2);
        let end = grid.draw_horizontal(Position::new(2, 1), 100, Shade::Light);
        assert_eq!(end, Position::new(4, 1));
        assert_eq!(grid.render(), "▓▓▓▓▓\n▓▓░░░");

        let end = grid.draw_horizontal(Position::new(1, 0), usize::MAX, Shade::Light);
        assert_eq!(end, Position::new(4, 0));
    }

    #[test]
    fn test_draw_zero_length_writes_one_cell() {
        let mut grid = dark(3, 3);
        assert_eq!(
            grid.draw_horizontal(Position::new(1, 1), 0, Shade::Light),
            Position::new(1, 1)
        );
        assert_eq!(
            grid.draw_vertical(Position::new(1, 1), 0, Shade::Light),
            Position::new(1, 1)
        );
        assert_eq!(grid.count(Shade::Light), 1);
    }

    #[test]
    fn test_draw_vertical_clamps_to_bottom_edge() {
        let mut grid = dark(2, 4);
        let end = grid.draw_vertical(Position::new(1, 1), 9, Shade::Light);
        assert_eq!(end, Position::new(1, 3));
        assert_eq!(grid.render(), "▓▓\n▓░\n▓░\n▓░");
    }

    #[test]
    fn test_draw_clamps_out_of_bounds_start() {
        let mut grid = dark(3, 3);
        let end = grid.draw_horizontal(Position::new(9, 9), 1, Shade::Light);
        assert_eq!(end, Position::new(2, 2));
        assert_eq!(grid.get(Position::new(2, 2)), Some(Shade::Light));
        assert_eq!(grid.count(Shade::Light), 1);
    }

    #[test]
    fn test_draw_cavern_truncates_at_edges() {
        let mut grid = dark(4, 3);
        grid.draw_cavern(Position::new(2, 1), 5, 5, Shade::Light);
        assert_eq!(grid.render(), "▓▓▓▓\n▓▓░░\n▓▓░░");

        // Starting below the grid draws nothing.
        let mut grid = dark(4, 3);
        grid.draw_cavern(Position::new(0, 3), 2, 2, Shade::Light);
        assert_eq!(grid.count(Shade::Light), 0);

        // So does starting right of the grid.
        grid.draw_cavern(Position::new(4, 0), 2, 3, Shade::Light);
        grid.draw_cavern(Position::new(9, 1), 1, 1, Shade::Light);
        assert_eq!(grid.render(), "▓▓▓▓\n▓▓▓▓\n▓▓▓▓");
    }

    #[test]
    fn test_get_and_set_bounds() {
        let mut grid = dark(2, 2);
        assert!(grid.set(Position::new(1, 1), Shade::Light));
        assert!(!grid.set(Position::new(2, 0), Shade::Light));
        assert_eq!(grid.get(Position::new(1, 1)), Some(Shade::Light));
        assert_eq!(grid.get(Position::new(0, 2)), None);
        assert_eq!(grid.exit(), Position::new(1, 1));
    }

    #[test]
    fn test_shade_conversions() {
        assert_eq!(Shade::try_from(0), Ok(Shade::Light));
        assert_eq!(Shade::try_from(1), Ok(Shade::Dark));
        assert_eq!(Shade::from(true), Shade::Dark);
        assert_eq!(Shade::Light.to_bit(), 0);
        assert_eq!(Shade::default(), Shade::Dark);
    }

    #[test]
    fn test_render_with_custom_glyphs() {
        let grid = Grid::from_bits(&[&[0, 1], &[1, 0]]).unwrap();
        assert_eq!(grid.render_with(&Glyphs::new('.', '#')), ".#\n#.");
        assert_eq!(grid.to_string(), grid.render());
    }

    #[test]
    fn test_parse_rejects_unknown_glyph() {
        assert!(matches!(
            "░x".parse::<Grid>(),
            Err(MazeError::MalformedInput(_))
        ));
        let grid = Grid::parse_with(".#\n#.", &Glyphs::new('.', '#')).unwrap();
        assert_eq!(grid, Grid::from_bits(&[&[0, 1], &[1, 0]]).unwrap());
    }
}
