use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("Malformed grid input: {0}")]
    MalformedInput(String),

    #[error("Invalid cavern density: {0} (must be a positive number)")]
    InvalidDensity(f64),
}

pub type Result<T> = std::result::Result<T, MazeError>;
