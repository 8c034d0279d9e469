#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use maze::{Carver, Grid, NoiseConfig, PathConfig, Shade};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut grid = Grid::new(30, 15, Shade::Dark)?;
    let mut carver = Carver::new(&mut grid, rand::thread_rng());
    carver.draw_path(&PathConfig::default());
    let caverns = carver.add_noise(&NoiseConfig::default())?;
    info!(caverns = caverns.len(), "generated maze");

    println!("{grid}");
    Ok(())
}
