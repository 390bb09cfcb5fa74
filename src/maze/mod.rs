mod batch;
pub mod cell;
mod generator;

pub use batch::generate_batch;
pub use cell::{Cell, CellWall};
pub use generator::MazeGenerator;

use thiserror::Error;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("invalid maze size {rows}x{cols}, both dimensions must be positive")]
    InvalidSize { rows: usize, cols: usize },
}
