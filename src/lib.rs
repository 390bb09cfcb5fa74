//! Perfect maze generation over a rectangular grid.
//!
//! [`MazeGenerator`] carves a spanning tree into a fully walled grid, using [`DisjointSets`]
//! to know which cells are already connected. Every pair of cells ends up joined by exactly
//! one path.

pub mod constants;
pub mod disjoint_sets;
pub mod logging;
pub mod maze;
pub mod progress;
pub mod render;
pub mod settings;

pub use disjoint_sets::DisjointSets;
pub use maze::{generate_batch, Cell, CellWall, GenerationError, MazeGenerator, Random};
