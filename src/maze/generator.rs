use rand::{thread_rng, Rng, SeedableRng as _};

use super::{Cell, CellWall, GenerationError, Random};
use crate::{disjoint_sets::DisjointSets, progress::ProgressHandle};

/// Carves a perfect maze into a `rows × cols` grid.
///
/// Cells are addressed by `row * cols + col`. The generator owns both the grid and the
/// [`DisjointSets`] tracking which cells are already connected, as well as its own random
/// generator, so two instances never share any state.
#[derive(Debug, Clone)]
pub struct MazeGenerator<R = Random> {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    sets: DisjointSets,
    rng: R,
    seed: Option<u64>,
    generated: bool,
}

impl MazeGenerator<Random> {
    /// # Panics
    ///
    /// If `rows` or `cols` is zero.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_seed(rows, cols, thread_rng().gen())
    }

    pub fn try_new(rows: usize, cols: usize) -> Result<Self, GenerationError> {
        Self::try_with_seed(rows, cols, thread_rng().gen())
    }

    /// Same seed, same maze, on every platform.
    ///
    /// # Panics
    ///
    /// If `rows` or `cols` is zero.
    pub fn with_seed(rows: usize, cols: usize, seed: u64) -> Self {
        Self::try_with_seed(rows, cols, seed).unwrap_or_else(|err| panic!("{}", err))
    }

    pub fn try_with_seed(rows: usize, cols: usize, seed: u64) -> Result<Self, GenerationError> {
        let mut generator = Self::try_with_rng(rows, cols, Random::seed_from_u64(seed))?;
        generator.seed = Some(seed);
        Ok(generator)
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// # Panics
    ///
    /// If `rows` or `cols` is zero.
    pub fn with_rng(rows: usize, cols: usize, rng: R) -> Self {
        Self::try_with_rng(rows, cols, rng).unwrap_or_else(|err| panic!("{}", err))
    }

    pub fn try_with_rng(rows: usize, cols: usize, rng: R) -> Result<Self, GenerationError> {
        let cell_count = validate_size(rows, cols)?;

        Ok(MazeGenerator {
            rows,
            cols,
            cells: vec![Cell::new(); cell_count],
            sets: DisjointSets::new(cell_count),
            rng,
            seed: None,
            generated: false,
        })
    }

    /// Generates an entirely new maze, discarding any previous one.
    ///
    /// Randomized depth-first carving, where the disjoint sets decide which neighbours are
    /// still unconnected. Ends with every cell in a single set, so exactly `cell_count - 1`
    /// wall pairs are removed.
    pub fn generate_maze(&mut self) {
        self.generate_maze_with_progress(&ProgressHandle::new());
    }

    /// Same as [`MazeGenerator::generate_maze`], counting visited cells in `progress` as they
    /// are carved. `progress` is finished once the maze is complete.
    pub fn generate_maze_with_progress(&mut self, progress: &ProgressHandle) {
        self.reset();

        let cell_count = self.cells.len();
        log::debug!(
            "Generating {}x{} maze (seed: {:?})",
            self.rows,
            self.cols,
            self.seed
        );

        let mut stack = Vec::with_capacity(cell_count);
        let mut visited = 1;
        {
            let mut progress = progress.lock();
            progress.from = cell_count;
            progress.done = visited;
            progress.is_done = false;
        }

        let mut current = self.rng.gen_range(0..cell_count as u64) as usize;

        while visited < cell_count {
            let neighbors = self.carvable_neighbors(current);

            if neighbors.iter().any(Option::is_some) {
                // re-roll over all four slots until a carvable one comes up
                let (wall, next) = loop {
                    let wall = CellWall::from_index(self.rng.gen_range(0..CellWall::COUNT as u32));
                    if let Some(next) = neighbors[wall.index()] {
                        break (wall, next);
                    }
                };

                self.sets.union(current, next);
                self.cells[current].remove_wall(wall);
                self.cells[next].remove_wall(wall.reverse_wall());

                stack.push(current);
                current = next;
                visited += 1;
                progress.lock().done = visited;
            } else if let Some(previous) = stack.pop() {
                log::trace!("Dead end at {}, backtracking to {}", current, previous);
                current = previous;
            } else {
                panic!(
                    "dead end at cell {} with an empty stack, {} of {} cells visited",
                    current, visited, cell_count
                );
            }
        }

        debug_assert_eq!(self.sets.set_count(), 1);
        self.generated = true;
        progress.lock().finish();

        log::debug!(
            "Generated {}x{} maze with {} passages",
            self.rows,
            self.cols,
            cell_count - 1
        );
    }

    /// Copy of the cell at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range or no maze was generated yet.
    pub fn get_cell(&self, index: usize) -> Cell {
        assert!(
            self.generated,
            "cell {} queried before a maze was generated",
            index
        );
        assert!(
            index < self.cells.len(),
            "cell index {} out of range for a {}x{} maze",
            index,
            self.rows,
            self.cols
        );

        self.cells[index]
    }

    /// Copies of all cells in index order.
    ///
    /// # Panics
    ///
    /// If no maze was generated yet.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cells.len()).map(|i| self.get_cell(i))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Seed this generator was created from, `None` for an injected random generator.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// # Panics
    ///
    /// If the position is outside of the grid.
    pub fn index_of(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "position ({}, {}) out of range for a {}x{} maze",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Inverse of [`MazeGenerator::index_of`], returns `(row, col)`.
    pub fn position_of(&self, index: usize) -> (usize, usize) {
        assert!(
            index < self.cells.len(),
            "cell index {} out of range for a {}x{} maze",
            index,
            self.rows,
            self.cols
        );
        (index / self.cols, index % self.cols)
    }

    /// Number of removed wall pairs.
    pub fn passage_count(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                cell.is_open(CellWall::Below) as usize + cell.is_open(CellWall::Right) as usize
            })
            .sum()
    }

    fn reset(&mut self) {
        self.cells.fill(Cell::new());
        self.sets.reset();
        self.generated = false;
    }

    /// Neighbours of `cell` not yet connected to it, in [`CellWall`] slot order.
    fn carvable_neighbors(&mut self, cell: usize) -> [Option<usize>; CellWall::COUNT] {
        let cols = self.cols;
        let cell_count = self.cells.len();

        let mut neighbors = [
            (cell >= cols).then(|| cell - cols),
            (cell < cell_count - cols).then(|| cell + cols),
            (cell % cols != 0).then(|| cell - 1),
            ((cell + 1) % cols != 0).then(|| cell + 1),
        ];

        let root = self.sets.find(cell);
        for neighbor in neighbors.iter_mut() {
            if let Some(n) = *neighbor {
                if self.sets.find(n) == root {
                    *neighbor = None;
                }
            }
        }

        neighbors
    }
}

/// Number of cells of a `rows × cols` grid, if both are positive and the product fits.
pub(super) fn validate_size(rows: usize, cols: usize) -> Result<usize, GenerationError> {
    match rows.checked_mul(cols) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(GenerationError::InvalidSize { rows, cols }),
    }
}
