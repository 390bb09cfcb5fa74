use rand::SeedableRng as _;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use super::{generator::validate_size, GenerationError, MazeGenerator, Random};
use crate::progress::ProgressHandle;

/// Generates `count` independent mazes in parallel.
///
/// Every maze gets its own non-overlapping random stream derived from `seed`, so the batch
/// is reproducible no matter how the work is scheduled. Mazes are returned in stream order.
///
/// The size is checked even when `count` is zero.
pub fn generate_batch(
    rows: usize,
    cols: usize,
    count: usize,
    seed: u64,
    progress: &ProgressHandle,
) -> Result<Vec<MazeGenerator>, GenerationError> {
    let cell_count = validate_size(rows, cols)?;
    let mut rng = Random::seed_from_u64(seed);

    let jobs = split_rng(&mut rng, count)
        .into_iter()
        .map(|rng| {
            let local = progress.split();
            let generator = MazeGenerator::try_with_rng(rows, cols, rng)?;
            local.lock().from = cell_count;
            Ok((generator, local))
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;

    log::debug!(
        "Generating {} mazes of size {}x{} (seed: {})",
        count,
        rows,
        cols,
        seed
    );

    let mazes = jobs
        .into_par_iter()
        .map(|(mut generator, local)| {
            generator.generate_maze_with_progress(&local);
            generator
        })
        .collect();

    progress.lock().finish();

    Ok(mazes)
}

/// Each returned generator starts one long jump (2^192 steps) after the previous one.
fn split_rng(rng: &mut Random, count: usize) -> Vec<Random> {
    (0..count)
        .map(|_| {
            rng.long_jump();
            rng.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{maze::Cell, render};

    fn layout(maze: &MazeGenerator) -> Vec<Cell> {
        maze.cells().collect()
    }

    #[test]
    fn batch_is_deterministic() {
        let a = generate_batch(9, 9, 6, 1234, &ProgressHandle::new()).unwrap();
        let b = generate_batch(9, 9, 6, 1234, &ProgressHandle::new()).unwrap();

        assert_eq!(a.len(), 6);
        for (a, b) in a.iter().zip(&b) {
            assert_eq!(layout(a), layout(b));
        }
    }

    #[test]
    fn batch_mazes_are_independent() {
        let mazes = generate_batch(10, 10, 4, 99, &ProgressHandle::new()).unwrap();

        for maze in &mazes {
            assert!(maze.is_generated());
            assert_eq!(maze.passage_count(), maze.cell_count() - 1);
        }
        assert_ne!(layout(&mazes[0]), layout(&mazes[1]));
    }

    #[test]
    fn batch_reports_progress() {
        let progress = ProgressHandle::new();
        generate_batch(3, 4, 5, 0, &progress).unwrap();

        let total = progress.progress();
        assert!(total.is_done);
        assert_eq!(total.from, 5 * 12);
        assert_eq!(total.done, total.from);
    }

    #[test]
    fn batch_rejects_invalid_size() {
        for count in [0, 2] {
            assert_eq!(
                generate_batch(0, 4, count, 0, &ProgressHandle::new()).unwrap_err(),
                GenerationError::InvalidSize { rows: 0, cols: 4 }
            );
        }
        assert!(generate_batch(usize::MAX, 2, 0, 0, &ProgressHandle::new()).is_err());
    }

    #[test]
    fn fixed_seed_batch_member() {
        let mazes = generate_batch(4, 4, 2, 42, &ProgressHandle::new()).unwrap();

        // second stream: seeded parent, two long jumps
        assert_eq!(
            render::to_text(&mazes[1]),
            "+-+-+-+-+\n\
             | |   | |\n\
             + +-+ + +\n\
             |   | | |\n\
             +-+ + + +\n\
             |   |   |\n\
             + +-+-+ +\n\
             |       |\n\
             +-+-+-+-+\n"
        );
        // a single-member batch is its first stream, not the plain seed
        let single = generate_batch(4, 4, 1, 42, &ProgressHandle::new()).unwrap();
        assert_eq!(layout(&single[0]), layout(&mazes[0]));

        let mut plain = MazeGenerator::with_seed(4, 4, 42);
        plain.generate_maze();
        assert_ne!(layout(&plain), layout(&mazes[0]));
    }

    #[test]
    fn empty_batch() {
        let mazes = generate_batch(4, 4, 0, 0, &ProgressHandle::new()).unwrap();
        assert!(mazes.is_empty());
    }
}
