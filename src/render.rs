use rand::Rng;

use crate::maze::{CellWall, MazeGenerator};

const CORNER: char = '+';
const HORIZONTAL: char = '-';
const VERTICAL: char = '|';
const OPEN: char = ' ';

/// Draws the maze with ASCII characters, one line per text row.
///
/// Every cell takes one character plus the walls around it, so the result has
/// `2 * rows + 1` lines of `2 * cols + 1` characters.
///
/// # Panics
///
/// If no maze was generated yet.
pub fn to_text<R: Rng>(maze: &MazeGenerator<R>) -> String {
    let (rows, cols) = (maze.rows(), maze.cols());
    let mut out = String::with_capacity((2 * rows + 1) * (2 * cols + 2));

    horizontal_line(&mut out, maze, 0, CellWall::Above);

    for row in 0..rows {
        let first = maze.get_cell(maze.index_of(row, 0));
        out.push(wall_char(first.has_wall(CellWall::Left), VERTICAL));
        for col in 0..cols {
            let cell = maze.get_cell(maze.index_of(row, col));
            out.push(OPEN);
            out.push(wall_char(cell.has_wall(CellWall::Right), VERTICAL));
        }
        out.push('\n');

        horizontal_line(&mut out, maze, row, CellWall::Below);
    }

    out
}

fn horizontal_line<R: Rng>(out: &mut String, maze: &MazeGenerator<R>, row: usize, wall: CellWall) {
    out.push(CORNER);
    for col in 0..maze.cols() {
        let cell = maze.get_cell(maze.index_of(row, col));
        out.push(wall_char(cell.has_wall(wall), HORIZONTAL));
        out.push(CORNER);
    }
    out.push('\n');
}

fn wall_char(wall: bool, ch: char) -> char {
    if wall {
        ch
    } else {
        OPEN
    }
}
