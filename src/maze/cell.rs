use self::CellWall::*;

/// One unit of the maze. `true` means the wall on that side is standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    above: bool,
    below: bool,
    left: bool,
    right: bool,
}

impl Cell {
    /// Fully enclosed cell.
    pub fn new() -> Cell {
        Cell {
            above: true,
            below: true,
            left: true,
            right: true,
        }
    }

    pub(crate) fn remove_wall(&mut self, wall: CellWall) {
        match wall {
            Above => self.above = false,
            Below => self.below = false,
            Left => self.left = false,
            Right => self.right = false,
        }
    }

    pub fn has_wall(&self, wall: CellWall) -> bool {
        match wall {
            Above => self.above,
            Below => self.below,
            Left => self.left,
            Right => self.right,
        }
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        !self.has_wall(wall)
    }

    pub fn wall_above(&self) -> bool {
        self.above
    }

    pub fn wall_below(&self) -> bool {
        self.below
    }

    pub fn wall_left(&self) -> bool {
        self.left
    }

    pub fn wall_right(&self) -> bool {
        self.right
    }

    /// Number of sides without a wall.
    pub fn open_count(&self) -> usize {
        CellWall::get_in_order()
            .into_iter()
            .filter(|&wall| self.is_open(wall))
            .count()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// Side of a cell, in the slot order used when picking a direction to carve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    Above = 0,
    Below = 1,
    Left = 2,
    Right = 3,
}

impl CellWall {
    pub const COUNT: usize = 4;

    pub fn get_in_order() -> [CellWall; 4] {
        [Above, Below, Left, Right]
    }

    /// # Panics
    ///
    /// If `index` is not in `0..4`.
    pub fn from_index(index: u32) -> CellWall {
        match index {
            0 => Above,
            1 => Below,
            2 => Left,
            3 => Right,
            _ => unreachable!("invalid wall index {}", index),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wall of the neighbouring cell that shares the same edge.
    pub fn reverse_wall(&self) -> CellWall {
        match self {
            Above => Below,
            Below => Above,
            Left => Right,
            Right => Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_closed() {
        let cell = Cell::new();
        for wall in CellWall::get_in_order() {
            assert!(cell.has_wall(wall));
        }
        assert_eq!(cell.open_count(), 0);
    }

    #[test]
    fn remove_single_wall() {
        let mut cell = Cell::new();
        cell.remove_wall(Left);

        assert!(!cell.wall_left());
        assert!(cell.wall_above() && cell.wall_below() && cell.wall_right());
        assert!(cell.is_open(Left));
        assert_eq!(cell.open_count(), 1);
    }

    #[test]
    fn wall_index_round_trip() {
        for wall in CellWall::get_in_order() {
            assert_eq!(CellWall::from_index(wall.index() as u32), wall);
            assert_eq!(wall.reverse_wall().reverse_wall(), wall);
        }
    }

    #[test]
    #[should_panic(expected = "invalid wall index")]
    fn invalid_wall_index() {
        CellWall::from_index(4);
    }
}
