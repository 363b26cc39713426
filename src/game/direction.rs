use ratatui::layout::{Position, Size};

/// One of the four directions the snake can travel in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Return the unit vector `(dx, dy)` for this direction.  `y` grows
    /// downwards.
    pub(crate) fn vector(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `pos` in this direction, or `None` if
    /// that cell lies outside a field of the given size.
    pub(crate) fn advance(self, pos: Position, size: Size) -> Option<Position> {
        let (dx, dy) = self.vector();
        let x = pos.x.checked_add_signed(dx).filter(|&x| x < size.width)?;
        let y = pos.y.checked_add_signed(dy).filter(|&y| y < size.height)?;
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
