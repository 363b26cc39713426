use super::direction::Direction;
use ratatui::layout::{Position, Positions, Rect, Size};

/// The contents of a single cell of the playing field
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Cell {
    #[default]
    Empty,
    SnakeHead,
    SnakeBody,
    Food,
}

/// What the snake's head would run into by moving one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    Empty(Position),
    Food(Position),
    Body(Position),
    OutOfBounds,
}

/// A fixed-size field of cells, stored row by row
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: Size,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of the given size with every cell empty
    pub(crate) fn new(size: Size) -> Grid {
        let area = usize::from(size.width) * usize::from(size.height);
        Grid {
            size,
            cells: vec![Cell::Empty; area],
        }
    }

    #[cfg(test)]
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        (pos.x < self.size.width && pos.y < self.size.height)
            .then(|| usize::from(pos.y) * usize::from(self.size.width) + usize::from(pos.x))
    }

    /// Return the contents of the cell at `pos`, or `None` if `pos` is out of
    /// bounds
    pub(crate) fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Set the contents of the cell at `pos`.  Positions outside the grid are
    /// ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Iterate over every position in the grid, row by row
    pub(crate) fn positions(&self) -> Positions {
        Rect::from((Position::ORIGIN, self.size)).positions()
    }

    /// Iterate over the positions of all cells with the given contents
    pub(crate) fn find(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&p| self.get(p) == Some(cell))
    }

    #[cfg(test)]
    pub(crate) fn count(&self, cell: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Report what lies one step from `from` in `direction`
    pub(crate) fn look(&self, from: Position, direction: Direction) -> Probe {
        let Some(pos) = direction.advance(from, self.size) else {
            return Probe::OutOfBounds;
        };
        match self.get(pos) {
            Some(Cell::Empty) => Probe::Empty(pos),
            Some(Cell::Food) => Probe::Food(pos),
            Some(Cell::SnakeBody | Cell::SnakeHead) => Probe::Body(pos),
            None => Probe::OutOfBounds,
        }
    }
}
