use super::direction::Direction;
use ratatui::layout::{Position, Size};
use std::collections::VecDeque;
use std::iter::successors;

/// A snake on the playing field
///
/// All positions are relative to the top-left corner of the field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    head: Position,

    /// The positions of all of the cells in the snake's body, with the most
    /// recent at the end
    body: VecDeque<Position>,

    /// The maximum length of the body
    body_length: usize,

    /// The direction in which the snake is currently travelling
    direction: Direction,

    /// Whether `direction` has already been changed since the last tick
    turned: bool,

    /// A turn requested after `direction` was already changed this tick,
    /// held back until the next tick window opens
    pending: Option<Direction>,
}

impl Snake {
    /// Create a new snake with its head at `head` and travelling in
    /// `direction`.  The body is laid out behind the head in a straight line,
    /// oldest segment first, and is cut short if it would leave the field.
    pub(crate) fn new(head: Position, direction: Direction, body_length: usize, size: Size) -> Snake {
        let behind = direction.reverse();
        let mut body = successors(Some(head), |&p| behind.advance(p, size))
            .skip(1)
            .take(body_length)
            .collect::<VecDeque<_>>();
        body.make_contiguous().reverse();
        Snake {
            head,
            body,
            body_length,
            direction,
            turned: false,
            pending: None,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of the cells in the snake's body, oldest first
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn body_length(&self) -> usize {
        self.body_length
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Request a change of direction.
    ///
    /// Requests to keep going the same way or to double back are ignored.
    /// Only one turn takes effect per tick: once the direction has changed,
    /// later requests in the same tick window replace each other in the
    /// pending slot, and the survivor is applied when the next window opens.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if direction == self.direction || direction == self.direction.reverse() {
            return;
        }
        if self.turned {
            self.pending = Some(direction);
        } else {
            self.direction = direction;
            self.turned = true;
        }
    }

    /// Close the current tick window and open the next one, applying any
    /// pending turn
    pub(crate) fn next_window(&mut self) {
        self.turned = false;
        if let Some(direction) = self.pending.take() {
            self.turn(direction);
        }
    }

    /// Move the head to `pos`, which the caller must have checked is adjacent
    /// and free.  The old head becomes the newest body segment.  If the body
    /// then exceeds its maximum length, the oldest segment is dropped and its
    /// position returned.
    pub(crate) fn advance(&mut self, pos: Position) -> Option<Position> {
        self.body.push_back(self.head);
        self.head = pos;
        if self.body.len() > self.body_length {
            self.body.pop_front()
        } else {
            None
        }
    }

    /// Extend the body's maximum length in response to eating
    pub(crate) fn grow(&mut self, increment: usize) {
        self.body_length = self.body_length.saturating_add(increment);
    }
}
