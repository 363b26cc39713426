use super::direction::Direction;
use super::grid::{Cell, Grid, Probe};
use super::snake::Snake;
use crate::options::Options;
use log::{debug, info};
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Where a game currently stands.  Only a `Running` game advances on
/// [`Engine::tick()`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Status {
    /// Not started yet, or stopped by the player or by losing focus
    #[default]
    Paused,

    /// Waiting out the countdown before play resumes
    CountingDown,

    Running,

    /// The snake ran into a wall or itself
    GameOver,

    /// The snake filled the field and there is nowhere left to put food
    Won,
}

impl Status {
    pub(crate) fn is_finished(self) -> bool {
        matches!(self, Status::GameOver | Status::Won)
    }
}

/// The grid simulation: field, snake, food, score, and game status
#[derive(Clone, Debug)]
pub(crate) struct Engine<R = rand::rngs::ThreadRng> {
    rng: R,
    options: Options,
    grid: Grid,
    snake: Snake,
    score: u32,
    status: Status,
}

impl<R: Rng> Engine<R> {
    pub(crate) fn new(options: Options, rng: R) -> Engine<R> {
        let size = options.field_size();
        let mut engine = Engine {
            rng,
            grid: Grid::new(size),
            snake: Snake::new(Position::ORIGIN, Direction::East, 0, size),
            options,
            score: 0,
            status: Status::Paused,
        };
        engine.reset();
        engine
    }

    /// Start a new game: clear the field, put the snake in the middle
    /// travelling east with its body trailing behind it, scatter food, zero
    /// the score, and pause.
    pub(crate) fn reset(&mut self) {
        let size = self.options.field_size();
        let head = Position::new(size.width / 2, size.height / 2);
        self.snake = Snake::new(head, Direction::East, self.options.initial_body_length, size);
        self.grid = Grid::new(size);
        for &p in self.snake.body() {
            self.grid.set(p, Cell::SnakeBody);
        }
        self.grid.set(head, Cell::SnakeHead);
        self.score = 0;
        self.status = Status::Paused;
        for _ in 0..self.options.initial_food_quantity {
            if !self.spawn_food() {
                break;
            }
        }
        debug!(
            "new {}x{} game with snake at ({}, {})",
            size.width, size.height, head.x, head.y
        );
    }

    /// Ask the snake to turn.  Ignored unless the game is running.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.status == Status::Running {
            self.snake.turn(direction);
        }
    }

    /// Advance the game by one step.  Does nothing unless the game is
    /// running.
    pub(crate) fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }
        match self.grid.look(self.snake.head(), self.snake.direction()) {
            Probe::Empty(pos) => self.slither(pos),
            Probe::Food(pos) => {
                self.score += 1;
                self.snake.grow(self.options.body_increment);
                self.slither(pos);
                debug!("ate food at ({}, {}); score is now {}", pos.x, pos.y, self.score);
                self.spawn_food();
            }
            Probe::Body(pos) => {
                info!(
                    "snake ran into itself at ({}, {}) with score {}",
                    pos.x, pos.y, self.score
                );
                self.status = Status::GameOver;
            }
            Probe::OutOfBounds => {
                info!("snake ran into the wall with score {}", self.score);
                self.status = Status::GameOver;
            }
        }
        self.snake.next_window();
    }

    fn slither(&mut self, to: Position) {
        let from = self.snake.head();
        let vacated = self.snake.advance(to);
        self.grid.set(from, Cell::SnakeBody);
        if let Some(tail) = vacated {
            self.grid.set(tail, Cell::Empty);
        }
        self.grid.set(to, Cell::SnakeHead);
    }

    /// Put food on an empty cell chosen uniformly at random.  If there are no
    /// empty cells, the game is won instead and `false` is returned.
    fn spawn_food(&mut self) -> bool {
        match self.grid.find(Cell::Empty).choose(&mut self.rng) {
            Some(pos) => {
                self.grid.set(pos, Cell::Food);
                true
            }
            None => {
                info!("field is full; won with score {}", self.score);
                self.status = Status::Won;
                false
            }
        }
    }
}

impl<R> Engine<R> {
    /// Stop ticking, keeping the game as it is.  Only a game that is running
    /// or counting down can be paused.
    pub(crate) fn pause(&mut self) {
        if matches!(self.status, Status::Running | Status::CountingDown) {
            self.status = Status::Paused;
        }
    }

    /// Enter the countdown before play resumes.  Only a paused game can count
    /// down.
    pub(crate) fn count_down(&mut self) {
        if self.status == Status::Paused {
            self.status = Status::CountingDown;
        }
    }

    /// Resume ticking.  Only a paused or counting-down game can be resumed.
    pub(crate) fn run(&mut self) {
        if matches!(self.status, Status::Paused | Status::CountingDown) {
            self.status = Status::Running;
        }
    }

    pub(crate) fn options(&self) -> &Options {
        &self.options
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn head(&self) -> Position {
        self.snake.head()
    }

    /// Return the positions of the snake's body segments, oldest first
    pub(crate) fn body(&self) -> &VecDeque<Position> {
        self.snake.body()
    }

    #[cfg(test)]
    pub(crate) fn body_length(&self) -> usize {
        self.snake.body_length()
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RawOptions;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Size;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_engine(options: Options) -> Engine<ChaCha12Rng> {
        Engine::new(options, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    /// A running game on the default field with all food removed so that
    /// moves are predictable
    fn running_engine() -> Engine<ChaCha12Rng> {
        let mut engine = new_engine(Options::default());
        remove_food(&mut engine);
        engine.run();
        engine
    }

    fn remove_food(engine: &mut Engine<ChaCha12Rng>) {
        for pos in engine.grid.find(Cell::Food).collect::<Vec<_>>() {
            engine.grid.set(pos, Cell::Empty);
        }
    }

    fn occupied(engine: &Engine<ChaCha12Rng>) -> usize {
        engine.grid.count(Cell::SnakeHead) + engine.grid.count(Cell::SnakeBody)
    }

    fn body(cells: &[(u16, u16)]) -> Vec<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    /// Check that the grid's snake cells agree with the snake itself
    fn assert_consistent(engine: &Engine<ChaCha12Rng>) {
        assert_eq!(
            engine.grid.find(Cell::SnakeHead).collect::<Vec<_>>(),
            [engine.head()]
        );
        let mut on_grid = engine.grid.find(Cell::SnakeBody).collect::<Vec<_>>();
        let mut segments = engine.body().iter().copied().collect::<Vec<_>>();
        on_grid.sort_by_key(|p| (p.y, p.x));
        segments.sort_by_key(|p| (p.y, p.x));
        assert_eq!(on_grid, segments);
        assert!(engine.body().len() <= engine.body_length());
    }

    #[test]
    fn new_game() {
        let engine = new_engine(Options::default());
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.head(), Position::new(16, 8));
        assert_eq!(engine.direction(), Direction::East);
        assert_eq!(
            engine.body().iter().copied().collect::<Vec<_>>(),
            body(&[(13, 8), (14, 8), (15, 8)])
        );
        assert_eq!(engine.grid().count(Cell::Food), 1);
        assert_eq!(engine.grid().count(Cell::SnakeBody), 3);
        assert_consistent(&engine);
    }

    #[test]
    fn new_game_with_more_food() {
        let options = Options {
            initial_food_quantity: 5,
            ..Options::default()
        };
        let engine = new_engine(options);
        assert_eq!(engine.grid().count(Cell::Food), 5);
        assert_consistent(&engine);
    }

    #[test]
    fn food_replenished_after_eating() {
        let options = Options {
            initial_food_quantity: 3,
            ..Options::default()
        };
        let mut engine = new_engine(options);
        remove_food(&mut engine);
        let others = [Position::new(0, 0), Position::new(31, 15)];
        engine.grid.set(Position::new(17, 8), Cell::Food);
        for &p in &others {
            engine.grid.set(p, Cell::Food);
        }
        engine.run();
        engine.tick();
        assert_eq!(engine.score(), 1);
        let food = engine.grid().find(Cell::Food).collect::<Vec<_>>();
        assert_eq!(food.len(), 3);
        for p in others {
            assert!(food.contains(&p), "food at ({}, {}) went missing", p.x, p.y);
        }
        for p in &food {
            assert_ne!(*p, engine.head());
            assert!(!engine.body().contains(p));
        }
        assert_consistent(&engine);
    }

    #[test]
    fn tick_into_empty_cell() {
        let mut engine = running_engine();
        engine.tick();
        assert_eq!(engine.head(), Position::new(17, 8));
        assert_eq!(
            engine.body().iter().copied().collect::<Vec<_>>(),
            body(&[(14, 8), (15, 8), (16, 8)])
        );
        assert_eq!(engine.grid().get(Position::new(13, 8)), Some(Cell::Empty));
        assert_eq!(engine.status(), Status::Running);
        assert_consistent(&engine);
    }

    #[test]
    fn tick_while_not_running() {
        let mut engine = new_engine(Options::default());
        let before = engine.grid().clone();
        engine.tick();
        assert_eq!(engine.grid(), &before);
        engine.count_down();
        assert_eq!(engine.status(), Status::CountingDown);
        engine.tick();
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn occupied_cells_constant_when_not_eating() {
        let mut engine = running_engine();
        let before = occupied(&engine);
        let moves = [
            Direction::North,
            Direction::West,
            Direction::West,
            Direction::South,
            Direction::South,
            Direction::East,
        ];
        for d in moves {
            engine.set_direction(d);
            engine.tick();
            assert_eq!(engine.status(), Status::Running);
            assert_eq!(occupied(&engine), before);
            assert_consistent(&engine);
        }
    }

    #[test]
    fn eat_food() {
        let mut engine = running_engine();
        engine.grid.set(Position::new(17, 8), Cell::Food);
        let before = occupied(&engine);
        engine.tick();
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.body_length(), 4);
        assert_eq!(engine.head(), Position::new(17, 8));
        assert_eq!(occupied(&engine), before + 1);
        assert_eq!(engine.body().len(), 4);
        // Old food is gone and exactly one new food item appeared elsewhere.
        let food = engine.grid().find(Cell::Food).collect::<Vec<_>>();
        assert_eq!(food.len(), 1);
        assert_ne!(food[0], Position::new(17, 8));
        assert_consistent(&engine);
        // Once grown, the body stays at its new length.
        remove_food(&mut engine);
        engine.tick();
        assert_eq!(occupied(&engine), before + 1);
        assert_eq!(engine.body().len(), 4);
        assert_consistent(&engine);
    }

    #[test]
    fn eat_food_with_larger_increment() {
        let options = Options {
            body_increment: 3,
            ..Options::default()
        };
        let mut engine = new_engine(options);
        remove_food(&mut engine);
        engine.run();
        engine.grid.set(Position::new(17, 8), Cell::Food);
        engine.tick();
        assert_eq!(engine.body_length(), 6);
        remove_food(&mut engine);
        let lengths = (0..3)
            .map(|_| {
                engine.tick();
                engine.body().len()
            })
            .collect::<Vec<_>>();
        assert_eq!(lengths, [5, 6, 6]);
    }

    #[test]
    fn hit_wall() {
        let mut engine = running_engine();
        for _ in 0..15 {
            engine.tick();
        }
        assert_eq!(engine.head(), Position::new(31, 8));
        assert_eq!(engine.status(), Status::Running);
        engine.tick();
        assert_eq!(engine.status(), Status::GameOver);
        assert_eq!(engine.head(), Position::new(31, 8));
        let before = engine.grid().clone();
        engine.set_direction(Direction::North);
        engine.tick();
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.status(), Status::GameOver);
    }

    #[test]
    fn hit_self() {
        let mut engine = running_engine();
        for d in [Direction::North, Direction::West] {
            engine.set_direction(d);
            engine.tick();
            assert_eq!(engine.status(), Status::Running);
        }
        // Heading west from (15, 7), the body is directly to the south.
        engine.set_direction(Direction::South);
        engine.tick();
        assert_eq!(engine.status(), Status::GameOver);
        assert_eq!(engine.head(), Position::new(15, 7));
        engine.tick();
        assert_eq!(engine.head(), Position::new(15, 7));
        assert_consistent(&engine);
    }

    #[test]
    fn tail_cell_counts_as_body() {
        // The target cell is checked before the tail moves out of it, so
        // chasing the tail is a collision.
        let raw: RawOptions = toml::from_str(
            "field-width = 6\nfield-height = 2\ninitial-body-length = 3\n",
        )
        .unwrap();
        let mut engine = new_engine(Options::try_from(raw).unwrap());
        remove_food(&mut engine);
        engine.run();
        // Head at (3, 1), body (0, 1), (1, 1), (2, 1)
        engine.set_direction(Direction::North);
        engine.tick();
        engine.set_direction(Direction::West);
        engine.tick();
        assert_eq!(engine.head(), Position::new(2, 0));
        assert_eq!(engine.body().front(), Some(&Position::new(2, 1)));
        engine.set_direction(Direction::South);
        engine.tick();
        assert_eq!(engine.status(), Status::GameOver);
    }

    #[rstest]
    #[case(Direction::North)]
    #[case(Direction::East)]
    #[case(Direction::South)]
    #[case(Direction::West)]
    fn reverse_direction_rejected(#[case] travel: Direction) {
        let mut engine = running_engine();
        // Turn the snake to face `travel` (or keep it facing east) and let
        // the turn take effect.
        if travel == Direction::West {
            engine.set_direction(Direction::North);
            engine.tick();
        }
        engine.set_direction(travel);
        engine.tick();
        assert_eq!(engine.direction(), travel);
        let head = engine.head();
        engine.set_direction(travel.reverse());
        assert_eq!(engine.direction(), travel);
        engine.tick();
        assert_eq!(engine.status(), Status::Running);
        assert_eq!(Some(engine.head()), travel.advance(head, engine.grid().size()));
    }

    #[test]
    fn two_turns_in_one_tick() {
        let mut engine = running_engine();
        engine.set_direction(Direction::North);
        engine.set_direction(Direction::West);
        engine.tick();
        assert_eq!(engine.head(), Position::new(16, 7));
        engine.tick();
        assert_eq!(engine.head(), Position::new(15, 7));
        assert_eq!(engine.status(), Status::Running);
        assert_consistent(&engine);
    }

    #[test]
    fn set_direction_ignored_while_paused() {
        let mut engine = new_engine(Options::default());
        engine.set_direction(Direction::North);
        assert_eq!(engine.direction(), Direction::East);
    }

    #[test]
    fn fill_field_and_win() {
        // 4x1 field: head at (2, 0), body at (0, 0) & (1, 0), food at (3, 0)
        let raw: RawOptions = toml::from_str(
            "field-width = 4\nfield-height = 1\ninitial-body-length = 2\n",
        )
        .unwrap();
        let mut engine = new_engine(Options::try_from(raw).unwrap());
        assert_eq!(engine.grid().get(Position::new(3, 0)), Some(Cell::Food));
        engine.run();
        engine.tick();
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.status(), Status::Won);
        assert_eq!(engine.grid().count(Cell::Empty), 0);
        assert_eq!(engine.grid().count(Cell::Food), 0);
        let before = engine.grid().clone();
        engine.tick();
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn food_never_lands_on_snake() {
        let raw: RawOptions = toml::from_str(
            "field-width = 6\nfield-height = 6\ninitial-body-length = 3\n",
        )
        .unwrap();
        let options = Options::try_from(raw).unwrap();
        for seed in 0..50 {
            let engine = Engine::new(options.clone(), ChaCha12Rng::seed_from_u64(seed));
            let food = engine.grid().find(Cell::Food).collect::<Vec<_>>();
            assert_eq!(food.len(), 1);
            assert_ne!(food[0], engine.head());
            assert!(!engine.body().contains(&food[0]));
        }
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut engine = running_engine();
        engine.grid.set(Position::new(17, 8), Cell::Food);
        engine.tick();
        engine.set_direction(Direction::North);
        engine.tick();
        engine.reset();
        assert_eq!(engine.status(), Status::Paused);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.body_length(), 3);
        assert_eq!(engine.head(), Position::new(16, 8));
        assert_eq!(engine.direction(), Direction::East);
        assert_eq!(engine.grid().count(Cell::Food), 1);
        assert_consistent(&engine);
    }

    #[test]
    fn pause_and_resume() {
        let mut engine = running_engine();
        engine.pause();
        assert_eq!(engine.status(), Status::Paused);
        let head = engine.head();
        engine.tick();
        assert_eq!(engine.head(), head);
        engine.count_down();
        engine.run();
        engine.tick();
        assert_eq!(engine.head(), Position::new(17, 8));
    }

    #[test]
    fn finished_game_stays_finished() {
        let mut engine = running_engine();
        engine.status = Status::GameOver;
        engine.pause();
        engine.count_down();
        engine.run();
        assert_eq!(engine.status(), Status::GameOver);
        assert!(engine.status().is_finished());
    }

    #[test]
    fn field_size() {
        let engine = new_engine(Options::default());
        assert_eq!(engine.grid().size(), Size::new(32, 16));
    }
}
