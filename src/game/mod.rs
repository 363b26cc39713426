mod countdown;
mod direction;
mod engine;
mod grid;
mod snake;
use self::countdown::Scheduler;
use self::direction::Direction;
use self::engine::{Engine, Status};
use self::grid::Cell;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::options::Options;
use crate::util::{center_rect, fade};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// The game screen: the simulation plus the timers that drive it
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<R>,
    scheduler: Scheduler,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(options: Options) -> Self {
        Game::new_with_rng(options, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(options: Options, rng: R) -> Game<R> {
        let scheduler = Scheduler::new(options.tick_period(), options.seconds_to_resume);
        Game {
            engine: Engine::new(options, rng),
            scheduler,
        }
    }

    /// Fire any due timers, then wait for input until the next timer is due.
    /// With no timer running, block until an event arrives.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        match self.scheduler.poll(&mut self.engine, Instant::now()) {
            Some(when) => {
                let wait = when.saturating_duration_since(Instant::now());
                if !wait.is_zero() && poll(wait)? {
                    Ok(self.handle_event(read()?, Instant::now()))
                } else {
                    Ok(None)
                }
            }
            None => Ok(self.handle_event(read()?, Instant::now())),
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> Option<Screen> {
        match event {
            Event::FocusLost => self.scheduler.pause(&mut self.engine),
            Event::FocusGained => self.scheduler.resume(&mut self.engine, now),
            _ => match Command::from_key_event(event.as_key_press_event()?)? {
                Command::Quit | Command::Q => return Some(Screen::Quit),
                Command::Up => self.engine.set_direction(Direction::North),
                Command::Left => self.engine.set_direction(Direction::West),
                Command::Down => self.engine.set_direction(Direction::South),
                Command::Right => self.engine.set_direction(Direction::East),
                Command::Space => match self.engine.status() {
                    Status::Paused => self.scheduler.resume(&mut self.engine, now),
                    status if status.is_finished() => {
                        self.scheduler.restart(&mut self.engine, now);
                    }
                    _ => (),
                },
                Command::P | Command::Esc => {
                    if self.engine.status() == Status::Paused {
                        self.scheduler.resume(&mut self.engine, now);
                    } else {
                        self.scheduler.pause(&mut self.engine);
                    }
                }
            },
        }
        None
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// The lines of text to show on top of the field
    fn overlay(&self) -> Vec<Line<'_>> {
        let labels = &self.engine.options().labels;
        match self.engine.status() {
            Status::Running => Vec::new(),
            Status::Paused => vec![Line::raw(labels.paused.as_str())],
            Status::CountingDown => self
                .scheduler
                .seconds_remaining()
                .map(|secs| Line::raw(secs.to_string()))
                .into_iter()
                .collect(),
            Status::GameOver => vec![
                Line::raw(labels.game_over.as_str()),
                Line::raw(labels.press_space.as_str()),
            ],
            Status::Won => vec![
                Line::raw(labels.won.as_str()),
                Line::raw(labels.press_space.as_str()),
            ],
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let options = self.engine.options();
        let palette = options.palette;
        let field = options.field_size();
        let display = center_rect(
            area,
            Size {
                width: field
                    .width
                    .saturating_mul(options.pixel_width)
                    .saturating_add(2),
                height: field.height.saturating_add(3),
            },
        );
        let [score_area, block_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        Line::styled(
            format!("{} {}", options.labels.score, self.engine.score()),
            palette.text,
        )
        .render(score_area, buf);
        Block::bordered().render(block_area, buf);

        let level_area = block_area.inner(Margin::new(1, 1));
        buf.set_style(level_area, Style::new().bg(palette.background));
        let mut level = Canvas {
            area: level_area,
            pixel_width: options.pixel_width,
            buf,
        };
        for pos in self.engine.grid().find(Cell::Food) {
            level.draw_cell(pos, palette.food);
        }
        let body = self.engine.body();
        for (i, &pos) in body.iter().enumerate() {
            let brightness = segment_brightness(options.brightness_gradient, i, body.len());
            level.draw_cell(pos, fade(palette.snake, brightness));
        }
        level.draw_cell(self.engine.head(), palette.snake);

        let overlay = self.overlay();
        if !overlay.is_empty() {
            let height = u16::try_from(overlay.len())
                .unwrap_or(u16::MAX)
                .min(level_area.height);
            let top = (level_area.height - height) / 2;
            let text_area = Rect {
                y: level_area.y + top,
                height,
                ..level_area
            };
            Text::from(overlay)
                .style(palette.text)
                .centered()
                .render(text_area, buf);
        }
    }
}

/// Brightness of the body segment at `index` (counting from the oldest) in a
/// body of `len` segments.  The segment next to the head is dimmed the least,
/// and the oldest is dimmed by the full `gradient`.
#[allow(clippy::cast_precision_loss)]
fn segment_brightness(gradient: f64, index: usize, len: usize) -> f64 {
    if len == 0 {
        return 1.0;
    }
    let distance = len.saturating_sub(index);
    1.0 - gradient * (distance as f64) / (len as f64)
}

/// A view of the field's area of the buffer in which each cell is
/// `pixel_width` columns wide
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    pixel_width: u16,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, color: Color) {
        let Some(x0) = pos
            .x
            .checked_mul(self.pixel_width)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for dx in 0..self.pixel_width {
            let Some(x) = x0.checked_add(dx) else {
                break;
            };
            if !self.area.contains(Position { x, y }) {
                break;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(consts::PIXEL_SYMBOL);
                cell.set_bg(color);
            }
        }
    }
}
