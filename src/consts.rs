//! Assorted constants & hard-coded configuration defaults
use ratatui::style::{Color, Style};

/// Default width of the playing field, in cells
pub(crate) const FIELD_WIDTH: u16 = 32;

/// Default height of the playing field, in cells
pub(crate) const FIELD_HEIGHT: u16 = 16;

/// Default number of terminal columns used to draw a single cell.  Terminal
/// cells are roughly twice as tall as they are wide, so two columns make a
/// cell look square.
pub(crate) const PIXEL_WIDTH: u16 = 2;

/// Default maximum body length before any food has been eaten
pub(crate) const INITIAL_BODY_LENGTH: usize = 3;

/// Default number of cells the body's maximum length increases by upon
/// eating
pub(crate) const BODY_INCREMENT_PER_SCORE: usize = 1;

/// Default number of food items present on the field at once
pub(crate) const INITIAL_FOOD_QUANTITY: usize = 1;

/// Default length of the countdown shown before play resumes
pub(crate) const SECONDS_TO_RESUME: u32 = 3;

/// Default fraction by which the tail end of the snake is dimmed relative to
/// its head
pub(crate) const BRIGHTNESS_GRADIENT: f64 = 0.7;

/// Default frames per second for each difficulty preset
pub(crate) const EASY_FRAMERATE: u32 = 7;
pub(crate) const NORMAL_FRAMERATE: u32 = 10;
pub(crate) const HARD_FRAMERATE: u32 = 15;
pub(crate) const INSANE_FRAMERATE: u32 = 17;

/// Default colors, in any format accepted by [`ratatui::style::Color`]'s
/// `FromStr` implementation
pub(crate) const SNAKE_COLOR: &str = "#54eb7c";
pub(crate) const FOOD_COLOR: &str = "#ff0000";
pub(crate) const BACKGROUND_COLOR: &str = "#b0c6e8";

/// Default overlay & HUD labels
pub(crate) const SCORE_TEXT: &str = "Score:";
pub(crate) const PAUSED_TEXT: &str = "Press space to play!";
pub(crate) const GAME_OVER_TEXT: &str = "Game over";
pub(crate) const WON_TEXT: &str = "You win!";
pub(crate) const PRESS_SPACE_TEXT: &str = "Press space to continue.";

/// Style for overlay text drawn on top of the field
pub(crate) const OVERLAY_STYLE: Style = Style::new().fg(Color::Black);

/// Glyph used to fill the columns of an occupied cell
pub(crate) const PIXEL_SYMBOL: char = ' ';
