use crate::consts;
use enum_map::{Enum, EnumMap};
use ratatui::{
    layout::Size,
    style::{Color, Style},
};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Gameplay & presentation settings, fixed for the lifetime of a game.
///
/// Values read from a configuration file pass through
/// [`Options::try_from()`], which rejects anything the engine cannot play
/// with.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(try_from = "RawOptions")]
pub(crate) struct Options {
    pub(crate) field_width: u16,
    pub(crate) field_height: u16,

    /// Number of terminal columns used to draw one cell
    pub(crate) pixel_width: u16,

    pub(crate) initial_body_length: usize,
    pub(crate) body_increment: usize,
    pub(crate) initial_food_quantity: usize,

    /// Length of the countdown before play resumes; zero resumes immediately
    pub(crate) seconds_to_resume: u32,

    /// How much dimmer the oldest body segment is than the head, in `[0, 1]`
    pub(crate) brightness_gradient: f64,

    pub(crate) difficulty: Difficulty,
    pub(crate) framerates: EnumMap<Difficulty, u32>,
    pub(crate) palette: Palette,
    pub(crate) labels: Labels,
}

impl Options {
    pub(crate) fn field_size(&self) -> Size {
        Size {
            width: self.field_width,
            height: self.field_height,
        }
    }

    /// Time between two ticks at the selected difficulty
    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.framerates[self.difficulty].max(1)
    }
}

impl Default for Options {
    fn default() -> Options {
        Options::try_from(RawOptions::default()).expect("default options should be valid")
    }
}

impl TryFrom<RawOptions> for Options {
    type Error = OptionsError;

    fn try_from(raw: RawOptions) -> Result<Options, OptionsError> {
        if raw.field_width == 0 || raw.field_height == 0 {
            return Err(OptionsError::EmptyField);
        }
        if raw.pixel_width == 0 {
            return Err(OptionsError::PixelWidth);
        }
        if raw.initial_body_length == 0 {
            return Err(OptionsError::BodyTooShort);
        }
        if raw.initial_body_length > usize::from(raw.field_width / 2) {
            return Err(OptionsError::BodyTooLong {
                length: raw.initial_body_length,
                width: raw.field_width,
            });
        }
        if raw.initial_food_quantity == 0 {
            return Err(OptionsError::NoFood);
        }
        // The head plus the initial body must leave room for every food item.
        let free = (usize::from(raw.field_width) * usize::from(raw.field_height))
            .saturating_sub(raw.initial_body_length + 1);
        if raw.initial_food_quantity > free {
            return Err(OptionsError::TooMuchFood {
                quantity: raw.initial_food_quantity,
                free,
            });
        }
        if !(0.0..=1.0).contains(&raw.brightness_gradient) {
            return Err(OptionsError::BrightnessGradient(raw.brightness_gradient));
        }
        let framerates = raw.framerates.into_map();
        if let Some((difficulty, _)) = framerates.iter().find(|&(_, &fps)| fps == 0) {
            return Err(OptionsError::Framerate(difficulty));
        }
        Ok(Options {
            field_width: raw.field_width,
            field_height: raw.field_height,
            pixel_width: raw.pixel_width,
            initial_body_length: raw.initial_body_length,
            body_increment: raw.body_increment_per_score,
            initial_food_quantity: raw.initial_food_quantity,
            seconds_to_resume: raw.seconds_to_resume,
            brightness_gradient: raw.brightness_gradient,
            difficulty: raw.difficulty,
            framerates,
            palette: Palette::try_from(raw.colors)?,
            labels: raw.labels,
        })
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct RawOptions {
    field_width: u16,
    field_height: u16,
    pixel_width: u16,
    initial_body_length: usize,
    body_increment_per_score: usize,
    initial_food_quantity: usize,
    seconds_to_resume: u32,
    brightness_gradient: f64,
    difficulty: Difficulty,
    framerates: RawFramerates,
    colors: RawColors,
    labels: Labels,
}

impl Default for RawOptions {
    fn default() -> RawOptions {
        RawOptions {
            field_width: consts::FIELD_WIDTH,
            field_height: consts::FIELD_HEIGHT,
            pixel_width: consts::PIXEL_WIDTH,
            initial_body_length: consts::INITIAL_BODY_LENGTH,
            body_increment_per_score: consts::BODY_INCREMENT_PER_SCORE,
            initial_food_quantity: consts::INITIAL_FOOD_QUANTITY,
            seconds_to_resume: consts::SECONDS_TO_RESUME,
            brightness_gradient: consts::BRIGHTNESS_GRADIENT,
            difficulty: Difficulty::default(),
            framerates: RawFramerates::default(),
            colors: RawColors::default(),
            labels: Labels::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Difficulty {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Difficulty, ParseDifficultyError> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "insane" => Ok(Difficulty::Insane),
            _ => Err(ParseDifficultyError),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("invalid difficulty; expected one of: easy, normal, hard, insane")]
pub(crate) struct ParseDifficultyError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct RawFramerates {
    easy: u32,
    normal: u32,
    hard: u32,
    insane: u32,
}

impl RawFramerates {
    fn into_map(self) -> EnumMap<Difficulty, u32> {
        EnumMap::from_fn(|difficulty| match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Normal => self.normal,
            Difficulty::Hard => self.hard,
            Difficulty::Insane => self.insane,
        })
    }
}

impl Default for RawFramerates {
    fn default() -> RawFramerates {
        RawFramerates {
            easy: consts::EASY_FRAMERATE,
            normal: consts::NORMAL_FRAMERATE,
            hard: consts::HARD_FRAMERATE,
            insane: consts::INSANE_FRAMERATE,
        }
    }
}

/// Colors & styles used to draw the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    pub(crate) snake: Color,
    pub(crate) food: Color,
    pub(crate) background: Color,

    /// Style for the score line and overlay text
    pub(crate) text: Style,
}

impl TryFrom<RawColors> for Palette {
    type Error = OptionsError;

    fn try_from(raw: RawColors) -> Result<Palette, OptionsError> {
        Ok(Palette {
            snake: parse_color(&raw.snake)?,
            food: parse_color(&raw.food)?,
            background: parse_color(&raw.background)?,
            text: raw.text.map_or(consts::OVERLAY_STYLE, Style::from),
        })
    }
}

fn parse_color(s: &str) -> Result<Color, OptionsError> {
    s.parse::<Color>()
        .map_err(|_| OptionsError::Color(s.to_owned()))
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct RawColors {
    snake: String,
    food: String,
    background: String,
    text: Option<parse_style::Style>,
}

impl Default for RawColors {
    fn default() -> RawColors {
        RawColors {
            snake: String::from(consts::SNAKE_COLOR),
            food: String::from(consts::FOOD_COLOR),
            background: String::from(consts::BACKGROUND_COLOR),
            text: None,
        }
    }
}

/// Text shown in the score line & overlays
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Labels {
    pub(crate) score: String,
    pub(crate) paused: String,
    pub(crate) game_over: String,
    pub(crate) won: String,
    pub(crate) press_space: String,
}

impl Default for Labels {
    fn default() -> Labels {
        Labels {
            score: String::from(consts::SCORE_TEXT),
            paused: String::from(consts::PAUSED_TEXT),
            game_over: String::from(consts::GAME_OVER_TEXT),
            won: String::from(consts::WON_TEXT),
            press_space: String::from(consts::PRESS_SPACE_TEXT),
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub(crate) enum OptionsError {
    #[error("field width and height must both be positive")]
    EmptyField,
    #[error("pixel width must be positive")]
    PixelWidth,
    #[error("initial body length must be positive")]
    BodyTooShort,
    #[error("initial body length {length} is more than half of the field width {width}")]
    BodyTooLong { length: usize, width: u16 },
    #[error("initial food quantity must be positive")]
    NoFood,
    #[error("cannot place {quantity} food items in {free} free cells")]
    TooMuchFood { quantity: usize, free: usize },
    #[error("brightness gradient {0} is not between 0 and 1")]
    BrightnessGradient(f64),
    #[error("framerate for {0} difficulty must be positive")]
    Framerate(Difficulty),
    #[error("invalid color: {0:?}")]
    Color(String),
}
