use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// One side of the game. Dark always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Colour {
    Dark,
    Light,
}

impl Colour {
    pub fn opposite(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Colour {
    type Err = TokenError;

    /// Accepts any casing and surrounding whitespace, so the padded
    /// `"Dark "` tokens of older save files still load.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(TokenError::Colour(token.to_string())),
        }
    }
}

impl TryFrom<String> for Colour {
    type Error = TokenError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.as_str().to_string()
    }
}

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cell {
    Empty,
    Dark,
    Light,
}

impl Cell {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Compact code used by the binary snapshot: 0=empty, 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Dark => 1,
            Self::Light => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Dark),
            2 => Some(Self::Light),
            _ => None,
        }
    }

    pub fn colour(self) -> Option<Colour> {
        match self {
            Self::Empty => None,
            Self::Dark => Some(Colour::Dark),
            Self::Light => Some(Colour::Light),
        }
    }
}

impl From<Colour> for Cell {
    fn from(colour: Colour) -> Self {
        match colour {
            Colour::Dark => Self::Dark,
            Colour::Light => Self::Light,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cell {
    type Err = TokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "empty" | "none" | "" => Ok(Self::Empty),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(TokenError::Cell(token.to_string())),
        }
    }
}

impl TryFrom<String> for Cell {
    type Error = TokenError;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        token.parse()
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.as_str().to_string()
    }
}

/// A board coordinate, 1-based: `x` is the column from the left,
/// `y` the row from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The position `step` cells away along `direction`, or `None` once the
    /// ray leaves the positive quadrant.
    pub fn offset(self, direction: Direction, step: usize) -> Option<Self> {
        let step = i32::try_from(step).ok()?;
        let x = i32::from(self.x) + i32::from(direction.dx) * step;
        let y = i32::from(self.y) + i32::from(direction.dy) * step;
        if x < 1 || y < 1 {
            return None;
        }
        Some(Self::new(u8::try_from(x).ok()?, u8::try_from(y).ok()?))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight unit vectors a capture ray can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction { dx: -1, dy: -1 },
    Direction { dx: 0, dy: -1 },
    Direction { dx: 1, dy: -1 },
    Direction { dx: -1, dy: 0 },
    Direction { dx: 1, dy: 0 },
    Direction { dx: -1, dy: 1 },
    Direction { dx: 0, dy: 1 },
    Direction { dx: 1, dy: 1 },
];

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Dark,
    Light,
    Draw,
}

impl From<Colour> for Outcome {
    fn from(colour: Colour) -> Self {
        match colour {
            Colour::Dark => Self::Dark,
            Colour::Light => Self::Light,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Draw => "draw",
        })
    }
}
