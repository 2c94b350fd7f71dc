//! Reversi rules engine for square boards from 4x4 to 16x16, with a text
//! client and request/response handlers for a web client built on top.

pub mod api;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod score;
pub mod snapshot;
pub mod text;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::{LoadError, Rejection, SaveError, SizeError};
pub use game::{GameSession, MoveReport, MoveSelector, Phase};
pub use snapshot::Snapshot;
pub use types::{Cell, Colour, Outcome, Position};
