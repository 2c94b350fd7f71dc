use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{LoadError, Rejection, SizeError};
use crate::rules;
use crate::score;
use crate::snapshot::Snapshot;
use crate::types::{Colour, Outcome, Position};

/// Picks a move for the side to move. Implementations must return a
/// position that is legal for `colour`, or `None` when there is none.
pub trait MoveSelector {
    fn select_move(&self, board: &Board, colour: Colour) -> Option<Position>;
}

/// Takes the first legal position in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board, colour: Colour) -> Option<Position> {
        board
            .positions()
            .find(|&pos| rules::is_legal(colour, pos, board))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ToMove(Colour),
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// Both sides passed back to back.
    NoLegalMoves,
    MoveBudgetExhausted,
    /// Restored from a snapshot that was already finished.
    Loaded,
}

/// What an accepted move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub colour: Colour,
    pub position: Position,
    pub flipped: Vec<Position>,
    /// Sides forced to pass around the move, in order: pending passes
    /// resolved before it, then those it caused.
    pub passed: Vec<Colour>,
    pub next: Colour,
    pub outcome: Option<Outcome>,
}

/// One game: board, side to move, pass tracking and the optional move
/// budget.
///
/// Not synchronised. Callers sharing a session must serialise access.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    to_move: Colour,
    consecutive_passes: u8,
    moves_left: Option<u32>,
    terminal: Option<EndReason>,
    outcome: Option<Outcome>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, SizeError> {
        let board = Board::new(config.size)?;
        Ok(Self {
            config,
            board,
            to_move: Colour::Dark,
            consecutive_passes: 0,
            moves_left: config.move_budget,
            terminal: None,
            outcome: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Colour {
        self.to_move
    }

    pub fn phase(&self) -> Phase {
        if self.terminal.is_some() {
            Phase::Terminal
        } else {
            Phase::ToMove(self.to_move)
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.terminal
    }

    /// Result of the game, known once it is terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn moves_left(&self) -> Option<u32> {
        self.moves_left
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn legal_moves(&self) -> Vec<Position> {
        rules::legal_moves(self.to_move, &self.board)
    }

    /// Resolves forced passes for the side to move. Returns the sides that
    /// passed; a second pass in a row ends the game.
    pub fn settle(&mut self) -> Vec<Colour> {
        let mut passed = Vec::new();
        while self.terminal.is_none() && !rules::has_legal_move(self.to_move, &self.board) {
            passed.push(self.to_move);
            self.pass();
        }
        passed
    }

    fn pass(&mut self) {
        self.consecutive_passes += 1;
        info!(colour = %self.to_move, "no legal moves, turn passed");
        if self.consecutive_passes >= 2 {
            self.finish(EndReason::NoLegalMoves);
        } else {
            self.to_move = self.to_move.opposite();
        }
    }

    fn finish(&mut self, reason: EndReason) {
        let outcome = score::winner(&self.board);
        info!(?reason, %outcome, "game over");
        self.terminal = Some(reason);
        self.outcome = Some(outcome);
    }

    /// Plays `position` for the side to move.
    ///
    /// Forced passes pending for the side to move are resolved first, so a
    /// rejected move can still have passed the turn. The board is never
    /// touched by a rejection.
    #[instrument(skip(self), fields(colour = %self.to_move))]
    pub fn play(&mut self, position: Position) -> Result<MoveReport, Rejection> {
        let mut passed = self.settle();
        if self.terminal.is_some() {
            return Err(Rejection::GameOver);
        }
        if !self.board.contains(position) {
            return Err(Rejection::OutOfRange {
                size: self.board.size(),
            });
        }

        let colour = self.to_move;
        if !rules::is_legal(colour, position, &self.board) {
            debug!(%position, "illegal move rejected");
            return Err(Rejection::Illegal);
        }

        let flipped = rules::apply(colour, position, &mut self.board);
        debug!(%position, flips = flipped.len(), "move applied");

        self.consecutive_passes = 0;
        self.to_move = colour.opposite();

        let mut budget_spent = false;
        if let Some(left) = self.moves_left.as_mut() {
            *left = left.saturating_sub(1);
            budget_spent = *left == 0;
        }

        if budget_spent {
            self.finish(EndReason::MoveBudgetExhausted);
        } else {
            passed.extend(self.settle());
        }

        Ok(MoveReport {
            colour,
            position,
            flipped,
            passed,
            next: self.to_move,
            outcome: self.outcome,
        })
    }

    /// Asks `selector` for a move without playing it. The choice is checked
    /// against the rules before it is returned. A side to move with no legal
    /// move gets `NoSelection`; passing is left to [`Self::play`].
    pub fn suggest_move(&self, selector: &dyn MoveSelector) -> Result<Position, Rejection> {
        if self.terminal.is_some() {
            return Err(Rejection::GameOver);
        }

        let position = selector
            .select_move(&self.board, self.to_move)
            .ok_or(Rejection::NoSelection)?;
        if !rules::is_legal(self.to_move, position, &self.board) {
            return Err(Rejection::Illegal);
        }
        Ok(position)
    }

    /// Plays whatever `selector` picks for the side to move.
    pub fn play_selected(&mut self, selector: &dyn MoveSelector) -> Result<MoveReport, Rejection> {
        let mut passed = self.settle();
        let position = self.suggest_move(selector)?;
        let mut report = self.play(position)?;
        passed.append(&mut report.passed);
        report.passed = passed;
        Ok(report)
    }

    /// Starts over on a fresh board with the configured size and budget.
    pub fn reset(&mut self) {
        info!(size = self.config.size, "game reset");
        self.board = Board::standard(self.config.size);
        self.to_move = Colour::Dark;
        self.consecutive_passes = 0;
        self.moves_left = self.config.move_budget;
        self.terminal = None;
        self.outcome = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.to_grid(),
            current_player: self.to_move,
            game_won: self.terminal.is_some(),
        }
    }

    /// Replaces the live game with `snapshot`. On error nothing changes.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<(), LoadError> {
        let board = Board::from_grid(snapshot.board).map_err(LoadError::new)?;

        info!(size = board.size(), game_won = snapshot.game_won, "game restored");
        self.board = board;
        self.to_move = snapshot.current_player;
        self.consecutive_passes = 0;
        self.moves_left = self.config.move_budget;
        self.terminal = None;
        self.outcome = None;
        if snapshot.game_won {
            self.finish(EndReason::Loaded);
        }
        Ok(())
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, to_move: Colour) {
        self.board = board;
        self.to_move = to_move;
        self.consecutive_passes = 0;
        self.terminal = None;
        self.outcome = None;
    }
}
