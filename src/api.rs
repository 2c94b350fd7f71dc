use serde::Serialize;

use crate::config::GameConfig;
use crate::error::{LoadError, Rejection, SaveError, SizeError};
use crate::game::{EndReason, FirstLegalMoveSelector, GameSession, MoveReport, MoveSelector};
use crate::score::{self, Score};
use crate::snapshot::Snapshot;
use crate::types::{Cell, Colour, Outcome, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MoveResponse {
    Fail {
        message: String,
    },
    Success {
        player: Colour,
        board: Vec<Vec<Cell>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        finished: Option<String>,
    },
}

impl MoveResponse {
    fn fail(rejection: &Rejection) -> Self {
        Self::Fail {
            message: rejection.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OpponentResponse {
    Fail { message: String },
    Success { x: u8, y: u8 },
}

/// Everything a page render needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub board: Vec<Vec<Cell>>,
    pub player: Colour,
    pub game_won: bool,
    pub score: Score,
    pub legal_moves: Vec<Position>,
}

/// One live game plus the selector used for opponent moves.
pub struct GameService {
    session: GameSession,
    selector: Box<dyn MoveSelector>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl GameService {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Result<Self, SizeError> {
        Ok(Self {
            session: GameSession::new(config)?,
            selector,
        })
    }

    pub fn with_default_selector(config: GameConfig) -> Result<Self, SizeError> {
        Self::new(config, Box::new(FirstLegalMoveSelector))
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn view(&self) -> GameView {
        GameView {
            board: self.session.board().to_grid(),
            player: self.session.to_move(),
            game_won: self.session.is_terminal(),
            score: score::tally(self.session.board()),
            legal_moves: if self.session.is_terminal() {
                Vec::new()
            } else {
                self.session.legal_moves()
            },
        }
    }

    /// Handles a move request. Missing, non-numeric or out-of-range
    /// coordinates are rejected like any other bad move.
    pub fn handle_move(&mut self, x: Option<i64>, y: Option<i64>) -> MoveResponse {
        // Anything unusable becomes 0, which the board rejects as out of range.
        let coordinate = |value: Option<i64>| value.and_then(to_coordinate).unwrap_or(0);
        let position = Position::new(coordinate(x), coordinate(y));

        let was_live = !self.session.is_terminal();
        match self.session.play(position) {
            Ok(report) => self.move_success(&report),
            Err(Rejection::GameOver) if was_live => self.ended_by_passes(),
            Err(rejection) => MoveResponse::fail(&rejection),
        }
    }

    /// Same as [`Self::handle_move`] for raw query-string values.
    pub fn handle_move_query(&mut self, x: Option<&str>, y: Option<&str>) -> MoveResponse {
        let parse = |value: Option<&str>| value.and_then(|v| v.trim().parse::<i64>().ok());
        self.handle_move(parse(x), parse(y))
    }

    fn move_success(&self, report: &MoveReport) -> MoveResponse {
        let finished = report
            .outcome
            .map(|outcome| finished_message(self.session.end_reason(), outcome));
        let message = if finished.is_none() && !report.passed.is_empty() {
            let passes: Vec<String> = report
                .passed
                .iter()
                .map(|colour| format!("No legal moves available for {colour}. Turn was passed"))
                .collect();
            Some(passes.join(" "))
        } else {
            None
        };

        MoveResponse::Success {
            player: self.session.to_move(),
            board: self.session.board().to_grid(),
            message,
            finished,
        }
    }

    /// The request found both sides stuck: no move was played, but the game
    /// ended here, so the client still gets the result.
    fn ended_by_passes(&self) -> MoveResponse {
        MoveResponse::Success {
            player: self.session.to_move(),
            board: self.session.board().to_grid(),
            message: None,
            finished: self
                .session
                .outcome()
                .map(|outcome| finished_message(self.session.end_reason(), outcome)),
        }
    }

    pub fn reset(&mut self) -> GameView {
        self.session.reset();
        self.view()
    }

    /// Serialises the live game as a JSON save file.
    pub fn save(&self) -> Result<String, SaveError> {
        self.session.snapshot().to_json()
    }

    /// Replaces the live game with an uploaded JSON save file.
    pub fn load(&mut self, data: &[u8]) -> Result<GameView, LoadError> {
        let snapshot = Snapshot::from_json(data)?;
        self.session.restore(snapshot)?;
        Ok(self.view())
    }

    /// A legal move for the side to move, chosen by the service's selector.
    /// The move is not played.
    pub fn opponent_move(&self) -> OpponentResponse {
        match self.session.suggest_move(self.selector.as_ref()) {
            Ok(position) => OpponentResponse::Success {
                x: position.x,
                y: position.y,
            },
            Err(rejection) => OpponentResponse::Fail {
                message: rejection.to_string(),
            },
        }
    }
}

fn to_coordinate(value: i64) -> Option<u8> {
    u8::try_from(value).ok()
}

fn finished_message(reason: Option<EndReason>, outcome: Outcome) -> String {
    let lead = match reason {
        Some(EndReason::MoveBudgetExhausted) => "No more moves left! The game is over.",
        _ => "Neither player can make a legal move! The game is over.",
    };
    match outcome {
        Outcome::Draw => format!("{lead} The game ended in a draw"),
        winner => format!("{lead} The player with {winner} counters won!"),
    }
}
