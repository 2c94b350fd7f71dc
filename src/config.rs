/// Board size used when none is given.
pub const DEFAULT_SIZE: usize = 8;

/// Ply budget the text client plays with unless told otherwise.
pub const TEXT_CLIENT_MOVE_BUDGET: u32 = 60;

/// Settings for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    /// Accepted moves allowed before the game ends. `None` plays until
    /// neither side can move.
    pub move_budget: Option<u32>,
}

impl GameConfig {
    /// The request/response front end: no move budget.
    pub const fn web() -> Self {
        Self {
            size: DEFAULT_SIZE,
            move_budget: None,
        }
    }

    /// The text front end: a 60-move budget.
    pub const fn text_client() -> Self {
        Self {
            size: DEFAULT_SIZE,
            move_budget: Some(TEXT_CLIENT_MOVE_BUDGET),
        }
    }

    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub const fn with_move_budget(mut self, move_budget: Option<u32>) -> Self {
        self.move_budget = move_budget;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::web()
    }
}
