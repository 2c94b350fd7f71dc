use serde::Serialize;

use crate::board::Board;
use crate::types::{Colour, Outcome};

/// Counter totals for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub dark: usize,
    pub light: usize,
}

impl Score {
    pub fn outcome(self) -> Outcome {
        match self.dark.cmp(&self.light) {
            std::cmp::Ordering::Greater => Outcome::Dark,
            std::cmp::Ordering::Less => Outcome::Light,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

pub fn tally(board: &Board) -> Score {
    Score {
        dark: board.count(Colour::Dark),
        light: board.count(Colour::Light),
    }
}

/// Strict majority of counters wins; empty cells do not count.
pub fn winner(board: &Board) -> Outcome {
    tally(board).outcome()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn fresh_board_is_a_draw() {
        let board = Board::new(8).unwrap();

        assert_eq!(tally(&board), Score { dark: 2, light: 2 });
        assert_eq!(winner(&board), Outcome::Draw);
    }

    #[test]
    fn majority_wins_regardless_of_empty_cells() {
        let mut board = Board::empty(8).unwrap();
        board.set(Position::new(1, 1), Colour::Light);
        assert_eq!(winner(&board), Outcome::Light);

        for p in board.positions().collect::<Vec<_>>() {
            board.set(p, Colour::Dark);
        }
        board.set(Position::new(1, 1), Colour::Light);
        assert_eq!(winner(&board), Outcome::Dark);
        assert_eq!(tally(&board), Score { dark: 63, light: 1 });
    }

    #[test]
    fn empty_board_is_a_draw() {
        assert_eq!(winner(&Board::empty(4).unwrap()), Outcome::Draw);
    }
}
