use std::ops::ControlFlow;

use crate::board::Board;
use crate::types::{Cell, Colour, DIRECTIONS, Direction, Position};

const ALL_DIRECTIONS: u8 = u8::MAX;

/// Walks every ray from `origin` and calls `on_outflank` with the direction
/// and the step at which the anchoring own counter sits. The callback can
/// stop the walk early.
fn scan_outflanks<F>(board: &Board, colour: Colour, origin: Position, mut on_outflank: F)
where
    F: FnMut(Direction, usize) -> ControlFlow<()>,
{
    let own = Cell::from(colour);
    let opposing = Cell::from(colour.opposite());
    let mut active = ALL_DIRECTIONS;

    for step in 1..board.size() {
        if active == 0 {
            break;
        }

        for (i, &direction) in DIRECTIONS.iter().enumerate() {
            let mask = 1u8 << i;
            if active & mask == 0 {
                continue;
            }

            match origin.offset(direction, step).and_then(|pos| board.get(pos)) {
                Some(cell) if cell == opposing => {}
                Some(cell) if cell == own && step > 1 => {
                    active &= !mask;
                    if on_outflank(direction, step).is_break() {
                        return;
                    }
                }
                _ => active &= !mask,
            }
        }
    }
}

/// Whether `colour` may place a counter at `position`.
///
/// Off-board and occupied positions are never legal.
pub fn is_legal(colour: Colour, position: Position, board: &Board) -> bool {
    if board.get(position) != Some(Cell::Empty) {
        return false;
    }

    let mut legal = false;
    scan_outflanks(board, colour, position, |_, _| {
        legal = true;
        ControlFlow::Break(())
    });
    legal
}

/// Places a counter and flips every outflanked run. Returns the flipped
/// positions.
///
/// The move is expected to have passed [`is_legal`]. If it has not, the
/// counter is still placed and only genuinely outflanked runs flip, which
/// may be none. Off-board positions change nothing.
pub fn apply(colour: Colour, position: Position, board: &mut Board) -> Vec<Position> {
    if !board.contains(position) {
        return Vec::new();
    }
    board.set(position, colour);

    let mut captured = Vec::new();
    scan_outflanks(board, colour, position, |direction, anchor| {
        captured.extend((1..anchor).filter_map(|step| position.offset(direction, step)));
        ControlFlow::Continue(())
    });

    for &pos in &captured {
        board.flip(pos);
    }
    captured
}

/// All legal positions for `colour`, row by row.
pub fn legal_moves(colour: Colour, board: &Board) -> Vec<Position> {
    board
        .positions()
        .filter(|&pos| is_legal(colour, pos, board))
        .collect()
}

pub fn has_legal_move(colour: Colour, board: &Board) -> bool {
    board.positions().any(|pos| is_legal(colour, pos, board))
}
