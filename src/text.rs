use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::error::Rejection;
use crate::game::{EndReason, GameSession};
use crate::score;
use crate::types::{Colour, Outcome, Position};

/// Longest coordinate accepted, in digits.
const MAX_DIGITS: usize = 2;

/// Reads one line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Prompts for an x and a y coordinate until both are whole numbers within
/// `1..=size`. Returns `None` when input runs out.
pub fn prompt_coords<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    size: usize,
) -> io::Result<Option<Position>> {
    loop {
        write!(out, "Enter x coordinate of move: ")?;
        out.flush()?;
        let Some(x) = read_line(input)? else {
            return Ok(None);
        };
        write!(out, "Enter y coordinate of move: ")?;
        out.flush()?;
        let Some(y) = read_line(input)? else {
            return Ok(None);
        };

        let is_number = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
        if !is_number(x.as_str()) || !is_number(y.as_str()) {
            writeln!(out, "Coordinates must both be whole numbers. Try again")?;
            continue;
        }
        if x.len() > MAX_DIGITS || y.len() > MAX_DIGITS {
            writeln!(out, "Inputted numbers are too long. Try again")?;
            continue;
        }

        let on_board = |v: u8| (1..=size).contains(&usize::from(v));
        match (x.parse::<u8>(), y.parse::<u8>()) {
            (Ok(x), Ok(y)) if on_board(x) && on_board(y) => {
                return Ok(Some(Position::new(x, y)));
            }
            _ => writeln!(out, "Coordinates must be whole numbers within 1 and {size}")?,
        }
    }
}

fn announce_passes<W: Write>(out: &mut W, passed: &[Colour]) -> io::Result<()> {
    for colour in passed {
        writeln!(out, "{colour} has no legal moves! Passing turn")?;
    }
    Ok(())
}

/// Plays one game to the end. Returns the outcome, or `None` if input ran
/// out first.
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Outcome>> {
    writeln!(out, "Welcome to Reversi!")?;
    write!(out, "{}", session.board())?;

    while !session.is_terminal() {
        let passed = session.settle();
        announce_passes(out, &passed)?;
        if session.is_terminal() {
            break;
        }

        if let Some(left) = session.moves_left() {
            writeln!(out, "{left} max moves left")?;
        }
        writeln!(out, "It's {}'s turn", session.to_move())?;

        loop {
            let Some(position) = prompt_coords(input, out, session.board().size())? else {
                writeln!(out, "Input closed. Leaving the game")?;
                return Ok(None);
            };

            match session.play(position) {
                Ok(report) => {
                    debug!(flips = report.flipped.len(), "text client move");
                    write!(out, "{}", session.board())?;
                    announce_passes(out, &report.passed)?;
                    break;
                }
                Err(Rejection::Illegal) => writeln!(out, "Move is invalid. Try again")?,
                Err(rejection) => writeln!(out, "{rejection}")?,
            }
        }
    }

    match session.end_reason() {
        Some(EndReason::MoveBudgetExhausted) => writeln!(out, "No more moves left. Game over!")?,
        _ => writeln!(out, "No more legal moves can be made by either player. Game over!")?,
    }

    let tally = score::tally(session.board());
    let outcome = session.outcome().unwrap_or_else(|| tally.outcome());
    match outcome {
        Outcome::Dark => {
            writeln!(out, "Dark wins the game with {} total counters!", tally.dark)?;
            writeln!(out, "(Light had {} counters)", tally.light)?;
        }
        Outcome::Light => {
            writeln!(out, "Light wins the game with {} total counters!", tally.light)?;
            writeln!(out, "(Dark had {} counters)", tally.dark)?;
        }
        Outcome::Draw => writeln!(out, "The game ended in a draw!")?,
    }
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::GameConfig;

    fn prompt(script: &str, size: usize) -> (Option<Position>, String) {
        let mut input = Cursor::new(script.as_bytes());
        let mut out = Vec::new();
        let position = prompt_coords(&mut input, &mut out, size).unwrap();
        (position, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reads_a_valid_pair() {
        let (position, _) = prompt("4\n6\n", 8);

        assert_eq!(position, Some(Position::new(4, 6)));
    }

    #[test]
    fn reprompts_on_non_numeric_input() {
        let (position, out) = prompt("four\n6\n-1\n2\n4\n6\n", 8);

        assert_eq!(position, Some(Position::new(4, 6)));
        assert_eq!(out.matches("Coordinates must both be whole numbers").count(), 2);
    }

    #[test]
    fn reprompts_on_long_and_out_of_range_input() {
        let (position, out) = prompt("123\n1\n9\n1\n0\n1\n3\n5\n", 8);

        assert_eq!(position, Some(Position::new(3, 5)));
        assert!(out.contains("Inputted numbers are too long"));
        assert_eq!(out.matches("within 1 and 8").count(), 2);
    }

    #[test]
    fn larger_boards_accept_two_digit_coordinates() {
        let (position, _) = prompt("12\n16\n", 16);

        assert_eq!(position, Some(Position::new(12, 16)));
    }

    #[test]
    fn end_of_input_returns_none() {
        assert_eq!(prompt("", 8).0, None);
        assert_eq!(prompt("4\n", 8).0, None);
    }

    #[test]
    fn illegal_move_is_retried_and_input_end_leaves_cleanly() {
        let mut session = GameSession::new(GameConfig::text_client()).unwrap();
        let mut input = Cursor::new("1\n1\n4\n6\n".as_bytes());
        let mut out = Vec::new();

        let outcome = run(&mut session, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(outcome, None);
        assert!(text.contains("60 max moves left"));
        assert!(text.contains("It's Dark's turn"));
        assert!(text.contains("Move is invalid. Try again"));
        assert!(text.contains("59 max moves left"));
        assert!(text.contains("It's Light's turn"));
        assert!(text.contains("Input closed"));
    }

    #[test]
    fn move_budget_ends_the_game_with_a_result() {
        let config = GameConfig::text_client().with_move_budget(Some(1));
        let mut session = GameSession::new(config).unwrap();
        let mut input = Cursor::new("4\n6\n".as_bytes());
        let mut out = Vec::new();

        let outcome = run(&mut session, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(outcome, Some(Outcome::Dark));
        assert!(text.contains("No more moves left. Game over!"));
        assert!(text.contains("Dark wins the game with 4 total counters!"));
        assert!(text.contains("(Light had 1 counters)"));
    }

    #[test]
    fn game_without_moves_ends_on_double_pass() {
        let mut session = GameSession::new(GameConfig::text_client()).unwrap();
        let mut snapshot = session.snapshot();
        for row in &mut snapshot.board {
            for cell in row.iter_mut() {
                *cell = crate::types::Cell::Empty;
            }
        }
        session.restore(snapshot).unwrap();
        let mut input = Cursor::new(&b""[..]);
        let mut out = Vec::new();

        let outcome = run(&mut session, &mut input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(outcome, Some(Outcome::Draw));
        assert!(text.contains("Dark has no legal moves! Passing turn"));
        assert!(text.contains("Light has no legal moves! Passing turn"));
        assert!(text.contains("No more legal moves can be made by either player"));
        assert!(text.contains("The game ended in a draw!"));
    }
}
