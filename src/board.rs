use std::fmt;

use crate::error::{GridError, SizeError};
use crate::types::{Cell, Colour, Position};

pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 16;

/// Checks that `size` can be used as a board width.
pub fn validate_size(size: usize) -> Result<usize, SizeError> {
    if size % 2 != 0 {
        return Err(SizeError::Odd(size));
    }
    if size < MIN_SIZE {
        return Err(SizeError::TooSmall(size));
    }
    if size > MAX_SIZE {
        return Err(SizeError::TooLarge(size));
    }
    Ok(size)
}

/// Parses and validates a board size typed by a user.
pub fn parse_size(text: &str) -> Result<usize, SizeError> {
    let size = text
        .trim()
        .parse::<usize>()
        .map_err(|_| SizeError::NotAnInteger(text.to_string()))?;
    validate_size(size)
}

/// Square Reversi board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates the starting board: the four centre cells hold two Dark
    /// counters on the main diagonal and two Light ones on the other.
    pub fn new(size: usize) -> Result<Self, SizeError> {
        validate_size(size).map(Self::standard)
    }

    /// A board of valid size with no counters on it.
    pub fn empty(size: usize) -> Result<Self, SizeError> {
        let size = validate_size(size)?;
        Ok(Self::blank(size))
    }

    /// Builds a board from nested rows, as stored in snapshots.
    pub fn from_grid(grid: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let size = validate_size(grid.len())?;
        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in grid.into_iter().enumerate() {
            if line.len() != size {
                return Err(GridError::NotSquare {
                    row: row + 1,
                    len: line.len(),
                    size,
                });
            }
            cells.extend(line);
        }
        Ok(Self { size, cells })
    }

    pub(crate) fn standard(size: usize) -> Self {
        let mut board = Self::blank(size);
        let mid = size / 2;
        board.cells[mid * size + mid] = Cell::Dark;
        board.cells[(mid - 1) * size + (mid - 1)] = Cell::Dark;
        board.cells[(mid - 1) * size + mid] = Cell::Light;
        board.cells[mid * size + (mid - 1)] = Cell::Light;
        board
    }

    fn blank(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Cell at `pos`, or `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Overwrites the cell at `pos`. Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, colour: Colour) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = Cell::from(colour);
        }
    }

    /// Swaps a counter to the other colour. Empty cells stay empty.
    pub(crate) fn flip(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = match self.cells[idx] {
                Cell::Dark => Cell::Light,
                Cell::Light => Cell::Dark,
                Cell::Empty => Cell::Empty,
            };
        }
    }

    /// Number of cells equal to `cell`.
    pub fn count(&self, cell: impl Into<Cell>) -> usize {
        let cell = cell.into();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let size = self.size as u8;
        (1..=size).flat_map(move |y| (1..=size).map(move |x| Position::new(x, y)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    pub fn to_grid(&self) -> Vec<Vec<Cell>> {
        self.rows().map(<[Cell]>::to_vec).collect()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let (x, y) = (usize::from(pos.x), usize::from(pos.y));
        if (1..=self.size).contains(&x) && (1..=self.size).contains(&y) {
            Some((y - 1) * self.size + (x - 1))
        } else {
            None
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard(crate::config::DEFAULT_SIZE)
    }
}

/// Grid with 1-based column numbers across the top and row numbers down
/// the left.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 1..=self.size {
            write!(f, "{col:<6}")?;
        }
        writeln!(f)?;

        for (row, cells) in self.rows().enumerate() {
            write!(f, "{:<3}", row + 1)?;
            for cell in cells {
                let label = match cell {
                    Cell::Empty => "None",
                    Cell::Dark => "Dark",
                    Cell::Light => "Light",
                };
                write!(f, "{label:<6}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_even_size_in_range_builds_a_square_grid() {
        for size in (MIN_SIZE..=MAX_SIZE).step_by(2) {
            let board = Board::new(size).unwrap();
            assert_eq!(board.size(), size);
            assert_eq!(board.rows().count(), size);
            assert!(board.rows().all(|row| row.len() == size));
        }
    }

    #[test]
    fn invalid_sizes_are_rejected() {
        assert_eq!(Board::new(5), Err(SizeError::Odd(5)));
        assert_eq!(Board::new(2), Err(SizeError::TooSmall(2)));
        assert_eq!(Board::new(0), Err(SizeError::TooSmall(0)));
        assert_eq!(Board::new(18), Err(SizeError::TooLarge(18)));
        assert_eq!(Board::new(20), Err(SizeError::TooLarge(20)));
    }

    #[test]
    fn size_text_must_be_an_integer() {
        assert_eq!(parse_size("8"), Ok(8));
        assert_eq!(parse_size(" 10 "), Ok(10));
        assert_eq!(parse_size("8.0"), Err(SizeError::NotAnInteger("8.0".to_string())));
        assert_eq!(parse_size("eight"), Err(SizeError::NotAnInteger("eight".to_string())));
        assert_eq!(parse_size("7"), Err(SizeError::Odd(7)));
    }

    #[test]
    fn starting_counters_sit_in_the_centre() {
        let board = Board::new(8).unwrap();

        assert_eq!(board.get(Position::new(4, 4)), Some(Cell::Dark));
        assert_eq!(board.get(Position::new(5, 5)), Some(Cell::Dark));
        assert_eq!(board.get(Position::new(5, 4)), Some(Cell::Light));
        assert_eq!(board.get(Position::new(4, 5)), Some(Cell::Light));
        assert_eq!(board.count(Cell::Empty), 60);
        assert_eq!(board.count(Colour::Dark), 2);
        assert_eq!(board.count(Colour::Light), 2);
    }

    #[test]
    fn smallest_board_is_all_centre() {
        let board = Board::new(4).unwrap();
        let grid = board.to_grid();

        assert_eq!(grid[1][1], Cell::Dark);
        assert_eq!(grid[2][2], Cell::Dark);
        assert_eq!(grid[1][2], Cell::Light);
        assert_eq!(grid[2][1], Cell::Light);
        assert_eq!(board.count(Cell::Empty), 12);
    }

    #[test]
    fn off_board_lookups_return_none() {
        let board = Board::new(8).unwrap();

        assert_eq!(board.get(Position::new(0, 1)), None);
        assert_eq!(board.get(Position::new(1, 9)), None);
        assert!(board.contains(Position::new(8, 8)));
        assert!(!board.contains(Position::new(9, 8)));
    }

    #[test]
    fn set_and_flip_touch_one_cell() {
        let mut board = Board::empty(6).unwrap();
        board.set(Position::new(2, 3), Colour::Light);
        board.flip(Position::new(2, 3));
        board.flip(Position::new(1, 1));

        assert_eq!(board.get(Position::new(2, 3)), Some(Cell::Dark));
        assert_eq!(board.get(Position::new(1, 1)), Some(Cell::Empty));
        assert_eq!(board.count(Cell::Empty), 35);
    }

    #[test]
    fn positions_walk_row_major() {
        let board = Board::new(4).unwrap();
        let positions: Vec<_> = board.positions().take(5).collect();

        assert_eq!(positions[0], Position::new(1, 1));
        assert_eq!(positions[3], Position::new(4, 1));
        assert_eq!(positions[4], Position::new(1, 2));
        assert_eq!(board.positions().count(), 16);
    }

    #[test]
    fn grid_round_trips_and_rejects_ragged_rows() {
        let board = Board::new(6).unwrap();
        assert_eq!(Board::from_grid(board.to_grid()), Ok(board));

        let mut ragged = Board::new(6).unwrap().to_grid();
        ragged[2].pop();
        assert_eq!(
            Board::from_grid(ragged),
            Err(GridError::NotSquare { row: 3, len: 5, size: 6 })
        );

        let odd = vec![vec![Cell::Empty; 5]; 5];
        assert_eq!(Board::from_grid(odd), Err(GridError::Size(SizeError::Odd(5))));
    }

    #[test]
    fn display_labels_rows_columns_and_cells() {
        let text = Board::new(8).unwrap().to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].trim_start().starts_with('1'));
        assert!(lines[0].trim_end().ends_with('8'));
        assert!(lines[4].starts_with("4  "));
        assert!(text.contains("Dark"));
        assert!(text.contains("Light"));
        assert!(text.contains("None"));
    }
}
