//! Board cells, ownership and terminal-state detection

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of cells on the standard board
pub const CELL_COUNT: usize = 9;

/// A terminal pattern: every listed cell owned by one player ends the game
pub type Line = &'static [usize];

/// Rows, columns and diagonals of the 3x3 board
pub const TIC_TAC_TOE_LINES: &[Line] = &[
    &[0, 1, 2],
    &[3, 4, 5],
    &[6, 7, 8],
    &[0, 3, 6],
    &[1, 4, 7],
    &[2, 5, 8],
    &[0, 4, 8],
    &[2, 4, 6],
];

/// Tokens used when rendering player identities
const TOKENS: [char; 4] = ['X', 'O', '#', '@'];

/// Match-local player identity (position in the match's player list)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn token(self) -> char {
        TOKENS.get(self.index()).copied().unwrap_or('?')
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Owner of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Owned(PlayerId),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Cell::Empty => None,
            Cell::Owned(id) => Some(id),
        }
    }
}

/// Terminal result of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(PlayerId),
    /// Board full, no completed line
    Tie,
}

impl Outcome {
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            Outcome::Win(id) => Some(id),
            Outcome::Tie => None,
        }
    }

    pub fn is_tie(self) -> bool {
        self == Outcome::Tie
    }
}

/// Fixed-size board. A claimed cell is never reassigned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    lines: &'static [Line],
}

impl Board {
    /// Empty 3x3 board
    pub fn tic_tac_toe() -> Self {
        Self::with_lines(CELL_COUNT, TIC_TAC_TOE_LINES)
    }

    /// Empty board of `len` cells with a custom set of terminal lines.
    ///
    /// # Panics
    /// Panics if a line refers to a cell outside the board.
    pub fn with_lines(len: usize, lines: &'static [Line]) -> Self {
        assert!(
            lines.iter().all(|line| line.iter().all(|&c| c < len)),
            "terminal line references a cell outside the board"
        );
        Self {
            cells: vec![Cell::Empty; len],
            lines,
        }
    }

    /// 3x3 board from an explicit position
    ///
    /// # Panics
    /// Panics if `cells` does not hold exactly nine entries.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        assert_eq!(cells.len(), CELL_COUNT, "tic-tac-toe board needs {} cells", CELL_COUNT);
        Self {
            cells,
            lines: TIC_TAC_TOE_LINES,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn lines(&self) -> &'static [Line] {
        self.lines
    }

    /// Claim an empty cell for `player`.
    ///
    /// # Panics
    /// Panics if `index` is outside the board.
    pub fn claim(&mut self, index: usize, player: PlayerId) -> Result<(), GameError> {
        let cell = &mut self.cells[index];
        match *cell {
            Cell::Empty => {
                *cell = Cell::Owned(player);
                Ok(())
            }
            Cell::Owned(owner) => Err(GameError::InvalidMove {
                cell: index,
                owner,
                player,
            }),
        }
    }

    /// Terminal-state detection: a completed line wins, a full board ties,
    /// anything else has no result yet.
    pub fn winner(&self) -> Option<Outcome> {
        for line in self.lines {
            if let Some(owner) = self.line_owner(line) {
                return Some(Outcome::Win(owner));
            }
        }

        if self.cells.iter().all(|c| !c.is_empty()) {
            Some(Outcome::Tie)
        } else {
            None
        }
    }

    /// Indices of empty cells, ascending
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    fn line_owner(&self, line: Line) -> Option<PlayerId> {
        let (&first, rest) = line.split_first()?;
        let owner = self.cells[first].owner()?;
        rest.iter()
            .all(|&c| self.cells[c] == Cell::Owned(owner))
            .then_some(owner)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::tic_tac_toe()
    }
}

/// Renders square boards as rows of tokens separated by `-----`
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cells.len() as f64).sqrt() as usize;
        let width = if width * width == self.cells.len() && width > 0 {
            width
        } else {
            self.cells.len().max(1)
        };

        for (row_idx, row) in self.cells.chunks(width).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
                writeln!(f, "{}", "-".repeat(width * 2 - 1))?;
            }
            let tokens: Vec<String> = row
                .iter()
                .map(|c| match c {
                    Cell::Empty => " ".to_string(),
                    Cell::Owned(id) => id.token().to_string(),
                })
                .collect();
            write!(f, "{}", tokens.join("|"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Cell = Cell::Owned(PlayerId(0));
    const B: Cell = Cell::Owned(PlayerId(1));
    const E: Cell = Cell::Empty;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::tic_tac_toe();
        assert_eq!(board.len(), 9);
        assert_eq!(board.empty_cells(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_claim_rejects_owned_cell() {
        let mut board = Board::tic_tac_toe();
        board.claim(4, PlayerId(0)).unwrap();
        let err = board.claim(4, PlayerId(1)).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidMove {
                cell: 4,
                owner: PlayerId(0),
                player: PlayerId(1)
            }
        );
        // Failed claim leaves the cell untouched
        assert_eq!(board.cell(4), A);
    }

    #[test]
    #[should_panic]
    fn test_claim_out_of_range_panics() {
        let mut board = Board::tic_tac_toe();
        let _ = board.claim(9, PlayerId(0));
    }

    #[test]
    fn test_every_line_wins() {
        for line in TIC_TAC_TOE_LINES {
            let mut board = Board::tic_tac_toe();
            for &c in line.iter() {
                board.claim(c, PlayerId(1)).unwrap();
            }
            assert_eq!(board.winner(), Some(Outcome::Win(PlayerId(1))));
        }
    }

    #[test]
    fn test_mixed_line_does_not_win() {
        let board = Board::from_cells(vec![A, A, B, E, E, E, E, E, E]);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_full_board_without_line_is_tie() {
        let board = Board::from_cells(vec![A, B, A, A, B, B, B, A, A]);
        assert_eq!(board.winner(), Some(Outcome::Tie));
        assert!(board.empty_cells().is_empty());
    }

    #[test]
    fn test_full_board_with_line_is_win_not_tie() {
        let board = Board::from_cells(vec![A, A, A, B, B, A, B, A, B]);
        assert_eq!(board.winner(), Some(Outcome::Win(PlayerId(0))));
    }

    #[test]
    fn test_empty_cells_ascending() {
        let board = Board::from_cells(vec![A, A, B, E, B, E, A, B, E]);
        assert_eq!(board.empty_cells(), vec![3, 5, 8]);
    }

    #[test]
    fn test_custom_lines() {
        static ROW: &[Line] = &[&[0, 1, 2, 3]];
        let mut board = Board::with_lines(4, ROW);
        for c in 0..3 {
            board.claim(c, PlayerId(0)).unwrap();
        }
        assert_eq!(board.winner(), None);
        board.claim(3, PlayerId(0)).unwrap();
        assert_eq!(board.winner(), Some(Outcome::Win(PlayerId(0))));
    }

    #[test]
    fn test_display() {
        let board = Board::from_cells(vec![A, B, E, E, A, E, E, E, B]);
        assert_eq!(board.to_string(), "X|O| \n-----\n |X| \n-----\n | |O");
    }
}
