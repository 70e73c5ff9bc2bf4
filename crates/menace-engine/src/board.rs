use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{InvalidMoveError, ParseBoardError};

/// Contents of a single board cell.
///
/// The derived ordering (`Empty < X < O`) is the total order used when
/// selecting the canonical symmetry image of a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            _ => None,
        }
    }
}

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    #[must_use]
    pub const fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.cell().as_char()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A validated board position.
///
/// Squares are numbered 0-8, row by row:
///
/// ```text
/// 0 | 1 | 2
/// ---------
/// 3 | 4 | 5
/// ---------
/// 6 | 7 | 8
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// All nine squares in index order.
    pub const ALL: [Square; 9] = {
        let mut all = [Square(0); 9];
        let mut i = 0;
        while i < 9 {
            all[i] = Square(i as u8);
            i += 1;
        }
        all
    };

    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 9 { Some(Square(index)) } else { None }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.index() / 3
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.index() % 3
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal status of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    Ongoing,
    Won(Player),
    Draw,
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// An immutable 3×3 Tic-Tac-Toe position.
///
/// A `Board` is a plain value: applying a move produces a new board and
/// never mutates the original. The player to move is derived from cell
/// parity (X always moves first), so a board alone fully determines the
/// game state.
///
/// # Example
///
/// ```
/// use menace_engine::{Board, GameStatus, Player, Square};
///
/// let board = Board::EMPTY;
/// assert_eq!(board.to_move(), Player::X);
///
/// let board = board.apply(Square::new(4).unwrap()).unwrap();
/// assert_eq!(board.to_move(), Player::O);
/// assert_eq!(board.status(), GameStatus::Ongoing);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Board([Cell; 9]);

impl Board {
    /// The empty starting position.
    pub const EMPTY: Self = Board([Cell::Empty; 9]);

    #[must_use]
    pub const fn from_cells(cells: [Cell; 9]) -> Self {
        Board(cells)
    }

    #[must_use]
    pub const fn cells(&self) -> &[Cell; 9] {
        &self.0
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Cell {
        self.0[square.index()]
    }

    /// Returns the player whose turn it is, derived from cell parity.
    #[must_use]
    pub fn to_move(&self) -> Player {
        let xs = self.0.iter().filter(|c| **c == Cell::X).count();
        let os = self.0.iter().filter(|c| **c == Cell::O).count();
        if xs == os { Player::X } else { Player::O }
    }

    /// Returns the empty squares, or an empty list if the game is over.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<Square, 9> {
        if !self.status().is_ongoing() {
            return ArrayVec::new();
        }
        Square::ALL
            .into_iter()
            .filter(|sq| self.get(*sq) == Cell::Empty)
            .collect()
    }

    /// Evaluates the 8 winning lines and the full-board condition.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        for line in &LINES {
            let [a, b, c] = line.map(|i| self.0[i]);
            if a != Cell::Empty && a == b && b == c {
                let winner = match a {
                    Cell::X => Player::X,
                    Cell::O => Player::O,
                    Cell::Empty => unreachable!(),
                };
                return GameStatus::Won(winner);
            }
        }
        if self.0.iter().all(|c| *c != Cell::Empty) {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Plays the current player's symbol on `square`, returning the new
    /// board.
    ///
    /// Fails if the game is already over or the square is occupied. The
    /// original board is left untouched either way.
    pub fn apply(&self, square: Square) -> Result<Board, InvalidMoveError> {
        if !self.status().is_ongoing() {
            return Err(InvalidMoveError::GameOver);
        }
        if self.get(square) != Cell::Empty {
            return Err(InvalidMoveError::SquareOccupied(square));
        }
        let mut cells = self.0;
        cells[square.index()] = self.to_move().cell();
        Ok(Board(cells))
    }

    /// Encodes the board as a 9-character string of `.`, `X`, and `O`.
    ///
    /// This encoding is the persistent key format for learned matchboxes.
    #[must_use]
    pub fn encode(&self) -> String {
        self.0.iter().map(|c| c.as_char()).collect()
    }

    /// Decodes a 9-character board encoding produced by [`Board::encode`].
    pub fn decode(s: &str) -> Result<Self, ParseBoardError> {
        let mut cells = [Cell::Empty; 9];
        let mut len = 0;
        for (i, c) in s.chars().enumerate() {
            len += 1;
            if i >= 9 {
                continue;
            }
            cells[i] = Cell::from_char(c).ok_or(ParseBoardError::BadCell(c))?;
        }
        if len != 9 {
            return Err(ParseBoardError::BadLength(len));
        }
        Ok(Board(cells))
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Board::decode(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Board {
    /// Renders the board as a 3×3 grid; empty cells show their square
    /// number to help interactive input.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            if row > 0 {
                writeln!(f, "-----")?;
            }
            for col in 0..3 {
                if col > 0 {
                    write!(f, "|")?;
                }
                let index = row * 3 + col;
                match self.0[index] {
                    Cell::Empty => write!(f, "{index}")?,
                    cell => write!(f, "{}", cell.as_char())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        Board::decode(s).unwrap()
    }

    fn sq(i: u8) -> Square {
        Square::new(i).unwrap()
    }

    #[test]
    fn empty_board_has_nine_legal_moves() {
        let b = Board::EMPTY;
        assert_eq!(b.status(), GameStatus::Ongoing);
        assert_eq!(b.to_move(), Player::X);
        assert_eq!(b.legal_moves().len(), 9);
    }

    #[test]
    fn apply_alternates_players() {
        let b = Board::EMPTY.apply(sq(4)).unwrap();
        assert_eq!(b.get(sq(4)), Cell::X);
        assert_eq!(b.to_move(), Player::O);
        let b = b.apply(sq(0)).unwrap();
        assert_eq!(b.get(sq(0)), Cell::O);
        assert_eq!(b.to_move(), Player::X);
    }

    #[test]
    fn apply_to_occupied_square_fails() {
        let b = Board::EMPTY.apply(sq(4)).unwrap();
        assert_eq!(
            b.apply(sq(4)),
            Err(InvalidMoveError::SquareOccupied(sq(4)))
        );
        // original board is unchanged
        assert_eq!(b.get(sq(4)), Cell::X);
    }

    #[test]
    fn top_row_win_is_detected() {
        let b = board("XXX.OO...");
        assert_eq!(b.status(), GameStatus::Won(Player::X));
        assert!(b.legal_moves().is_empty());
        assert_eq!(b.apply(sq(3)), Err(InvalidMoveError::GameOver));
    }

    #[test]
    fn all_eight_lines_win() {
        let lines: [[u8; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];
        for line in lines {
            let mut cells = [Cell::Empty; 9];
            for i in line {
                cells[i as usize] = Cell::O;
            }
            let b = Board::from_cells(cells);
            assert_eq!(b.status(), GameStatus::Won(Player::O), "line {line:?}");
        }
    }

    #[test]
    fn full_board_without_winner_is_draw() {
        let b = board("XOXXOOOXX");
        assert_eq!(b.status(), GameStatus::Draw);
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn encode_decode_round_trip() {
        let b = board("X...O..X.");
        assert_eq!(b.encode(), "X...O..X.");
        assert_eq!(Board::decode(&b.encode()).unwrap(), b);
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert_eq!(Board::decode("X..").unwrap_err(), ParseBoardError::BadLength(3));
        assert_eq!(
            Board::decode("X...O..X.z").unwrap_err(),
            ParseBoardError::BadLength(10)
        );
        assert_eq!(
            Board::decode("X...?..X.").unwrap_err(),
            ParseBoardError::BadCell('?')
        );
    }

    #[test]
    fn serde_uses_string_encoding() {
        let b = board("X...O..X.");
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "\"X...O..X.\"");
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
        assert!(serde_json::from_str::<Board>("\"XX\"").is_err());
    }

    #[test]
    fn display_shows_square_numbers_for_empty_cells() {
        let b = board("X...O....");
        let rendered = b.to_string();
        assert_eq!(rendered, "X|1|2\n-----\n3|O|5\n-----\n6|7|8\n");
    }
}
