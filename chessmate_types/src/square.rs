/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::BOARD_SIZE;

/// Represents a single square on an `8x8` chess board.
///
/// Squares are addressed by `(row, col)`. Row `0` is Black's back rank (rank 8)
/// and row `7` is White's (rank 1); column `0` is the a-file.
///
/// A [`Square`] can only be built through checked constructors, so every value
/// is on the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Square {
    row: u8,
    col: u8,
}

macro_rules! square_constants {
    ($($name:ident = ($row:expr, $col:expr)),* $(,)?) => {
        $(pub const $name: Self = Self { row: $row, col: $col };)*
    };
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    square_constants! {
        A8 = (0, 0), B8 = (0, 1), C8 = (0, 2), D8 = (0, 3), E8 = (0, 4), F8 = (0, 5), G8 = (0, 6), H8 = (0, 7),
        A7 = (1, 0), B7 = (1, 1), C7 = (1, 2), D7 = (1, 3), E7 = (1, 4), F7 = (1, 5), G7 = (1, 6), H7 = (1, 7),
        A6 = (2, 0), B6 = (2, 1), C6 = (2, 2), D6 = (2, 3), E6 = (2, 4), F6 = (2, 5), G6 = (2, 6), H6 = (2, 7),
        A5 = (3, 0), B5 = (3, 1), C5 = (3, 2), D5 = (3, 3), E5 = (3, 4), F5 = (3, 5), G5 = (3, 6), H5 = (3, 7),
        A4 = (4, 0), B4 = (4, 1), C4 = (4, 2), D4 = (4, 3), E4 = (4, 4), F4 = (4, 5), G4 = (4, 6), H4 = (4, 7),
        A3 = (5, 0), B3 = (5, 1), C3 = (5, 2), D3 = (5, 3), E3 = (5, 4), F3 = (5, 5), G3 = (5, 6), H3 = (5, 7),
        A2 = (6, 0), B2 = (6, 1), C2 = (6, 2), D2 = (6, 3), E2 = (6, 4), F2 = (6, 5), G2 = (6, 6), H2 = (6, 7),
        A1 = (7, 0), B1 = (7, 1), C1 = (7, 2), D1 = (7, 3), E1 = (7, 4), F1 = (7, 5), G1 = (7, 6), H1 = (7, 7),
    }

    /// Creates a new [`Square`] from a row and column, if both are on the board.
    ///
    /// # Example
    /// ```
    /// # use chessmate_types::Square;
    /// assert_eq!(Square::new(7, 4), Some(Square::E1));
    /// assert_eq!(Square::new(8, 0), None);
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Creates a [`Square`] from signed coordinates, as produced by offset arithmetic.
    #[inline(always)]
    pub const fn from_signed(row: i8, col: i8) -> Option<Self> {
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// Creates a [`Square`] from an index in `0..64`, counted row by row from `a8`.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self {
                row: (index / 8) as u8,
                col: (index % 8) as u8,
            })
        } else {
            None
        }
    }

    /// Parses a [`Square`] from algebraic text like `"e4"`.
    ///
    /// Malformed text is an error, never a panic.
    ///
    /// # Example
    /// ```
    /// # use chessmate_types::Square;
    /// assert_eq!(Square::from_uci("e4").unwrap(), Square::E4);
    /// assert_eq!(Square::from_uci("A8").unwrap(), Square::A8);
    /// assert!(Square::from_uci("z2").is_err());
    /// assert!(Square::from_uci("22").is_err());
    /// assert!(Square::from_uci("e9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be a file followed by a rank, like \"e4\". Got {square:?}");
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            bail!("Invalid file in square {square:?}: must be in a..=h");
        }
        let Some(rank) = rank.to_digit(10).filter(|r| (1..=8).contains(r)) else {
            bail!("Invalid rank in square {square:?}: must be in 1..=8");
        };

        let col = file as u8 - b'a';
        let row = BOARD_SIZE - rank as u8;
        Ok(Self { row, col })
    }

    /// Returns the algebraic name of this square, like `"e4"`.
    pub fn to_uci(&self) -> String {
        self.to_string()
    }

    /// The row of this square, `0` being Black's back rank.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// The column of this square, `0` being the a-file.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Index of this square in `0..64`, counted row by row from `a8`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    /// The file letter of this square, `'a'..='h'`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// The rank digit of this square, `'1'..='8'`.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'8' - self.row) as char
    }

    /// Returns the square `drow` rows and `dcol` columns away, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use chessmate_types::Square;
    /// assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
    /// assert_eq!(Square::A1.offset(0, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, drow: i8, dcol: i8) -> Option<Self> {
        Self::from_signed(self.row as i8 + drow, self.col as i8 + dcol)
    }

    /// Signed `(row, col)` displacement from `self` to `other`.
    #[inline(always)]
    pub const fn delta(&self, other: Self) -> (i8, i8) {
        (
            other.row as i8 - self.row as i8,
            other.col as i8 - self.col as i8,
        )
    }

    /// Returns `true` if both squares share a row.
    #[inline(always)]
    pub const fn same_row(&self, other: Self) -> bool {
        self.row == other.row
    }

    /// Returns `true` if both squares share a column.
    #[inline(always)]
    pub const fn same_col(&self, other: Self) -> bool {
        self.col == other.col
    }

    /// An iterator over all 64 squares, row by row starting at `a8`.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uci_matches_constants() {
        assert_eq!(Square::from_uci("a8").unwrap(), Square::A8);
        assert_eq!(Square::from_uci("h1").unwrap(), Square::H1);
        assert_eq!(Square::from_uci("e4").unwrap(), Square::new(4, 4).unwrap());
        assert_eq!(Square::B5.to_string(), "b5");
        assert_eq!(Square::G1.to_uci(), "g1");
    }

    #[test]
    fn test_malformed_text_is_rejected() {
        for bad in ["", "e", "e44", "i1", "a0", "a9", "zz", "22", "4e"] {
            assert!(Square::from_uci(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_iter_covers_every_square_once() {
        let squares: Vec<_> = Square::iter().collect();
        assert_eq!(squares.len(), Square::COUNT);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[63], Square::H1);
        assert!(squares.iter().enumerate().all(|(i, sq)| sq.index() == i));
    }

    #[test]
    fn test_offsets_stay_on_board() {
        assert_eq!(Square::H8.offset(-1, 1), None);
        assert_eq!(Square::D4.offset(1, -1), Some(Square::C3));
        assert_eq!(Square::B1.delta(Square::C3), (-2, 1));
    }
}
