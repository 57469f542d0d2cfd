use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::acquire_constants::{BOARD_COLS, BOARD_ROWS};

/// A board position. `row` 0 is row A and `col` 0 is column 1.
///
/// Ordering is by row, then by column, which is the order used to decide
/// who goes first: the tile nearest row A wins, ties go to the tile nearest
/// column 1.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile {
    pub row: usize,
    pub col: usize,
}

impl Tile {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < BOARD_ROWS && col < BOARD_COLS).then_some(Self { row, col })
    }

    /// Every tile on the board, column by column.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..BOARD_COLS).flat_map(|col| (0..BOARD_ROWS).map(move |row| Tile { row, col }))
    }

    /// The column number printed on the tile, 1 through 12.
    pub fn column_number(&self) -> usize {
        self.col + 1
    }

    pub fn row_letter(&self) -> char {
        (b'A' + self.row as u8) as char
    }

    /// Orthogonal neighbours that are still on the board.
    pub fn adjacent(&self) -> Vec<Tile> {
        let mut adjacent = Vec::with_capacity(4);
        if self.col > 0 {
            adjacent.push(Tile { row: self.row, col: self.col - 1 });
        }
        if self.col + 1 < BOARD_COLS {
            adjacent.push(Tile { row: self.row, col: self.col + 1 });
        }
        if self.row > 0 {
            adjacent.push(Tile { row: self.row - 1, col: self.col });
        }
        if self.row + 1 < BOARD_ROWS {
            adjacent.push(Tile { row: self.row + 1, col: self.col });
        }
        adjacent
    }

    /// Sort key used when listing a hotel's tiles: by column, then row.
    pub fn board_order(&self) -> (usize, usize) {
        (self.col, self.row)
    }
}

impl From<(usize, usize)> for Tile {
    fn from(value: (usize, usize)) -> Self {
        Self {
            row: value.0,
            col: value.1,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // column is a number, row is a letter
        write!(f, "{}{}", self.column_number(), self.row_letter())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
#[error("'{0}' is not a tile on the board")]
pub struct ParseTileError(pub String);

impl FromStr for Tile {
    type Err = ParseTileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let err = || ParseTileError(s.to_string());

        let letter = label.chars().last().ok_or_else(err)?.to_ascii_uppercase();
        if !letter.is_ascii_uppercase() {
            return Err(err());
        }
        let digits = &label[..label.len() - 1];
        let column: usize = digits.parse().map_err(|_| err())?;
        if column == 0 {
            return Err(err());
        }

        Tile::new((letter as u8 - b'A') as usize, column - 1).ok_or_else(err)
    }
}

impl TryFrom<String> for Tile {
    type Error = ParseTileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.to_string()
    }
}

#[cfg(test)]
pub(crate) fn t(label: &str) -> Tile {
    label.parse().unwrap()
}
