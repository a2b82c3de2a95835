mod error;
pub(crate) mod lines;

use std::{fmt, str::FromStr};

pub use error::Error;

use crate::Tile;

/// Represents a pointer to a tile on the board.
///
/// Doesn't provide any bounds checking or other guarantees.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct TilePointer {
  /// row index, counted from the top
  pub row: u8,
  /// column index, counted from the left
  pub col: u8,
}
impl fmt::Debug for TilePointer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.row, self.col)
  }
}
impl fmt::Display for TilePointer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{self:?}")
  }
}

/// A game board.
///
/// The board is guaranteed to be a square, at least 2x2, holding only
/// empty cells and powers of two.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
  size: u8,
  data: Box<[Tile]>,
}

impl Board {
  /// Create a new board from a 2D vector of tiles.
  ///
  /// The board must be a square and at least 2x2, and every non-empty
  /// cell must hold a power of two.
  ///
  /// # Errors
  /// Returns an error if the board is not a square, is too small, or
  /// contains an invalid tile value.
  pub fn new(data: Vec<Vec<Tile>>) -> Result<Board, Error> {
    if data.len() < 2 {
      return Err(Error::TooSmall { size: data.len() });
    }

    for (index, row) in data.iter().enumerate() {
      if row.len() != data.len() {
        return Err(Error::NotSquare {
          height: data.len(),
          line: index + 1,
          width: row.len(),
        });
      }
    }

    if let Some(&value) = data
      .iter()
      .flatten()
      .find(|&&value| value != 0 && (value < 2 || !value.is_power_of_two()))
    {
      return Err(Error::InvalidTile {
        value: value.to_string(),
      });
    }

    let size = data.len() as u8;
    let data = data.into_iter().flatten().collect();

    Ok(Board { size, data })
  }

  /// Create an empty board of the given size.
  pub fn new_empty(size: u8) -> Board {
    let data = vec![0; usize::from(size).pow(2)].into_boxed_slice();

    Board { size, data }
  }

  /// Get iterator over pointers to all empty tiles on the board.
  pub fn pointers_to_empty_tiles(&self) -> impl Iterator<Item = TilePointer> + '_ {
    self
      .data
      .iter()
      .enumerate()
      .filter(|(.., tile)| **tile == 0)
      .map(|(index, ..)| self.get_ptr_from_index(index))
  }

  /// Get reference to slice of all tiles in the board, row-major.
  pub fn tiles(&self) -> &[Tile] {
    &self.data
  }

  /// Convert a raw index to `TilePointer`.
  pub fn get_ptr_from_index(&self, index: usize) -> TilePointer {
    let row = (index / usize::from(self.size)) as u8;
    let col = (index % usize::from(self.size)) as u8;

    TilePointer { row, col }
  }

  fn get_index(size: u8, ptr: TilePointer) -> usize {
    let TilePointer { row, col } = ptr;
    Self::get_index_raw(size, row, col)
  }

  fn get_index_raw(size: u8, row: u8, col: u8) -> usize {
    usize::from(size) * usize::from(row) + usize::from(col)
  }

  /// Get value of a tile at the given pointer.
  ///
  /// # Panics
  /// Panics if the pointer is out of bounds.
  pub fn get_tile(&self, ptr: TilePointer) -> &Tile {
    let index = Self::get_index(self.size, ptr);
    self.get_tile_raw(index)
  }

  /// Get value of a tile at the given index.
  ///
  /// # Panics
  /// Panics if the index is out of bounds.
  pub fn get_tile_raw(&self, index: usize) -> &Tile {
    self
      .data
      .get(index)
      .unwrap_or_else(|| panic!("Tile index out of bounds: {index}"))
  }

  /// Set a tile at the given pointer.
  ///
  /// # Panics
  /// Panics at attempt to overwrite an already occupied tile.
  pub fn set_tile(&mut self, ptr: TilePointer, value: Tile) {
    let index = Self::get_index(self.size, ptr);

    let tile = self.get_tile_raw(index);

    // either write a value to an empty tile (place) or 0 to an occupied tile (clear)
    assert!(
      (value == 0) != (*tile == 0),
      "attempted to overwrite tile {ptr} ({tile}) with value {value} at board \n{self}"
    );

    self.data[index] = value;
  }

  /// Get the size of the board.
  pub fn size(&self) -> u8 {
    self.size
  }

  /// Swap in a rebuilt tile storage after a successful move.
  pub(crate) fn replace(&mut self, data: Box<[Tile]>) {
    debug_assert_eq!(data.len(), self.data.len());
    self.data = data;
  }
}

impl FromStr for Board {
  type Err = Error;

  /// Parse a string into a board.
  ///
  /// Expects the same format that is produced by [`Board::to_string`]:
  /// one line per row, cells separated by whitespace, `.` (or `0`) for
  /// an empty cell.
  ///
  /// # Errors
  /// Returns an error if the board is not a square, is too small, or
  /// contains an invalid tile value.
  fn from_str(input_string: &str) -> Result<Board, Self::Err> {
    let parse_tile = |token: &str| match token {
      "." => Ok(0),
      _ => token.parse().map_err(|_| Error::InvalidTile {
        value: token.to_owned(),
      }),
    };

    let parsed_data = input_string
      .lines()
      .map(|row| {
        row
          .split_whitespace()
          .map(parse_tile)
          .collect::<Result<Vec<_>, _>>()
      })
      .collect::<Result<Vec<Vec<Tile>>, _>>()?;

    Board::new(parsed_data)
  }
}

impl fmt::Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in self.data.chunks(usize::from(self.size)) {
      for &tile in row {
        if tile == 0 {
          write!(f, "{:>6}", '.')?;
        } else {
          write!(f, "{tile:>6}")?;
        }
      }

      writeln!(f)?;
    }

    Ok(())
  }
}
