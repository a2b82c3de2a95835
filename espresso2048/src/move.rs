use std::fmt;

use super::{board::TilePointer, Score, Tile};

/// A direction to slide/merge the tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  /// All four directions.
  pub const ALL: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
  ];
}

/// A single merged cell of a move.
///
/// Consists of the target tile and the value it merged into, so a
/// renderer can flag the cell for a merge effect.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Merge {
  /// Target tile
  pub tile: TilePointer,
  /// Resulting value
  pub value: Tile,
}
impl fmt::Debug for Merge {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({:?}, {})", self.tile, self.value)
  }
}

/// Result of sliding the board in one direction.
#[derive(Debug)]
pub struct MoveOutcome {
  /// Whether the move changed the board at all
  pub changed: bool,
  /// Cells that were produced by a merge during this move
  pub merged: Vec<Merge>,
  /// Score gained by the merges of this move
  pub score_delta: Score,
}
