use std::fmt;

use super::{
  board::{Board, TilePointer},
  Tile,
};

/// Status of a game, derived from the board contents after every move.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum GameStatus {
  InProgress,
  Won,
  Lost,
}
impl GameStatus {
  pub fn is_end(self) -> bool {
    !matches!(self, Self::InProgress)
  }

  pub fn is_won(self) -> bool {
    matches!(self, Self::Won)
  }

  pub fn is_lost(self) -> bool {
    matches!(self, Self::Lost)
  }
}

impl fmt::Display for GameStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}",
      match self {
        Self::InProgress => "in progress",
        Self::Won => "won",
        Self::Lost => "lost",
      }
    )
  }
}

/// Classify the board into won, lost or still in progress.
///
/// `already_won` is the session's sticky flag: once a win has been
/// reported, later evaluations skip the win scan and fall through to
/// the normal empty-cell and merge checks, so the player can keep
/// playing and still lose.
pub fn evaluate(board: &Board, win_value: Tile, already_won: bool) -> GameStatus {
  if !already_won && board.tiles().iter().any(|&tile| tile == win_value) {
    return GameStatus::Won;
  }

  if board.tiles().iter().any(|&tile| tile == 0) {
    return GameStatus::InProgress;
  }

  if has_possible_merge(board) {
    GameStatus::InProgress
  } else {
    GameStatus::Lost
  }
}

/// Check whether any two edge-adjacent tiles hold equal values.
///
/// Only the right and bottom neighbor of each cell need checking; the
/// other two pairings are covered from the neighbor's side.
fn has_possible_merge(board: &Board) -> bool {
  let size = board.size();

  (0..size).any(|row| {
    (0..size).any(|col| {
      let value = *board.get_tile(TilePointer { row, col });

      let right = col + 1 < size && *board.get_tile(TilePointer { row, col: col + 1 }) == value;
      let bottom = row + 1 < size && *board.get_tile(TilePointer { row: row + 1, col }) == value;

      right || bottom
    })
  })
}
