use std::{error::Error, fmt::Display};

use crate::Tile;

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum GameError {
  BoardTooSmall { size: u8 },
  InvalidWinValue { value: Tile },
}

impl Error for GameError {}

impl Display for GameError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      GameError::BoardTooSmall { size } => {
        write!(f, "board size {size} is too small, minimum is 2")
      }
      GameError::InvalidWinValue { value } => {
        write!(f, "win value {value} is not a power of two")
      }
    }
  }
}
