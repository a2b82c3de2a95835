use std::{error, fmt};

#[derive(Debug, Clone)]
pub enum Error {
  TooSmall {
    size: usize,
  },
  NotSquare {
    height: usize,
    line: usize,
    width: usize,
  },
  InvalidTile {
    value: String,
  },
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::TooSmall { size } => write!(f, "board too small: {size}, but minimum is 2"),
      Error::NotSquare {
        height,
        line,
        width,
      } => {
        write!(
          f,
          "board is not a square: line {line} is {width} tiles wide, but {height} was expected"
        )
      }
      Error::InvalidTile { value } => {
        write!(f, "invalid tile value: {value}, expected a power of two or an empty cell")
      }
    }
  }
}
impl error::Error for Error {}
