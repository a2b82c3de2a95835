use crate::r#move::Direction;

/// Indices of one line of the board, ordered from the edge the tiles
/// slide towards.
pub(crate) type Line = Vec<usize>;
pub(crate) type Lines = Vec<Line>;

/// Create `Line` representing given row, scanned left to right
fn make_row(size: usize, row: usize) -> Line {
  (0..size).map(|col| col + row * size).collect()
}

/// Create `Line` representing given column, scanned top to bottom
fn make_col(size: usize, col: usize) -> Line {
  (0..size).map(|row| col + row * size).collect()
}

/// Generate all lines of the board for the given move direction.
///
/// Each line starts at the edge the tiles slide towards, so the
/// compaction cursor can simply walk it front to back.
pub(crate) fn scan_lines(direction: Direction, size: u8) -> Lines {
  let size = usize::from(size);

  let reversed = |mut line: Line| -> Line {
    line.reverse();
    line
  };

  match direction {
    Direction::Left => (0..size).map(|row| make_row(size, row)).collect(),
    Direction::Right => (0..size).map(|row| reversed(make_row(size, row))).collect(),
    Direction::Up => (0..size).map(|col| make_col(size, col)).collect(),
    Direction::Down => (0..size).map(|col| reversed(make_col(size, col))).collect(),
  }
}
