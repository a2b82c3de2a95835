use rand::{seq::IteratorRandom, Rng};

use super::{
  board::{lines, Board},
  error::GameError,
  r#move::{Direction, Merge, MoveOutcome},
  state::{self, GameStatus},
  Score, Tile,
};

/// Authoritative owner of the board and the score.
///
/// The only component allowed to mutate them. All randomness is
/// injected per call, so games stay reproducible under a seeded RNG.
/// The sticky `won` flag lives here as an explicit field, which keeps
/// concurrent games (e.g. in tests) independent of each other.
pub struct Game {
  board: Board,
  score: Score,
  win_value: Tile,
  won: bool,
}

impl Game {
  /// Create a new game: empty board, score 0, two spawned tiles.
  ///
  /// # Errors
  /// Returns an error for a board smaller than 2x2 or a win value that
  /// is not a power of two.
  pub fn new<R: Rng + ?Sized>(
    size: u8,
    win_value: Tile,
    rng: &mut R,
  ) -> Result<Game, GameError> {
    if size < 2 {
      return Err(GameError::BoardTooSmall { size });
    }
    check_win_value(win_value)?;

    let mut game = Game {
      board: Board::new_empty(size),
      score: 0,
      win_value,
      won: false,
    };

    game.spawn_tile(rng);
    game.spawn_tile(rng);

    Ok(game)
  }

  /// Create a game from a prepared board position.
  ///
  /// The score starts at 0 and no tiles are spawned.
  ///
  /// # Errors
  /// Returns an error for a win value that is not a power of two.
  pub fn with_board(board: Board, win_value: Tile) -> Result<Game, GameError> {
    check_win_value(win_value)?;

    Ok(Game {
      board,
      score: 0,
      win_value,
      won: false,
    })
  }

  /// Slide all tiles in the given direction, merging equal pairs.
  ///
  /// Every line is scanned from the edge the tiles slide towards, so
  /// the pair closest to that edge always merges first, and a tile
  /// produced by a merge never merges again within the same move. The
  /// board is replaced wholesale and the score bumped only when the
  /// move changed anything.
  pub fn slide(&mut self, direction: Direction) -> MoveOutcome {
    let size = self.board.size();

    let mut data = vec![0; usize::from(size).pow(2)].into_boxed_slice();
    let mut merged = Vec::new();
    let mut score_delta = 0;
    let mut changed = false;

    for line in lines::scan_lines(direction, size) {
      let mut next_slot = 0;
      let mut last_value = 0;
      let mut last_slot = 0;

      for (position, &index) in line.iter().enumerate() {
        let value = *self.board.get_tile_raw(index);
        if value == 0 {
          continue;
        }

        if value == last_value {
          // merge into the previously placed tile; clearing last_value
          // blocks that tile from merging again this move
          let target = line[last_slot];
          data[target] = value * 2;
          score_delta += value * 2;
          merged.push(Merge {
            tile: self.board.get_ptr_from_index(target),
            value: value * 2,
          });
          last_value = 0;
          changed = true;
        } else {
          let target = line[next_slot];
          data[target] = value;
          if next_slot != position {
            changed = true;
          }
          last_value = value;
          last_slot = next_slot;
          next_slot += 1;
        }
      }
    }

    if changed {
      self.board.replace(data);
      self.score += score_delta;
    }

    MoveOutcome {
      changed,
      merged,
      score_delta,
    }
  }

  /// Spawn a tile on a uniformly chosen empty cell.
  ///
  /// The value is 2 with probability 0.9, otherwise 4. Returns `false`
  /// on a full board, which is expected, not an error.
  pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
    let Some(ptr) = self.board.pointers_to_empty_tiles().choose(rng) else {
      return false;
    };

    let value = if rng.random_range(0..10) < 9 { 2 } else { 4 };
    self.board.set_tile(ptr, value);

    true
  }

  /// Discard the game and start over with the same configuration.
  pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.board = Board::new_empty(self.board.size());
    self.score = 0;
    self.won = false;

    self.spawn_tile(rng);
    self.spawn_tile(rng);
  }

  /// Evaluate the game status and latch the sticky won flag.
  ///
  /// `Won` is reported at most once per session; afterwards the
  /// evaluation falls through to the normal in-progress/lost checks
  /// until [`Game::reset`].
  pub fn status(&mut self) -> GameStatus {
    let status = state::evaluate(&self.board, self.win_value, self.won);

    if status.is_won() {
      self.won = true;
    }

    status
  }

  /// Read-only snapshot of the board, for rendering.
  pub fn board(&self) -> &Board {
    &self.board
  }

  /// Current score.
  pub fn score(&self) -> Score {
    self.score
  }

  /// The tile value that wins the game.
  pub fn win_value(&self) -> Tile {
    self.win_value
  }

  /// Whether a win has already been reported this session.
  pub fn already_won(&self) -> bool {
    self.won
  }
}

fn check_win_value(value: Tile) -> Result<(), GameError> {
  if value < 2 || !value.is_power_of_two() {
    return Err(GameError::InvalidWinValue { value });
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use rand::{rngs::StdRng, SeedableRng};

  use super::*;
  use crate::board::TilePointer;

  const CHECKERBOARD: &str = "2 4 2 4
4 2 4 2
2 4 2 4
4 2 4 2";

  fn game_from(data: &str) -> Game {
    Game::with_board(Board::from_str(data).unwrap(), 2048).unwrap()
  }

  fn count_tiles(board: &Board) -> usize {
    board.tiles().iter().filter(|&&tile| tile != 0).count()
  }

  #[test]
  fn test_new_game() {
    let mut rng = StdRng::seed_from_u64(42);
    let game = Game::new(4, 2048, &mut rng).unwrap();

    assert_eq!(game.score(), 0);
    assert_eq!(game.board().size(), 4);
    assert_eq!(count_tiles(game.board()), 2);
    assert!(game
      .board()
      .tiles()
      .iter()
      .all(|&tile| tile == 0 || tile == 2 || tile == 4));
  }

  #[test]
  fn test_rejects_invalid_config() {
    let mut rng = StdRng::seed_from_u64(0);

    assert!(matches!(
      Game::new(1, 2048, &mut rng),
      Err(GameError::BoardTooSmall { size: 1 })
    ));
    assert!(matches!(
      Game::new(4, 1000, &mut rng),
      Err(GameError::InvalidWinValue { value: 1000 })
    ));
    assert!(matches!(
      Game::new(4, 0, &mut rng),
      Err(GameError::InvalidWinValue { value: 0 })
    ));
    assert!(matches!(
      Game::new(4, 1, &mut rng),
      Err(GameError::InvalidWinValue { value: 1 })
    ));
  }

  #[test]
  fn test_slide_left_merges_pairs() {
    let mut game = game_from(
      "2 2 4 4
. . . .
. . . .
. . . .",
    );

    let outcome = game.slide(Direction::Left);

    assert!(outcome.changed);
    assert_eq!(outcome.score_delta, 12);
    assert_eq!(game.score(), 12);
    assert_eq!(
      game.board(),
      &Board::from_str(
        "4 8 . .
. . . .
. . . .
. . . ."
      )
      .unwrap()
    );

    assert_eq!(outcome.merged.len(), 2);
    assert_eq!(outcome.merged[0].tile, TilePointer { row: 0, col: 0 });
    assert_eq!(outcome.merged[0].value, 4);
    assert_eq!(outcome.merged[1].tile, TilePointer { row: 0, col: 1 });
    assert_eq!(outcome.merged[1].value, 8);
  }

  #[test]
  fn test_merge_priority_and_no_cascade() {
    // a run of three merges the pair nearest the edge,
    // and a merged tile never merges again in the same move
    let mut game = game_from(
      "2 2 2 .
2 2 4 .
. . . .
. . . .",
    );

    let outcome = game.slide(Direction::Left);

    assert_eq!(outcome.score_delta, 8);
    assert_eq!(
      game.board(),
      &Board::from_str(
        "4 2 . .
4 4 . .
. . . .
. . . ."
      )
      .unwrap()
    );
  }

  #[test]
  fn test_four_of_a_kind_merges_twice() {
    let mut game = game_from(
      "4 4 4 4
. . . .
. . . .
. . . .",
    );

    let outcome = game.slide(Direction::Left);

    assert_eq!(outcome.score_delta, 16);
    assert_eq!(outcome.merged.len(), 2);
    assert_eq!(
      game.board(),
      &Board::from_str(
        "8 8 . .
. . . .
. . . .
. . . ."
      )
      .unwrap()
    );
  }

  #[test]
  fn test_slide_all_directions() {
    const DATA: &str = "2 . 2 4
. 2 . 4
2 . . .
. 2 . 4";

    let expected = [
      (
        Direction::Left,
        "4 4 . .
2 4 . .
2 . . .
2 4 . .",
        4,
      ),
      (
        Direction::Right,
        ". . 4 4
. . 2 4
. . . 2
. . 2 4",
        4,
      ),
      (
        Direction::Up,
        "4 4 2 8
. . . 4
. . . .
. . . .",
        16,
      ),
      (
        Direction::Down,
        ". . . .
. . . .
. . . 4
4 4 2 8",
        16,
      ),
    ];

    for (direction, result, score) in expected {
      let mut game = game_from(DATA);
      let outcome = game.slide(direction);

      assert!(outcome.changed);
      assert_eq!(outcome.score_delta, score, "direction {direction:?}");
      assert_eq!(
        game.board(),
        &Board::from_str(result).unwrap(),
        "direction {direction:?}"
      );
    }
  }

  #[test]
  fn test_blocked_move_is_untouched() {
    let mut game = game_from(CHECKERBOARD);
    let before = game.board().clone();

    for direction in Direction::ALL {
      let outcome = game.slide(direction);

      assert!(!outcome.changed);
      assert!(outcome.merged.is_empty());
      assert_eq!(outcome.score_delta, 0);
      assert_eq!(game.board(), &before);
      assert_eq!(game.score(), 0);
    }

    // a blocked move stays blocked when repeated
    let outcome = game.slide(Direction::Left);
    assert!(!outcome.changed);
    assert_eq!(game.board(), &before);
  }

  #[test]
  fn test_conservation() {
    let mut game = game_from(
      "2 2 4 8
4 4 . 2
. 8 8 .
2 . . 2",
    );
    let sum_before: Tile = game.board().tiles().iter().sum();
    let count_before = count_tiles(game.board());

    let outcome = game.slide(Direction::Left);

    // merging preserves the total tile value, one cell per merge goes away
    let sum_after: Tile = game.board().tiles().iter().sum();
    assert_eq!(sum_before, sum_after);
    assert_eq!(
      count_tiles(game.board()),
      count_before - outcome.merged.len()
    );
  }

  #[test]
  fn test_spawn_tile() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = Game::with_board(Board::new_empty(4), 2048).unwrap();

    assert!(game.spawn_tile(&mut rng));
    assert_eq!(count_tiles(game.board()), 1);

    let value = *game
      .board()
      .tiles()
      .iter()
      .find(|&&tile| tile != 0)
      .unwrap();
    assert!(value == 2 || value == 4);
  }

  #[test]
  fn test_spawn_on_full_board() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = game_from(CHECKERBOARD);
    let before = game.board().clone();

    assert!(!game.spawn_tile(&mut rng));
    assert_eq!(game.board(), &before);
  }

  #[test]
  fn test_spawn_fills_board() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut game = Game::with_board(Board::new_empty(10), 2048).unwrap();

    while game.spawn_tile(&mut rng) {}

    let twos = game.board().tiles().iter().filter(|&&t| t == 2).count();
    let fours = game.board().tiles().iter().filter(|&&t| t == 4).count();

    assert_eq!(twos + fours, 100);
    assert!(twos > fours);
  }

  #[test]
  fn test_reset_discards_state() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut game = game_from(
      "2 2 . .
. . . .
. . . .
. . . .",
    );

    game.slide(Direction::Left);
    assert_eq!(game.score(), 4);

    game.reset(&mut rng);

    assert_eq!(game.score(), 0);
    assert!(!game.already_won());
    assert_eq!(count_tiles(game.board()), 2);
  }

  #[test]
  fn test_win_reported_once() {
    let mut game = game_from(
      "1024 1024 . .
. . . .
. . . .
. . . .",
    );

    let outcome = game.slide(Direction::Left);
    assert_eq!(outcome.score_delta, 2048);

    assert_eq!(game.status(), GameStatus::Won);
    assert!(game.already_won());
    // the session goes on, the win is not reported again
    assert_eq!(game.status(), GameStatus::InProgress);
  }

  #[test]
  fn test_lost_after_win() {
    let mut game = game_from(
      "2048 4 2 4
4 2 4 2
2 4 2 4
4 2 4 2",
    );

    assert_eq!(game.status(), GameStatus::Won);
    assert_eq!(game.status(), GameStatus::Lost);
  }

  #[test]
  fn test_step_spawns_only_after_change() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut game = game_from(
      "2 2 . .
. . . .
. . . .
. . . .",
    );

    let (outcome, status) = crate::step(&mut game, Direction::Left, &mut rng);

    assert!(outcome.changed);
    // the merged pair collapsed to one tile, then one tile spawned
    assert_eq!(count_tiles(game.board()), 2);
    assert_eq!(status, GameStatus::InProgress);

    let mut game = game_from(CHECKERBOARD);
    let (outcome, status) = crate::step(&mut game, Direction::Up, &mut rng);

    assert!(!outcome.changed);
    assert_eq!(count_tiles(game.board()), 16);
    assert_eq!(status, GameStatus::Lost);
  }

  #[test]
  fn test_score_monotonic_over_random_game() {
    let mut rng = StdRng::seed_from_u64(123);
    let mut game = Game::new(4, 2048, &mut rng).unwrap();
    let mut last_score = 0;

    for _ in 0..10_000 {
      for direction in Direction::ALL {
        let (_, status) = crate::step(&mut game, direction, &mut rng);

        assert!(game.score() >= last_score);
        last_score = game.score();

        if status.is_lost() {
          return;
        }
      }
    }

    panic!("game did not end");
  }
}
