//! The rules engine of a sliding-tile merge puzzle.
//!
//! This crate provides:
//! - A [`Board`] holding the tile matrix, with a plain text format for
//!   fixtures and debugging
//! - A [`Game`] owning board and score, with the slide/merge/spawn
//!   operations and win/loss evaluation
//!
//! All randomness is injected per call, so a seeded RNG gives fully
//! reproducible games:
//! ```
//! use espresso2048_lib::{step, Direction, Game};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(4, 2048, &mut rng).unwrap();
//!
//! let (outcome, status) = step(&mut game, Direction::Left, &mut rng);
//! assert!(!status.is_end());
//! ```

mod board;
mod error;
mod game;
mod r#move; // r# to allow reserved keyword as name
mod state;

use rand::Rng;

pub use board::{Board, Error as BoardError, TilePointer};
pub use error::GameError;
pub use game::Game;
pub use r#move::{Direction, Merge, MoveOutcome};
pub use state::{evaluate, GameStatus};

/// Value of a single cell; `0` marks an empty cell.
pub type Tile = u32;
/// Running score of a game session.
pub type Score = u32;

/// Advance the game by one player move.
///
/// Slides the tiles in the given direction; if that changed the board,
/// spawns a new tile. Returns the move outcome together with the
/// re-evaluated game status.
pub fn step<R: Rng + ?Sized>(
  game: &mut Game,
  direction: Direction,
  rng: &mut R,
) -> (MoveOutcome, GameStatus) {
  let outcome = game.slide(direction);

  if outcome.changed {
    game.spawn_tile(rng);
  }

  (outcome, game.status())
}
