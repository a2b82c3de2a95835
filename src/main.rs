#![warn(clippy::pedantic)]

use std::{fs, path::Path, str::FromStr};

use clap::{Arg, ArgMatches, Command};
use espresso2048_lib::{step, Board, Direction, Game, GameStatus, Score, Tile};
use rand::{rngs::StdRng, SeedableRng};

type Error = Box<dyn std::error::Error>;

const DEFAULT_HIGH_SCORE_FILE: &str = ".espresso2048_highscore";

fn main() {
  let matches = Command::new("Espresso 2048")
    .version("1.0")
    .arg(
      Arg::new("board")
        .short('b')
        .long("board")
        .value_name("SIZE")
        .conflicts_with("debug")
        .help("Size of the game board (default is 4)")
        .takes_value(true),
    )
    .arg(
      Arg::new("win")
        .short('w')
        .long("win")
        .value_name("VALUE")
        .help("Tile value that wins the game (default is 2048)")
        .takes_value(true),
    )
    .arg(
      Arg::new("seed")
        .short('s')
        .long("seed")
        .value_name("SEED")
        .help("Seed for the tile spawner, for reproducible games")
        .takes_value(true),
    )
    .arg(
      Arg::new("highscore")
        .long("highscore")
        .value_name("FILE")
        .help("Where to keep the best score")
        .takes_value(true),
    )
    .arg(
      Arg::new("debug")
        .short('d')
        .long("debug")
        .value_name("FILE")
        .help("Load a board position from FILE and play from there")
        .takes_value(true),
    )
    .get_matches();

  let board_size: u8 = parse_arg(&matches, "board", 4);
  let win_value: Tile = parse_arg(&matches, "win", 2048);

  let mut rng = match matches.value_of("seed") {
    Some(seed) => StdRng::seed_from_u64(seed.parse().expect("invalid seed")),
    None => StdRng::from_os_rng(),
  };

  let high_score_file = matches
    .value_of("highscore")
    .unwrap_or(DEFAULT_HIGH_SCORE_FILE)
    .to_owned();

  let game = if let Some(path) = matches.value_of("debug") {
    load_board(path, win_value)
  } else {
    Game::new(board_size, win_value, &mut rng).map_err(Into::into)
  };

  match game {
    Ok(game) => run(game, &mut rng, Path::new(&high_score_file)),
    Err(error) => println!("Error: {error}"),
  }
}

fn parse_arg<T: FromStr>(matches: &ArgMatches, name: &str, default: T) -> T {
  matches.value_of(name).map_or(default, |value| {
    value
      .parse()
      .unwrap_or_else(|_| panic!("invalid value for {name}: {value}"))
  })
}

fn load_board(path: &str, win_value: Tile) -> Result<Game, Error> {
  let input = fs::read_to_string(path)?;
  let board = input.parse::<Board>()?;

  Ok(Game::with_board(board, win_value)?)
}

fn run(mut game: Game, rng: &mut StdRng, high_score_path: &Path) {
  use text_io::read;

  let mut high_score = load_high_score(high_score_path);

  println!("Espresso 2048: merge your way to {}!", game.win_value());
  println!("Moves: w/a/s/d, n for a new game, q to quit");
  print_game(&game, high_score);

  loop {
    let line: String = read!("{}\n");
    let line = line.trim().to_lowercase();

    if line.starts_with('$') || line == "q" {
      return;
    }

    if line == "n" {
      game.reset(rng);
      print_game(&game, high_score);
      continue;
    }

    let Some(direction) = parse_direction(&line) else {
      println!("Invalid input: {line:?}");
      continue;
    };

    let (outcome, status) = step(&mut game, direction, rng);

    if !outcome.changed {
      println!("Nothing moved");
      continue;
    }

    if game.score() > high_score {
      high_score = game.score();
      save_high_score(high_score_path, high_score);
    }

    print_game(&game, high_score);

    match status {
      GameStatus::Won => {
        println!("You win, espresso master! Keep playing, or start over with n");
      }
      GameStatus::Lost => println!("Game over, try again brewer! Start over with n"),
      GameStatus::InProgress => {}
    }
  }
}

fn parse_direction(line: &str) -> Option<Direction> {
  match line {
    "w" | "up" => Some(Direction::Up),
    "s" | "down" => Some(Direction::Down),
    "a" | "left" => Some(Direction::Left),
    "d" | "right" => Some(Direction::Right),
    _ => None,
  }
}

fn print_game(game: &Game, high_score: Score) {
  println!();
  println!("score: {} (best: {high_score})", game.score());
  println!("{}", game.board());
}

fn load_high_score(path: &Path) -> Score {
  fs::read_to_string(path)
    .ok()
    .and_then(|contents| contents.trim().parse().ok())
    .unwrap_or(0)
}

fn save_high_score(path: &Path, score: Score) {
  if let Err(error) = fs::write(path, score.to_string()) {
    println!("Failed to save high score: {error}");
  }
}
