use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};

use std::io::{stdin, stdout, Write};
use std::time::Instant;

use inarow_ai::{
    board::other_player,
    evaluator::Heuristic,
    outcome::{outcome, outcome_message, Outcome, Tally},
    rules::{apply_move, is_terminal, legal_move_in_column},
    *,
};

mod display;
use display::*;

const YES: [&str; 5] = ["", "y", "Y", "Yes", "yes"];
const NO: [&str; 4] = ["n", "N", "No", "no"];

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AiMode {
    Minimax,
    Random,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HeuristicArg {
    Simple,
    OpenEnded,
}

/// Play N-in-a-row against the computer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,

    /// Pieces in a line needed to win
    #[arg(short, long, default_value_t = DEFAULT_ROW_LENGTH)]
    row_length: usize,

    /// Drop pieces to the bottom of their column
    #[arg(short, long)]
    gravity: bool,

    /// Maximum search depth in plies, unlimited if not given
    #[arg(short, long)]
    depth: Option<usize>,

    /// How the computer picks its moves
    #[arg(long, value_enum, default_value_t = AiMode::Minimax)]
    ai: AiMode,

    /// Position scoring used when the search stops early
    #[arg(long, value_enum, default_value_t = HeuristicArg::Simple)]
    heuristic: HeuristicArg,

    /// Open with a random move instead of the searched one
    #[arg(long)]
    random_opening: bool,

    /// Search the first ply on all cores
    #[arg(long)]
    parallel: bool,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Play this many rounds of the computer against a random mover and report the tally
    #[arg(long, value_name = "ROUNDS")]
    autoplay: Option<usize>,

    /// Log more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let game = GameConfig::new(args.width, args.height, args.row_length, args.gravity);
    game.validate().context("cannot start the game")?;

    let search = SearchConfig {
        max_depth: args.depth,
        mode: match args.ai {
            AiMode::Minimax => SearchMode::Minimax,
            AiMode::Random => SearchMode::Random,
        },
        heuristic: match args.heuristic {
            HeuristicArg::Simple => Heuristic::Simple,
            HeuristicArg::OpenEnded => Heuristic::OpenEnded,
        },
        random_opening: args.random_opening,
        parallel: args.parallel,
        seed: args.seed,
    };
    search.validate().context("cannot start the game")?;
    info!("playing {:?} with {:?}", game, search);

    match args.autoplay {
        Some(rounds) => autoplay(&game, &search, rounds),
        None => play_game(&game, &search),
    }
}

fn read_line() -> Result<String> {
    stdout().flush()?;
    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Err(anyhow!("input closed"));
    }
    Ok(buffer.trim().to_string())
}

fn prompt_boolean(prompt: &str) -> Result<bool> {
    loop {
        print!("{}", prompt);
        let answer = read_line()?;
        if NO.contains(&answer.as_str()) {
            return Ok(false);
        } else if YES.contains(&answer.as_str()) {
            return Ok(true);
        } else {
            println!("What?");
        }
    }
}

fn take_turn_human(board: &Board) -> Result<Board> {
    loop {
        print!("Your go: ");
        let input = read_line()?;
        let number = match input.parse::<usize>() {
            Ok(number) if number >= 1 => number,
            _ => {
                println!("Really?");
                continue;
            }
        };

        // under gravity a column is chosen, otherwise a cell
        let index = if board.gravity() {
            match legal_move_in_column(board, number - 1) {
                Some(index) => index,
                None => {
                    println!("Column {} is not playable", number);
                    continue;
                }
            }
        } else {
            number - 1
        };

        match apply_move(board, index) {
            Ok(next) => return Ok(next),
            Err(err) => println!("{}", err),
        }
    }
}

fn take_turn_ai(board: &Board, solver: &mut Solver) -> Board {
    println!("AI's go:");
    let nodes_before = solver.node_count;
    let start_time = Instant::now();
    let next = solver.choose_move(board);
    info!(
        "AI moved in {:.3}ms after searching {} positions",
        start_time.elapsed().as_secs_f64() * 1000.0,
        solver.node_count - nodes_before
    );
    next
}

fn play_round(game: &GameConfig, solver: &mut Solver) -> Result<Outcome> {
    let mut board = Board::initial(game)?;
    display_board(&board)?;

    let human = if prompt_boolean("Wanna start? ")? {
        game.first_player
    } else {
        other_player(game.first_player)
    };

    loop {
        board = if board.to_move() == human {
            take_turn_human(&board)?
        } else {
            take_turn_ai(&board, solver)
        };
        display_board(&board)?;

        if let Some(outcome) = outcome(&board, human) {
            return Ok(outcome);
        }
    }
}

fn play_game(game: &GameConfig, search: &SearchConfig) -> Result<()> {
    let mut solver = Solver::new(*search);
    let mut tally = Tally::default();

    loop {
        let outcome = play_round(game, &mut solver)?;
        println!("{}", outcome_message(outcome));
        tally.record(outcome);

        if !prompt_boolean("\nPlay again? (Y/n): ")? {
            println!("\n{}", tally);
            break;
        }
    }
    Ok(())
}

/// Plays the configured AI against a random mover, who starts every other round
fn autoplay(game: &GameConfig, search: &SearchConfig, rounds: usize) -> Result<()> {
    let mut solver = Solver::new(*search);
    let mut random = Solver::new(SearchConfig {
        mode: SearchMode::Random,
        seed: search.seed.map(|seed| seed.wrapping_add(1)),
        ..*search
    });
    let mut tally = Tally::default();

    let progress = ProgressBar::new(rounds as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing rounds: {bar:40.cyan/blue} {pos}/{len} {msg} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let start = Instant::now();
    for round in 0..rounds {
        let random_piece = if round % 2 == 0 {
            game.first_player
        } else {
            other_player(game.first_player)
        };

        let mut board = Board::initial(game)?;
        while !is_terminal(&board) {
            board = if board.to_move() == random_piece {
                random.choose_move(&board)
            } else {
                solver.choose_move(&board)
            };
        }

        let result = outcome(&board, random_piece)
            .ok_or_else(|| anyhow!("round ended on an undecided board {}", board.layout()))?;
        tally.record(result);
        progress.set_message(&format!("AI {} random {} tie {}", tally.ai, tally.human, tally.tie));
        progress.inc(1);
    }
    progress.finish_with_message("done");

    info!(
        "played {} rounds in {:.3}s, {} positions searched",
        rounds,
        start.elapsed().as_secs_f64(),
        solver.node_count
    );
    println!(
        "AI:     {}\nRandom: {}\nTie:    {}",
        tally.ai, tally.human, tally.tie
    );
    Ok(())
}
