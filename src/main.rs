//! Maze-Search: play and benchmark search strategies on the maze game.
//!
//! ## Usage
//!
//! - `maze-search play --strategy beam` - Replay one game, printing every turn
//! - `maze-search bench --strategy chokudai --games 1000` - Mean score over many games
//! - `maze-search hill-climb` - Place auto-moving characters by hill climbing
//!
//! Set `RUST_LOG=maze_search=debug` (or `trace`) to see search internals on stderr.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::EnvFilter;

use maze_search::config::GameConfig;
use maze_search::constants::{
    AUTO_MOVE_END_TURN, AUTO_MOVE_H, AUTO_MOVE_W, BEAM_DEPTH, BEAM_WIDTH, BENCH_GAMES,
    CHARACTER_N, CHOKUDAI_PASSES, END_TURN, H, HILL_CLIMB_ITERATIONS, TIME_THRESHOLD_MS, W,
};
use maze_search::driver::{Strategy, mean_score, play_auto_move_game, play_game};

/// Maze-Search: bounded tree search on a grid-collection game
#[derive(Parser)]
#[command(name = "maze-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and print the board after every turn
    Play {
        /// Board seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[command(flatten)]
        board: BoardArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Play many games and print the mean score
    Bench {
        /// Number of games
        #[arg(long, default_value_t = BENCH_GAMES)]
        games: usize,
        #[command(flatten)]
        board: BoardArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Choose starting cells for auto-moving characters by hill climbing
    HillClimb {
        /// Board seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Hill-climbing iterations
        #[arg(long, default_value_t = HILL_CLIMB_ITERATIONS)]
        iterations: usize,
        /// Number of characters
        #[arg(long, default_value_t = CHARACTER_N)]
        characters: usize,
        /// Board height
        #[arg(long, default_value_t = AUTO_MOVE_H)]
        height: usize,
        /// Board width
        #[arg(long, default_value_t = AUTO_MOVE_W)]
        width: usize,
        /// Number of turns
        #[arg(long, default_value_t = AUTO_MOVE_END_TURN)]
        end_turn: usize,
        /// Seed for the hill-climbing random stream
        #[arg(long, default_value_t = 0)]
        action_seed: u64,
    },
}

#[derive(Args)]
struct BoardArgs {
    /// Board height
    #[arg(long, default_value_t = H)]
    height: usize,
    /// Board width
    #[arg(long, default_value_t = W)]
    width: usize,
    /// Number of turns
    #[arg(long, default_value_t = END_TURN)]
    end_turn: usize,
}

impl BoardArgs {
    fn config(&self) -> Result<GameConfig> {
        GameConfig::new(self.height, self.width, self.end_turn).context("invalid board")
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    Random,
    Greedy,
    Beam,
    NthElement,
    Timed,
    Chokudai,
}

#[derive(Args)]
struct SearchArgs {
    /// Move-selection strategy
    #[arg(long, value_enum, default_value = "beam")]
    strategy: StrategyKind,
    /// States kept per level
    #[arg(long, default_value_t = BEAM_WIDTH)]
    beam_width: usize,
    /// Levels searched per move
    #[arg(long, default_value_t = BEAM_DEPTH)]
    beam_depth: usize,
    /// Chokudai passes
    #[arg(long, default_value_t = CHOKUDAI_PASSES)]
    passes: usize,
    /// Time budget per move for the timed beam search
    #[arg(long, default_value_t = TIME_THRESHOLD_MS)]
    time_ms: u64,
    /// Seed for the random-move stream
    #[arg(long, default_value_t = 0)]
    action_seed: u64,
}

impl SearchArgs {
    fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyKind::Random => Strategy::Random,
            StrategyKind::Greedy => Strategy::Greedy,
            StrategyKind::Beam => Strategy::BeamSearch {
                beam_width: self.beam_width,
                beam_depth: self.beam_depth,
            },
            StrategyKind::NthElement => Strategy::NthElementBeamSearch {
                beam_width: self.beam_width,
                beam_depth: self.beam_depth,
            },
            StrategyKind::Timed => Strategy::TimedBeamSearch {
                beam_width: self.beam_width,
                time_threshold_ms: self.time_ms,
            },
            StrategyKind::Chokudai => Strategy::Chokudai {
                beam_width: self.beam_width,
                beam_depth: self.beam_depth,
                beam_number: self.passes,
            },
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Play {
            seed,
            board,
            search,
        } => {
            let strategy = search.strategy();
            let mut rng = fastrand::Rng::with_seed(search.action_seed);
            play_game(&strategy, board.config()?, seed, &mut rng, &mut stdout)
                .with_context(|| format!("playing seed {seed} with {strategy}"))?;
        }
        Commands::Bench {
            games,
            board,
            search,
        } => {
            let strategy = search.strategy();
            let mut rng = fastrand::Rng::with_seed(search.action_seed);
            let score_mean = mean_score(&strategy, board.config()?, games, &mut rng)
                .with_context(|| format!("benchmarking {strategy}"))?;
            writeln!(stdout, "Score:\t{score_mean}")?;
        }
        Commands::HillClimb {
            seed,
            iterations,
            characters,
            height,
            width,
            end_turn,
            action_seed,
        } => {
            let config = GameConfig::new(height, width, end_turn).context("invalid board")?;
            let mut rng = fastrand::Rng::with_seed(action_seed);
            play_auto_move_game(config, characters, seed, iterations, &mut rng, &mut stdout)
                .context("running hill climb")?;
        }
    }
    Ok(())
}
