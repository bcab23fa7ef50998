//! Maze-Search: bounded tree search on a small grid-collection game.
//!
//! An agent walks a small board for a fixed number of turns, collecting the
//! reward on every cell it enters. This crate provides the game and a family
//! of search strategies that pick the agent's next move.
//!
//! ## Modules
//!
//! - [`constants`] - Default board dimensions and search parameters
//! - [`config`] - Validated runtime board configuration
//! - [`state`] - Game state, actions and move execution
//! - [`evaluator`] - Pluggable state scoring
//! - [`time_keeper`] - Wall-clock budget for anytime searches
//! - [`greedy`] - Random and greedy one-step policies
//! - [`beam`] - Priority-queue, partial-selection and time-bounded beam search
//! - [`chokudai`] - Multi-pass beam search with per-depth frontiers
//! - [`hill_climb`] - Multi-agent auto-move variant and hill climbing
//! - [`driver`] - Playing and benchmarking games
//!
//! ## Example
//!
//! ```
//! use maze_search::beam::beam_search_action;
//! use maze_search::config::GameConfig;
//! use maze_search::evaluator::GameScoreEvaluator;
//! use maze_search::state::MazeState;
//!
//! let mut state = MazeState::new(GameConfig::default(), 0);
//! while !state.is_done() {
//!     let action = beam_search_action(&state, 2, 4, &GameScoreEvaluator).unwrap();
//!     state.advance(action);
//! }
//! println!("Score: {}", state.game_score);
//! ```

pub mod beam;
pub mod chokudai;
pub mod config;
pub mod constants;
pub mod driver;
pub mod evaluator;
pub mod greedy;
pub mod hill_climb;
pub mod state;
pub mod time_keeper;
