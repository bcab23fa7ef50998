//! Game drivers: pick a strategy, play games, report scores.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::beam::{
    beam_search_action, beam_search_action_by_nth_element, beam_search_action_with_time_threshold,
};
use crate::chokudai::chokudai_search_action;
use crate::config::{ConfigError, GameConfig};
use crate::evaluator::{Evaluator, GameScoreEvaluator};
use crate::greedy::{greedy_action, random_action};
use crate::hill_climb::{AutoMoveMazeState, hill_climb};
use crate::state::{Action, MazeState, ScoreType};

/// Errors surfaced while playing a game.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("{strategy} found no action at turn {turn}")]
    NoAction { strategy: Strategy, turn: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write game output: {0}")]
    Io(#[from] io::Error),
}

/// A move-selection policy for the single-agent game, with its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly random legal move
    Random,
    /// One-step lookahead
    Greedy,
    /// Priority-queue beam search
    BeamSearch { beam_width: usize, beam_depth: usize },
    /// Expand-all beam search with partial selection
    NthElementBeamSearch { beam_width: usize, beam_depth: usize },
    /// Beam search bounded by wall-clock time
    TimedBeamSearch {
        beam_width: usize,
        time_threshold_ms: u64,
    },
    /// Multi-pass beam search with one frontier per depth
    Chokudai {
        beam_width: usize,
        beam_depth: usize,
        beam_number: usize,
    },
}

impl Strategy {
    /// Ask the strategy for the next move from `state`.
    ///
    /// `rng` is only drawn from by [`Strategy::Random`].
    pub fn choose_action<E: Evaluator + ?Sized>(
        &self,
        state: &MazeState,
        evaluator: &E,
        rng: &mut fastrand::Rng,
    ) -> Option<Action> {
        match *self {
            Strategy::Random => Some(random_action(state, rng)),
            Strategy::Greedy => Some(greedy_action(state, evaluator)),
            Strategy::BeamSearch {
                beam_width,
                beam_depth,
            } => beam_search_action(state, beam_width, beam_depth, evaluator),
            Strategy::NthElementBeamSearch {
                beam_width,
                beam_depth,
            } => beam_search_action_by_nth_element(state, beam_width, beam_depth, evaluator),
            Strategy::TimedBeamSearch {
                beam_width,
                time_threshold_ms,
            } => beam_search_action_with_time_threshold(
                state,
                beam_width,
                time_threshold_ms,
                evaluator,
            ),
            Strategy::Chokudai {
                beam_width,
                beam_depth,
                beam_number,
            } => chokudai_search_action(state, beam_width, beam_depth, beam_number, evaluator),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Random => write!(f, "random"),
            Strategy::Greedy => write!(f, "greedy"),
            Strategy::BeamSearch {
                beam_width,
                beam_depth,
            } => write!(f, "beam(width={beam_width}, depth={beam_depth})"),
            Strategy::NthElementBeamSearch {
                beam_width,
                beam_depth,
            } => write!(f, "nth-element(width={beam_width}, depth={beam_depth})"),
            Strategy::TimedBeamSearch {
                beam_width,
                time_threshold_ms,
            } => write!(f, "timed(width={beam_width}, ms={time_threshold_ms})"),
            Strategy::Chokudai {
                beam_width,
                beam_depth,
                beam_number,
            } => write!(
                f,
                "chokudai(width={beam_width}, depth={beam_depth}, passes={beam_number})"
            ),
        }
    }
}

/// Play `state` to the end with `strategy`, without output.
pub fn play_to_end(
    strategy: &Strategy,
    mut state: MazeState,
    rng: &mut fastrand::Rng,
) -> Result<MazeState, DriverError> {
    while !state.is_done() {
        let action = next_action(strategy, &state, rng)?;
        state.advance(action);
    }
    Ok(state)
}

fn next_action(
    strategy: &Strategy,
    state: &MazeState,
    rng: &mut fastrand::Rng,
) -> Result<Action, DriverError> {
    strategy
        .choose_action(state, &GameScoreEvaluator, rng)
        .ok_or(DriverError::NoAction {
            strategy: *strategy,
            turn: state.turn(),
        })
}

/// Play one game from the board generated by `seed`, writing every state.
pub fn play_game<W: Write>(
    strategy: &Strategy,
    config: GameConfig,
    seed: u64,
    rng: &mut fastrand::Rng,
    out: &mut W,
) -> Result<MazeState, DriverError> {
    let mut state = MazeState::new(config, seed);
    writeln!(out, "{state}")?;
    while !state.is_done() {
        let action = next_action(strategy, &state, rng)?;
        state.advance(action);
        debug!(
            turn = state.turn(),
            %action,
            score = state.game_score,
            "turn played"
        );
        writeln!(out, "{state}")?;
    }
    info!(%strategy, seed, score = state.game_score, "game finished");
    Ok(state)
}

/// Average final score of `strategy` over `game_number` games.
///
/// Board seeds come from a generator seeded with 0, so every strategy is
/// measured on the same sequence of boards.
pub fn mean_score(
    strategy: &Strategy,
    config: GameConfig,
    game_number: usize,
    rng: &mut fastrand::Rng,
) -> Result<f64, DriverError> {
    if game_number == 0 {
        return Ok(0.0);
    }
    let mut mt_for_construct = fastrand::Rng::with_seed(0);
    let mut total: ScoreType = 0;
    for i in 0..game_number {
        let seed = mt_for_construct.u64(..);
        let state = play_to_end(strategy, MazeState::new(config, seed), rng)?;
        debug!(game = i, seed, score = state.game_score, "benchmark game finished");
        total += state.game_score;
    }
    let score_mean = total as f64 / game_number as f64;
    info!(%strategy, games = game_number, score_mean, "benchmark finished");
    Ok(score_mean)
}

/// Hill-climb the starting cells of an auto-move game, then replay it.
///
/// Writes the chosen assignment, every simulated turn and the final score.
pub fn play_auto_move_game<W: Write>(
    config: GameConfig,
    characters: usize,
    seed: u64,
    iterations: usize,
    rng: &mut fastrand::Rng,
    out: &mut W,
) -> Result<ScoreType, DriverError> {
    let state = AutoMoveMazeState::new(config, characters, seed)?;
    let state = hill_climb(&state, iterations, rng);
    writeln!(out, "{state}")?;

    let mut now_state = state.begin();
    while !now_state.is_done() {
        now_state.advance();
        writeln!(out, "{now_state}")?;
    }
    let score = now_state.game_score;
    writeln!(out, "Score of hillClimb : {score}")?;
    info!(seed, iterations, score, "auto-move game finished");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [Strategy; 6] = [
        Strategy::Random,
        Strategy::Greedy,
        Strategy::BeamSearch {
            beam_width: 2,
            beam_depth: 4,
        },
        Strategy::NthElementBeamSearch {
            beam_width: 2,
            beam_depth: 4,
        },
        Strategy::TimedBeamSearch {
            beam_width: 2,
            time_threshold_ms: 1,
        },
        Strategy::Chokudai {
            beam_width: 1,
            beam_depth: 4,
            beam_number: 2,
        },
    ];

    #[test]
    fn test_every_strategy_finishes_a_game() {
        let config = GameConfig::default();
        for strategy in &STRATEGIES {
            let mut rng = fastrand::Rng::with_seed(0);
            let end = play_to_end(strategy, MazeState::new(config, 3), &mut rng).unwrap();
            assert!(end.is_done(), "{strategy}");
        }
    }

    #[test]
    fn test_play_game_writes_every_turn() {
        let mut out = Vec::new();
        let mut rng = fastrand::Rng::with_seed(0);
        let end = play_game(
            &Strategy::Greedy,
            GameConfig::default(),
            0,
            &mut rng,
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("turn:\t").count(), 5);
        assert!(text.contains(&format!("turn:\t4\nscore:\t{}\n", end.game_score)));
    }

    #[test]
    fn test_benchmark_is_reproducible() {
        let config = GameConfig::default();
        let strategy = Strategy::BeamSearch {
            beam_width: 2,
            beam_depth: 4,
        };
        let a = mean_score(&strategy, config, 20, &mut fastrand::Rng::with_seed(0)).unwrap();
        let b = mean_score(&strategy, config, 20, &mut fastrand::Rng::with_seed(0)).unwrap();
        assert_eq!(a, b);
        assert!(a > 0.0);
        assert_eq!(
            mean_score(&strategy, config, 0, &mut fastrand::Rng::with_seed(0)).unwrap(),
            0.0
        );
    }

    #[test]
    fn test_search_beats_random_on_average() {
        let config = GameConfig::default();
        let random = mean_score(
            &Strategy::Random,
            config,
            100,
            &mut fastrand::Rng::with_seed(0),
        )
        .unwrap();
        let beam = mean_score(
            &Strategy::BeamSearch {
                beam_width: 64,
                beam_depth: 4,
            },
            config,
            100,
            &mut fastrand::Rng::with_seed(0),
        )
        .unwrap();
        assert!(beam > random, "beam {beam} vs random {random}");
    }

    #[test]
    fn test_display_uses_cli_names() {
        assert_eq!(Strategy::Random.to_string(), "random");
        assert_eq!(Strategy::Greedy.to_string(), "greedy");
        assert_eq!(
            Strategy::NthElementBeamSearch {
                beam_width: 2,
                beam_depth: 4
            }
            .to_string(),
            "nth-element(width=2, depth=4)"
        );
        assert_eq!(
            Strategy::TimedBeamSearch {
                beam_width: 3,
                time_threshold_ms: 10
            }
            .to_string(),
            "timed(width=3, ms=10)"
        );
        assert_eq!(
            Strategy::Chokudai {
                beam_width: 1,
                beam_depth: 4,
                beam_number: 2
            }
            .to_string(),
            "chokudai(width=1, depth=4, passes=2)"
        );
    }

    #[test]
    fn test_zero_width_reports_no_action() {
        let strategy = Strategy::BeamSearch {
            beam_width: 0,
            beam_depth: 4,
        };
        let mut rng = fastrand::Rng::with_seed(0);
        let err = play_to_end(&strategy, MazeState::default(), &mut rng).unwrap_err();
        assert!(matches!(err, DriverError::NoAction { turn: 0, .. }));
    }

    #[test]
    fn test_auto_move_game_reports_score() {
        let mut out = Vec::new();
        let mut rng = fastrand::Rng::with_seed(0);
        let score = play_auto_move_game(GameConfig::auto_move(), 3, 0, 100, &mut rng, &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with(&format!("Score of hillClimb : {score}\n")));
        assert!(score > 0);
    }
}
