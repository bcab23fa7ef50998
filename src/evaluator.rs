//! State evaluation for ranking search frontiers.
//!
//! Every search ranks candidate states by the value an [`Evaluator`] assigns
//! them. The default simply uses the running score; a heuristic can be
//! substituted without touching any search code.

use crate::state::{MazeState, ScoreType};

/// Scores a state whose transition has already been applied.
pub trait Evaluator {
    fn evaluate(&self, state: &MazeState) -> ScoreType;
}

/// Uses the accumulated game score as the evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameScoreEvaluator;

impl Evaluator for GameScoreEvaluator {
    #[inline]
    fn evaluate(&self, state: &MazeState) -> ScoreType {
        state.game_score
    }
}

impl<F> Evaluator for F
where
    F: Fn(&MazeState) -> ScoreType,
{
    fn evaluate(&self, state: &MazeState) -> ScoreType {
        self(state)
    }
}
