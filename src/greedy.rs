//! One-step policies: uniform random and greedy lookahead.

use crate::evaluator::Evaluator;
use crate::state::{Action, MazeState, ScoreType};

/// Pick a legal action uniformly at random.
///
/// # Panics
/// If the state has no legal action (malformed board).
pub fn random_action(state: &MazeState, rng: &mut fastrand::Rng) -> Action {
    let legal_actions = state.legal_actions();
    assert!(
        !legal_actions.is_empty(),
        "no legal action from ({}, {})",
        state.character.y,
        state.character.x
    );
    legal_actions[rng.usize(..legal_actions.len())]
}

/// Try every legal action once and keep the best-evaluated child.
///
/// Ties go to the first action in enumeration order.
///
/// # Panics
/// If the state has no legal action (malformed board).
pub fn greedy_action<E: Evaluator + ?Sized>(state: &MazeState, evaluator: &E) -> Action {
    let mut best: Option<(ScoreType, Action)> = None;
    for action in state.legal_actions() {
        let score = state.child(action, evaluator).evaluated_score;
        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, action));
        }
    }
    let Some((_, action)) = best else {
        panic!(
            "no legal action from ({}, {})",
            state.character.y, state.character.x
        );
    };
    action
}
