//! Chokudai search: beam search with one ranked frontier per depth.
//!
//! Instead of rolling a single frontier forward, every depth keeps its own
//! [`Beam`]. Each pass walks the depths top to bottom and expands the best
//! `beam_width` states of each into the next depth. States left behind in
//! shallow frontiers get their turn in later passes, so repeated passes widen
//! the search while memory stays bounded by what has actually been generated.

use tracing::trace;

use crate::beam::{Beam, search_root};
use crate::evaluator::Evaluator;
use crate::state::{Action, MazeState};

/// Run `beam_number` passes of chokudai search over `beam_depth` levels.
///
/// Terminal states are never expanded: when the best state of a level is
/// terminal, that level is skipped for the rest of the pass and the state is
/// left for the final scan. The answer is the first action of the best state
/// at the deepest non-empty level. Returns `None` if the root is terminal or
/// no pass expanded anything.
pub fn chokudai_search_action<E: Evaluator + ?Sized>(
    state: &MazeState,
    beam_width: usize,
    beam_depth: usize,
    beam_number: usize,
    evaluator: &E,
) -> Option<Action> {
    if state.is_done() {
        return None;
    }
    let mut beam: Vec<Beam> = (0..=beam_depth).map(|_| Beam::new()).collect();
    beam[0].push(search_root(state));

    for cnt in 0..beam_number {
        for t in 0..beam_depth {
            let (head, tail) = beam.split_at_mut(t + 1);
            let now_beam = &mut head[t];
            let next_beam = &mut tail[0];
            for _ in 0..beam_width {
                match now_beam.peek() {
                    Some(now_state) if !now_state.is_done() => {}
                    _ => break,
                }
                let Some(now_state) = now_beam.pop() else {
                    break;
                };
                for action in now_state.legal_actions() {
                    next_beam.push(now_state.child(action, evaluator));
                }
            }
        }
        trace!(
            pass = cnt,
            deepest = beam[beam_depth].len(),
            "chokudai pass complete"
        );
    }

    beam.iter()
        .rev()
        .find_map(|b| b.peek())
        .and_then(|s| s.first_action)
}
