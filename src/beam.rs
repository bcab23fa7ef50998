//! Beam search variants.
//!
//! All three searches expand the game tree level by level from a root state
//! and answer with the first action of the best state they end on:
//!
//! - [`beam_search_action`] keeps a ranked frontier and expands only the best
//!   `beam_width` parents of each level.
//! - [`beam_search_action_by_nth_element`] expands every parent of the level
//!   and then keeps the best `beam_width` children.
//! - [`beam_search_action_with_time_threshold`] is the first variant without a
//!   depth bound, stopped by a wall-clock budget instead.
//!
//! Equal scores are ordered by insertion: of two states with the same
//! evaluation, the one generated first ranks higher.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::evaluator::Evaluator;
use crate::state::{Action, MazeState};
use crate::time_keeper::TimeKeeper;

/// A frontier entry; ordered by evaluation, then by insertion (earlier first).
struct Ranked {
    state: MazeState,
    seq: u64,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.state
            .evaluated_score
            .cmp(&other.state.evaluated_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Max-priority frontier of evaluated states.
#[derive(Default)]
pub struct Beam {
    heap: BinaryHeap<Ranked>,
    next_seq: u64,
}

impl Beam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an evaluated state.
    pub fn push(&mut self, state: MazeState) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Ranked { state, seq });
    }

    /// Remove and return the best state.
    pub fn pop(&mut self) -> Option<MazeState> {
        self.heap.pop().map(|r| r.state)
    }

    /// The best state, without removing it.
    pub fn peek(&self) -> Option<&MazeState> {
        self.heap.peek().map(|r| &r.state)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Copy of `state` usable as a search root: no first action recorded yet.
pub(crate) fn search_root(state: &MazeState) -> MazeState {
    let mut root = state.clone();
    root.first_action = None;
    root
}

/// Pop up to `beam_width` parents from `now_beam` and push all their children
/// into `next_beam`.
fn expand_best<E: Evaluator + ?Sized>(
    now_beam: &mut Beam,
    next_beam: &mut Beam,
    beam_width: usize,
    evaluator: &E,
) {
    for _ in 0..beam_width {
        let Some(now_state) = now_beam.pop() else {
            break;
        };
        for action in now_state.legal_actions() {
            next_beam.push(now_state.child(action, evaluator));
        }
    }
}

/// Priority-queue beam search of fixed width and depth.
///
/// Each level pops the best `beam_width` states and expands all of their legal
/// actions into the next level. Stops after `beam_depth` levels or as soon as
/// the best state of a level is terminal. Returns `None` only when nothing
/// could be expanded (terminal root, zero width or zero depth).
pub fn beam_search_action<E: Evaluator + ?Sized>(
    state: &MazeState,
    beam_width: usize,
    beam_depth: usize,
    evaluator: &E,
) -> Option<Action> {
    if state.is_done() {
        return None;
    }
    let mut now_beam = Beam::new();
    let mut best_action = None;
    now_beam.push(search_root(state));

    for t in 0..beam_depth {
        let mut next_beam = Beam::new();
        expand_best(&mut now_beam, &mut next_beam, beam_width, evaluator);
        now_beam = next_beam;

        let Some(best_state) = now_beam.peek() else {
            break;
        };
        best_action = best_state.first_action;
        trace!(
            depth = t,
            frontier = now_beam.len(),
            best = best_state.evaluated_score,
            "beam level expanded"
        );
        if best_state.is_done() {
            break;
        }
    }
    best_action
}

/// Ranking used by the partial-selection beam: best score first, then the
/// earliest generated.
fn by_rank(a: &(usize, MazeState), b: &(usize, MazeState)) -> Ordering {
    b.1.evaluated_score
        .cmp(&a.1.evaluated_score)
        .then_with(|| a.0.cmp(&b.0))
}

/// Best state of a level; ties go to the earliest in the vector.
fn best_of(beam: &[MazeState]) -> Option<&MazeState> {
    beam.iter().rev().max_by_key(|s| s.evaluated_score)
}

/// Beam search that expands every state of a level, then keeps the best
/// `beam_width` children with a partial selection.
///
/// Unlike [`beam_search_action`], pruning happens after expansion: every
/// survivor of the previous level contributes children before any are cut.
pub fn beam_search_action_by_nth_element<E: Evaluator + ?Sized>(
    state: &MazeState,
    beam_width: usize,
    beam_depth: usize,
    evaluator: &E,
) -> Option<Action> {
    if state.is_done() || beam_width == 0 {
        return None;
    }
    let mut now_beam = vec![search_root(state)];

    for t in 0..beam_depth {
        let mut next_beam: Vec<MazeState> = Vec::new();
        for now_state in &now_beam {
            for action in now_state.legal_actions() {
                next_beam.push(now_state.child(action, evaluator));
            }
        }

        if next_beam.len() > beam_width {
            let generated = next_beam.len();
            let mut ranked: Vec<(usize, MazeState)> = next_beam.into_iter().enumerate().collect();
            ranked.select_nth_unstable_by(beam_width - 1, by_rank);
            ranked.truncate(beam_width);
            // Keep generation order among the survivors so ties stay stable.
            ranked.sort_unstable_by_key(|(i, _)| *i);
            next_beam = ranked.into_iter().map(|(_, s)| s).collect();
            trace!(depth = t, generated, kept = beam_width, "beam level pruned");
        }
        if next_beam.is_empty() {
            break;
        }

        now_beam = next_beam;
        if best_of(&now_beam).is_some_and(MazeState::is_done) {
            break;
        }
    }
    best_of(&now_beam).and_then(|s| s.first_action)
}

/// Beam search bounded by wall-clock time instead of depth.
///
/// The deadline is polled before every pop. Once it has passed, the best
/// action of the last completed level is returned. If not even the first
/// level completed, the first legal action of the root is returned instead, so
/// any budget (including zero) yields a legal move for a non-terminal state.
/// Like the other searches, returns `None` for a terminal root or a zero
/// `beam_width`.
pub fn beam_search_action_with_time_threshold<E: Evaluator + ?Sized>(
    state: &MazeState,
    beam_width: usize,
    time_threshold_ms: u64,
    evaluator: &E,
) -> Option<Action> {
    let time_keeper = TimeKeeper::new(time_threshold_ms);
    if state.is_done() || beam_width == 0 {
        return None;
    }
    let fallback = state.legal_actions().first().copied();
    let mut now_beam = Beam::new();
    let mut best_action = None;
    now_beam.push(search_root(state));

    for t in 0.. {
        let mut next_beam = Beam::new();
        for _ in 0..beam_width {
            if time_keeper.is_time_over() {
                debug!(
                    depth = t,
                    elapsed_us = time_keeper.elapsed().as_micros() as u64,
                    "beam search time over"
                );
                return best_action.or(fallback);
            }
            let Some(now_state) = now_beam.pop() else {
                break;
            };
            for action in now_state.legal_actions() {
                next_beam.push(now_state.child(action, evaluator));
            }
        }
        now_beam = next_beam;

        let Some(best_state) = now_beam.peek() else {
            break;
        };
        best_action = best_state.first_action;
        if best_state.is_done() {
            break;
        }
    }
    best_action.or(fallback)
}
