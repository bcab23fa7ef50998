//! Single-agent maze state and move execution.
//!
//! A [`MazeState`] is one decision point of the collection game: the agent's
//! cell, the rewards still on the board, the turn counter and the running
//! score. States are plain values. Searches clone a parent and call
//! [`MazeState::advance`] on the clone, so sibling branches never share a
//! board.

use std::fmt;

use crate::config::{ConfigError, GameConfig};
use crate::constants::{DX, DY, MAX_POINT};
use crate::evaluator::{Evaluator, GameScoreEvaluator};

/// Scores and evaluations.
pub type ScoreType = i64;

/// Larger than any reachable score; used as the starting bound for maxima.
pub const INF: ScoreType = 1_000_000_000;

/// A cell on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Coord {
    pub y: usize,
    pub x: usize,
}

impl Coord {
    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }

    /// The cell reached by taking `action`, or `None` if it leaves the board.
    #[inline]
    pub fn step(self, action: Action, config: &GameConfig) -> Option<Coord> {
        let (dy, dx) = action.delta();
        let ty = self.y as isize + dy;
        let tx = self.x as isize + dx;
        config
            .contains(ty, tx)
            .then(|| Coord::new(ty as usize, tx as usize))
    }
}

/// One move of the agent.
///
/// The discriminants are the action indices; enumeration always follows this
/// order so that searches break ties reproducibly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// +x
    Right = 0,
    /// -x
    Left = 1,
    /// +y
    Down = 2,
    /// -y
    Up = 3,
}

impl Action {
    /// All actions in enumeration order.
    pub const ALL: [Action; 4] = [Action::Right, Action::Left, Action::Down, Action::Up];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    /// `(dy, dx)` offset of this action.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        (DY[self.index()], DX[self.index()])
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Right => "right",
            Action::Left => "left",
            Action::Down => "down",
            Action::Up => "up",
        };
        f.write_str(name)
    }
}

/// A single-agent maze position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeState {
    config: GameConfig,
    /// Row-major rewards. Collected cells are zero.
    points: Vec<u32>,
    turn: usize,
    /// Current agent cell
    pub character: Coord,
    /// Sum of the rewards collected so far
    pub game_score: ScoreType,
    /// Ranking score; only meaningful after an evaluator has run
    pub evaluated_score: ScoreType,
    /// First action taken from the search root that led here
    pub first_action: Option<Action>,
}

impl Default for MazeState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 0)
    }
}

impl MazeState {
    /// Build a board from a seed.
    ///
    /// Draw order: agent row, agent column, then every other cell row-major.
    /// The agent's own cell starts empty.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let character = Coord::new(
            rng.usize(..config.height()),
            rng.usize(..config.width()),
        );

        let mut points = vec![0; config.cells()];
        for y in 0..config.height() {
            for x in 0..config.width() {
                if y == character.y && x == character.x {
                    continue;
                }
                points[y * config.width() + x] = rng.u32(..MAX_POINT);
            }
        }

        Self::with_board(config, character, points)
    }

    /// Build a state from an explicit row-major reward grid.
    ///
    /// The reward under the agent is left as given; it is never collected
    /// unless the agent walks back onto it.
    pub fn from_parts(
        config: GameConfig,
        character: Coord,
        points: Vec<u32>,
    ) -> Result<Self, ConfigError> {
        if points.len() != config.cells() {
            return Err(ConfigError::GridSize {
                expected: config.cells(),
                got: points.len(),
            });
        }
        if !config.contains(character.y as isize, character.x as isize) {
            return Err(ConfigError::OffBoard {
                y: character.y,
                x: character.x,
            });
        }
        Ok(Self::with_board(config, character, points))
    }

    fn with_board(config: GameConfig, character: Coord, points: Vec<u32>) -> Self {
        Self {
            config,
            points,
            turn: 0,
            character,
            game_score: 0,
            evaluated_score: 0,
            first_action: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of turns played so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Reward at `(y, x)`.
    #[inline]
    pub fn point(&self, y: usize, x: usize) -> u32 {
        self.points[y * self.config.width() + x]
    }

    /// Row-major view of the remaining rewards.
    pub fn points(&self) -> &[u32] {
        &self.points
    }

    /// Sum of the rewards still on the board.
    pub fn remaining_points(&self) -> ScoreType {
        self.points.iter().map(|&p| ScoreType::from(p)).sum()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.turn == self.config.end_turn()
    }

    /// Move the agent, collect the reward at the destination and end the turn.
    ///
    /// # Panics
    /// If `action` leaves the board. Callers only pass actions obtained from
    /// [`MazeState::legal_actions`].
    pub fn advance(&mut self, action: Action) {
        debug_assert!(!self.is_done(), "advance called on a finished game");
        let Some(next) = self.character.step(action, &self.config) else {
            panic!(
                "illegal action {action} from ({}, {})",
                self.character.y, self.character.x
            );
        };
        self.character = next;
        let idx = next.y * self.config.width() + next.x;
        let point = self.points[idx];
        if point > 0 {
            self.game_score += ScoreType::from(point);
            self.points[idx] = 0;
        }
        self.turn += 1;
    }

    /// Every action whose destination stays on the board, in enumeration order.
    pub fn legal_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&a| self.character.step(a, &self.config).is_some())
            .collect()
    }

    /// Refresh `evaluated_score` with the default evaluator.
    pub fn evaluate_score(&mut self) {
        self.evaluated_score = GameScoreEvaluator.evaluate(self);
    }

    /// Clone this state, apply `action` to the clone and evaluate it.
    ///
    /// `first_action` is inherited from `self`, or set to `action` when `self`
    /// has none yet (i.e. `self` is the search root).
    pub fn child<E: Evaluator + ?Sized>(&self, action: Action, evaluator: &E) -> MazeState {
        let mut next = self.clone();
        next.advance(action);
        next.evaluated_score = evaluator.evaluate(&next);
        if next.first_action.is_none() {
            next.first_action = Some(action);
        }
        next
    }
}

impl fmt::Display for MazeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "turn:\t{}", self.turn)?;
        writeln!(f, "score:\t{}", self.game_score)?;
        for y in 0..self.config.height() {
            for x in 0..self.config.width() {
                if self.character == Coord::new(y, x) {
                    write!(f, "@")?;
                } else if self.point(y, x) > 0 {
                    write!(f, "{}", self.point(y, x))?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MazeState {
        // 3x4 board, agent at (1, 1)
        #[rustfmt::skip]
        let points = vec![
            4, 6, 1, 3,
            0, 0, 6, 1,
            3, 6, 1, 1,
        ];
        MazeState::from_parts(GameConfig::default(), Coord::new(1, 1), points).unwrap()
    }

    #[test]
    fn test_legal_actions_interior_edge_corner() {
        let config = GameConfig::default();
        let points = vec![0; config.cells()];

        let interior = MazeState::from_parts(config, Coord::new(1, 1), points.clone()).unwrap();
        assert_eq!(interior.legal_actions(), Action::ALL.to_vec());

        let edge = MazeState::from_parts(config, Coord::new(0, 1), points.clone()).unwrap();
        assert_eq!(
            edge.legal_actions(),
            vec![Action::Right, Action::Left, Action::Down]
        );

        let corner = MazeState::from_parts(config, Coord::new(2, 3), points).unwrap();
        assert_eq!(corner.legal_actions(), vec![Action::Left, Action::Up]);
    }

    #[test]
    fn test_advance_collects_and_zeroes() {
        let mut state = sample();
        state.advance(Action::Right);
        assert_eq!(state.character, Coord::new(1, 2));
        assert_eq!(state.game_score, 6);
        assert_eq!(state.point(1, 2), 0);
        assert_eq!(state.turn(), 1);

        // Walking back over a collected cell scores nothing.
        state.advance(Action::Left);
        state.advance(Action::Right);
        assert_eq!(state.game_score, 6);
        assert_eq!(state.turn(), 3);
    }

    #[test]
    fn test_clone_then_advance_leaves_parent_untouched() {
        let parent = sample();
        let snapshot = parent.clone();
        let child = parent.child(Action::Up, &GameScoreEvaluator);

        assert_eq!(parent, snapshot);
        assert_eq!(child.game_score, 6);
        assert_eq!(child.evaluated_score, 6);
        assert_eq!(child.first_action, Some(Action::Up));
        assert_eq!(parent.point(0, 1), 6);
    }

    #[test]
    fn test_child_propagates_first_action() {
        let root = sample();
        let a = root.child(Action::Down, &GameScoreEvaluator);
        let b = a.child(Action::Right, &GameScoreEvaluator);
        assert_eq!(b.first_action, Some(Action::Down));
    }

    #[test]
    fn test_is_done_at_end_turn() {
        let mut state = sample();
        for _ in 0..GameConfig::default().end_turn() {
            assert!(!state.is_done());
            let action = state.legal_actions()[0];
            state.advance(action);
        }
        assert!(state.is_done());
    }

    #[test]
    fn test_seeded_board_is_reproducible() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let a = MazeState::new(config, seed);
            let b = MazeState::new(config, seed);
            assert_eq!(a, b);
            assert_eq!(a.point(a.character.y, a.character.x), 0);
            assert!(a.points().iter().all(|&p| p < MAX_POINT));
        }
    }

    #[test]
    fn test_from_parts_validates() {
        let config = GameConfig::default();
        assert_eq!(
            MazeState::from_parts(config, Coord::new(0, 0), vec![0; 5]),
            Err(ConfigError::GridSize { expected: 12, got: 5 })
        );
        assert_eq!(
            MazeState::from_parts(config, Coord::new(3, 0), vec![0; 12]),
            Err(ConfigError::OffBoard { y: 3, x: 0 })
        );
    }

    #[test]
    fn test_display() {
        let mut state = sample();
        state.advance(Action::Right);
        assert_eq!(
            state.to_string(),
            "turn:\t1\nscore:\t6\n4613\n..@1\n3611\n"
        );
    }

    #[test]
    #[should_panic(expected = "illegal action")]
    fn test_advance_off_board_panics() {
        let config = GameConfig::default();
        let mut state = MazeState::from_parts(config, Coord::new(0, 0), vec![0; 12]).unwrap();
        state.advance(Action::Up);
    }

    #[test]
    fn test_action_indices() {
        for (i, a) in Action::ALL.into_iter().enumerate() {
            assert_eq!(a.index(), i);
            assert_eq!(Action::from_index(i), Some(a));
        }
        assert_eq!(Action::from_index(4), None);
    }
}
