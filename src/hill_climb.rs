//! Multi-agent auto-move variant and hill climbing over starting positions.
//!
//! Here the player does not steer anyone. Several characters share one board
//! and each turn every character steps greedily to its best neighbouring
//! reward. The only decision is where the characters start, so the search
//! space is the assignment of starting cells, and the score of an assignment
//! is the result of simulating the game to the end.

use std::fmt;

use tracing::{debug, trace};

use crate::config::{ConfigError, GameConfig};
use crate::state::{Action, Coord, INF, ScoreType};

/// Rewards on the auto-move board are drawn from `1..=AUTO_MOVE_MAX_POINT`.
const AUTO_MOVE_MAX_POINT: u32 = 9;

/// Board with several self-moving characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoMoveMazeState {
    config: GameConfig,
    points: Vec<u32>,
    turn: usize,
    characters: Vec<Coord>,
    /// Rewards collected by all characters together
    pub game_score: ScoreType,
    pub evaluated_score: ScoreType,
}

impl AutoMoveMazeState {
    /// Build a board from a seed. Every cell gets a reward in `1..=9`, drawn
    /// row-major. All characters start at `(0, 0)` until placed.
    pub fn new(config: GameConfig, characters: usize, seed: u64) -> Result<Self, ConfigError> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let points = (0..config.cells())
            .map(|_| rng.u32(1..=AUTO_MOVE_MAX_POINT))
            .collect();
        Self::from_parts(config, points, characters)
    }

    /// Build a state from an explicit row-major reward grid.
    pub fn from_parts(
        config: GameConfig,
        points: Vec<u32>,
        characters: usize,
    ) -> Result<Self, ConfigError> {
        if characters == 0 {
            return Err(ConfigError::NoCharacters);
        }
        if points.len() != config.cells() {
            return Err(ConfigError::GridSize {
                expected: config.cells(),
                got: points.len(),
            });
        }
        Ok(Self {
            config,
            points,
            turn: 0,
            characters: vec![Coord::default(); characters],
            game_score: 0,
            evaluated_score: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn characters(&self) -> &[Coord] {
        &self.characters
    }

    #[inline]
    pub fn point(&self, y: usize, x: usize) -> u32 {
        self.points[y * self.config.width() + x]
    }

    /// Place a character.
    ///
    /// # Panics
    /// If `character_id` is out of range or `coord` is off the board.
    pub fn set_character(&mut self, character_id: usize, coord: Coord) {
        assert!(
            self.config.contains(coord.y as isize, coord.x as isize),
            "character placed off the board at ({}, {})",
            coord.y,
            coord.x
        );
        self.characters[character_id] = coord;
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.turn == self.config.end_turn()
    }

    /// Copy of this state ready to simulate: the rewards under the starting
    /// cells are removed without being scored.
    pub fn begin(&self) -> Self {
        let mut state = self.clone();
        for c in &self.characters {
            state.points[c.y * self.config.width() + c.x] = 0;
        }
        state
    }

    /// Score of the current assignment: simulate the game to the end.
    pub fn get_score(&self) -> ScoreType {
        let mut state = self.begin();
        while !state.is_done() {
            state.advance();
        }
        state.game_score
    }

    /// Step one character to its best neighbouring reward. Ties go to the
    /// first direction in action order.
    pub fn move_player(&mut self, character_id: usize) {
        let character = self.characters[character_id];
        let mut best_point = -INF;
        let mut best = character;
        for action in Action::ALL {
            if let Some(next) = character.step(action, &self.config) {
                let point = ScoreType::from(self.point(next.y, next.x));
                if point > best_point {
                    best_point = point;
                    best = next;
                }
            }
        }
        self.characters[character_id] = best;
    }

    /// Play one turn: every character moves, then every character collects.
    pub fn advance(&mut self) {
        for character_id in 0..self.characters.len() {
            self.move_player(character_id);
        }
        for c in &self.characters {
            let idx = c.y * self.config.width() + c.x;
            self.game_score += ScoreType::from(self.points[idx]);
            self.points[idx] = 0;
        }
        self.turn += 1;
    }

    /// Place every character on a uniformly random cell (row, then column).
    pub fn init(&mut self, rng: &mut fastrand::Rng) {
        for c in &mut self.characters {
            c.y = rng.usize(..self.config.height());
            c.x = rng.usize(..self.config.width());
        }
    }

    /// Move one uniformly chosen character to a uniformly random cell.
    pub fn transition(&mut self, rng: &mut fastrand::Rng) {
        let character_id = rng.usize(..self.characters.len());
        let c = &mut self.characters[character_id];
        c.y = rng.usize(..self.config.height());
        c.x = rng.usize(..self.config.width());
    }
}

impl fmt::Display for AutoMoveMazeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "turn:\t{}", self.turn)?;
        writeln!(f, "score:\t{}", self.game_score)?;
        for y in 0..self.config.height() {
            for x in 0..self.config.width() {
                if self.characters.contains(&Coord::new(y, x)) {
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

/// Baseline: an independent random start for every character.
pub fn random_assignment(state: &AutoMoveMazeState, rng: &mut fastrand::Rng) -> AutoMoveMazeState {
    let mut now_state = state.clone();
    now_state.init(rng);
    now_state
}

/// Strict hill climbing over starting assignments.
///
/// Starts from a random assignment and, `number` times, moves one random
/// character to a random cell, keeping the candidate only when it scores
/// strictly higher than the best so far.
pub fn hill_climb(
    state: &AutoMoveMazeState,
    number: usize,
    rng: &mut fastrand::Rng,
) -> AutoMoveMazeState {
    let mut now_state = state.clone();
    now_state.init(rng);
    let mut best_score = now_state.get_score();
    let start_score = best_score;

    for i in 0..number {
        let mut next_state = now_state.clone();
        next_state.transition(rng);
        let next_score = next_state.get_score();
        if next_score > best_score {
            trace!(iteration = i, score = next_score, "hill climb improved");
            best_score = next_score;
            now_state = next_state;
        }
    }
    now_state.evaluated_score = best_score;
    debug!(start_score, best_score, iterations = number, "hill climb finished");
    now_state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> AutoMoveMazeState {
        let config = GameConfig::new(3, 3, 2).unwrap();
        #[rustfmt::skip]
        let points = vec![
            1, 2, 3,
            4, 5, 6,
            7, 8, 9,
        ];
        AutoMoveMazeState::from_parts(config, points, 1).unwrap()
    }

    #[test]
    fn test_move_player_takes_best_neighbour() {
        let mut state = small();
        state.set_character(0, Coord::new(1, 1));
        state.move_player(0);
        assert_eq!(state.characters()[0], Coord::new(2, 1));
    }

    #[test]
    fn test_get_score_simulates_to_the_end() {
        let mut state = small();
        state.set_character(0, Coord::new(0, 0));
        // (0,0) -> (1,0) collects 4 -> (2,0) collects 7
        assert_eq!(state.get_score(), 11);
        // The assignment itself is untouched.
        assert_eq!(state.turn(), 0);
        assert_eq!(state.point(1, 0), 4);
    }

    #[test]
    fn test_starting_cell_is_not_scored() {
        let mut state = small();
        state.set_character(0, Coord::new(2, 1));
        // (2,1) -> (2,2) collects 9 -> (1,2) collects 6; the 8 underfoot is lost.
        assert_eq!(state.get_score(), 15);
    }

    #[test]
    fn test_characters_collect_shared_cells_once() {
        let config = GameConfig::new(1, 3, 1).unwrap();
        let mut state = AutoMoveMazeState::from_parts(config, vec![1, 5, 1], 2).unwrap();
        state.set_character(0, Coord::new(0, 0));
        state.set_character(1, Coord::new(0, 2));
        assert_eq!(state.get_score(), 5);
    }

    #[test]
    fn test_hill_climb_never_worse_than_its_start() {
        let state = AutoMoveMazeState::new(GameConfig::auto_move(), 3, 0).unwrap();
        for seed in 0..5 {
            let mut start_rng = fastrand::Rng::with_seed(seed);
            let start = random_assignment(&state, &mut start_rng);

            let mut rng = fastrand::Rng::with_seed(seed);
            let best = hill_climb(&state, 200, &mut rng);
            assert!(best.get_score() >= start.get_score());
            assert_eq!(best.evaluated_score, best.get_score());
        }
    }

    #[test]
    fn test_hill_climb_is_reproducible() {
        let state = AutoMoveMazeState::new(GameConfig::auto_move(), 3, 4).unwrap();
        let a = hill_climb(&state, 300, &mut fastrand::Rng::with_seed(9));
        let b = hill_climb(&state, 300, &mut fastrand::Rng::with_seed(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_rewards_in_range() {
        let state = AutoMoveMazeState::new(GameConfig::auto_move(), 3, 1).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                assert!((1..=9).contains(&state.point(y, x)));
            }
        }
    }

    #[test]
    fn test_rejects_zero_characters() {
        assert_eq!(
            AutoMoveMazeState::new(GameConfig::auto_move(), 0, 0),
            Err(ConfigError::NoCharacters)
        );
    }

    #[test]
    fn test_display_marks_every_character() {
        let config = GameConfig::new(1, 3, 1).unwrap();
        let mut state = AutoMoveMazeState::from_parts(config, vec![1, 5, 1], 2).unwrap();
        state.set_character(0, Coord::new(0, 0));
        state.set_character(1, Coord::new(0, 2));
        assert_eq!(state.to_string(), "turn:\t0\nscore:\t0\n@5@\n");
    }
}
