//! Runtime board configuration.

use thiserror::Error;

use crate::constants::{AUTO_MOVE_END_TURN, AUTO_MOVE_H, AUTO_MOVE_W, END_TURN, H, W};

/// Errors raised when a board configuration cannot describe a playable game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must have at least one row and one column (got {height}x{width})")]
    EmptyBoard { height: usize, width: usize },

    #[error("board must have at least two cells so a move always exists (got {height}x{width})")]
    SingleCell { height: usize, width: usize },

    #[error("board of {height}x{width} cells does not fit in memory")]
    TooLarge { height: usize, width: usize },

    #[error("end turn must be at least 1")]
    ZeroHorizon,

    #[error("at least one character is required")]
    NoCharacters,

    #[error("reward grid has {got} cells, board needs {expected}")]
    GridSize { expected: usize, got: usize },

    #[error("character at ({y}, {x}) is off the board")]
    OffBoard { y: usize, x: usize },
}

/// Board size and game length shared by every state of one game.
///
/// Only obtainable through [`GameConfig::new`] or the built-in defaults, so
/// every board a state is built on is non-empty and has a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    height: usize,
    width: usize,
    end_turn: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: H,
            width: W,
            end_turn: END_TURN,
        }
    }
}

impl GameConfig {
    /// Create a validated configuration.
    pub fn new(height: usize, width: usize, end_turn: usize) -> Result<Self, ConfigError> {
        if height == 0 || width == 0 {
            return Err(ConfigError::EmptyBoard { height, width });
        }
        let Some(cells) = height.checked_mul(width) else {
            return Err(ConfigError::TooLarge { height, width });
        };
        if cells < 2 {
            return Err(ConfigError::SingleCell { height, width });
        }
        if end_turn == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        Ok(Self {
            height,
            width,
            end_turn,
        })
    }

    /// Default configuration for the auto-move variant: 5x5, five turns.
    pub fn auto_move() -> Self {
        Self {
            height: AUTO_MOVE_H,
            width: AUTO_MOVE_W,
            end_turn: AUTO_MOVE_END_TURN,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The game is over once this many turns have been played.
    #[inline]
    pub fn end_turn(&self) -> usize {
        self.end_turn
    }

    /// Number of cells on the board.
    #[inline]
    pub fn cells(&self) -> usize {
        self.height * self.width
    }

    /// Whether `(y, x)` lies on the board.
    #[inline]
    pub fn contains(&self, y: isize, x: isize) -> bool {
        y >= 0 && x >= 0 && (y as usize) < self.height && (x as usize) < self.width
    }
}
