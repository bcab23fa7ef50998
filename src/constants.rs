//! Default board dimensions and search parameters.
//!
//! These are the values the binary falls back to when no flag overrides them.
//! The library itself never reads them implicitly: every search takes its
//! bounds as arguments, and every state carries its own [`GameConfig`].
//!
//! [`GameConfig`]: crate::config::GameConfig

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board height (rows).
pub const H: usize = 3;

/// Default board width (columns).
pub const W: usize = 4;

/// Default number of turns in a game.
pub const END_TURN: usize = 4;

/// Rewards on the single-agent board are drawn from `0..MAX_POINT`.
pub const MAX_POINT: u32 = 10;

// =============================================================================
// Movement
// =============================================================================

/// Column offsets per action index. Order: +x, -x, +y, -y.
pub const DX: [isize; 4] = [1, -1, 0, 0];

/// Row offsets per action index. Order: +x, -x, +y, -y.
pub const DY: [isize; 4] = [0, 0, 1, -1];

// =============================================================================
// Search Parameters
// =============================================================================

/// Default beam width.
pub const BEAM_WIDTH: usize = 2;

/// Default beam depth. Matches the default horizon.
pub const BEAM_DEPTH: usize = END_TURN;

/// Default number of chokudai passes.
pub const CHOKUDAI_PASSES: usize = 2;

/// Default wall-clock budget for the time-bounded beam search, in milliseconds.
pub const TIME_THRESHOLD_MS: u64 = 1;

/// Default number of games in a benchmark run.
pub const BENCH_GAMES: usize = 100;

// =============================================================================
// Auto-Move (Multi-Agent) Variant
// =============================================================================

/// Default auto-move board height.
pub const AUTO_MOVE_H: usize = 5;

/// Default auto-move board width.
pub const AUTO_MOVE_W: usize = 5;

/// Default auto-move horizon.
pub const AUTO_MOVE_END_TURN: usize = 5;

/// Default number of characters placed on the auto-move board.
pub const CHARACTER_N: usize = 3;

/// Default hill-climbing iterations.
pub const HILL_CLIMB_ITERATIONS: usize = 10_000;
