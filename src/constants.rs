//! Board geometry and search tuning constants.
//!
//! NoGo is played here on a 9x9 board only, matching GTP's `boardsize`
//! command (which accepts 9 and rejects everything else). `N` is a plain
//! constant rather than a Cargo feature: `Bitboard` is `u128`-backed, which
//! has no room for a 13x13 board's 169 points, so there is no size this
//! crate could build to besides 9x9.

pub const N: usize = 9;

/// Total number of points on the board (81 for 9x9).
pub const NUM_POINTS: usize = N * N;

/// Sentinel point meaning "no move / resign". One past the last real point.
pub const RESIGN_POINT: usize = NUM_POINTS;

// =============================================================================
// MCTS parameters
// =============================================================================

/// Wall-clock budget per `genmove`, in milliseconds.
pub const TIME_BUDGET_MS: u64 = 1_000;

/// Minimum number of playouts per `genmove`, regardless of elapsed time.
pub const MIN_PLAYOUTS: u64 = 10_000;

/// RAVE prior wins, used to initialize a fresh node's RAVE counters.
pub const RAVE_PRIOR_WINS: u32 = 10;

/// RAVE prior visits, used to initialize a fresh node's RAVE counters.
pub const RAVE_PRIOR_VISITS: u32 = 20;

/// Exploration constant blending UCT into the RAVE selection score.
pub const UCT_C: f64 = 0.25;

/// Tie-break threshold for the RAVE-UCT selection score.
pub const SCORE_EPSILON: f64 = 1e-4;
