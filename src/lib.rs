//! GuaGua: a NoGo engine speaking GTP.
//!
//! NoGo is Go with captures and self-atari both illegal; the side that runs
//! out of legal moves loses. The crate is organized bottom-up:
//!
//! - [`bitboard`] - fixed-width point sets
//! - [`dset`] - union-find with component bitmasks, backing group lookups
//! - [`board`] - position state and the move-legality algorithm
//! - [`playout`] - random/heuristic game-to-completion rollouts
//! - [`mcts`] - RAVE-UCT tree search
//! - [`agent`] - move-choosing policies (`Random`, `Mcts`)
//! - [`gtp`] - the protocol dispatch loop
//!
//! ```
//! use guagua::board::{Board, Color};
//!
//! let mut board = Board::new();
//! let p = Board::parse_coord("E5").unwrap();
//! assert!(board.place(Color::Black, p));
//! ```

pub mod agent;
pub mod bitboard;
pub mod board;
pub mod constants;
pub mod dset;
pub mod error;
pub mod gtp;
pub mod mcts;
pub mod playout;
