//! Move-choosing agents.
//!
//! The reference engine models agents as an abstract `Agent` base with a
//! single `RandomAgent` subclass (`agent.hpp`). Rust has no need for the
//! indirection: a tagged enum covers both variants this crate ever needs
//! (uniform random, for tests and as a fast opponent; MCTS, for `genmove`)
//! without a vtable.

use crate::board::{Board, Color, Point};
use crate::constants::RESIGN_POINT;
use crate::mcts::{self, SearchBudget};

/// A move-choosing policy.
pub enum Agent {
    /// Uniformly pick among the legal moves, no search.
    Random,
    /// Run MCTS with the given budget.
    Mcts(SearchBudget),
}

impl Agent {
    /// Choose a point for `color` to play on `board`. Returns
    /// [`RESIGN_POINT`] if there is no legal move.
    pub fn take_action(&self, board: &Board, color: Color, rng: &mut fastrand::Rng) -> Point {
        match self {
            Agent::Random => {
                if !board.has_legal_move(color) {
                    RESIGN_POINT
                } else {
                    board.sample_legal(color, rng)
                }
            }
            Agent::Mcts(budget) => mcts::search(board, color, *budget, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_agent_plays_a_legal_move_on_empty_board() {
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(5);
        let p = Agent::Random.take_action(&board, Color::Black, &mut rng);
        assert!(board.legal_moves(Color::Black).test(p));
    }

    #[test]
    fn random_agent_resigns_when_no_legal_move() {
        let mut board = Board::new();
        board.force_forbid_all(Color::White);
        let mut rng = fastrand::Rng::with_seed(6);
        let p = Agent::Random.take_action(&board, Color::White, &mut rng);
        assert_eq!(p, RESIGN_POINT);
    }

    #[test]
    fn mcts_agent_plays_a_legal_move() {
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(7);
        let budget = SearchBudget {
            time_budget: std::time::Duration::ZERO,
            min_playouts: 50,
        };
        let p = Agent::Mcts(budget).take_action(&board, Color::Black, &mut rng);
        assert!(board.legal_moves(Color::Black).test(p));
    }
}
