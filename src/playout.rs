//! Random/heuristic game-to-completion rollouts.
//!
//! Same shape as the reference engine's `mcplayout`: take a position, drive
//! it to game end, report the result, and optionally feed back which points
//! each side touched for RAVE. The heuristics themselves don't carry over —
//! `fix_atari`, 3x3 pattern matching, and eye detection are Go capture-shape
//! tactics NoGo has no use for — so the only policy kept is "prefer points
//! that looked open at the start of the rollout" (two-go), a much blunter
//! stand-in that still biases play away from immediately cramped corners.

use crate::bitboard::Bitboard;
use crate::board::{Board, Color};

/// Outcome of a single rollout.
pub struct RolloutResult {
    pub winner: Color,
    /// For each color, every point it played during the rollout — fed into
    /// MCTS as the RAVE action-value update set.
    pub two_go: [Bitboard; 2],
}

/// Play `board` to completion from `mover`'s turn, picking moves uniformly
/// at random, and report who wins (the side that runs out of legal moves
/// loses).
pub fn rollout_uniform(board: &Board, mover: Color, rng: &mut fastrand::Rng) -> RolloutResult {
    rollout(board, mover, rng, false)
}

/// Like [`rollout_uniform`], but applies the two-go heuristic: moves legal
/// for the mover *and* legal for both colors at the start of the rollout
/// are preferred over the full legal set.
pub fn rollout_two_go(board: &Board, mover: Color, rng: &mut fastrand::Rng) -> RolloutResult {
    rollout(board, mover, rng, true)
}

fn rollout(board: &Board, mover: Color, rng: &mut fastrand::Rng, heuristic: bool) -> RolloutResult {
    let mut b = board.clone();
    let open_at_start = !(b.forbidden(Color::Black) | b.forbidden(Color::White));
    let mut two_go = [Bitboard::EMPTY; 2];
    let mut current = mover;

    loop {
        let legal = b.legal_moves(current);
        if legal.is_empty() {
            break;
        }
        let preferred = legal & open_at_start;
        let candidates = if heuristic && !preferred.is_empty() {
            preferred
        } else {
            legal
        };
        let p = sample_from_mask(candidates, rng);
        two_go[current.index()].set(p);
        b.place(current, p);
        current = current.opponent();
    }

    RolloutResult {
        winner: current.opponent(),
        two_go,
    }
}

fn sample_from_mask(mask: Bitboard, rng: &mut fastrand::Rng) -> usize {
    let count = mask.count_ones();
    debug_assert!(count > 0);
    let index = rng.u32(0..count);
    mask.nth_point(index)
        .expect("index within count_ones must hit a set bit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollout_always_terminates_with_a_winner() {
        let mut rng = fastrand::Rng::with_seed(1);
        let board = Board::new();
        let result = rollout_uniform(&board, Color::Black, &mut rng);
        assert!(matches!(result.winner, Color::Black | Color::White));
    }

    #[test]
    fn two_go_rollout_terminates() {
        let mut rng = fastrand::Rng::with_seed(7);
        let board = Board::new();
        let result = rollout_two_go(&board, Color::Black, &mut rng);
        assert!(matches!(result.winner, Color::Black | Color::White));
    }

    #[test]
    fn rollout_records_every_move_played() {
        let mut rng = fastrand::Rng::with_seed(42);
        let board = Board::new();
        let result = rollout_uniform(&board, Color::Black, &mut rng);
        let total_moves = result.two_go[0].count_ones() + result.two_go[1].count_ones();
        assert!(total_moves > 0);
    }

    #[test]
    fn same_seed_produces_same_rollout() {
        let board = Board::new();
        let mut rng_a = fastrand::Rng::with_seed(99);
        let mut rng_b = fastrand::Rng::with_seed(99);
        let a = rollout_uniform(&board, Color::Black, &mut rng_a);
        let b = rollout_uniform(&board, Color::Black, &mut rng_b);
        assert_eq!(a.two_go[0], b.two_go[0]);
        assert_eq!(a.two_go[1], b.two_go[1]);
    }
}
