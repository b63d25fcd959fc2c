//! Monte Carlo Tree Search with RAVE-blended UCT selection.
//!
//! Shaped after the reference engine's tree search (`mcts.rs`'s
//! `TreeNode`/`tree_descend`/`tree_update`/`tree_search`): select down to a
//! leaf, expand one child, roll out, backpropagate. The teacher keeps
//! children owned directly inside their parent `TreeNode`, which works for
//! a tree that's read top-down but fights Rust's borrow checker once
//! backprop needs to walk back *up* through parents. This version keeps an
//! arena of `Node`s addressed by index and lets nodes reference their
//! parent by id instead of by reference, so selection and backprop are both
//! plain index arithmetic.

use crate::bitboard::Bitboard;
use crate::board::{Board, Color, Point};
use crate::constants::{
    MIN_PLAYOUTS, RAVE_PRIOR_VISITS, RAVE_PRIOR_WINS, RESIGN_POINT, SCORE_EPSILON, TIME_BUDGET_MS,
    UCT_C,
};
use crate::playout::rollout_two_go;
use std::time::{Duration, Instant};

pub type NodeId = u32;

/// How long and how many playouts a single `search` call runs for. Both
/// conditions must hold before the search stops.
#[derive(Copy, Clone, Debug)]
pub struct SearchBudget {
    pub time_budget: Duration,
    pub min_playouts: u64,
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget {
            time_budget: Duration::from_millis(TIME_BUDGET_MS),
            min_playouts: MIN_PLAYOUTS,
        }
    }
}

struct Node {
    board: Board,
    /// Color that played `point` to reach this node. The root has no real
    /// move behind it, so it's tagged with the color *not* to move, the
    /// usual "strongest variant" convention: `root.mover = 1 - side`, so
    /// `root.mover.opponent() == side` falls out of the same field every
    /// other node uses.
    mover: Color,
    point: Point,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Legal moves for the color to move at this node, not yet expanded.
    untried: Bitboard,
    visits: u32,
    wins: u32,
    rave_visits: u32,
    rave_wins: u32,
    log_visits: f64,
}

impl Node {
    fn new(board: Board, mover: Color, point: Point, parent: Option<NodeId>) -> Self {
        let to_move = mover.opponent();
        let untried = board.legal_moves(to_move);
        Node {
            board,
            mover,
            point,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            wins: 0,
            rave_visits: RAVE_PRIOR_VISITS,
            rave_wins: RAVE_PRIOR_WINS,
            log_visits: 0.0,
        }
    }
}

struct Tree {
    arena: Vec<Node>,
}

impl Tree {
    const ROOT: NodeId = 0;

    fn new(board: Board, side: Color) -> Self {
        let root = Node::new(board, side.opponent(), RESIGN_POINT, None);
        Tree { arena: vec![root] }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.arena[id as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.arena[id as usize]
    }

    /// One selection -> expansion -> rollout -> backprop cycle.
    fn playout_once(&mut self, rng: &mut fastrand::Rng) {
        let mut path = vec![Self::ROOT];
        let mut current = Self::ROOT;

        loop {
            if let Some(p) = self.pop_untried(current, rng) {
                let mover = self.node(current).mover.opponent();
                let mut child_board = self.node(current).board.clone();
                child_board.place(mover, p);
                let child = Node::new(child_board, mover, p, Some(current));
                let cid = self.arena.len() as NodeId;
                self.arena.push(child);
                self.node_mut(current).children.push(cid);
                path.push(cid);
                current = cid;
                break;
            }

            if self.node(current).children.is_empty() {
                // Genuinely terminal: to_move never had a legal move here.
                break;
            }

            current = self.select_child(current, rng);
            path.push(current);
        }

        let leaf = current;
        let leaf_to_move = self.node(leaf).mover.opponent();
        let (winner, two_go) = if self.node(leaf).board.has_legal_move(leaf_to_move) {
            let result = rollout_two_go(&self.node(leaf).board, leaf_to_move, rng);
            (result.winner, result.two_go)
        } else {
            (self.node(leaf).mover, [Bitboard::EMPTY; 2])
        };

        self.backprop(&path, winner, &two_go);
    }

    fn pop_untried(&mut self, id: NodeId, rng: &mut fastrand::Rng) -> Option<Point> {
        let mask = self.node(id).untried;
        if mask.is_empty() {
            return None;
        }
        let index = rng.u32(0..mask.count_ones());
        let p = mask.nth_point(index).unwrap();
        self.node_mut(id).untried.clear(p);
        Some(p)
    }

    /// RAVE-UCT score: `(rave_wins + wins + 0.25*sqrt(N.log_visits*visits))
    /// / (rave_visits + visits)`, `N` being the parent whose perspective
    /// this child is scored from.
    fn score(&self, child: NodeId, parent_log_visits: f64) -> f64 {
        let c = self.node(child);
        let uct = UCT_C * (parent_log_visits * c.visits as f64).sqrt();
        let numerator = c.rave_wins as f64 + c.wins as f64 + uct;
        let denominator = c.rave_visits as f64 + c.visits as f64;
        numerator / denominator
    }

    /// Highest-scoring child, ties within [`SCORE_EPSILON`] broken at random.
    fn select_child(&self, parent: NodeId, rng: &mut fastrand::Rng) -> NodeId {
        let parent_log_visits = self.node(parent).log_visits;
        let children = &self.node(parent).children;
        let scores: Vec<f64> = children
            .iter()
            .map(|&cid| self.score(cid, parent_log_visits))
            .collect();
        let max_score = scores.iter().cloned().fold(f64::MIN, f64::max);
        let candidates: Vec<NodeId> = children
            .iter()
            .zip(scores.iter())
            .filter(|&(_, &s)| (max_score - s).abs() <= SCORE_EPSILON)
            .map(|(&cid, _)| cid)
            .collect();
        candidates[rng.usize(0..candidates.len())]
    }

    fn backprop(&mut self, path: &[NodeId], winner: Color, two_go: &[Bitboard; 2]) {
        for &id in path {
            let mover = self.node(id).mover;
            let node = self.node_mut(id);
            node.visits += 1;
            if mover == winner {
                node.wins += 1;
            }
            node.log_visits = (node.visits as f64).ln();

            let children = self.node(id).children.clone();
            for cid in children {
                let child = self.node(cid);
                let c_mover = child.mover;
                let c_point = child.point;
                if two_go[c_mover.index()].test(c_point) {
                    let child = self.node_mut(cid);
                    child.rave_visits += 1;
                    if c_mover == winner {
                        child.rave_wins += 1;
                    }
                }
            }
        }
    }

    fn best_move(&self) -> Point {
        self.node(Self::ROOT)
            .children
            .iter()
            .max_by_key(|&&cid| self.node(cid).visits)
            .map(|&cid| self.node(cid).point)
            .unwrap_or(RESIGN_POINT)
    }
}

/// Search for the best move for `side` to play on `board`. Returns
/// [`RESIGN_POINT`] if `side` has no legal move.
pub fn search(board: &Board, side: Color, budget: SearchBudget, rng: &mut fastrand::Rng) -> Point {
    if !board.has_legal_move(side) {
        log::debug!("mcts: {side} has no legal move, resigning");
        return RESIGN_POINT;
    }

    let mut tree = Tree::new(board.clone(), side);
    let start = Instant::now();
    let mut playouts_done = 0u64;

    loop {
        tree.playout_once(rng);
        playouts_done += 1;
        log::trace!("mcts: playout {playouts_done} done");
        if playouts_done >= budget.min_playouts && start.elapsed() >= budget.time_budget {
            break;
        }
    }

    let best = tree.best_move();
    log::debug!(
        "mcts: {side} search done, {playouts_done} playouts in {:?}, chose {best}",
        start.elapsed()
    );
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_budget() -> SearchBudget {
        SearchBudget {
            time_budget: Duration::ZERO,
            min_playouts: 200,
        }
    }

    #[test]
    fn search_on_empty_board_returns_a_legal_point() {
        let board = Board::new();
        let mut rng = fastrand::Rng::with_seed(1);
        let p = search(&board, Color::Black, fast_budget(), &mut rng);
        assert!(p < crate::constants::NUM_POINTS);
        assert!(board.legal_moves(Color::Black).test(p));
    }

    #[test]
    fn search_resigns_when_no_legal_move() {
        let mut board = Board::new();
        board.force_forbid_all(Color::Black);
        let mut rng = fastrand::Rng::with_seed(2);
        let p = search(&board, Color::Black, fast_budget(), &mut rng);
        assert_eq!(p, RESIGN_POINT);
    }

    #[test]
    fn same_seed_same_move() {
        let board = Board::new();
        let mut rng_a = fastrand::Rng::with_seed(123);
        let mut rng_b = fastrand::Rng::with_seed(123);
        let a = search(&board, Color::Black, fast_budget(), &mut rng_a);
        let b = search(&board, Color::Black, fast_budget(), &mut rng_b);
        assert_eq!(a, b);
    }
}
