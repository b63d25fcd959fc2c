//! Disjoint-set (union-find) over board points, enriched with per-root
//! component bitmasks.
//!
//! Grounded on the reference engine's plain union-by-size `DSet<N>`
//! (`dset.hpp`): path-compressed `find`, union by size. The addition
//! required by the spec is that every root also carries the full bitmask of
//! points in its component, so a group's membership is an O(1) lookup
//! instead of a flood-fill. `union` OR-merges the loser's mask into the
//! winner's; the loser's own mask is left stale, which is harmless since it
//! is no longer reachable through `find`.
//!
//! The set only ever grows within one game line — stones are placed, never
//! removed, so there is no `remove`/`split` operation. `Board::clear`
//! reinitializes it to singleton components via [`DSet::reset`].

use crate::bitboard::Bitboard;
use crate::constants::NUM_POINTS;

#[derive(Clone)]
pub struct DSet {
    parent: [u32; NUM_POINTS],
    size: [u32; NUM_POINTS],
    component: [Bitboard; NUM_POINTS],
}

impl DSet {
    pub fn new() -> Self {
        let mut d = DSet {
            parent: [0; NUM_POINTS],
            size: [1; NUM_POINTS],
            component: [Bitboard::EMPTY; NUM_POINTS],
        };
        d.reset();
        d
    }

    /// Reinitialize every point as its own singleton component.
    pub fn reset(&mut self) {
        for p in 0..NUM_POINTS {
            self.parent[p] = p as u32;
            self.size[p] = 1;
            self.component[p] = Bitboard::single(p);
        }
    }

    /// Find the root of `x`'s component, compressing the path to it.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] as usize != root {
            root = self.parent[root] as usize;
        }
        // Path compression: point every node on the path straight at root.
        let mut cur = x;
        while self.parent[cur] as usize != root {
            let next = self.parent[cur] as usize;
            self.parent[cur] = root as u32;
            cur = next;
        }
        root
    }

    /// Merge the components containing `x` and `y`, OR-merging component
    /// masks into the surviving root (union by size).
    pub fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        let (winner, loser) = if self.size[rx] >= self.size[ry] {
            (rx, ry)
        } else {
            (ry, rx)
        };
        self.parent[loser] = winner as u32;
        self.size[winner] += self.size[loser];
        self.component[winner] |= self.component[loser];
    }

    /// The full membership mask of the component containing `x`.
    pub fn component_of(&mut self, x: usize) -> Bitboard {
        let root = self.find(x);
        self.component[root]
    }
}

impl Default for DSet {
    fn default() -> Self {
        DSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_component() {
        let mut d = DSet::new();
        for p in [0, 1, 5, NUM_POINTS - 1] {
            assert_eq!(d.component_of(p).count_ones(), 1);
            assert!(d.component_of(p).test(p));
        }
    }

    #[test]
    fn union_merges_component_masks() {
        let mut d = DSet::new();
        d.union(0, 1);
        let c = d.component_of(0);
        assert!(c.test(0));
        assert!(c.test(1));
        assert_eq!(c.count_ones(), 2);
        assert_eq!(d.component_of(1), c);
    }

    #[test]
    fn union_is_idempotent_on_same_component() {
        let mut d = DSet::new();
        d.union(0, 1);
        d.union(1, 0);
        assert_eq!(d.component_of(0).count_ones(), 2);
    }

    #[test]
    fn chained_unions_form_one_component() {
        let mut d = DSet::new();
        d.union(0, 1);
        d.union(1, 2);
        d.union(2, 3);
        let c = d.component_of(0);
        for p in 0..4 {
            assert!(c.test(p));
        }
        assert_eq!(c.count_ones(), 4);
    }

    #[test]
    fn reset_clears_all_unions() {
        let mut d = DSet::new();
        d.union(0, 1);
        d.reset();
        assert_eq!(d.component_of(0).count_ones(), 1);
        assert_eq!(d.component_of(1).count_ones(), 1);
    }
}
