//! Disjoint-set union with path compression and union by rank.
//!
//! Ids outside `0..len()` are a programmer error and panic on indexing.

use serde::{Deserialize, Serialize};

/// Union-Find data structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
    sets: usize,
}

impl UnionFind {
    /// Create `n` singleton sets.
    #[must_use]
    pub fn make_set(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            sets: n,
        }
    }

    /// Representative of `x`'s set.
    ///
    /// Every node on the path from `x` is repointed directly at the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }

    /// Merge the sets of `x` and `y`.
    ///
    /// Returns `false` when they already share a root (the edge would close a
    /// cycle). On equal rank the root of `x` survives.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);

        if rx == ry {
            return false;
        }

        match self.rank[rx].cmp(&self.rank[ry]) {
            std::cmp::Ordering::Less => self.parent[rx] = ry,
            std::cmp::Ordering::Greater => self.parent[ry] = rx,
            std::cmp::Ordering::Equal => {
                self.parent[ry] = rx;
                self.rank[rx] += 1;
            }
        }

        self.sets -= 1;
        true
    }

    /// Check if `x` and `y` are in the same set.
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of disjoint sets.
    #[must_use]
    pub const fn set_count(&self) -> usize {
        self.sets
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Parent pointers (for snapshots).
    #[must_use]
    pub fn parents(&self) -> &[usize] {
        &self.parent
    }

    /// Ranks (for snapshots).
    #[must_use]
    pub fn ranks(&self) -> &[u32] {
        &self.rank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_make_set_singletons() {
        let mut uf = UnionFind::make_set(4);
        assert_eq!(uf.set_count(), 4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
        }
    }

    #[test]
    fn test_union_reports_cycle() {
        let mut uf = UnionFind::make_set(3);
        assert!(uf.union(0, 1));
        assert!(uf.union(1, 2));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.set_count(), 1);
    }

    #[test]
    fn test_tie_keeps_first_root() {
        let mut uf = UnionFind::make_set(2);
        uf.union(0, 1);
        assert_eq!(uf.find(1), 0);
        assert_eq!(uf.ranks()[0], 1);
    }

    #[test]
    fn test_lower_rank_attaches_under_higher() {
        let mut uf = UnionFind::make_set(3);
        uf.union(0, 1); // root 0, rank 1
        uf.union(2, 0); // rank(2)=0 < rank(0)=1
        assert_eq!(uf.find(2), 0);
        assert_eq!(uf.ranks()[0], 1);
    }

    #[test]
    fn test_path_compression() {
        let mut uf = UnionFind::make_set(4);
        uf.union(0, 1);
        uf.union(2, 3);
        uf.union(0, 2); // root 0; 3 -> 2 -> 0
        assert_eq!(uf.parents()[3], 2);
        assert_eq!(uf.find(3), 0);
        assert_eq!(uf.parents()[3], 0);
    }

    #[test]
    fn test_empty() {
        let uf = UnionFind::make_set(0);
        assert!(uf.is_empty());
        assert_eq!(uf.set_count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let mut uf = UnionFind::make_set(2);
        uf.find(5);
    }

    proptest! {
        /// Merging never creates more than n - 1 successful unions.
        #[test]
        fn prop_union_count(pairs in proptest::collection::vec((0usize..10, 0usize..10), 0..40)) {
            let mut uf = UnionFind::make_set(10);
            let merged = pairs.iter().filter(|(a, b)| uf.union(*a, *b)).count();
            prop_assert!(merged <= 9);
            prop_assert_eq!(uf.set_count(), 10 - merged);
            for (a, b) in pairs {
                prop_assert!(uf.connected(a, b));
            }
        }
    }
}
