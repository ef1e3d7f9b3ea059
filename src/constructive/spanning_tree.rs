//! Kruskal minimum spanning tree over a distance matrix.

use crate::distance::DistanceMatrix;

/// Union-find over `0..n` with path compression and union by rank.
#[derive(Debug, Clone)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl DisjointSet {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
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

    /// Merges the sets of `x` and `y`. Returns `false` if they were already
    /// joined.
    pub(crate) fn union(&mut self, x: usize, y: usize) -> bool {
        let (root_x, root_y) = (self.find(x), self.find(y));
        if root_x == root_y {
            return false;
        }
        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => self.parent[root_y] = root_x,
            std::cmp::Ordering::Less => self.parent[root_x] = root_y,
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Minimum spanning forest over the given matrix indices.
///
/// Street direction is ignored: the weight of `{i, j}` is the shorter of
/// the two directed distances, and pairs unreachable both ways are not
/// candidates. Candidates are sorted by `(weight, i, j)`, where `i < j` are
/// positions in `nodes`.
///
/// Returns the accepted edges as pairs of matrix indices, in acceptance
/// order.
pub(crate) fn kruskal(matrix: &DistanceMatrix, nodes: &[usize]) -> Vec<(usize, usize)> {
    let mut candidates = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let (a, b) = (nodes[i], nodes[j]);
            let w = matrix.get(a, b).min(matrix.get(b, a));
            if w.is_finite() {
                candidates.push((w, i, j));
            }
        }
    }
    candidates.sort_by(|x, y| {
        x.0.total_cmp(&y.0)
            .then_with(|| x.1.cmp(&y.1))
            .then_with(|| x.2.cmp(&y.2))
    });

    let mut sets = DisjointSet::new(nodes.len());
    let mut tree = Vec::with_capacity(nodes.len().saturating_sub(1));
    for (_, i, j) in candidates {
        if sets.union(i, j) {
            tree.push((nodes[i], nodes[j]));
            if tree.len() + 1 == nodes.len() {
                break;
            }
        }
    }
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VertexId;

    fn matrix(n: usize, data: Vec<f64>) -> DistanceMatrix {
        DistanceMatrix::from_data((0..n).map(VertexId).collect(), data).expect("square")
    }

    #[test]
    fn test_disjoint_set() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(!sets.union(1, 0));
        assert_ne!(sets.find(0), sets.find(3));
        assert!(sets.union(1, 4));
        assert_eq!(sets.find(0), sets.find(3));
        assert_eq!(sets.find(2), 2);
    }

    #[test]
    fn test_kruskal_picks_cheapest_edges() {
        let inf = f64::INFINITY;
        #[rustfmt::skip]
        let dm = matrix(4, vec![
            0.0, 1.0, 4.0, inf,
            1.0, 0.0, 2.0, 6.0,
            4.0, 2.0, 0.0, 3.0,
            inf, 6.0, 3.0, 0.0,
        ]);
        let tree = kruskal(&dm, &[0, 1, 2, 3]);
        assert_eq!(tree, vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_kruskal_uses_shorter_direction() {
        #[rustfmt::skip]
        let dm = matrix(3, vec![
            0.0, 9.0, 5.0,
            1.0, 0.0, 5.0,
            5.0, 5.0, 0.0,
        ]);
        let tree = kruskal(&dm, &[0, 1, 2]);
        assert_eq!(tree[0], (0, 1));
        // tie between {0,2} and {1,2} at 5: lower position first
        assert_eq!(tree[1], (0, 2));
    }

    #[test]
    fn test_kruskal_subset_and_forest() {
        let inf = f64::INFINITY;
        #[rustfmt::skip]
        let dm = matrix(4, vec![
            0.0, inf, 2.0, inf,
            inf, 0.0, inf, 1.0,
            2.0, inf, 0.0, inf,
            inf, 1.0, inf, 0.0,
        ]);
        assert_eq!(kruskal(&dm, &[0, 2]), vec![(0, 2)]);
        assert_eq!(kruskal(&dm, &[0, 1, 2, 3]), vec![(1, 3), (0, 2)]);
        assert!(kruskal(&dm, &[0]).is_empty());
    }
}
