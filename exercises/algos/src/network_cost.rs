use crate::AlgoError;

/// Disjoint-set forest with path compression and union by rank.
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(n: usize) -> UnionFind {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    fn find(&mut self, u: usize) -> usize {
        if self.parent[u] != u {
            self.parent[u] = self.find(self.parent[u]);
        }
        self.parent[u]
    }

    /// Merges the sets of `u` and `v`; false if they were already joined.
    fn union(&mut self, u: usize, v: usize) -> bool {
        let root_u = self.find(u);
        let root_v = self.find(v);
        if root_u == root_v {
            return false;
        }
        if self.rank[root_u] < self.rank[root_v] {
            self.parent[root_u] = root_v;
        } else {
            if self.rank[root_u] == self.rank[root_v] {
                self.rank[root_u] += 1;
            }
            self.parent[root_v] = root_u;
        }
        true
    }
}

/// Weight of a minimum spanning tree over `n` devices plus the cheapest
/// module. Devices in `edges` are 1-indexed `(device1, device2, cost)`.
pub fn min_total_cost(
    n: usize,
    modules: &[i64],
    edges: &[(usize, usize, i64)],
) -> Result<i64, AlgoError> {
    if n == 0 {
        return Err(AlgoError::InvalidArgument(
            "at least one device is required".into(),
        ));
    }
    if modules.is_empty() {
        return Err(AlgoError::InvalidArgument(
            "at least one module is required".into(),
        ));
    }
    for &(u, v, _) in edges {
        if u == 0 || v == 0 || u > n || v > n {
            return Err(AlgoError::InvalidArgument(format!(
                "edge ({}, {}) is outside 1..={}",
                u, v, n
            )));
        }
    }

    let mut sorted: Vec<&(usize, usize, i64)> = edges.iter().collect();
    sorted.sort_by_key(|&&(_, _, cost)| cost);

    let mut uf = UnionFind::new(n);
    let mut total = 0;
    for &(u, v, cost) in sorted {
        if uf.union(u - 1, v - 1) {
            total += cost;
        }
    }

    let cheapest_module = modules.iter().copied().min().unwrap_or(0);
    Ok(total + cheapest_module)
}
