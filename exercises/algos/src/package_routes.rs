use std::collections::{HashSet, VecDeque};

use crate::AlgoError;

/// Fewest roads travelled to collect every package and return, choosing the
/// best starting vertex.
///
/// A package at `p` is collectable from any vertex within two hops of `p`
/// (its coverage). For each start `s`, the cost is twice the distance to the
/// farthest coverage set; the answer is the minimum over all starts, `-1`
/// if some package's coverage is unreachable from every start, `0` if there
/// are no packages.
pub fn min_roads_to_collect(
    packages: &[u8],
    roads: &[(usize, usize)],
) -> Result<i64, AlgoError> {
    let n = packages.len();
    for &(u, v) in roads {
        if u >= n || v >= n {
            return Err(AlgoError::InvalidArgument(format!(
                "road ({}, {}) is outside 0..{}",
                u, v, n
            )));
        }
    }

    let mut adj = vec![Vec::new(); n];
    for &(u, v) in roads {
        adj[u].push(v);
        adj[v].push(u);
    }

    let package_nodes: Vec<usize> =
        (0..n).filter(|&i| packages[i] != 0).collect();
    if package_nodes.is_empty() {
        return Ok(0);
    }

    let coverages: Vec<HashSet<usize>> = package_nodes
        .iter()
        .map(|&p| coverage(p, &adj))
        .collect();

    let mut best: Option<u64> = None;
    for s in 0..n {
        let mut bottleneck = 0u64;
        let mut reaches_all = true;
        for cover in &coverages {
            match distance_to_set(s, cover, &adj) {
                Some(d) => bottleneck = bottleneck.max(d),
                None => {
                    reaches_all = false;
                    break;
                }
            }
        }
        if reaches_all {
            let cost = 2 * bottleneck;
            best = Some(best.map_or(cost, |b| b.min(cost)));
        }
    }

    Ok(best.map_or(-1, |b| b as i64))
}

/// Vertices within two hops of `p`.
fn coverage(p: usize, adj: &[Vec<usize>]) -> HashSet<usize> {
    let mut seen = HashSet::from([p]);
    let mut frontier = vec![p];
    for _ in 0..2 {
        let mut next = Vec::new();
        for &node in &frontier {
            for &neighbor in &adj[node] {
                if seen.insert(neighbor) {
                    next.push(neighbor);
                }
            }
        }
        frontier = next;
    }
    seen
}

/// BFS distance from `s` to the nearest vertex of `targets`.
fn distance_to_set(
    s: usize,
    targets: &HashSet<usize>,
    adj: &[Vec<usize>],
) -> Option<u64> {
    let mut visited = vec![false; adj.len()];
    let mut queue = VecDeque::from([(s, 0u64)]);
    visited[s] = true;
    while let Some((node, dist)) = queue.pop_front() {
        if targets.contains(&node) {
            return Some(dist);
        }
        for &neighbor in &adj[node] {
            if !visited[neighbor] {
                visited[neighbor] = true;
                queue.push_back((neighbor, dist + 1));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples() {
        assert_eq!(
            min_roads_to_collect(
                &[1, 0, 0, 0, 0, 1],
                &[(1, 0), (2, 1), (2, 3), (3, 4), (4, 5)]
            ),
            Ok(2)
        );
        assert_eq!(
            min_roads_to_collect(
                &[0, 0, 0, 1, 1, 0, 0, 1],
                &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (5, 6), (5, 7)]
            ),
            Ok(2)
        );
    }

    #[test]
    fn no_packages_needs_no_roads() {
        assert_eq!(min_roads_to_collect(&[0, 0, 0], &[(0, 1), (1, 2)]), Ok(0));
    }

    #[test]
    fn start_inside_coverage_costs_nothing() {
        assert_eq!(min_roads_to_collect(&[1, 0], &[(0, 1)]), Ok(0));
    }

    #[test]
    fn unreachable_package_yields_minus_one() {
        // Two disconnected components with a package in each; no start
        // reaches both.
        assert_eq!(
            min_roads_to_collect(&[1, 0, 0, 1], &[(0, 1), (2, 3)]),
            Ok(-1)
        );
    }

    #[test]
    fn out_of_range_road_is_rejected() {
        assert!(min_roads_to_collect(&[1, 0], &[(0, 5)]).is_err());
    }
}
