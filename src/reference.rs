//! Slow reference routines for cross-checking the decision procedure.
//!
//! None of these are used by [`crate::berge::decide`]; they exist so tests can
//! compare the polynomial algorithm against exhaustive search on small graphs.

use crate::graph::{BfsTree, Graph};
use crate::holes::find_odd_hole;
use crate::vertex_set::VertexSet;
use crate::witness::Hole;

/// Berge by definition: no odd hole in the graph or its complement.
/// Exponential; intended for graphs of a dozen vertices or fewer.
pub fn is_berge_naive(graph: &Graph) -> bool {
    find_odd_hole(graph).is_none() && find_odd_hole(&graph.complement()).is_none()
}

/// Finds a *clean* shortest odd hole, if the graph has one: one with no major
/// vertex, which is the union of three shortest paths between three of its
/// vertices.
///
/// Tries every triple `(u, v, w)` and glues shortest `u-v`, `v-w`, `w-u` paths;
/// the result is accepted when the paths are internally disjoint and the cycle
/// is odd, of length at least 5, and chordless.
pub fn clean_odd_hole(graph: &Graph) -> Option<Hole> {
    let vertices = graph.vertices();
    let trees: Vec<BfsTree> = (0..graph.bound()).map(|v| graph.bfs(v, vertices)).collect();
    for u in vertices {
        for v in vertices - VertexSet::below(u + 1) {
            let Some(uv) = trees[u].path_to(v) else { continue };
            for w in vertices - VertexSet::below(v + 1) {
                let (Some(vw), Some(wu)) = (trees[v].path_to(w), trees[w].path_to(u)) else {
                    continue;
                };
                let mut cycle = uv.clone();
                cycle.extend_from_slice(&vw[1..]);
                cycle.extend_from_slice(&wu[1..wu.len() - 1]);
                if is_odd_hole(graph, &cycle) {
                    return Some(Hole { cycle });
                }
            }
        }
    }
    None
}

/// Returns `true` if `cycle` lists the vertices of an odd hole in cyclic order.
pub fn is_odd_hole(graph: &Graph, cycle: &[usize]) -> bool {
    let n = cycle.len();
    if n < 5 || n % 2 == 0 {
        return false;
    }
    let members: VertexSet = cycle.iter().collect();
    if members.len() != n {
        return false;
    }
    cycle.iter().enumerate().all(|(i, &v)| {
        let expected: VertexSet = [cycle[(i + 1) % n], cycle[(i + n - 1) % n]].iter().collect();
        graph.neighbours(v) & members == expected
    })
}

/// Exhaustive counterpart of the near-cleaner test for jewel- and
/// pyramid-free graphs: some `Y ⊆ X` with `|Y| <= 3` leaves a clean shortest
/// odd hole in `G - (X \ Y)`.
///
/// Having a clean odd hole is not monotone in `Y`, so every size up to three
/// is tried.
pub fn near_cleaner_reference(graph: &Graph, x: VertexSet) -> bool {
    let x = x & graph.vertices();
    let members = x.to_vec();
    (0..=members.len().min(3))
        .flat_map(|k| subsets(&members, k))
        .any(|y| clean_odd_hole(&graph.without(x - y)).is_some())
}

/// All `k`-element subsets of `items` (for `k <= 3`) as vertex sets.
fn subsets(items: &[usize], k: usize) -> impl Iterator<Item = VertexSet> + '_ {
    let n = items.len();
    let singles = move |i: usize| VertexSet::singleton(items[i]);
    let all: Vec<VertexSet> = match k {
        0 => vec![VertexSet::EMPTY],
        1 => (0..n).map(singles).collect(),
        2 => (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| singles(i) | singles(j)))
            .collect(),
        _ => (0..n)
            .flat_map(|i| {
                ((i + 1)..n).flat_map(move |j| {
                    ((j + 1)..n).map(move |l| singles(i) | singles(j) | singles(l))
                })
            })
            .collect(),
    };
    all.into_iter()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{cycle, house, petersen};

    #[test]
    fn naive_matches_known_graphs() {
        assert!(is_berge_naive(&cycle(6).unwrap()));
        assert!(is_berge_naive(&house().unwrap()));
        assert!(!is_berge_naive(&cycle(5).unwrap()));
        assert!(!is_berge_naive(&cycle(7).unwrap().complement()));
        assert!(!is_berge_naive(&petersen().unwrap()));
    }

    #[test]
    fn clean_hole_in_plain_cycle() {
        let hole = clean_odd_hole(&cycle(9).unwrap()).expect("C9 is clean");
        assert_eq!(hole.len(), 9);
        assert!(clean_odd_hole(&cycle(8).unwrap()).is_none());
    }

    #[test]
    fn odd_hole_recognition() {
        let g = cycle(7).unwrap();
        assert!(is_odd_hole(&g, &[0, 1, 2, 3, 4, 5, 6]));
        assert!(!is_odd_hole(&g, &[0, 1, 2, 3, 4]));
        assert!(!is_odd_hole(&cycle(6).unwrap(), &[0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn reference_near_cleaner_on_cycles() {
        let g = cycle(7).unwrap();
        // Up to three vertices of X may stay, so a 3-set keeps the hole.
        assert!(near_cleaner_reference(&g, [0, 1, 2].iter().collect()));
        assert!(!near_cleaner_reference(&g, [0, 2, 4, 6].iter().collect()));
        assert!(!near_cleaner_reference(&cycle(8).unwrap(), VertexSet::EMPTY));
    }

    #[test]
    fn reference_near_cleaner_tries_smaller_y() {
        // C7 on 0..7 with 7 seeing every cycle vertex but 3; 8 and 9 hang off 7.
        let mut edges: Vec<(usize, usize)> = (0..7).map(|i| (i, (i + 1) % 7)).collect();
        edges.extend([(0, 7), (1, 7), (2, 7), (4, 7), (5, 7), (6, 7)]);
        edges.extend([(0, 8), (2, 8), (3, 8), (7, 8), (2, 9), (4, 9), (5, 9), (7, 9)]);
        let g = Graph::from_edges(10, edges).unwrap();
        let x = VertexSet::singleton(7);
        assert!(clean_odd_hole(&g).is_none());
        assert!(clean_odd_hole(&g.without(x)).is_some());
        assert!(near_cleaner_reference(&g, x));
    }

    #[test]
    fn subsets_have_the_requested_size() {
        let items = [1, 4, 6, 9];
        assert_eq!(subsets(&items, 0).count(), 1);
        assert_eq!(subsets(&items, 2).count(), 6);
        assert!(subsets(&items, 3).all(|s| s.len() == 3));
    }
}
