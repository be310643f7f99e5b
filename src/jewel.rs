//! Jewel detection.
//!
//! A jewel is a 5-cycle `v1-v2-v3-v4-v5` (chords `v1v3`, `v2v4`, `v1v4` absent)
//! together with a `v1`–`v4` path whose interior has no neighbour among
//! `v2, v3, v5`. A graph containing a jewel is not Berge.
//!
//! Only `(v2, v3, v5)` is enumerated; `v1` and `v4` are then any pair from the
//! candidate sets `X1`, `X2` that can be joined through a single component of
//! the vertices outside `N(v2) ∪ N(v3) ∪ N(v5)`.

use crate::graph::Graph;
use crate::search::SearchContext;
use crate::vertex_set::VertexSet;
use crate::witness::Jewel;
use crate::Result;
use rayon::prelude::*;
use tracing::debug;

/// Looks for a jewel with the given `(v2, v3, v5)`.
///
/// Requires `v2v3` to be an edge and `v5` distinct from both; otherwise `None`.
pub fn check_jewel(graph: &Graph, v2: usize, v3: usize, v5: usize) -> Option<Jewel> {
    if !graph.has_vertices(&[v2, v3, v5]) || v5 == v2 || v5 == v3 || !graph.has_edge(v2, v3) {
        return None;
    }
    let n2 = graph.neighbours(v2);
    let n3 = graph.neighbours(v3);
    let n5 = graph.neighbours(v5);

    let x1 = (n2 & n5) - n3;
    let x2 = (n3 & n5) - n2;
    if x1.is_empty() || x2.is_empty() {
        return None;
    }

    let free = graph.vertices() - (n2 | n3 | n5);
    let components = graph.components(free);

    for v1 in x1 {
        let n1 = graph.neighbours(v1);
        for v4 in x2 - n1 {
            let n4 = graph.neighbours(v4);
            let Some(&bridge) = components
                .iter()
                .find(|c| c.meets(n1) && c.meets(n4))
            else {
                continue;
            };
            if let Some(path) = graph.path_through(bridge, v1, v4) {
                return Some(Jewel {
                    v1,
                    v2,
                    v3,
                    v4,
                    v5,
                    path,
                });
            }
        }
    }
    None
}

/// Searches every ordered triple `(v2, v3, v5)` with `v2v3` an edge.
///
/// # Errors
/// [`crate::BergeError::Cancelled`] if `ctx` is stopped first, or
/// [`crate::BergeError::WorkerPanicked`].
pub fn find_jewel(graph: &Graph, ctx: &SearchContext<'_>) -> Result<Option<Jewel>> {
    let vertices = graph.vertices();
    let arcs: Vec<(usize, usize)> = graph
        .edges()
        .flat_map(|(u, v)| [(u, v), (v, u)])
        .collect();

    let triples = arcs.into_par_iter().flat_map_iter(move |(v2, v3)| {
        let rest = vertices - VertexSet::singleton(v2) - VertexSet::singleton(v3);
        rest.iter().map(move |v5| (v2, v3, v5))
    });

    let hit = ctx.find_first(triples, |(v2, v3, v5)| check_jewel(graph, v2, v3, v5))?;
    debug!(order = graph.order(), found = hit.is_some(), "jewel search finished");
    Ok(hit)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{complete_bipartite, cycle, house, petersen, random_bipartite};
    use crate::search::SearchPool;
    use crate::validate::validate_jewel;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn pool() -> SearchPool {
        SearchPool::with_workers(4).unwrap()
    }

    #[test]
    fn five_cycle_is_a_jewel() {
        let g = cycle(5).unwrap();
        // v5 itself has no neighbour among v2, v3, v5, so it may close the path.
        let j = check_jewel(&g, 1, 2, 4).expect("C5 is a jewel");
        assert_eq!(j.frame(), [0, 1, 2, 3, 4]);
        assert_eq!(j.path, vec![0, 4, 3]);
        validate_jewel(&g, &j).unwrap();
    }

    #[test]
    fn rejects_vertices_outside_the_graph() {
        let g = cycle(5).unwrap();
        assert!(check_jewel(&g, 1, 2, 99).is_none());
        assert!(check_jewel(&g, 5, 1, 3).is_none());
        assert!(check_jewel(&g.without(VertexSet::singleton(4)), 1, 2, 4).is_none());
    }

    #[test]
    fn requires_v2_v3_edge() {
        let g = cycle(5).unwrap();
        assert!(check_jewel(&g, 0, 2, 4).is_none());
        assert!(check_jewel(&g, 1, 2, 2).is_none());
    }

    #[test]
    fn finds_jewels_in_non_berge_graphs() {
        let pool = pool();
        for g in [cycle(5).unwrap(), petersen().unwrap()] {
            let j = find_jewel(&g, &pool.context())
                .unwrap()
                .unwrap_or_else(|| panic!("jewel expected in {g:?}"));
            validate_jewel(&g, &j).unwrap();
        }
    }

    #[test]
    fn no_jewel_in_berge_graphs() {
        let pool = pool();
        let ctx = pool.context();
        for g in [
            cycle(4).unwrap(),
            cycle(6).unwrap(),
            house().unwrap(),
            complete_bipartite(3, 4).unwrap(),
        ] {
            assert!(find_jewel(&g, &ctx).unwrap().is_none(), "{g:?}");
            assert!(find_jewel(&g.complement(), &ctx).unwrap().is_none(), "{g:?}");
        }
    }

    #[test]
    fn random_bipartite_graphs_and_complements_have_no_jewel() {
        let pool = pool();
        let ctx = pool.context();
        let mut rng = XorShiftRng::seed_from_u64(0xBEEF);
        for _ in 0..10 {
            let g = random_bipartite(&mut rng, 6, 6, 0.5).unwrap();
            assert!(find_jewel(&g, &ctx).unwrap().is_none());
            assert!(find_jewel(&g.complement(), &ctx).unwrap().is_none());
        }
    }
}
