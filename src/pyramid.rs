//! Pyramid detection.
//!
//! A pyramid is a triangle `b0 b1 b2` (the base), an apex `a`, and three
//! induced paths `P_i` from `a` to `b_i` that are pairwise disjoint and
//! non-adjacent except through the base, with at most one of them of length
//! one. A graph containing a pyramid is not Berge.
//!
//! The search enumerates the base together with the apex's neighbours
//! `s0, s1, s2` on the three paths. For each `i` it then computes one candidate
//! path from `s_i` to `b_i` per marker vertex `m` (the "middle" of the path),
//! and finally looks for three markers whose paths are pairwise compatible.

use crate::graph::Graph;
use crate::search::SearchContext;
use crate::vertex_set::VertexSet;
use crate::witness::Pyramid;
use crate::Result;
use rayon::prelude::*;
use tracing::debug;

/// Index pairs checked for compatibility, in order.
const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// A candidate path from `s_i` to `b_i`, as a set plus its closed neighbourhood.
#[derive(Clone, Copy)]
struct Leg {
    members: VertexSet,
    reach: VertexSet,
}

/// Tries to complete `(b, s)` to a pyramid.
///
/// `b` must be a triangle and `s` three distinct vertices sharing at most one
/// vertex with `b`. A shared vertex is moved to position 0 of both triples,
/// keeping the relative order of the remaining entries.
pub fn check_pyramid(graph: &Graph, b: [usize; 3], s: [usize; 3]) -> Option<Pyramid> {
    if !graph.has_vertices(&b) || !graph.has_vertices(&s) {
        return None;
    }
    let (b, s) = align(b, s)?;
    if !graph.has_edge(b[0], b[1]) || !graph.has_edge(b[0], b[2]) || !graph.has_edge(b[1], b[2]) {
        return None;
    }

    let base: VertexSet = b.iter().collect();
    let sources: VertexSet = s.iter().collect();

    // Between two legs' endpoints only the base edge may appear.
    for (i, j) in PAIRS {
        let end_i: VertexSet = [b[i], s[i]].iter().collect();
        let end_j: VertexSet = [b[j], s[j]].iter().collect();
        let links: usize = end_i
            .iter()
            .map(|u| (graph.neighbours(u) & end_j).len())
            .sum();
        if links > 1 {
            return None;
        }
    }

    let apex = (graph.complete_to(sources) - base)
        .iter()
        .find(|&a| (graph.neighbours(a) & base).len() <= 1)?;

    let middle = graph.vertices() - base - sources;
    let legs: Vec<Vec<Option<Leg>>> = (0..3)
        .map(|i| legs_for(graph, &b, &s, i, middle))
        .collect();

    // good[k][mi][mj]: the legs through mi and mj are compatible for PAIRS[k].
    let bound = graph.bound();
    let mut good = vec![vec![vec![false; bound]; bound]; PAIRS.len()];
    for (k, &(i, j)) in PAIRS.iter().enumerate() {
        for (mi, leg_i) in legs[i].iter().enumerate() {
            let Some(leg_i) = leg_i else { continue };
            let blocked = middle & leg_i.reach;
            for (mj, leg_j) in legs[j].iter().enumerate() {
                if let Some(leg_j) = leg_j {
                    good[k][mi][mj] = blocked.is_disjoint(leg_j.members);
                }
            }
        }
    }

    let domain = |i: usize| -> VertexSet {
        (middle | VertexSet::singleton(b[i]))
            .iter()
            .filter(|&m| legs[i][m].is_some())
            .collect()
    };
    for m0 in domain(0) {
        for m1 in domain(1) {
            if !good[0][m0][m1] {
                continue;
            }
            for m2 in domain(2) {
                if good[1][m0][m2] && good[2][m1][m2] {
                    return Some(Pyramid {
                        apex,
                        base: b,
                        sources: s,
                        markers: [m0, m1, m2],
                    });
                }
            }
        }
    }
    None
}

/// Reorders `(b, s)` so that a shared vertex sits at index 0 of both.
/// Rejects triples with repeated entries or more than one shared vertex.
fn align(b: [usize; 3], s: [usize; 3]) -> Option<([usize; 3], [usize; 3])> {
    let bs: VertexSet = b.iter().collect();
    let ss: VertexSet = s.iter().collect();
    if bs.len() != 3 || ss.len() != 3 {
        return None;
    }
    let shared = bs & ss;
    match shared.len() {
        0 => Some((b, s)),
        1 => {
            let o = shared.first()?;
            let mut b_rest = b.iter().copied().filter(|&v| v != o);
            let mut s_rest = s.iter().copied().filter(|&v| v != o);
            Some((
                [o, b_rest.next()?, b_rest.next()?],
                [o, s_rest.next()?, s_rest.next()?],
            ))
        }
        _ => None,
    }
}

/// Candidate legs from `s[i]` to `b[i]`, indexed by marker vertex.
fn legs_for(
    graph: &Graph,
    b: &[usize; 3],
    s: &[usize; 3],
    i: usize,
    middle: VertexSet,
) -> Vec<Option<Leg>> {
    let mut legs = vec![None; graph.bound()];
    let leg = |path: &[usize]| {
        let members: VertexSet = path.iter().collect();
        Leg {
            members,
            reach: members | graph.neighbourhood(members),
        }
    };

    if s[i] == b[i] {
        legs[b[i]] = Some(leg(&[b[i]]));
        return legs;
    }
    if graph.has_edge(s[i], b[i]) {
        legs[b[i]] = Some(leg(&[s[i], b[i]]));
        return legs;
    }

    let others: VertexSet = (0..3)
        .filter(|&k| k != i)
        .flat_map(|k| [b[k], s[k]])
        .collect();
    let interior = middle - graph.neighbourhood(others);

    for m in interior {
        let Some(head) = graph.path_through(interior, s[i], m) else {
            continue;
        };
        let Some(tail) = graph.path_through(interior, m, b[i]) else {
            continue;
        };
        let head_set: VertexSet = head.iter().collect();
        let tail_set: VertexSet = tail.iter().collect();
        if head_set & tail_set != VertexSet::singleton(m) {
            continue;
        }
        let head_body: VertexSet = head[..head.len() - 1].iter().collect();
        let tail_body: VertexSet = tail[1..].iter().collect();
        if graph.neighbourhood(head_body).meets(tail_body) {
            continue;
        }
        legs[m] = Some(leg(&[head.as_slice(), &tail[1..]].concat()));
    }
    legs
}

/// All triangles `b0 < b1 < b2`.
fn triangles(graph: &Graph) -> Vec<[usize; 3]> {
    let mut out = Vec::new();
    for (u, v) in graph.edges() {
        let above = VertexSet::below(v + 1);
        for w in (graph.neighbours(u) & graph.neighbours(v)) - above {
            out.push([u, v, w]);
        }
    }
    out
}

/// Searches every triangle against every ordered triple of sources.
///
/// # Errors
/// [`crate::BergeError::Cancelled`] if `ctx` is stopped first, or
/// [`crate::BergeError::WorkerPanicked`].
pub fn find_pyramid(graph: &Graph, ctx: &SearchContext<'_>) -> Result<Option<Pyramid>> {
    let vertices = graph.vertices();
    let frames = triangles(graph).into_par_iter().flat_map_iter(move |b| {
        vertices.iter().flat_map(move |s0| {
            (vertices - VertexSet::singleton(s0)).iter().flat_map(move |s1| {
                (vertices - VertexSet::singleton(s0) - VertexSet::singleton(s1))
                    .iter()
                    .map(move |s2| (b, [s0, s1, s2]))
            })
        })
    });

    let hit = ctx.find_first(frames, |(b, s)| {
        // Cheap filter before any path work: the sources need a common neighbour.
        let sources: VertexSet = s.iter().collect();
        if (graph.complete_to(sources) - b.iter().collect::<VertexSet>()).is_empty() {
            return None;
        }
        check_pyramid(graph, b, s)
    })?;
    debug!(order = graph.order(), found = hit.is_some(), "pyramid search finished");
    Ok(hit)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{complete, cycle, random_bipartite};
    use crate::search::SearchPool;
    use crate::validate::validate_pyramid;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn pool() -> SearchPool {
        SearchPool::with_workers(4).unwrap()
    }

    /// Triangle 0-1-2 with apex 5 reaching it through 2, 3-0 and 4-1.
    fn small_pyramid() -> Graph {
        Graph::from_edges(
            6,
            [(0, 1), (0, 2), (1, 2), (0, 3), (1, 4), (2, 5), (3, 5), (4, 5)],
        )
        .unwrap()
    }

    #[test]
    fn small_pyramid_has_exact_frame() {
        let g = small_pyramid();
        let p = find_pyramid(&g, &pool().context()).unwrap().expect("pyramid");
        assert_eq!(p.frame(), [5, 2, 0, 1, 2, 3, 4, 2, 0, 1]);
        validate_pyramid(&g, &p).unwrap();
    }

    #[test]
    fn shared_vertex_is_moved_first() {
        assert_eq!(align([0, 1, 2], [3, 2, 4]), Some(([2, 0, 1], [2, 3, 4])));
        assert_eq!(align([0, 1, 2], [5, 3, 4]), Some(([0, 1, 2], [5, 3, 4])));
        assert_eq!(align([0, 1, 2], [1, 2, 4]), None);
        assert_eq!(align([0, 1, 2], [4, 4, 3]), None);
    }

    #[test]
    fn direct_check_rejects_crossing_sources() {
        // With s1=4 paired against b1=0 the legs 0-4 and 1-3 see three edges.
        let g = small_pyramid();
        assert!(check_pyramid(&g, [0, 1, 2], [4, 2, 3]).is_none());
        assert!(check_pyramid(&g, [0, 1, 2], [3, 2, 4]).is_some());
    }

    #[test]
    fn direct_check_rejects_vertices_outside_the_graph() {
        let g = small_pyramid();
        assert!(check_pyramid(&g, [0, 1, 2], [3, 2, 64]).is_none());
        assert!(check_pyramid(&g, [0, 1, 7], [3, 2, 4]).is_none());
        assert!(check_pyramid(&g.without(VertexSet::singleton(4)), [0, 1, 2], [3, 2, 4]).is_none());
    }

    #[test]
    fn longer_legs() {
        // Triangle 0-1-2, apex 9, legs 9-3-4-0, 9-5-6-1, 9-7-8-2.
        let g = Graph::from_edges(
            10,
            [
                (0, 1),
                (0, 2),
                (1, 2),
                (9, 3),
                (3, 4),
                (4, 0),
                (9, 5),
                (5, 6),
                (6, 1),
                (9, 7),
                (7, 8),
                (8, 2),
            ],
        )
        .unwrap();
        let p = find_pyramid(&g, &pool().context()).unwrap().expect("pyramid");
        assert_eq!(p.apex, 9);
        validate_pyramid(&g, &p).unwrap();
    }

    #[test]
    fn no_pyramid_without_triangles_or_in_cliques() {
        let pool = pool();
        let ctx = pool.context();
        assert!(find_pyramid(&cycle(7).unwrap(), &ctx).unwrap().is_none());
        assert!(find_pyramid(&complete(6).unwrap(), &ctx).unwrap().is_none());
    }

    #[test]
    fn bipartite_complements_have_no_pyramid() {
        let pool = pool();
        let ctx = pool.context();
        let mut rng = XorShiftRng::seed_from_u64(0x9A7);
        for _ in 0..5 {
            let g = random_bipartite(&mut rng, 5, 5, 0.5).unwrap();
            assert!(find_pyramid(&g.complement(), &ctx).unwrap().is_none());
        }
    }
}
