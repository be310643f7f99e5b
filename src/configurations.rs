//! Detection of configurations T2 and T3.
//!
//! Both are certificates of a non-Berge graph built around an anticomponent
//! `X` of the vertices complete to a small frame, and a path that avoids `X`
//! and everything complete to it.

use crate::graph::Graph;
use crate::search::SearchContext;
use crate::vertex_set::VertexSet;
use crate::witness::{ConfigT2, ConfigT3};
use crate::Result;
use rayon::prelude::*;
use tracing::debug;

// ============================================================================
// T2
// ============================================================================

/// Looks for a T2 configuration on the path `v1-v2-v3-v4`.
///
/// Requires `v1v2`, `v2v3`, `v3v4` to be edges and `v1v3`, `v1v4`, `v2v4` to be
/// non-edges; otherwise `None`.
pub fn check_config_t2(
    graph: &Graph,
    v1: usize,
    v2: usize,
    v3: usize,
    v4: usize,
) -> Option<ConfigT2> {
    if !graph.has_vertices(&[v1, v2, v3, v4]) {
        return None;
    }
    let frame: VertexSet = [v1, v2, v3, v4].iter().collect();
    if frame.len() != 4
        || !graph.has_edge(v1, v2)
        || !graph.has_edge(v2, v3)
        || !graph.has_edge(v3, v4)
        || graph.has_edge(v1, v3)
        || graph.has_edge(v1, v4)
        || graph.has_edge(v2, v4)
    {
        return None;
    }

    let ends: VertexSet = [v1, v2, v4].iter().collect();
    let complete = graph.complete_to(ends);
    if complete.is_empty() {
        return None;
    }

    let middle: VertexSet = [v2, v3].iter().collect();
    let around_middle = middle | graph.neighbourhood(middle);
    for x in graph.anticomponents(complete) {
        let avoid = around_middle | x | graph.complete_to(x);
        if let Some(path) = graph.path_through(graph.vertices() - avoid, v1, v4) {
            return Some(ConfigT2 {
                v1,
                v2,
                v3,
                v4,
                x,
                path,
            });
        }
    }
    None
}

/// All induced paths `v1-v2-v3-v4`, in both directions.
fn induced_four_paths(graph: &Graph) -> Vec<[usize; 4]> {
    let mut out = Vec::new();
    for (a, b) in graph.edges() {
        for (v1, v2) in [(a, b), (b, a)] {
            let n1 = graph.neighbours(v1);
            for v3 in graph.neighbours(v2) - n1 - VertexSet::singleton(v1) {
                let n2 = graph.neighbours(v2);
                let ends: VertexSet = [v1, v2].iter().collect();
                for v4 in graph.neighbours(v3) - n1 - n2 - ends {
                    out.push([v1, v2, v3, v4]);
                }
            }
        }
    }
    out
}

/// Searches every induced 4-vertex path.
///
/// # Errors
/// [`crate::BergeError::Cancelled`] if `ctx` is stopped first, or
/// [`crate::BergeError::WorkerPanicked`].
pub fn find_config_t2(graph: &Graph, ctx: &SearchContext<'_>) -> Result<Option<ConfigT2>> {
    let paths = induced_four_paths(graph);
    let hit = ctx.find_first(paths, |[v1, v2, v3, v4]| check_config_t2(graph, v1, v2, v3, v4))?;
    debug!(order = graph.order(), found = hit.is_some(), "T2 search finished");
    Ok(hit)
}

// ============================================================================
// T3
// ============================================================================

/// Looks for a T3 configuration with the given `(v1, v2, v5)`.
///
/// Requires `v1v2` to be an edge and `v5` to be adjacent to neither; otherwise
/// `None`. The remaining roles are derived:
/// - `X` ranges over the anticomponents of the `{v1, v2, v5}`-complete set.
/// - `F'` grows from `v5` through vertices outside `N(v1) ∪ N(v2)` and the
///   `X`-complete set; `F` adds the `X`-complete vertices attached to `F'`
///   that see none of `v1, v2, v5`.
/// - `v4` is a neighbour of `v1` (not of `v2`, `v5`) with a neighbour `v6` in
///   `F` and a non-neighbour in `X`.
/// - `v3` is complete to `{v2, v4, v5}`, misses `v1`, and has a non-neighbour in `X`.
pub fn check_config_t3(graph: &Graph, v1: usize, v2: usize, v5: usize) -> Option<ConfigT3> {
    if !graph.has_vertices(&[v1, v2, v5]) {
        return None;
    }
    let frame: VertexSet = [v1, v2, v5].iter().collect();
    if frame.len() != 3
        || !graph.has_edge(v1, v2)
        || graph.has_edge(v1, v5)
        || graph.has_edge(v2, v5)
    {
        return None;
    }

    let complete = graph.complete_to(frame);
    if complete.is_empty() {
        return None;
    }
    let n1 = graph.neighbours(v1);
    let n2 = graph.neighbours(v2);
    let n5 = graph.neighbours(v5);

    for x in graph.anticomponents(complete) {
        let x_complete = graph.complete_to(x);

        let mut grown = VertexSet::singleton(v5);
        let mut pending = n5;
        let mut seen = VertexSet::EMPTY;
        while let Some(u) = pending.pop_first() {
            seen.insert(u);
            if x_complete.contains(u) || n1.contains(u) || n2.contains(u) {
                continue;
            }
            grown.insert(u);
            pending |= graph.neighbours(u) - seen;
        }

        let attached = x_complete & (graph.neighbourhood(grown) - (n1 | n2 | n5));
        let f = grown | attached;
        let x_missing = graph.anti_neighbourhood(x);

        let v4_candidates = (n1 - (n2 | n5)) & graph.neighbourhood(f) & x_missing;
        for v4 in v4_candidates {
            let hub: VertexSet = [v2, v4, v5].iter().collect();
            let Some(v3) = ((graph.complete_to(hub) & x_missing) - n1).first() else {
                continue;
            };
            let Some(v6) = (graph.neighbours(v4) & f).first() else {
                continue;
            };
            let Some(path) = graph.path_through(grown, v5, v6) else {
                continue;
            };
            return Some(ConfigT3 {
                v1,
                v2,
                v3,
                v4,
                v5,
                v6,
                x,
                path,
            });
        }
    }
    None
}

/// Searches every ordered triple `(v1, v2, v5)` with `v1v2` an edge and `v5`
/// adjacent to neither.
///
/// # Errors
/// [`crate::BergeError::Cancelled`] if `ctx` is stopped first, or
/// [`crate::BergeError::WorkerPanicked`].
pub fn find_config_t3(graph: &Graph, ctx: &SearchContext<'_>) -> Result<Option<ConfigT3>> {
    let vertices = graph.vertices();
    let arcs: Vec<(usize, usize)> = graph
        .edges()
        .flat_map(|(u, v)| [(u, v), (v, u)])
        .collect();
    let triples = arcs.into_par_iter().flat_map_iter(move |(v1, v2)| {
        let far = vertices - graph.neighbours(v1) - graph.neighbours(v2)
            - VertexSet::singleton(v1)
            - VertexSet::singleton(v2);
        far.iter().map(move |v5| (v1, v2, v5))
    });

    let hit = ctx.find_first(triples, |(v1, v2, v5)| check_config_t3(graph, v1, v2, v5))?;
    debug!(order = graph.order(), found = hit.is_some(), "T3 search finished");
    Ok(hit)
}

// ============================================================================
// Tests
// ============================================================================
