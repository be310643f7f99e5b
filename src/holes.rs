//! Induced cycle search.
//!
//! Holes are grown as chordless paths from their smallest vertex `s`: every
//! new vertex must see the previous one and no earlier one, and must avoid
//! `N(s)` until the vertex that closes the cycle. Growing only through
//! vertices larger than `s` means each hole is met from exactly one start.

use crate::graph::Graph;
use crate::search::SearchContext;
use crate::vertex_set::VertexSet;
use crate::witness::Hole;
use crate::Result;
use tracing::debug;

/// Which cycle lengths a search accepts.
#[derive(Clone, Copy, Debug)]
enum Target {
    /// Exactly this many vertices.
    Exact(usize),
    /// Any odd length of at least 5.
    Odd,
}

impl Target {
    #[inline]
    fn accepts(self, len: usize) -> bool {
        match self {
            Self::Exact(k) => len == k,
            Self::Odd => len >= 5 && len % 2 == 1,
        }
    }

    /// Whether a path of `len` vertices may still grow before closing.
    #[inline]
    fn may_extend(self, len: usize) -> bool {
        match self {
            Self::Exact(k) => len < k,
            Self::Odd => true,
        }
    }
}

/// Depth-first growth of a chordless path. `earlier` holds every path vertex
/// except the start and the last one.
fn grow(
    graph: &Graph,
    allowed: VertexSet,
    target: Target,
    path: &mut Vec<usize>,
    earlier: VertexSet,
) -> bool {
    let (Some(&s), Some(&last)) = (path.first(), path.last()) else {
        return false;
    };
    let on_path: VertexSet = path.iter().collect();
    let candidates = (graph.neighbours(last) & allowed) - on_path - graph.neighbourhood(earlier);
    let start_nbrs = graph.neighbours(s);

    for w in candidates {
        let closes = path.len() >= 2 && start_nbrs.contains(w);
        if closes {
            if target.accepts(path.len() + 1) {
                path.push(w);
                return true;
            }
            continue;
        }
        if !target.may_extend(path.len() + 1) {
            continue;
        }
        let next_earlier = if path.len() >= 2 {
            earlier | VertexSet::singleton(last)
        } else {
            earlier
        };
        path.push(w);
        if grow(graph, allowed, target, path, next_earlier) {
            return true;
        }
        path.pop();
    }
    false
}

/// A hole matching `target` whose smallest vertex is `s`.
fn hole_from(graph: &Graph, s: usize, target: Target) -> Option<Hole> {
    let allowed = graph.vertices() - VertexSet::below(s + 1);
    let mut path = vec![s];
    grow(graph, allowed, target, &mut path, VertexSet::EMPTY).then(|| Hole { cycle: path })
}

/// Finds an induced cycle on exactly `k` vertices, for `k >= 4`.
///
/// # Errors
/// [`crate::BergeError::Cancelled`] if `ctx` is stopped first, or
/// [`crate::BergeError::WorkerPanicked`].
pub fn find_hole(graph: &Graph, k: usize, ctx: &SearchContext<'_>) -> Result<Option<Hole>> {
    if k < 4 || k > graph.order() {
        return Ok(None);
    }
    let starts = graph.vertices().to_vec();
    let hit = ctx.find_first(starts, |s| hole_from(graph, s, Target::Exact(k)))?;
    debug!(order = graph.order(), k, found = hit.is_some(), "hole search finished");
    Ok(hit)
}

/// Finds an odd hole by exhaustive search. Exponential in the worst case.
pub fn find_odd_hole(graph: &Graph) -> Option<Hole> {
    graph
        .vertices()
        .iter()
        .find_map(|s| hole_from(graph, s, Target::Odd))
}

// ============================================================================
// Tests
// ============================================================================
