//! Standard graph families and random generators.
//!
//! Used as fixtures by the tests and as inputs for benchmarking the decision
//! procedure. Every constructor returns a plain [`Graph`].

use crate::graph::Graph;
use crate::vertex_set::MAX_VERTICES;
use crate::{BergeError, Result};
use rand::Rng;

// ============================================================================
// Named families
// ============================================================================

/// The path `0-1-...-(n-1)`.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `n > 64`.
pub fn path(n: usize) -> Result<Graph> {
    Graph::from_edges(n, (1..n).map(|i| (i - 1, i)))
}

/// The cycle `0-1-...-(n-1)-0`. For `n < 3` this degenerates to a path.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `n > 64`.
pub fn cycle(n: usize) -> Result<Graph> {
    if n < 3 {
        return path(n);
    }
    Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n)))
}

/// The complete graph `K_n`.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `n > 64`.
pub fn complete(n: usize) -> Result<Graph> {
    Graph::from_edges(n, (0..n).flat_map(|u| ((u + 1)..n).map(move |v| (u, v))))
}

/// The complete bipartite graph `K_{a,b}` with sides `0..a` and `a..a+b`.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `a + b > 64`.
pub fn complete_bipartite(a: usize, b: usize) -> Result<Graph> {
    Graph::from_edges(a + b, (0..a).flat_map(|u| (a..a + b).map(move |v| (u, v))))
}

/// The Petersen graph: outer 5-cycle `0..5`, inner pentagram `5..10`.
///
/// # Errors
/// Never fails; the signature matches the other constructors.
pub fn petersen() -> Result<Graph> {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    let inner = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5));
    Graph::from_edges(10, outer.chain(spokes).chain(inner))
}

/// The house graph: the 4-cycle `0-1-3-2-0` with roof vertex `4` on edge `2-3`.
///
/// # Errors
/// Never fails; the signature matches the other constructors.
pub fn house() -> Result<Graph> {
    Graph::from_edges(5, [(0, 1), (0, 2), (1, 3), (2, 3), (2, 4), (3, 4)])
}

/// The Frucht graph (12 vertices, cubic, no non-trivial automorphism).
///
/// # Errors
/// Never fails; the signature matches the other constructors.
pub fn frucht() -> Result<Graph> {
    let rim = (0..7).map(|i| (i, (i + 1) % 7));
    let rest = [
        (0, 7),
        (1, 7),
        (2, 8),
        (3, 9),
        (4, 9),
        (5, 10),
        (6, 10),
        (7, 11),
        (8, 9),
        (8, 11),
        (10, 11),
    ];
    Graph::from_edges(12, rim.chain(rest))
}

// ============================================================================
// Operations
// ============================================================================

/// Disjoint union; the vertices of `parts[k]` are shifted past those of
/// `parts[..k]`. Only live vertices are carried over, in increasing order.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if the union has more than 64 vertices.
pub fn disjoint_union(parts: &[Graph]) -> Result<Graph> {
    let total: usize = parts.iter().map(Graph::order).sum();
    if total > MAX_VERTICES {
        return Err(BergeError::TooManyVertices(total));
    }

    let mut edges = Vec::new();
    let mut offset = 0;
    for part in parts {
        let mut index = vec![usize::MAX; part.bound()];
        for (i, v) in part.vertices().iter().enumerate() {
            index[v] = offset + i;
        }
        edges.extend(part.edges().map(|(u, v)| (index[u], index[v])));
        offset += part.order();
    }
    Graph::from_edges(total, edges)
}

/// The line graph: one vertex per edge of `graph` (in [`Graph::edges`] order),
/// adjacent when the edges share an endpoint.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `graph` has more than 64 edges.
pub fn line_graph(graph: &Graph) -> Result<Graph> {
    let edges: Vec<(usize, usize)> = graph.edges().collect();
    if edges.len() > MAX_VERTICES {
        return Err(BergeError::TooManyVertices(edges.len()));
    }
    let mut adjacent = Vec::new();
    for (i, &(a, b)) in edges.iter().enumerate() {
        for (j, &(c, d)) in edges.iter().enumerate().skip(i + 1) {
            if a == c || a == d || b == c || b == d {
                adjacent.push((i, j));
            }
        }
    }
    Graph::from_edges(edges.len(), adjacent)
}

// ============================================================================
// Random generators
// ============================================================================

/// Erdős–Rényi `G(n, p)`.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `n > 64`.
pub fn random_gnp<R: Rng>(rng: &mut R, n: usize, p: f64) -> Result<Graph> {
    debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random_bool(p) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edges(n, edges)
}

/// Random bipartite graph with sides `0..n1` and `n1..n1+n2`; each cross pair
/// is an edge with probability `p`.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `n1 + n2 > 64`.
pub fn random_bipartite<R: Rng>(rng: &mut R, n1: usize, n2: usize, p: f64) -> Result<Graph> {
    debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
    let mut edges = Vec::new();
    for u in 0..n1 {
        for v in n1..n1 + n2 {
            if rng.random_bool(p) {
                edges.push((u, v));
            }
        }
    }
    Graph::from_edges(n1 + n2, edges)
}

/// Random chordal graph.
///
/// Vertices are processed in order; each picks later neighbours at random
/// (with probability decaying along the order) and those later neighbours are
/// then made pairwise adjacent, so `0, 1, .., n - 1` is a perfect elimination
/// ordering.
///
/// # Errors
/// [`BergeError::TooManyVertices`] if `n > 64`.
pub fn random_chordal<R: Rng>(rng: &mut R, n: usize, p: f64) -> Result<Graph> {
    debug_assert!((0.0..=1.0).contains(&p), "p must be in [0, 1]");
    if n > MAX_VERTICES {
        return Err(BergeError::TooManyVertices(n));
    }
    let mut adj = vec![vec![false; n]; n];
    for v in 0..n {
        let q = p * (n - v) as f64 / n as f64;
        for u in (v + 1)..n {
            if rng.random_bool(q) {
                adj[v][u] = true;
                adj[u][v] = true;
            }
        }
        let later: Vec<usize> = ((v + 1)..n).filter(|&u| adj[v][u]).collect();
        for (i, &a) in later.iter().enumerate() {
            for &b in &later[i + 1..] {
                adj[a][b] = true;
                adj[b][a] = true;
            }
        }
    }
    let edges = (0..n).flat_map(|u| ((u + 1)..n).map(move |v| (u, v)));
    Graph::from_edges(n, edges.filter(|&(u, v)| adj[u][v]).collect::<Vec<_>>())
}

// ============================================================================
// Tests
// ============================================================================
