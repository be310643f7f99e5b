//! Independent verification of witnesses.
//!
//! Each check re-derives the defining conditions of a witness from the graph
//! alone, without reusing detector internals beyond the graph primitives.

use crate::graph::Graph;
use crate::vertex_set::VertexSet;
use crate::witness::{ConfigT2, ConfigT3, Hole, Jewel, NearCleaner, Pyramid, Witness};

// ============================================================================
// Public API
// ============================================================================

/// Validates any witness against the graph it was found in.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_witness(graph: &Graph, witness: &Witness) -> Result<(), String> {
    match witness {
        Witness::Jewel(j) => validate_jewel(graph, j),
        Witness::Pyramid(p) => validate_pyramid(graph, p),
        Witness::ConfigT2(t) => validate_config_t2(graph, t),
        Witness::ConfigT3(t) => validate_config_t3(graph, t),
        Witness::Hole(h) => validate_hole(graph, h),
        Witness::NearCleaner(c) => validate_near_cleaner(graph, c),
    }
}

/// Checks the 5-cycle, its missing chords, and the `v1`–`v4` path.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_jewel(graph: &Graph, j: &Jewel) -> Result<(), String> {
    let [v1, v2, v3, v4, v5] = j.frame();
    distinct(&j.frame(), "jewel frame")?;
    edges(graph, &[(v1, v2), (v2, v3), (v3, v4), (v4, v5), (v5, v1)])?;
    non_edges(graph, &[(v1, v3), (v2, v4), (v1, v4)])?;
    let interior = walk(graph, &j.path, v1, v4)?;
    let watched: VertexSet = [v2, v3, v5].iter().collect();
    if graph.neighbourhood(watched).meets(interior) {
        return Err(format!("jewel path interior {interior:?} sees v2, v3 or v5"));
    }
    Ok(())
}

/// Checks the frame of a pyramid: base triangle, apex adjacency, the single
/// permitted edge between any two legs' ends, and marker placement.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_pyramid(graph: &Graph, p: &Pyramid) -> Result<(), String> {
    let b = p.base;
    let s = p.sources;
    distinct(&b, "pyramid base")?;
    distinct(&s, "pyramid sources")?;
    edges(graph, &[(b[0], b[1]), (b[0], b[2]), (b[1], b[2])])?;

    let base: VertexSet = b.iter().collect();
    let sources: VertexSet = s.iter().collect();
    let shared = base & sources;
    if shared.len() > 1 || (shared.len() == 1 && b[0] != s[0]) {
        return Err(format!("base {b:?} and sources {s:?} overlap badly"));
    }

    if !graph.complete_to(sources).contains(p.apex) {
        return Err(format!("apex {} misses a source of {s:?}", p.apex));
    }
    if (graph.neighbours(p.apex) & base).len() > 1 {
        return Err(format!("apex {} sees two base vertices", p.apex));
    }

    for (i, j) in [(0, 1), (0, 2), (1, 2)] {
        let end_i: VertexSet = [b[i], s[i]].iter().collect();
        let end_j: VertexSet = [b[j], s[j]].iter().collect();
        let links: usize = end_i.iter().map(|u| (graph.neighbours(u) & end_j).len()).sum();
        if links != 1 {
            return Err(format!("legs {i} and {j} are joined by {links} edges"));
        }
    }

    let middle = graph.vertices() - base - sources;
    for i in 0..3 {
        let m = p.markers[i];
        let direct = s[i] == b[i] || graph.has_edge(s[i], b[i]);
        let placed = if direct { m == b[i] } else { middle.contains(m) };
        if !placed {
            return Err(format!("marker {m} is misplaced on leg {i}"));
        }
    }
    Ok(())
}

/// Checks the induced path, the anticomponent `X`, and the avoiding path.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_config_t2(graph: &Graph, t: &ConfigT2) -> Result<(), String> {
    let (v1, v2, v3, v4) = (t.v1, t.v2, t.v3, t.v4);
    distinct(&[v1, v2, v3, v4], "T2 path")?;
    edges(graph, &[(v1, v2), (v2, v3), (v3, v4)])?;
    non_edges(graph, &[(v1, v3), (v1, v4), (v2, v4)])?;

    let complete = graph.complete_to([v1, v2, v4].iter().collect());
    anticomponent(graph, t.x, complete)?;

    let middle: VertexSet = [v2, v3].iter().collect();
    let avoid = middle | graph.neighbourhood(middle) | t.x | graph.complete_to(t.x);
    let interior = walk(graph, &t.path, v1, v4)?;
    if interior.meets(avoid) {
        return Err(format!("T2 path interior {interior:?} enters {avoid:?}"));
    }
    Ok(())
}

/// Checks the T3 frame, the anticomponent `X`, and the `v5`–`v6` path.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_config_t3(graph: &Graph, t: &ConfigT3) -> Result<(), String> {
    let (v1, v2, v3, v4, v5, v6) = (t.v1, t.v2, t.v3, t.v4, t.v5, t.v6);
    distinct(&[v1, v2, v3, v4, v5, v6], "T3 frame")?;
    edges(graph, &[(v1, v2), (v1, v4), (v2, v3), (v3, v4), (v3, v5), (v4, v6)])?;
    non_edges(graph, &[(v1, v5), (v2, v5), (v2, v4), (v4, v5), (v1, v3)])?;

    let complete = graph.complete_to([v1, v2, v5].iter().collect());
    anticomponent(graph, t.x, complete)?;
    let x_missing = graph.anti_neighbourhood(t.x);
    if !x_missing.contains(v3) || !x_missing.contains(v4) {
        return Err("v3 and v4 must each miss a vertex of X".to_string());
    }

    let interior = walk(graph, &t.path, v5, v6)?;
    let blocked = graph.neighbours(v1) | graph.neighbours(v2) | graph.complete_to(t.x);
    if interior.meets(blocked) {
        return Err(format!("T3 path interior {interior:?} enters {blocked:?}"));
    }
    Ok(())
}

/// Checks that the cycle is induced and has at least 4 vertices.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_hole(graph: &Graph, h: &Hole) -> Result<(), String> {
    let n = h.len();
    if n < 4 {
        return Err(format!("a hole needs at least 4 vertices, got {n}"));
    }
    distinct(&h.cycle, "hole")?;
    let members: VertexSet = h.cycle.iter().collect();
    for (i, &v) in h.cycle.iter().enumerate() {
        let expected: VertexSet = [h.cycle[(i + 1) % n], h.cycle[(i + n - 1) % n]].iter().collect();
        let actual = graph.neighbours(v) & members;
        if actual != expected {
            return Err(format!("vertex {v} sees {actual:?} on the cycle, expected {expected:?}"));
        }
    }
    Ok(())
}

/// Recomputes the distance conditions of the near-cleaner test.
///
/// # Errors
/// Returns a message naming the first violated condition.
pub fn validate_near_cleaner(graph: &Graph, c: &NearCleaner) -> Result<(), String> {
    let x = c.candidate;
    if x.contains(c.y1) {
        return Err(format!("y1={} lies in the candidate", c.y1));
    }
    distinct(&[c.y1, c.x1, c.x3, c.x2], "near-cleaner tuple")?;
    edges(graph, &[(c.x1, c.x3), (c.x3, c.x2), (c.y1, c.y2)])?;
    non_edges(graph, &[(c.x1, c.x2)])?;

    let interior = graph.vertices() - x;
    let r = |u: usize, v: usize| graph.bfs(u, interior).distance(v).map(|d| d + 1);
    let n = c.length;
    if r(c.x2, c.y1) != Some(n) {
        return Err(format!("r(x2, y1) = {:?}, expected {n}", r(c.x2, c.y1)));
    }
    if r(c.x1, c.y1) != Some(n - 1) {
        return Err(format!("r(x1, y1) = {:?}, expected {}", r(c.x1, c.y1), n - 1));
    }
    if r(c.x2, c.y2) != Some(n - 1) {
        return Err(format!("y2={} is not on a shortest x2-y1 path", c.y2));
    }
    if r(c.x1, c.y2) != Some(n) {
        return Err(format!("r(x1, y2) = {:?}, expected {n}", r(c.x1, c.y2)));
    }
    for y in [c.y1, c.y2] {
        if r(c.x3, y).is_some_and(|d| d < n) {
            return Err(format!("x3={} is too close to {y}", c.x3));
        }
    }
    Ok(())
}

// ============================================================================
// Internal
// ============================================================================

fn distinct(vs: &[usize], what: &str) -> Result<(), String> {
    let set: VertexSet = vs.iter().collect();
    if set.len() == vs.len() {
        Ok(())
    } else {
        Err(format!("{what} {vs:?} repeats a vertex"))
    }
}

fn edges(graph: &Graph, pairs: &[(usize, usize)]) -> Result<(), String> {
    match pairs.iter().find(|&&(u, v)| !graph.has_edge(u, v)) {
        Some((u, v)) => Err(format!("missing edge ({u}, {v})")),
        None => Ok(()),
    }
}

fn non_edges(graph: &Graph, pairs: &[(usize, usize)]) -> Result<(), String> {
    match pairs.iter().find(|&&(u, v)| graph.has_edge(u, v)) {
        Some((u, v)) => Err(format!("unexpected edge ({u}, {v})")),
        None => Ok(()),
    }
}

/// Checks that `path` is a path from `from` to `to` and returns its interior.
fn walk(graph: &Graph, path: &[usize], from: usize, to: usize) -> Result<VertexSet, String> {
    if path.first() != Some(&from) || path.last() != Some(&to) {
        return Err(format!("path {path:?} does not run from {from} to {to}"));
    }
    distinct(path, "path")?;
    if let Some(w) = path.windows(2).find(|w| !graph.has_edge(w[0], w[1])) {
        return Err(format!("path {path:?} uses non-edge ({}, {})", w[0], w[1]));
    }
    Ok(path[1..path.len() - 1].iter().collect())
}

/// Checks that `x` is one anticomponent of `within`.
fn anticomponent(graph: &Graph, x: VertexSet, within: VertexSet) -> Result<(), String> {
    let Some(first) = x.first() else {
        return Err("X is empty".to_string());
    };
    if graph.anticomponent_of(first, within) != x {
        return Err(format!("X={x:?} is not an anticomponent of {within:?}"));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::cycle;

    #[test]
    fn hole_validation() {
        let g = cycle(6).unwrap();
        assert!(validate_hole(&g, &Hole { cycle: vec![0, 1, 2, 3, 4, 5] }).is_ok());
        assert!(validate_hole(&g, &Hole { cycle: vec![0, 1, 2] }).is_err());
        assert!(validate_hole(&g, &Hole { cycle: vec![0, 1, 2, 3, 5, 4] }).is_err());
    }

    #[test]
    fn jewel_validation_rejects_a_chord() {
        let g = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)]).unwrap();
        let j = Jewel {
            v1: 0,
            v2: 1,
            v3: 2,
            v4: 3,
            v5: 4,
            path: vec![0, 4, 3],
        };
        let err = validate_jewel(&g, &j).unwrap_err();
        assert!(err.contains("(0, 2)"), "{err}");
    }

    #[test]
    fn walk_rejects_broken_paths() {
        let g = cycle(5).unwrap();
        assert!(walk(&g, &[0, 1, 2], 0, 2).is_ok());
        assert!(walk(&g, &[0, 2], 0, 2).is_err());
        assert!(walk(&g, &[0, 1, 0, 1, 2], 0, 2).is_err());
        assert!(walk(&g, &[1, 2], 0, 2).is_err());
    }

    #[test]
    fn near_cleaner_validation_recomputes_distances() {
        let g = cycle(5).unwrap();
        let good = NearCleaner {
            candidate: VertexSet::EMPTY,
            y1: 2,
            y2: 3,
            x1: 1,
            x3: 0,
            x2: 4,
            length: 3,
        };
        validate_near_cleaner(&g, &good).unwrap();
        let bad = NearCleaner { length: 4, ..good };
        assert!(validate_near_cleaner(&g, &bad).is_err());
    }
}
