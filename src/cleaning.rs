//! Cleaning: enumeration of candidate near-cleaners.
//!
//! If the graph has a shortest odd hole `C`, at least one returned set `X`
//! contains every major vertex of `C` and misses `C` except for at most one
//! edge's worth of vertices. The near-cleaner test is then run on each set.
//!
//! Each candidate is `N(u) ∩ N(v)` for an edge `uv`, united with a set `X`
//! derived from a triple `(a, b, c)`:
//! - `a`, `b` non-adjacent, `c` not complete to `{a, b}`;
//! - `r` is the size of the largest anticomponent of `N(a) ∩ N(b)` that has a
//!   non-neighbour of `c` (`0` if none);
//! - `Y` unites the anticomponents of `N(a) ∩ N(b)` larger than `r`;
//! - `W` is the anticomponent of the whole vertex set containing `c`;
//! - `X = Y ∪ N(Y ∪ W)`-complete vertices.
//!
//! The two factors are computed separately and deduplicated before they are
//! combined.

use crate::graph::Graph;
use crate::search::SearchContext;
use crate::vertex_set::VertexSet;
use crate::{BergeError, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// The `X` sets contributed by the non-adjacent pair `{a, b}` over every `c`.
fn pair_contributions(graph: &Graph, a: usize, b: usize, out: &mut HashSet<VertexSet>) {
    let pair: VertexSet = [a, b].iter().collect();
    let common = graph.complete_to(pair);
    let anticomponents = graph.anticomponents(common);

    for c in graph.vertices() - common {
        let misses_c = graph.anti_neighbours(c);
        let r = anticomponents
            .iter()
            .filter(|part| part.meets(misses_c))
            .map(|part| part.len())
            .max()
            .unwrap_or(0);
        let y = anticomponents
            .iter()
            .filter(|part| part.len() > r)
            .fold(VertexSet::EMPTY, |acc, &part| acc | part);
        let w = graph.anticomponent_of(c, graph.vertices());
        out.insert(y | graph.complete_to(y | w));
    }
}

/// Distinct `X` sets over all non-adjacent pairs `a < b`.
fn core_sets(graph: &Graph, ctx: &SearchContext<'_>) -> Result<HashSet<VertexSet>> {
    let pairs: Vec<(usize, usize)> = graph
        .vertices()
        .iter()
        .flat_map(|a| {
            (graph.anti_neighbours(a) - VertexSet::below(a + 1))
                .iter()
                .map(move |b| (a, b))
        })
        .collect();

    ctx.run(|| {
        pairs
            .into_par_iter()
            .fold(HashSet::new, |mut acc, (a, b)| {
                if !ctx.is_stopped() {
                    pair_contributions(graph, a, b, &mut acc);
                }
                acc
            })
            .reduce(HashSet::new, |mut left, right| {
                left.extend(right);
                left
            })
    })
}

/// Returns the candidate near-cleaners of `graph`, sorted and without duplicates.
///
/// The result is empty for a graph without edges.
///
/// # Errors
/// [`BergeError::Cancelled`] if `ctx` is stopped before enumeration completes,
/// or [`BergeError::WorkerPanicked`].
pub fn cleaning(graph: &Graph, ctx: &SearchContext<'_>) -> Result<Vec<VertexSet>> {
    let edge_sets: HashSet<VertexSet> = graph
        .edges()
        .map(|(u, v)| graph.neighbours(u) & graph.neighbours(v))
        .collect();
    if edge_sets.is_empty() {
        return Ok(Vec::new());
    }

    let cores = core_sets(graph, ctx)?;
    if ctx.is_stopped() {
        return Err(BergeError::Cancelled);
    }

    let mut candidates: Vec<VertexSet> = edge_sets
        .iter()
        .flat_map(|&e| cores.iter().map(move |&x| e | x))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    candidates.sort_unstable();

    debug!(
        order = graph.order(),
        edge_sets = edge_sets.len(),
        cores = cores.len(),
        candidates = candidates.len(),
        "cleaning finished"
    );
    Ok(candidates)
}

// ============================================================================
// Tests
// ============================================================================
