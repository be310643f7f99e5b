//! The decision procedure.
//!
//! A graph is Berge when neither it nor its complement has an odd hole. The
//! procedure runs in three stages, each on both sides at once:
//!
//! 1. Configuration detectors (jewel, pyramid, T2, T3), raced against each other.
//! 2. A direct search for a 7-hole, which together with the jewel detector
//!    settles every graph on at most 8 vertices.
//! 3. Cleaning followed by the near-cleaner test on every candidate.
//!
//! Any hit proves the graph is not Berge. The first two stages have to come up
//! empty before stage 3 is sound, so stages are separated by a barrier; within
//! a stage all searches share a stop flag and the first witness wins.

use crate::cleaning::cleaning;
use crate::configurations::{find_config_t2, find_config_t3};
use crate::graph::Graph;
use crate::holes::find_hole;
use crate::jewel::find_jewel;
use crate::near_cleaner::find_near_cleaner;
use crate::pyramid::find_pyramid;
use crate::search::{Search, SearchConfig, SearchContext, SearchPool};
use crate::witness::Witness;
use crate::Result;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Which graph a witness lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The input graph.
    Graph,
    /// The complement of the input graph.
    Complement,
}

impl Side {
    /// The graph this side refers to, given the input graph.
    pub fn select(self, graph: &Graph) -> Graph {
        match self {
            Self::Graph => graph.clone(),
            Self::Complement => graph.complement(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph => f.write_str("graph"),
            Self::Complement => f.write_str("complement"),
        }
    }
}

/// A witness together with the side it was found on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// Where the witness lives.
    pub side: Side,
    /// The disqualifying structure.
    pub witness: Witness,
}

/// Outcome of [`decide`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Neither the graph nor its complement has an odd hole.
    Berge,
    /// A certificate that the graph is not Berge.
    NotBerge(Finding),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Berge`].
    pub fn is_berge(&self) -> bool {
        matches!(self, Self::Berge)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Decides whether `graph` is Berge on a freshly built default pool.
///
/// # Errors
/// [`crate::BergeError::PoolUnavailable`] if the pool cannot be built, or
/// [`crate::BergeError::WorkerPanicked`] if a search task fails.
pub fn is_berge(graph: &Graph) -> Result<bool> {
    let pool = SearchPool::new(&SearchConfig::default())?;
    is_berge_with(graph, &pool)
}

/// Decides whether `graph` is Berge using `pool`.
///
/// # Errors
/// [`crate::BergeError::WorkerPanicked`] if a search task fails.
pub fn is_berge_with(graph: &Graph, pool: &SearchPool) -> Result<bool> {
    decide(graph, pool).map(|v| v.is_berge())
}

/// Decides whether `graph` is Berge and returns the witness when it is not.
///
/// Which witness is returned for a non-Berge graph depends on scheduling; the
/// verdict itself does not.
///
/// # Errors
/// [`crate::BergeError::WorkerPanicked`] if a search task fails.
pub fn decide(graph: &Graph, pool: &SearchPool) -> Result<Verdict> {
    let started = Instant::now();
    // An odd hole or antihole needs at least 5 vertices.
    if graph.order() < 5 {
        debug!(order = graph.order(), "too small for an odd hole");
        return Ok(Verdict::Berge);
    }

    let complement = graph.complement();
    let sides = [(Side::Graph, graph), (Side::Complement, &complement)];
    let ctx = pool.context();

    for stage in Stage::ALL {
        let searches = sides
            .iter()
            .flat_map(|&(side, g)| stage.searches(side, g))
            .collect();
        if let Some(finding) = ctx.race(searches)? {
            info!(
                stage = stage.name(),
                side = %finding.side,
                kind = finding.witness.kind(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "not Berge"
            );
            return Ok(Verdict::NotBerge(finding));
        }
        debug!(stage = stage.name(), "stage clear");
    }

    info!(
        order = graph.order(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Berge"
    );
    Ok(Verdict::Berge)
}

// ============================================================================
// Stages
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum Stage {
    Configurations,
    SevenHoles,
    NearCleaners,
}

impl Stage {
    const ALL: [Self; 3] = [Self::Configurations, Self::SevenHoles, Self::NearCleaners];

    fn name(self) -> &'static str {
        match self {
            Self::Configurations => "configurations",
            Self::SevenHoles => "seven-holes",
            Self::NearCleaners => "near-cleaners",
        }
    }

    fn searches<'a, 'p>(self, side: Side, g: &'a Graph) -> Vec<Search<'a, 'p, Finding>> {
        match self {
            Self::Configurations => configuration_searches(side, g),
            Self::SevenHoles => seven_hole_searches(side, g),
            Self::NearCleaners => near_cleaner_searches(side, g),
        }
    }
}

/// Tags a detector's result with its side.
fn found<T>(side: Side, wrap: fn(T) -> Witness, hit: Result<Option<T>>) -> Result<Option<Finding>> {
    hit.map(|w| {
        w.map(|w| Finding {
            side,
            witness: wrap(w),
        })
    })
}

fn configuration_searches<'a, 'p>(side: Side, g: &'a Graph) -> Vec<Search<'a, 'p, Finding>> {
    vec![
        Box::new(move |ctx: &SearchContext<'p>| found(side, Witness::Jewel, find_jewel(g, ctx))),
        Box::new(move |ctx: &SearchContext<'p>| {
            found(side, Witness::Pyramid, find_pyramid(g, ctx))
        }),
        Box::new(move |ctx: &SearchContext<'p>| {
            found(side, Witness::ConfigT2, find_config_t2(g, ctx))
        }),
        Box::new(move |ctx: &SearchContext<'p>| {
            found(side, Witness::ConfigT3, find_config_t3(g, ctx))
        }),
    ]
}

fn seven_hole_searches<'a, 'p>(side: Side, g: &'a Graph) -> Vec<Search<'a, 'p, Finding>> {
    vec![Box::new(move |ctx: &SearchContext<'p>| {
        found(side, Witness::Hole, find_hole(g, 7, ctx))
    })]
}

fn near_cleaner_searches<'a, 'p>(side: Side, g: &'a Graph) -> Vec<Search<'a, 'p, Finding>> {
    vec![Box::new(move |ctx: &SearchContext<'p>| {
        let candidates = cleaning(g, ctx)?;
        found(side, Witness::NearCleaner, find_near_cleaner(g, candidates, ctx))
    })]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::{complete, complete_bipartite, cycle, house, path, petersen};
    use crate::validate::validate_witness;

    fn pool() -> SearchPool {
        SearchPool::with_workers(4).unwrap()
    }

    fn check(graph: &Graph, pool: &SearchPool) -> bool {
        match decide(graph, pool).unwrap() {
            Verdict::Berge => true,
            Verdict::NotBerge(finding) => {
                let target = finding.side.select(graph);
                validate_witness(&target, &finding.witness)
                    .unwrap_or_else(|e| panic!("invalid {}: {e}", finding.witness));
                false
            }
        }
    }

    #[test]
    fn small_graphs_are_berge() {
        let pool = pool();
        for n in 0..5 {
            assert!(check(&complete(n).unwrap(), &pool));
            assert!(check(&Graph::empty(n).unwrap(), &pool));
        }
    }

    #[test]
    fn cycles_are_berge_iff_even() {
        let pool = pool();
        for n in 3..=12 {
            let g = cycle(n).unwrap();
            assert_eq!(check(&g, &pool), n % 2 == 0 || n == 3, "C{n}");
            assert_eq!(check(&g.complement(), &pool), n % 2 == 0 || n == 3, "complement of C{n}");
        }
    }

    #[test]
    fn classic_families() {
        let pool = pool();
        assert!(!check(&petersen().unwrap(), &pool));
        assert!(check(&house().unwrap(), &pool));
        assert!(check(&path(8).unwrap(), &pool));
        assert!(check(&complete_bipartite(3, 5).unwrap(), &pool));
        assert!(check(&complete(7).unwrap(), &pool));
    }

    #[test]
    fn antihole_is_rejected_with_a_valid_witness() {
        let pool = pool();
        let g = cycle(7).unwrap().complement();
        let Verdict::NotBerge(finding) = decide(&g, &pool).unwrap() else {
            panic!("complement of C7 is an odd antihole");
        };
        validate_witness(&finding.side.select(&g), &finding.witness).unwrap();
    }

    #[test]
    fn entry_points_agree() {
        let pool = pool();
        let g = cycle(9).unwrap();
        assert!(!is_berge(&g).unwrap());
        assert!(!is_berge_with(&g, &pool).unwrap());
        assert!(is_berge_with(&cycle(10).unwrap(), &pool).unwrap());
    }
}
