//! End-to-end recognition tests on named graph families.
//!
//! Each non-Berge verdict is also checked for a witness that validates against
//! the side it was found on.

use berge::berge::{decide, Verdict};
use berge::construction::{
    complete, complete_bipartite, cycle, disjoint_union, frucht, house, line_graph, path, petersen,
    random_bipartite, random_chordal,
};
use berge::graph::Graph;
use berge::search::{SearchConfig, SearchPool};
use berge::validate::validate_witness;
use berge::{is_berge, is_berge_with, BergeError};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

// ============================================================================
// Helpers
// ============================================================================

fn pool() -> SearchPool {
    SearchPool::new(&SearchConfig {
        workers: 4,
        thread_name_prefix: "e2e".to_string(),
    })
    .unwrap()
}

fn verdict(graph: &Graph, pool: &SearchPool) -> bool {
    match decide(graph, pool).unwrap() {
        Verdict::Berge => true,
        Verdict::NotBerge(finding) => {
            let target = finding.side.select(graph);
            if let Err(e) = validate_witness(&target, &finding.witness) {
                panic!("{} on {} failed validation: {e}", finding.witness, finding.side);
            }
            false
        }
    }
}

// ============================================================================
// 1. Cycles and their complements
// ============================================================================

#[test]
fn test_cycles() {
    let pool = pool();
    for n in 4..=13 {
        let expected = n % 2 == 0;
        let g = cycle(n).unwrap();
        assert_eq!(verdict(&g, &pool), expected, "C{n}");
        assert_eq!(verdict(&g.complement(), &pool), expected, "complement of C{n}");
    }
}

// ============================================================================
// 2. Known Berge families
// ============================================================================

#[test]
fn test_named_berge_graphs() {
    let pool = pool();
    for g in [
        path(10).unwrap(),
        complete(9).unwrap(),
        complete_bipartite(4, 6).unwrap(),
        house().unwrap(),
        Graph::empty(8).unwrap(),
    ] {
        assert!(verdict(&g, &pool), "{g:?}");
    }
}

#[test]
fn test_named_non_berge_graphs() {
    let pool = pool();
    // Both contain a 5-hole.
    assert!(!verdict(&petersen().unwrap(), &pool));
    assert!(!verdict(&frucht().unwrap(), &pool));
}

#[test]
fn test_random_bipartite_graphs() {
    let pool = pool();
    let mut rng = XorShiftRng::seed_from_u64(0x5EED_0001);
    for _ in 0..4 {
        let g = random_bipartite(&mut rng, 6, 6, 0.5).unwrap();
        assert!(verdict(&g, &pool), "{g:?}");
    }
}

#[test]
fn test_line_graphs_of_bipartite_graphs() {
    let pool = pool();
    let mut rng = XorShiftRng::seed_from_u64(0x5EED_0002);
    for _ in 0..4 {
        let g = random_bipartite(&mut rng, 4, 4, 0.4).unwrap();
        let lg = line_graph(&g).unwrap();
        assert!(verdict(&lg, &pool), "line graph of {g:?}");
    }
}

#[test]
fn test_random_chordal_graphs() {
    let pool = pool();
    let mut rng = XorShiftRng::seed_from_u64(0x5EED_0003);
    for _ in 0..4 {
        let g = random_chordal(&mut rng, 10, 0.4).unwrap();
        assert!(verdict(&g, &pool), "{g:?}");
    }
}

// ============================================================================
// 3. Disjoint unions
// ============================================================================

#[test]
fn test_disjoint_union_of_bipartite_graphs() {
    let pool = pool();
    let mut rng = XorShiftRng::seed_from_u64(0x5EED_0004);
    let parts: Vec<Graph> = (0..3)
        .map(|_| random_bipartite(&mut rng, 3, 3, 0.6).unwrap())
        .collect();
    let union = disjoint_union(&parts).unwrap();
    assert!(verdict(&union, &pool));
}

#[test]
fn test_disjoint_union_with_an_odd_hole() {
    let pool = pool();
    let union = disjoint_union(&[complete_bipartite(2, 3).unwrap(), cycle(7).unwrap()]).unwrap();
    assert!(!verdict(&union, &pool));
    assert!(verdict(&union.complement().complement(), &pool) == verdict(&union, &pool));
}

// ============================================================================
// 4. Entry points and errors
// ============================================================================

#[test]
fn test_entry_points_agree_and_repeat() {
    let pool = pool();
    for g in [cycle(9).unwrap(), cycle(10).unwrap(), petersen().unwrap()] {
        let first = is_berge_with(&g, &pool).unwrap();
        assert_eq!(is_berge_with(&g, &pool).unwrap(), first);
        assert_eq!(is_berge(&g).unwrap(), first);
    }
}

#[test]
fn test_labelled_input() {
    let (g, labels) = Graph::from_labelled(
        &["a", "b", "c", "d", "e"],
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "a")],
    )
    .unwrap();
    assert_eq!(labels.len(), 5);
    assert!(!is_berge(&g).unwrap());
}

#[test]
fn test_input_errors_never_reach_the_search() {
    assert!(matches!(
        Graph::from_labelled(&["a", "b"], &[("a", "a")]),
        Err(BergeError::SelfLoop(_))
    ));
    assert!(matches!(
        Graph::from_labelled(&["a", "a"], &[]),
        Err(BergeError::DuplicateVertex(_))
    ));
    assert!(matches!(
        Graph::from_labelled(&["a"], &[("a", "b")]),
        Err(BergeError::DanglingEdge { .. })
    ));
    assert!(matches!(Graph::empty(100), Err(BergeError::TooManyVertices(100))));
}
