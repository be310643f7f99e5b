//! Witness records returned by the detectors.
//!
//! Each configuration kind has its own record with named roles, so callers never
//! depend on tuple positions. Witnesses are informational: the decision only
//! depends on whether one was found.

use crate::vertex_set::VertexSet;
use std::fmt;

/// A jewel: the 5-cycle `v1-v2-v3-v4-v5-v1` with `v1v3`, `v2v4`, `v1v4` missing,
/// plus a `v1`–`v4` path whose interior avoids `N(v2) ∪ N(v3) ∪ N(v5)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct Jewel {
    pub v1: usize,
    pub v2: usize,
    pub v3: usize,
    pub v4: usize,
    pub v5: usize,
    /// Path from `v1` to `v4`.
    pub path: Vec<usize>,
}

impl Jewel {
    /// The five named vertices in order.
    pub fn frame(&self) -> [usize; 5] {
        [self.v1, self.v2, self.v3, self.v4, self.v5]
    }
}

/// The frame of a pyramid: apex, base triangle, the apex's neighbours on the
/// three paths (`sources`), and the marker vertex chosen on each path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pyramid {
    /// Common neighbour of the sources, adjacent to at most one base vertex.
    pub apex: usize,
    /// The triangle `b0 b1 b2`.
    pub base: [usize; 3],
    /// `s_i` starts the leg ending at `b_i`; equal to `b_i` for a leg of length one.
    pub sources: [usize; 3],
    /// A vertex on each leg (`b_i` itself when the leg is direct).
    pub markers: [usize; 3],
}

impl Pyramid {
    /// `(apex, b0, b1, b2, s0, s1, s2, m0, m1, m2)`.
    pub fn frame(&self) -> [usize; 10] {
        let [b0, b1, b2] = self.base;
        let [s0, s1, s2] = self.sources;
        let [m0, m1, m2] = self.markers;
        [self.apex, b0, b1, b2, s0, s1, s2, m0, m1, m2]
    }
}

/// Configuration T2: an induced path `v1-v2-v3-v4`, an anticomponent `x` of the
/// `{v1, v2, v4}`-complete vertices, and a `v1`–`v4` path avoiding them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct ConfigT2 {
    pub v1: usize,
    pub v2: usize,
    pub v3: usize,
    pub v4: usize,
    pub x: VertexSet,
    pub path: Vec<usize>,
}

/// Configuration T3.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct ConfigT3 {
    pub v1: usize,
    pub v2: usize,
    pub v3: usize,
    pub v4: usize,
    pub v5: usize,
    pub v6: usize,
    pub x: VertexSet,
    /// Path from `v5` to `v6` through the grown set `F'`.
    pub path: Vec<usize>,
}

/// An induced cycle, listed in cyclic order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Hole {
    /// Vertices in cyclic order.
    pub cycle: Vec<usize>,
}

impl Hole {
    /// Number of vertices (and edges) on the cycle.
    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    /// Returns `true` for the degenerate empty cycle.
    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }
}

/// Certificate from the near-cleaner test: the candidate set and the tuple
/// `(y1, x1, x3, x2)` that satisfied the distance conditions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct NearCleaner {
    /// The candidate set `X` that passed.
    pub candidate: VertexSet,
    pub y1: usize,
    /// Neighbour of `y1` on the stored shortest `x2`–`y1` path.
    pub y2: usize,
    pub x1: usize,
    pub x3: usize,
    pub x2: usize,
    /// Common value of `r(x2, y1) = r(x1, y1) + 1 = r(x1, y2)`, in vertices.
    pub length: usize,
}

/// Any disqualifying structure found by the decision procedure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Witness {
    Jewel(Jewel),
    Pyramid(Pyramid),
    ConfigT2(ConfigT2),
    ConfigT3(ConfigT3),
    Hole(Hole),
    NearCleaner(NearCleaner),
}

impl Witness {
    /// Short name of the configuration kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Jewel(_) => "jewel",
            Self::Pyramid(_) => "pyramid",
            Self::ConfigT2(_) => "T2",
            Self::ConfigT3(_) => "T3",
            Self::Hole(_) => "hole",
            Self::NearCleaner(_) => "near-cleaner",
        }
    }

    /// Every vertex the witness names.
    pub fn vertices(&self) -> VertexSet {
        match self {
            Self::Jewel(j) => j.frame().iter().chain(&j.path).collect(),
            Self::Pyramid(p) => p.frame().iter().collect(),
            Self::ConfigT2(t) => {
                let named: VertexSet = [t.v1, t.v2, t.v3, t.v4].iter().chain(&t.path).collect();
                named | t.x
            }
            Self::ConfigT3(t) => {
                let named: VertexSet = [t.v1, t.v2, t.v3, t.v4, t.v5, t.v6]
                    .iter()
                    .chain(&t.path)
                    .collect();
                named | t.x
            }
            Self::Hole(h) => h.cycle.iter().collect(),
            Self::NearCleaner(c) => [c.y1, c.y2, c.x1, c.x3, c.x2].iter().collect(),
        }
    }
}

impl fmt::Display for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jewel(j) => write!(f, "jewel {:?} via {:?}", j.frame(), j.path),
            Self::Pyramid(p) => write!(f, "pyramid {:?}", p.frame()),
            Self::ConfigT2(t) => write!(
                f,
                "T2 path {:?} X={:?} P={:?}",
                [t.v1, t.v2, t.v3, t.v4],
                t.x,
                t.path
            ),
            Self::ConfigT3(t) => write!(
                f,
                "T3 {:?} X={:?} P={:?}",
                [t.v1, t.v2, t.v3, t.v4, t.v5, t.v6],
                t.x,
                t.path
            ),
            Self::Hole(h) => write!(f, "hole of length {} {:?}", h.len(), h.cycle),
            Self::NearCleaner(c) => write!(
                f,
                "near-cleaner {:?} with y1={} path {}-{}-{} (n={})",
                c.candidate, c.y1, c.x1, c.x3, c.x2, c.length
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pyramid_frame_order() {
        let p = Pyramid {
            apex: 5,
            base: [2, 0, 1],
            sources: [2, 3, 4],
            markers: [2, 0, 1],
        };
        assert_eq!(p.frame(), [5, 2, 0, 1, 2, 3, 4, 2, 0, 1]);
        assert_eq!(Witness::Pyramid(p).vertices().to_vec(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn t2_vertices_include_anticomponent() {
        let w = Witness::ConfigT2(ConfigT2 {
            v1: 0,
            v2: 1,
            v3: 2,
            v4: 3,
            x: VertexSet::singleton(7),
            path: vec![0, 6, 5, 4, 3],
        });
        assert_eq!(w.kind(), "T2");
        assert_eq!(w.vertices().len(), 8);
    }

    #[test]
    fn display_names_the_kind() {
        let w = Witness::Hole(Hole {
            cycle: vec![0, 1, 2, 3, 4],
        });
        assert_eq!(w.to_string(), "hole of length 5 [0, 1, 2, 3, 4]");
    }
}
