//! Compact vertex sets over at most 64 vertex indices.
//!
//! Every set-valued quantity in the recognition algorithm (neighbourhoods,
//! anticomponents, cleaning candidates, path interiors) is a `VertexSet`, so
//! unions, intersections and disjointness tests are single word operations.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub, SubAssign};

/// Largest number of vertices a [`VertexSet`] (and therefore a graph) can index.
pub const MAX_VERTICES: usize = 64;

#[inline(always)]
const fn bit(v: usize) -> u64 {
    1u64 << v
}

/// A set of vertex indices in `0..64`, stored as a bitset.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexSet(u64);

impl VertexSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Creates a set from raw bits.
    #[inline(always)]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The set `{0, 1, .., n - 1}`.
    #[inline]
    pub const fn below(n: usize) -> Self {
        debug_assert!(n <= MAX_VERTICES);
        if n >= MAX_VERTICES {
            Self(u64::MAX)
        } else {
            Self(bit(n) - 1)
        }
    }

    /// The set `{v}`.
    #[inline(always)]
    pub const fn singleton(v: usize) -> Self {
        debug_assert!(v < MAX_VERTICES);
        Self(bit(v))
    }

    /// Number of vertices in the set.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the set has no vertices.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `v` is a member.
    #[inline(always)]
    pub const fn contains(self, v: usize) -> bool {
        v < MAX_VERTICES && (self.0 & bit(v)) != 0
    }

    /// Adds `v`; returns `true` if it was not present.
    #[inline(always)]
    pub fn insert(&mut self, v: usize) -> bool {
        debug_assert!(v < MAX_VERTICES);
        let was = self.contains(v);
        self.0 |= bit(v);
        !was
    }

    /// Removes `v`; returns `true` if it was present.
    #[inline(always)]
    pub fn remove(&mut self, v: usize) -> bool {
        let was = self.contains(v);
        self.0 &= !bit(v);
        was
    }

    /// Returns `true` if the two sets share no vertex.
    #[inline(always)]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Returns `true` if the two sets share at least one vertex.
    #[inline(always)]
    pub const fn meets(self, other: Self) -> bool {
        !self.is_disjoint(other)
    }

    /// Returns `true` if every member of `self` is in `other`.
    #[inline(always)]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Smallest member, if any.
    #[inline(always)]
    pub const fn first(self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as usize)
        }
    }

    /// Removes and returns the smallest member.
    #[inline(always)]
    pub fn pop_first(&mut self) -> Option<usize> {
        let v = self.first()?;
        self.0 &= self.0 - 1;
        Some(v)
    }

    /// Iterates members in increasing order.
    #[inline(always)]
    pub const fn iter(self) -> Iter {
        Iter(self.0)
    }

    /// Collects the members into a sorted vector.
    pub fn to_vec(self) -> Vec<usize> {
        self.iter().collect()
    }
}

// ============================================================================
// Operators
// ============================================================================

impl BitOr for VertexSet {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for VertexSet {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for VertexSet {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for VertexSet {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Sub for VertexSet {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 & !rhs.0)
    }
}

impl SubAssign for VertexSet {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0;
    }
}

/// Complement with respect to all 64 indices; mask with a vertex set before use.
impl Not for VertexSet {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Self(!self.0)
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Iterator over the members of a [`VertexSet`], smallest first.
#[derive(Clone, Debug)]
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let v = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for VertexSet {
    type Item = usize;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl FromIterator<usize> for VertexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl<'a> FromIterator<&'a usize> for VertexSet {
    fn from_iter<I: IntoIterator<Item = &'a usize>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl Extend<usize> for VertexSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl fmt::Debug for VertexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
