//! Immutable simple graphs on at most 64 vertices, and the primitive queries the
//! recognition algorithm is built from.
//!
//! A [`Graph`] never changes after construction. Induced subgraphs and the
//! complement are new values that keep the parent's vertex indices, so a witness
//! found inside a subgraph names vertices of the parent graph.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::vertex_set::{VertexSet, MAX_VERTICES};
use crate::{BergeError, Result};

// ============================================================================
// Graph
// ============================================================================

/// A finite simple undirected graph.
///
/// Representation:
/// - `vertices` is the live vertex mask (indices below [`Graph::bound`]).
/// - `adj[v]` is the neighbour set of `v`; it is empty for `v` outside `vertices`
///   and never contains `v` itself.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Graph {
    vertices: VertexSet,
    adj: Vec<VertexSet>,
}

impl Graph {
    /// Creates an edgeless graph on vertices `0..order`.
    ///
    /// # Errors
    /// Returns [`BergeError::TooManyVertices`] if `order > 64`.
    pub fn empty(order: usize) -> Result<Self> {
        if order > MAX_VERTICES {
            return Err(BergeError::TooManyVertices(order));
        }
        Ok(Self {
            vertices: VertexSet::below(order),
            adj: vec![VertexSet::EMPTY; order],
        })
    }

    /// Creates a graph on vertices `0..order` from an edge list.
    ///
    /// Repeated edges are accepted; `(u, v)` and `(v, u)` denote the same edge.
    ///
    /// # Errors
    /// Returns an input error for a self-loop, an endpoint `>= order`, or
    /// `order > 64`.
    pub fn from_edges<I>(order: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::empty(order)?;
        for (u, v) in edges {
            if u >= order || v >= order {
                return Err(BergeError::DanglingEdge {
                    u: u.to_string(),
                    v: v.to_string(),
                });
            }
            if u == v {
                return Err(BergeError::SelfLoop(u.to_string()));
            }
            graph.adj[u].insert(v);
            graph.adj[v].insert(u);
        }
        Ok(graph)
    }

    /// Creates a graph from opaque vertex labels.
    ///
    /// Vertex `i` of the returned graph is `vertices[i]`; the returned label table
    /// maps indices back to labels.
    ///
    /// # Errors
    /// Returns an input error for a repeated label, a self-loop, an edge
    /// endpoint that is not a listed vertex, or more than 64 vertices.
    pub fn from_labelled<L>(vertices: &[L], edges: &[(L, L)]) -> Result<(Self, Vec<L>)>
    where
        L: Clone + Eq + Hash + fmt::Debug,
    {
        if vertices.len() > MAX_VERTICES {
            return Err(BergeError::TooManyVertices(vertices.len()));
        }

        let mut index = HashMap::with_capacity(vertices.len());
        for (i, label) in vertices.iter().enumerate() {
            if index.insert(label, i).is_some() {
                return Err(BergeError::DuplicateVertex(format!("{label:?}")));
            }
        }

        let mut resolved = Vec::with_capacity(edges.len());
        for (a, b) in edges {
            match (index.get(a), index.get(b)) {
                (Some(&u), Some(&v)) => {
                    if u == v {
                        return Err(BergeError::SelfLoop(format!("{a:?}")));
                    }
                    resolved.push((u, v));
                }
                _ => {
                    return Err(BergeError::DanglingEdge {
                        u: format!("{a:?}"),
                        v: format!("{b:?}"),
                    });
                }
            }
        }

        let graph = Self::from_edges(vertices.len(), resolved)?;
        Ok((graph, vertices.to_vec()))
    }

    /// Exclusive upper bound on vertex indices.
    #[inline(always)]
    pub fn bound(&self) -> usize {
        self.adj.len()
    }

    /// The live vertex set.
    #[inline(always)]
    pub fn vertices(&self) -> VertexSet {
        self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns whether the edge `(u, v)` exists.
    #[inline(always)]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        u < self.adj.len() && self.adj[u].contains(v)
    }

    /// Returns `true` if every vertex in `vs` is live.
    #[inline]
    pub fn has_vertices(&self, vs: &[usize]) -> bool {
        vs.iter().all(|&v| self.vertices.contains(v))
    }

    /// Neighbours of `v`.
    #[inline(always)]
    pub fn neighbours(&self, v: usize) -> VertexSet {
        self.adj[v]
    }

    /// Non-neighbours of `v` other than `v` itself (its neighbours in the complement).
    #[inline(always)]
    pub fn anti_neighbours(&self, v: usize) -> VertexSet {
        if !self.vertices.contains(v) {
            return VertexSet::EMPTY;
        }
        self.vertices - self.adj[v] - VertexSet::singleton(v)
    }

    /// Degree of `v`.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.adj[v].len()
    }

    /// Union of the neighbourhoods of the members of `set`.
    ///
    /// A member of `set` is included only if it is adjacent to another member.
    #[inline]
    pub fn neighbourhood(&self, set: VertexSet) -> VertexSet {
        set.iter().fold(VertexSet::EMPTY, |acc, v| acc | self.adj[v])
    }

    /// Union of the complement-neighbourhoods of the members of `set`.
    #[inline]
    pub fn anti_neighbourhood(&self, set: VertexSet) -> VertexSet {
        set.iter()
            .fold(VertexSet::EMPTY, |acc, v| acc | self.anti_neighbours(v))
    }

    /// The `set`-complete vertices: those adjacent to every member of `set`.
    ///
    /// By convention the result for an empty `set` is empty.
    #[inline]
    pub fn complete_to(&self, set: VertexSet) -> VertexSet {
        let mut members = set.iter();
        let Some(first) = members.next() else {
            return VertexSet::EMPTY;
        };
        members.fold(self.adj[first], |acc, v| acc & self.adj[v])
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| self.adj[v].len()).sum::<usize>() / 2
    }

    /// Iterates edges `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices.iter().flat_map(move |u| {
            (self.adj[u] - VertexSet::below(u + 1))
                .iter()
                .map(move |v| (u, v))
        })
    }

    // ------------------------------------------------------------------------
    // Derived views
    // ------------------------------------------------------------------------

    /// The subgraph induced on `set` (intersected with the live vertices).
    pub fn induced(&self, set: VertexSet) -> Self {
        let vertices = self.vertices & set;
        let adj = (0..self.bound())
            .map(|v| {
                if vertices.contains(v) {
                    self.adj[v] & vertices
                } else {
                    VertexSet::EMPTY
                }
            })
            .collect();
        Self { vertices, adj }
    }

    /// The subgraph induced on the live vertices outside `set`.
    #[inline]
    pub fn without(&self, set: VertexSet) -> Self {
        self.induced(self.vertices - set)
    }

    /// The complement graph on the same vertex set.
    pub fn complement(&self) -> Self {
        let adj = (0..self.bound())
            .map(|v| self.anti_neighbours(v))
            .collect();
        Self {
            vertices: self.vertices,
            adj,
        }
    }

    // ------------------------------------------------------------------------
    // Connectivity
    // ------------------------------------------------------------------------

    /// The component of `G[set]` containing `start` (empty if `start` is not in `set`).
    pub fn component_of(&self, start: usize, set: VertexSet) -> VertexSet {
        self.closure(start, set, |v| self.adj[v])
    }

    /// The anticomponent of `set` containing `start`: its component in the
    /// complement restricted to `set`.
    pub fn anticomponent_of(&self, start: usize, set: VertexSet) -> VertexSet {
        self.closure(start, set, |v| self.anti_neighbours(v))
    }

    /// Connected components of `G[set]`, ordered by smallest member.
    pub fn components(&self, set: VertexSet) -> Vec<VertexSet> {
        self.partition(set, |v, rest| self.component_of(v, rest))
    }

    /// Anticomponents of `set`: components of the complement restricted to `set`.
    pub fn anticomponents(&self, set: VertexSet) -> Vec<VertexSet> {
        self.partition(set, |v, rest| self.anticomponent_of(v, rest))
    }

    /// Returns `true` if the graph is connected (the empty graph counts as connected).
    pub fn is_connected(&self) -> bool {
        match self.vertices.first() {
            None => true,
            Some(v) => self.component_of(v, self.vertices) == self.vertices,
        }
    }

    /// Breadth-first closure of `start` inside `set` along `step`.
    #[inline]
    fn closure(
        &self,
        start: usize,
        set: VertexSet,
        step: impl Fn(usize) -> VertexSet,
    ) -> VertexSet {
        let set = set & self.vertices;
        if !set.contains(start) {
            return VertexSet::EMPTY;
        }
        let mut seen = VertexSet::singleton(start);
        let mut frontier = seen;
        while let Some(v) = frontier.pop_first() {
            let fresh = step(v) & (set - seen);
            seen |= fresh;
            frontier |= fresh;
        }
        seen
    }

    #[inline]
    fn partition(
        &self,
        set: VertexSet,
        part_of: impl Fn(usize, VertexSet) -> VertexSet,
    ) -> Vec<VertexSet> {
        let mut rest = set & self.vertices;
        let mut parts = Vec::new();
        while let Some(v) = rest.first() {
            let part = part_of(v, rest);
            rest -= part;
            parts.push(part);
        }
        parts
    }

    // ------------------------------------------------------------------------
    // Shortest paths
    // ------------------------------------------------------------------------

    /// Breadth-first search from `source` whose paths have every interior
    /// vertex in `interior`. Endpoints are unconstrained.
    pub fn bfs(&self, source: usize, interior: VertexSet) -> BfsTree {
        let n = self.bound();
        let mut tree = BfsTree {
            dist: vec![None; n],
            pred: vec![None; n],
        };
        if !self.vertices.contains(source) {
            return tree;
        }

        tree.dist[source] = Some(0);
        let mut visited = VertexSet::singleton(source);
        let mut frontier = visited;
        let mut level = 0;
        while !frontier.is_empty() {
            level += 1;
            let mut next = VertexSet::EMPTY;
            for u in frontier {
                if u != source && !interior.contains(u) {
                    continue;
                }
                let fresh = self.adj[u] - visited;
                for w in fresh {
                    tree.dist[w] = Some(level);
                    tree.pred[w] = Some(u);
                }
                visited |= fresh;
                next |= fresh;
            }
            frontier = next;
        }
        tree
    }

    /// A shortest path from `u` to `v` whose interior vertices all lie in `set`.
    ///
    /// Returns `[u]` when `u == v`, and `None` if no such path exists.
    pub fn path_through(&self, set: VertexSet, u: usize, v: usize) -> Option<Vec<usize>> {
        if !self.vertices.contains(v) {
            return None;
        }
        self.bfs(u, set).path_to(v)
    }

    /// A shortest `u`–`v` path among those with no interior vertex in `forbidden`.
    pub fn shortest_path_without_interior_vertices(
        &self,
        u: usize,
        v: usize,
        forbidden: VertexSet,
    ) -> Option<Vec<usize>> {
        self.path_through(self.vertices - forbidden, u, v)
    }

    /// A shortest `u`–`v` path among those whose interior vertices have no
    /// neighbour in `forbidden`.
    pub fn shortest_path_without_interior_neighbours(
        &self,
        u: usize,
        v: usize,
        forbidden: VertexSet,
    ) -> Option<Vec<usize>> {
        self.path_through(self.vertices - self.neighbourhood(forbidden), u, v)
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("vertices", &self.vertices)
            .field("edges", &self.edges().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// BfsTree
// ============================================================================

/// Result of [`Graph::bfs`]: distances (in edges) and one shortest-path tree.
#[derive(Clone, Debug)]
pub struct BfsTree {
    dist: Vec<Option<usize>>,
    pred: Vec<Option<usize>>,
}

impl BfsTree {
    /// Number of edges on a shortest constrained path to `v`, if reachable.
    #[inline]
    pub fn distance(&self, v: usize) -> Option<usize> {
        self.dist.get(v).copied().flatten()
    }

    /// The vertex preceding `v` on the stored path to `v`.
    #[inline]
    pub fn predecessor(&self, v: usize) -> Option<usize> {
        self.pred.get(v).copied().flatten()
    }

    /// The stored shortest path from the source to `v`, both ends included.
    pub fn path_to(&self, v: usize) -> Option<Vec<usize>> {
        let d = self.distance(v)?;
        let mut path = Vec::with_capacity(d + 1);
        let mut cur = v;
        path.push(cur);
        while let Some(p) = self.predecessor(cur) {
            path.push(p);
            cur = p;
        }
        path.reverse();
        Some(path)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn set(vs: &[usize]) -> VertexSet {
        vs.iter().collect()
    }

    fn cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    #[test]
    fn from_edges_rejects_self_loop() {
        let err = Graph::from_edges(3, [(0, 1), (2, 2)]).unwrap_err();
        assert!(matches!(err, BergeError::SelfLoop(_)));
    }

    #[test]
    fn from_edges_rejects_dangling_endpoint() {
        let err = Graph::from_edges(3, [(0, 3)]).unwrap_err();
        assert!(matches!(err, BergeError::DanglingEdge { .. }));
    }

    #[test]
    fn from_edges_rejects_oversized_graph() {
        let err = Graph::empty(65).unwrap_err();
        assert!(matches!(err, BergeError::TooManyVertices(65)));
    }

    #[test]
    fn repeated_edges_are_idempotent() {
        let g = Graph::from_edges(3, [(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn labelled_construction_maps_labels() {
        let (g, labels) =
            Graph::from_labelled(&["a", "b", "c"], &[("a", "b"), ("b", "c")]).unwrap();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert!(g.has_edge(0, 1));
        assert!(g.has_edge(1, 2));
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn labelled_construction_rejects_duplicates_and_dangling_edges() {
        let dup = Graph::from_labelled(&["a", "a"], &[]).unwrap_err();
        assert!(matches!(dup, BergeError::DuplicateVertex(_)));

        let dangling = Graph::from_labelled(&["a", "b"], &[("a", "z")]).unwrap_err();
        assert!(matches!(dangling, BergeError::DanglingEdge { .. }));

        let self_loop = Graph::from_labelled(&["a"], &[("a", "a")]).unwrap_err();
        assert!(matches!(self_loop, BergeError::SelfLoop(_)));
    }

    #[test]
    fn neighbourhood_of_set_includes_mutually_adjacent_members() {
        let g = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(g.neighbourhood(set(&[0, 1])), set(&[0, 1, 2]));
        assert_eq!(g.neighbourhood(set(&[0, 2])), set(&[1, 3]));
    }

    #[test]
    fn complete_to_is_common_neighbourhood() {
        // K4 minus edge (0, 1)
        let g = Graph::from_edges(4, [(0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(g.complete_to(set(&[0, 1])), set(&[2, 3]));
        assert_eq!(g.complete_to(set(&[0, 1, 2])), set(&[3]));
        assert_eq!(g.complete_to(VertexSet::EMPTY), VertexSet::EMPTY);
    }

    #[test]
    fn components_and_anticomponents_partition_the_set() {
        // Two disjoint edges plus an isolated vertex.
        let g = Graph::from_edges(5, [(0, 1), (2, 3)]).unwrap();
        let comps = g.components(g.vertices());
        assert_eq!(comps, vec![set(&[0, 1]), set(&[2, 3]), set(&[4])]);

        // Complement of {0,1,2,3} restricted: 0-2,0-3,1-2,1-3 edges => one anticomponent.
        let anti = g.anticomponents(set(&[0, 1, 2, 3]));
        assert_eq!(anti, vec![set(&[0, 1, 2, 3])]);

        // {0, 1} is a clique, so each vertex is its own anticomponent.
        assert_eq!(g.anticomponents(set(&[0, 1])), vec![set(&[0]), set(&[1])]);
    }

    #[test]
    fn complement_is_an_involution() {
        let g = cycle(6);
        let gc = g.complement();
        assert_eq!(gc.edge_count(), 15 - 6);
        assert_eq!(gc.complement(), g);
    }

    #[test]
    fn induced_subgraph_keeps_indices() {
        let g = cycle(6);
        let h = g.induced(set(&[1, 2, 3, 5]));
        assert_eq!(h.vertices(), set(&[1, 2, 3, 5]));
        assert!(h.has_edge(1, 2));
        assert!(h.has_edge(2, 3));
        assert!(!h.has_edge(0, 1));
        assert_eq!(h.neighbours(5), VertexSet::EMPTY);
        assert!(!h.is_connected());
    }

    #[test]
    fn path_through_respects_interior_constraint() {
        let g = cycle(6);
        assert_eq!(g.path_through(set(&[1, 2]), 0, 3), Some(vec![0, 1, 2, 3]));
        assert_eq!(g.path_through(set(&[4, 5]), 0, 3), Some(vec![0, 5, 4, 3]));
        assert_eq!(g.path_through(set(&[1, 5]), 0, 3), None);
        assert_eq!(g.path_through(VertexSet::EMPTY, 0, 1), Some(vec![0, 1]));
        assert_eq!(g.path_through(VertexSet::EMPTY, 2, 2), Some(vec![2]));
    }

    #[test]
    fn shortest_path_without_interior_vertices_takes_detour() {
        let g = cycle(6);
        let p = g
            .shortest_path_without_interior_vertices(0, 2, set(&[1]))
            .unwrap();
        assert_eq!(p, vec![0, 5, 4, 3, 2]);
        assert!(g.shortest_path_without_interior_vertices(0, 3, set(&[1, 4])).is_none());
    }

    #[test]
    fn shortest_path_without_interior_neighbours_avoids_neighbourhood() {
        // Path 0-1-2-3 plus pendant 4 on vertex 1 and a detour 0-5-6-3.
        let g = Graph::from_edges(7, [(0, 1), (1, 2), (2, 3), (1, 4), (0, 5), (5, 6), (6, 3)])
            .unwrap();
        let p = g
            .shortest_path_without_interior_neighbours(0, 3, set(&[4]))
            .unwrap();
        assert_eq!(p, vec![0, 5, 6, 3]);
    }

    #[test]
    fn bfs_tree_reports_distances_and_predecessors() {
        let g = cycle(5);
        let tree = g.bfs(0, g.vertices());
        assert_eq!(tree.distance(0), Some(0));
        assert_eq!(tree.distance(2), Some(2));
        assert_eq!(tree.predecessor(1), Some(0));
        assert_eq!(tree.path_to(3), Some(vec![0, 4, 3]));
    }

    #[test]
    fn has_vertices_checks_liveness_and_range() {
        let g = cycle(5).without(set(&[2]));
        assert!(g.has_vertices(&[0, 1, 4]));
        assert!(!g.has_vertices(&[0, 2]));
        assert!(!g.has_vertices(&[5]));
        assert!(!g.has_vertices(&[64, 1]));
        assert!(g.has_vertices(&[]));
    }

    #[test]
    fn edges_are_listed_once() {
        let g = cycle(4);
        let edges: Vec<_> = g.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    }
}
