//! # Berge Graph Recognition
//!
//! Decides whether a graph is *Berge*: neither it nor its complement contains an
//! odd hole (an induced cycle of odd length at least 5). By the Strong Perfect
//! Graph Theorem these are exactly the perfect graphs.
//!
//! This crate provides:
//! - A compact bitset [`Graph`](graph::Graph) with the neighbourhood,
//!   anticomponent and constrained shortest-path primitives the algorithm needs.
//! - Polynomial-time detectors for the configurations that certify a non-Berge
//!   graph: jewels, pyramids, and configurations T2 and T3.
//! - Cleaning (candidate near-cleaner enumeration) and the near-cleaner test.
//! - A parallel orchestrator that runs all of the above on the graph and its
//!   complement, racing independent searches on an explicit worker pool.
//!
//! ## Quick Start
//!
//! ```
//! use berge::construction::{cycle, petersen};
//! use berge::is_berge;
//!
//! assert!(is_berge(&cycle(6).unwrap()).unwrap());
//! assert!(!is_berge(&cycle(7).unwrap()).unwrap());
//! assert!(!is_berge(&petersen().unwrap()).unwrap());
//! ```
//!
//! ## Reusing a Pool and Inspecting the Witness
//!
//! ```
//! use berge::berge::{decide, Verdict};
//! use berge::construction::cycle;
//! use berge::search::SearchPool;
//! use berge::validate::validate_witness;
//!
//! let pool = SearchPool::with_workers(2).unwrap();
//! let graph = cycle(5).unwrap();
//! match decide(&graph, &pool).unwrap() {
//!     Verdict::NotBerge(finding) => {
//!         let target = finding.side.select(&graph);
//!         validate_witness(&target, &finding.witness).unwrap();
//!     }
//!     Verdict::Berge => unreachable!("C5 is an odd hole"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`vertex_set`]: `u64` bitset of vertex indices.
//! - [`graph`]: Immutable graph, derived views, components, constrained BFS.
//! - [`search`]: Worker pool, cancellation, first-hit scans and races.
//! - [`jewel`], [`pyramid`], [`configurations`]: Configuration detectors.
//! - [`holes`]: Induced cycles of a fixed length, and exhaustive odd-hole search.
//! - [`cleaning`], [`near_cleaner`]: Candidate enumeration and the near-cleaner test.
//! - [`berge`]: The decision procedure.
//! - [`reference`]: Slow brute-force routines used to cross-check the above.
//! - [`validate`]: Independent verification of witnesses.
//! - [`construction`]: Named graph families and random generators.
//!
//! ## Performance Notes
//!
//! - The graph representation uses `u64` bitsets, limiting graphs to 64 vertices.
//! - The algorithm is polynomial but of high degree (pyramid detection alone
//!   enumerates every triangle against every ordered vertex triple); expect
//!   seconds for graphs in the low tens of vertices.
//! - For maximum performance, compile with:
//!   `RUSTFLAGS="-C target-cpu=native" cargo build --release`

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::inline_always)] // Intentional for hot-path code
#![allow(clippy::many_single_char_names)] // Mathematical variable names
#![allow(clippy::needless_range_loop)] // Often clearer for matrix indexing
#![allow(clippy::doc_markdown)] // Mathematical notation in docs
#![allow(clippy::multiple_crate_versions)] // Cargo.lock management is external

pub mod berge;
pub mod cleaning;
pub mod configurations;
pub mod construction;
pub mod graph;
pub mod holes;
pub mod jewel;
pub mod near_cleaner;
pub mod pyramid;
pub mod reference;
pub mod search;
pub mod validate;
pub mod vertex_set;
pub mod witness;

pub use crate::berge::{is_berge, is_berge_with};

/// Errors produced while building graphs or running a decision.
#[derive(Debug, thiserror::Error)]
pub enum BergeError {
    /// An edge joins a vertex to itself.
    #[error("self-loop at vertex {0}")]
    SelfLoop(String),
    /// A vertex label appears twice in the vertex list.
    #[error("duplicate vertex {0}")]
    DuplicateVertex(String),
    /// An edge endpoint is not a vertex of the graph.
    #[error("edge ({u}, {v}) has an endpoint outside the vertex set")]
    DanglingEdge {
        /// First endpoint as given.
        u: String,
        /// Second endpoint as given.
        v: String,
    },
    /// The graph exceeds the 64-vertex bitset capacity.
    #[error("graph has {0} vertices; at most 64 are supported")]
    TooManyVertices(usize),
    /// The worker pool could not be created.
    #[error("worker pool unavailable: {0}")]
    PoolUnavailable(String),
    /// A search task panicked.
    #[error("search worker panicked: {0}")]
    WorkerPanicked(String),
    /// The search was stopped before it could finish.
    #[error("search cancelled")]
    Cancelled,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BergeError>;

/// Re-export commonly used types for convenience.
pub mod prelude {
    pub use crate::berge::{decide, is_berge, is_berge_with, Finding, Side, Verdict};
    pub use crate::graph::Graph;
    pub use crate::search::{SearchConfig, SearchContext, SearchPool};
    pub use crate::validate::validate_witness;
    pub use crate::vertex_set::VertexSet;
    pub use crate::witness::Witness;
    pub use crate::{BergeError, Result};
}
