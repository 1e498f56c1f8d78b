//! # Warshall
//!
//! Warshall computes the transitive closure of a directed graph with the
//! Floyd-Warshall dynamic program: after the call, `i` reaches `j` whenever
//! some nonempty path of edges leads from `i` to `j`.
//!
//! Graphs come in two encodings, chosen by the caller and validated at
//! construction:
//!
//! - [`DenseMatrix`]: a square bit matrix over the vertices `0..V`;
//! - [`LabeledAdjacency`]: a map from each vertex label to the labels it reaches.
//!
//! Both are closed in place through the [`TransitiveClosure`] trait, or via
//! [`compute_closure`] on the [`Graph`] sum type. With the `serde` feature,
//! [`value::compute_closure_value`] accepts untyped JSON and dispatches on its
//! shape, rejecting or passing through anything else depending on
//! [`Strictness`].

pub mod closure;
pub mod dense;
pub mod error;
pub mod labeled;
pub mod presence;
#[cfg(feature = "serde")]
pub mod value;

pub use closure::{
    compute_closure, compute_closure_with, ClosureConfig, ClosureStats, Graph, Strictness,
    TransitiveClosure,
};
pub use dense::DenseMatrix;
pub use error::{ClosureError, MalformedGraph};
pub use labeled::LabeledAdjacency;
pub use presence::Presence;
