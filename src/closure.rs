//! # Transitive closure
//!
//! Floyd-Warshall reachability over the two graph encodings of this crate.
//!
//! After the pass for intermediate vertex `k` completes, cell `(i, j)` is set
//! iff there is a path from `i` to `j` whose interior vertices all come from
//! the first `k + 1` vertices. The update reads the matrix being written, so
//! later passes see the entries added by earlier ones; that is what makes a
//! single sweep of `k` sufficient.
//!
//! ## Entry points
//!
//! - [`compute_closure`]: closes a [`Graph`] in place and hands the same graph
//!   back for chaining.
//! - [`TransitiveClosure::close`] / [`TransitiveClosure::closure`]: mutate, or
//!   compute a closed copy and leave the original alone.
//! - [`TransitiveClosure::close_with`]: same as `close`, honouring a
//!   [`ClosureConfig`].
//!
//! Self reachability is never implied. A vertex reaches itself only if the
//! input says so, if it lies on a cycle, or if [`ClosureConfig::reflexive`]
//! is set.

use std::{fmt, hash::Hash};

use ahash::RandomState;
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::{
    dense::DenseMatrix,
    labeled::{LabelSet, LabeledAdjacency},
};

/// Counters reported by a closure pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureStats {
    /// Size of the vertex set the pass iterated over.
    pub vertices: usize,
    /// Number of `(k, i, j)` probes, always `vertices³`.
    pub relaxations: u64,
    /// Entries that were not present before the call.
    pub added: usize,
}

/// What to do with input that is neither a matrix nor a labeled mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Strictness {
    /// Reject it with [`ClosureError::UnsupportedRepresentation`](crate::error::ClosureError::UnsupportedRepresentation).
    #[default]
    Strict,
    /// Treat it as already closed and hand it back unchanged.
    Permissive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ClosureConfig {
    pub strictness: Strictness,
    /// Seed `v -> v` for every vertex before closing, giving the
    /// reflexive-transitive closure.
    pub reflexive: bool,
}

impl ClosureConfig {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn permissive() -> Self {
        ClosureConfig {
            strictness: Strictness::Permissive,
            ..Self::default()
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_reflexive(mut self, reflexive: bool) -> Self {
        self.reflexive = reflexive;
        self
    }
}

pub trait TransitiveClosure: Clone {
    /// Closes the relation in place. Entries are only ever added.
    fn close(&mut self) -> ClosureStats;

    /// Adds `v -> v` for every vertex, returning how many were new.
    fn seed_reflexive(&mut self) -> usize;

    /// Whether `i -> k` and `k -> j` always imply `i -> j`.
    fn is_transitively_closed(&self) -> bool;

    fn close_with(&mut self, config: &ClosureConfig) -> ClosureStats {
        let seeded = if config.reflexive {
            self.seed_reflexive()
        } else {
            0
        };
        let mut stats = self.close();
        stats.added += seeded;
        stats
    }

    /// A closed copy, leaving `self` untouched.
    fn closure(&self) -> Self {
        let mut closed = self.clone();
        closed.close();
        closed
    }
}

impl TransitiveClosure for DenseMatrix {
    #[instrument(level = "debug", skip_all, fields(vertices = self.len()))]
    fn close(&mut self) -> ClosureStats {
        let n = self.len();
        let bits = self.bits_mut();
        let mut added = 0;

        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    let ij = i * n + j;
                    if !bits[ij] && bits[k * n + j] && bits[i * n + k] {
                        bits.set(ij, true);
                        added += 1;
                    }
                }
            }
        }

        let stats = ClosureStats {
            vertices: n,
            relaxations: (n as u64).pow(3),
            added,
        };
        debug!(
            relaxations = stats.relaxations,
            added = stats.added,
            "dense closure complete"
        );
        stats
    }

    fn seed_reflexive(&mut self) -> usize {
        self.seed_diagonal()
    }

    fn is_transitively_closed(&self) -> bool {
        (0..self.len()).all(|i| {
            self.successors(i)
                .all(|k| self.successors(k).all(|j| self.reaches(i, j)))
        })
    }
}

impl<L: Hash + Eq + Clone> TransitiveClosure for LabeledAdjacency<L> {
    #[instrument(level = "debug", skip_all, fields(vertices = self.vertex_count()))]
    fn close(&mut self) -> ClosureStats {
        // Captured before any insertion; indices into the map stay valid
        // because closing never adds or removes outer keys.
        let labels: Vec<L> = self.vertices().cloned().collect();
        let n = labels.len();
        let adjacency = self.adjacency_mut();
        let mut added = 0;

        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if !probe(adjacency, &labels, i, j)
                        && probe(adjacency, &labels, k, j)
                        && probe(adjacency, &labels, i, k)
                    {
                        if let Some((_, targets)) = adjacency.get_index_mut(i) {
                            targets.insert(labels[j].clone());
                            added += 1;
                        }
                    }
                }
            }
        }

        let stats = ClosureStats {
            vertices: n,
            relaxations: (n as u64).pow(3),
            added,
        };
        debug!(
            relaxations = stats.relaxations,
            added = stats.added,
            "labeled closure complete"
        );
        stats
    }

    fn seed_reflexive(&mut self) -> usize {
        self.seed_self_loops()
    }

    fn is_transitively_closed(&self) -> bool {
        self.adjacency().iter().all(|(i, via)| {
            via.iter().all(|k| {
                self.successors(k)
                    .into_iter()
                    .flatten()
                    .all(|j| self.reaches(i, j))
            })
        })
    }
}

/// Non-inserting lookup of `labels[to]` in the row at index `from`.
fn probe<L: Hash + Eq>(
    adjacency: &IndexMap<L, LabelSet<L>, RandomState>,
    labels: &[L],
    from: usize,
    to: usize,
) -> bool {
    adjacency
        .get_index(from)
        .is_some_and(|(_, targets)| targets.contains(&labels[to]))
}

/// A graph in either supported encoding, fixed at construction time.
#[derive(Clone, Debug)]
pub enum Graph<L = String> {
    Dense(DenseMatrix),
    Labeled(LabeledAdjacency<L>),
}

impl<L: Hash + Eq> PartialEq for Graph<L> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Graph::Dense(a), Graph::Dense(b)) => a == b,
            (Graph::Labeled(a), Graph::Labeled(b)) => a == b,
            _ => false,
        }
    }
}

impl<L: Hash + Eq> Eq for Graph<L> {}

impl<L> From<DenseMatrix> for Graph<L> {
    fn from(matrix: DenseMatrix) -> Self {
        Graph::Dense(matrix)
    }
}

impl<L> From<LabeledAdjacency<L>> for Graph<L> {
    fn from(adjacency: LabeledAdjacency<L>) -> Self {
        Graph::Labeled(adjacency)
    }
}

impl<L: Hash + Eq + Clone> Graph<L> {
    pub fn vertex_count(&self) -> usize {
        match self {
            Graph::Dense(m) => m.len(),
            Graph::Labeled(g) => g.vertex_count(),
        }
    }

    pub fn edge_count(&self) -> usize {
        match self {
            Graph::Dense(m) => m.edge_count(),
            Graph::Labeled(g) => g.edge_count(),
        }
    }

    pub fn as_dense(&self) -> Option<&DenseMatrix> {
        match self {
            Graph::Dense(m) => Some(m),
            Graph::Labeled(_) => None,
        }
    }

    pub fn as_labeled(&self) -> Option<&LabeledAdjacency<L>> {
        match self {
            Graph::Labeled(g) => Some(g),
            Graph::Dense(_) => None,
        }
    }
}

impl<L: Hash + Eq + Clone> TransitiveClosure for Graph<L> {
    fn close(&mut self) -> ClosureStats {
        match self {
            Graph::Dense(m) => m.close(),
            Graph::Labeled(g) => g.close(),
        }
    }

    fn seed_reflexive(&mut self) -> usize {
        match self {
            Graph::Dense(m) => m.seed_reflexive(),
            Graph::Labeled(g) => g.seed_reflexive(),
        }
    }

    fn is_transitively_closed(&self) -> bool {
        match self {
            Graph::Dense(m) => m.is_transitively_closed(),
            Graph::Labeled(g) => g.is_transitively_closed(),
        }
    }
}

impl<L: fmt::Display> fmt::Display for Graph<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Graph::Dense(m) => fmt::Display::fmt(m, f),
            Graph::Labeled(g) => fmt::Display::fmt(g, f),
        }
    }
}

/// Closes `graph` in place and returns it, so the call can be chained or
/// its result ignored.
pub fn compute_closure<L: Hash + Eq + Clone>(graph: &mut Graph<L>) -> &mut Graph<L> {
    graph.close();
    graph
}

/// Like [`compute_closure`], honouring `config` and reporting counters.
pub fn compute_closure_with<L: Hash + Eq + Clone>(
    graph: &mut Graph<L>,
    config: &ClosureConfig,
) -> ClosureStats {
    graph.close_with(config)
}

#[cfg(test)]
mod test;
