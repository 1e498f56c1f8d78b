//! # Labeled adjacency
//!
//! A [`LabeledAdjacency`] maps every vertex label to the set of labels it
//! reaches. The outer keys are the vertex set; a label with an empty set is an
//! isolated vertex, not a missing one.
//!
//! Lookups never insert. [`successors`](LabeledAdjacency::successors) on an
//! unknown label answers `None` and leaves the map alone, so querying a graph
//! can never grow its vertex set. Only [`add_vertex`](LabeledAdjacency::add_vertex)
//! and [`add_edge`](LabeledAdjacency::add_edge) create vertices.
//!
//! Both levels are insertion ordered (`indexmap`), which keeps iteration and
//! [`Display`](fmt::Display) output deterministic.

use std::{fmt, hash::Hash};

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

use crate::{error::MalformedGraph, presence::Presence};

pub type LabelSet<L> = IndexSet<L, RandomState>;

#[derive(Clone, Debug)]
pub struct LabeledAdjacency<L = String> {
    adjacency: IndexMap<L, LabelSet<L>, RandomState>,
}

impl<L> Default for LabeledAdjacency<L> {
    fn default() -> Self {
        LabeledAdjacency {
            adjacency: IndexMap::default(),
        }
    }
}

impl<L: Hash + Eq> PartialEq for LabeledAdjacency<L> {
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl<L: Hash + Eq> Eq for LabeledAdjacency<L> {}

impl<L: Hash + Eq + Clone> LabeledAdjacency<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an isolated vertex. Idempotent: returns `false` if it already existed.
    pub fn add_vertex(&mut self, label: L) -> bool {
        if self.adjacency.contains_key(&label) {
            return false;
        }
        self.adjacency.insert(label, LabelSet::default());
        true
    }

    /// Adds the edge `from -> to`, creating either endpoint if needed.
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, from: L, to: L) -> bool {
        self.add_vertex(to.clone());
        self.adjacency.entry(from).or_default().insert(to)
    }

    /// Builds an adjacency from a mapping of label to (label, marker) pairs.
    ///
    /// A marker that is not [present](Presence::is_present) is not an edge.
    /// Repeated outer labels are merged.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedGraph::DanglingTarget`] if a present marker points at
    /// a label that is not itself an outer key.
    pub fn try_from_nested<I, R, M>(rows: I) -> Result<Self, MalformedGraph>
    where
        I: IntoIterator<Item = (L, R)>,
        R: IntoIterator<Item = (L, M)>,
        M: Presence,
        L: fmt::Debug,
    {
        let mut graph = Self::new();
        for (label, row) in rows {
            let targets = graph.adjacency.entry(label).or_default();
            targets.extend(
                row.into_iter()
                    .filter(|(_, marker)| marker.is_present())
                    .map(|(target, _)| target),
            );
        }

        for (vertex, targets) in &graph.adjacency {
            if let Some(target) = targets
                .iter()
                .find(|t| !graph.adjacency.contains_key(*t))
            {
                return Err(MalformedGraph::DanglingTarget {
                    vertex: format!("{vertex:?}"),
                    target: format!("{target:?}"),
                });
            }
        }

        Ok(graph)
    }

    pub fn contains_vertex(&self, label: &L) -> bool {
        self.adjacency.contains_key(label)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    pub fn vertices(&self) -> impl Iterator<Item = &L> {
        self.adjacency.keys()
    }

    /// The labels `label` reaches, or `None` if `label` is not a vertex.
    pub fn successors(&self, label: &L) -> Option<&LabelSet<L>> {
        self.adjacency.get(label)
    }

    pub fn reaches(&self, from: &L, to: &L) -> bool {
        self.successors(from).is_some_and(|targets| targets.contains(to))
    }

    /// Adds `v -> v` for every vertex, returning how many were new.
    pub fn seed_self_loops(&mut self) -> usize {
        let mut added = 0;
        for (label, targets) in self.adjacency.iter_mut() {
            if targets.insert(label.clone()) {
                added += 1;
            }
        }
        added
    }

    pub(crate) fn adjacency(&self) -> &IndexMap<L, LabelSet<L>, RandomState> {
        &self.adjacency
    }

    pub(crate) fn adjacency_mut(&mut self) -> &mut IndexMap<L, LabelSet<L>, RandomState> {
        &mut self.adjacency
    }
}

/// One line per vertex: `label -> a, b, c`.
impl<L: fmt::Display> fmt::Display for LabeledAdjacency<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, (label, targets)) in self.adjacency.iter().enumerate() {
            if n != 0 {
                writeln!(f)?;
            }
            write!(f, "{label} ->")?;
            for (m, target) in targets.iter().enumerate() {
                if m == 0 {
                    write!(f, " {target}")?;
                } else {
                    write!(f, ", {target}")?;
                }
            }
        }
        Ok(())
    }
}
