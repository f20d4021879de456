//! Adjacency-list directed graph with optional vertex labels.
//!
//! # Overview
//!
//! [`DirectedGraph`] is the substrate shared by the graph algorithms built on
//! top of it. It offers mutation (`add_vertex`, `add_edge`, `remove_edge`),
//! queries (`vertices`, `adjacencies`, `edges`, `vertex_label`) and nothing
//! algorithmic beyond reachability and transposition.
//!
//! ## Ordering
//!
//! Vertices and successor sets are stored in insertion order, so every
//! enumeration (and therefore the DOT export) is deterministic for a given
//! sequence of mutations.
//!
//! ## Invariant
//!
//! Every vertex that appears in a successor set is also a key of the
//! adjacency map. `add_edge` inserts both endpoints before linking them, and
//! nothing ever removes a vertex.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::error::GraphError;

// ---------------------------------------------------------------------------
// DirectedGraph
// ---------------------------------------------------------------------------

/// A mutable directed graph over caller-supplied vertex identifiers.
///
/// Labels are optional. A vertex without a stored label reports its
/// [`Display`] form from [`vertex_label`](Self::vertex_label).
///
/// The graph is not internally synchronized; share it across threads only
/// behind the caller's own lock.
#[derive(Debug, Clone)]
pub struct DirectedGraph<V> {
    /// Vertex -> successor set. The key set is the vertex set.
    adjacency: IndexMap<V, IndexSet<V>>,
    /// Explicit labels; absent entries fall back to `V::to_string()`.
    labels: HashMap<V, String>,
}

impl<V> Default for DirectedGraph<V> {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
            labels: HashMap::new(),
        }
    }
}

impl<V> DirectedGraph<V> {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum()
    }

    /// Iterate over the vertices in insertion order.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Iterate over every edge `(u, v)` exactly once.
    ///
    /// Edges are grouped by source vertex (in vertex order) and, within a
    /// source, listed in the order they were first added.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(u, successors)| successors.iter().map(move |v| (u, v)))
    }
}

impl<V> DirectedGraph<V>
where
    V: Clone + Eq + Hash + Display,
{
    /// Add `v` without a label.
    ///
    /// Returns `true` if the vertex was inserted, `false` if it was already
    /// present (in which case nothing changes).
    pub fn add_vertex(&mut self, v: V) -> bool {
        self.insert_vertex(v, None)
    }

    /// Add `v` with `label`.
    ///
    /// The first label wins: if `v` is already present the new label is
    /// ignored and `false` is returned.
    pub fn add_vertex_with_label(&mut self, v: V, label: impl Into<String>) -> bool {
        self.insert_vertex(v, Some(label.into()))
    }

    fn insert_vertex(&mut self, v: V, label: Option<String>) -> bool {
        if self.adjacency.contains_key(&v) {
            return false;
        }
        if let Some(label) = label {
            self.labels.insert(v.clone(), label);
        }
        self.adjacency.insert(v, IndexSet::new());
        true
    }

    /// Add the edge `u -> v`, adding either endpoint first if needed.
    ///
    /// Returns `true` if the edge is new.
    pub fn add_edge(&mut self, u: V, v: V) -> bool {
        self.add_vertex(u.clone());
        self.add_vertex(v.clone());
        self.adjacency
            .get_mut(&u)
            .is_some_and(|successors| successors.insert(v))
    }

    /// Remove the edge `u -> v` if it exists.
    ///
    /// Returns `Ok(true)` if an edge was removed and `Ok(false)` if `u` had
    /// no such successor. Removing never creates vertices.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if `u` is not in the graph.
    pub fn remove_edge(&mut self, u: &V, v: &V) -> Result<bool, GraphError> {
        let successors = self.adjacency.get_mut(u).ok_or_else(|| unknown(u))?;
        Ok(successors.shift_remove(v))
    }

    /// Return `true` if `v` has been added.
    #[must_use]
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.adjacency.contains_key(v)
    }

    /// Return `true` if the edge `u -> v` exists.
    #[must_use]
    pub fn contains_edge(&self, u: &V, v: &V) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|successors| successors.contains(v))
    }

    /// Label of `v`: the stored label, or the display form of `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if `v` is not in the graph.
    pub fn vertex_label(&self, v: &V) -> Result<Cow<'_, str>, GraphError> {
        if !self.adjacency.contains_key(v) {
            return Err(unknown(v));
        }
        Ok(self
            .labels
            .get(v)
            .map_or_else(|| Cow::Owned(v.to_string()), |label| Cow::Borrowed(label.as_str())))
    }

    /// Successor set of `v`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if `v` is not in the graph.
    pub fn adjacencies(&self, v: &V) -> Result<&IndexSet<V>, GraphError> {
        self.adjacency.get(v).ok_or_else(|| unknown(v))
    }

    /// Find the vertex whose [`vertex_label`](Self::vertex_label) is `label`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AmbiguousLabel`] if more than one vertex
    /// carries `label`.
    pub fn vertex_from_label(&self, label: &str) -> Result<Option<&V>, GraphError> {
        let matches: Vec<&V> = self
            .adjacency
            .keys()
            .filter(|v| {
                self.labels
                    .get(*v)
                    .map_or_else(|| v.to_string() == label, |stored| stored == label)
            })
            .collect();

        match matches.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(*only)),
            many => Err(GraphError::AmbiguousLabel {
                label: label.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Every vertex reachable from `v`, `v` included, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if `v` is not in the graph.
    pub fn descendants(&self, v: &V) -> Result<IndexSet<V>, GraphError> {
        let mut reachable = IndexSet::new();
        reachable.insert(v.clone());
        let mut stack = vec![v];

        while let Some(u) = stack.pop() {
            for w in self.adjacencies(u)? {
                if reachable.insert(w.clone()) {
                    stack.push(w);
                }
            }
        }

        Ok(reachable)
    }

    /// A new graph with every edge reversed. Vertex order and labels are kept.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut transposed = Self {
            adjacency: self
                .adjacency
                .keys()
                .map(|v| (v.clone(), IndexSet::new()))
                .collect(),
            labels: self.labels.clone(),
        };
        for (u, v) in self.edges() {
            transposed.add_edge(v.clone(), u.clone());
        }
        transposed
    }

    /// Export to a [`petgraph`] graph for the algorithm family built on it.
    ///
    /// Node `i` of the result is the `i`-th vertex of
    /// [`vertices`](Self::vertices); edges follow [`edges`](Self::edges).
    #[must_use]
    #[instrument(skip_all)]
    pub fn to_petgraph(&self) -> DiGraph<V, ()> {
        let mut graph = DiGraph::with_capacity(self.vertex_count(), self.edge_count());
        for v in self.adjacency.keys() {
            graph.add_node(v.clone());
        }
        for (u, successors) in self.adjacency.values().enumerate() {
            for v in successors {
                if let Some(target) = self.adjacency.get_index_of(v) {
                    graph.add_edge(NodeIndex::new(u), NodeIndex::new(target), ());
                }
            }
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "exported directed graph"
        );
        graph
    }

    /// Position of `v` in vertex order, used as its DOT identifier.
    pub(crate) fn position(&self, v: &V) -> Option<usize> {
        self.adjacency.get_index_of(v)
    }
}

fn unknown<V: Display>(v: &V) -> GraphError {
    GraphError::UnknownVertex(v.to_string())
}
