/// Errors raised by [`DirectedGraph`](crate::DirectedGraph) queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The operation referenced a vertex that was never added.
    #[error("vertex not found in graph: {0}")]
    UnknownVertex(String),

    /// More than one vertex carries the requested label.
    #[error("label {label:?} is shared by {count} vertices")]
    AmbiguousLabel {
        /// The label that was looked up.
        label: String,
        /// How many vertices carry it.
        count: usize,
    },
}
