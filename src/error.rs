use thiserror::Error;

/// Error types for building and closing graphs.
///
/// Every error is reported before the graph is touched, so a rejected input
/// is left exactly as the caller passed it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClosureError {
    /// The input is neither a matrix nor a labeled adjacency mapping.
    ///
    /// Only raised in [`Strictness::Strict`](crate::closure::Strictness::Strict) mode;
    /// permissive mode passes such input through unchanged.
    #[error("unsupported graph representation: expected a matrix or a labeled adjacency mapping, found {found}")]
    UnsupportedRepresentation { found: &'static str },

    /// The input has one of the two supported shapes but is internally inconsistent.
    #[error("malformed graph: {0}")]
    Malformed(#[from] MalformedGraph),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGraph {
    #[error("row {row} has {len} columns, expected {expected} for a square matrix")]
    RowLength {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("row {row} is not a sequence of cells")]
    NonSequenceRow { row: usize },

    #[error("cell ({row}, {column}) is not a boolean-like value")]
    NonBooleanCell { row: usize, column: usize },

    #[error("vertex {label} maps to something other than a neighbor mapping")]
    NonMappingRow { label: String },

    #[error("vertex {vertex} lists {target} as a neighbor, but {target} is not a vertex")]
    DanglingTarget { vertex: String, target: String },
}
