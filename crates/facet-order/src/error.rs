//! Error types for facet ordering and the shortest-path helper.

use thiserror::Error;

/// Result type for facet ordering.
pub type OrderResult<T> = Result<T, OrderError>;

/// Precondition violations reported by the facet-ordering functions.
///
/// Every variant is an invalid-argument failure: the call produces no output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Source and destination of the edge are the same vertex.
    #[error("edge endpoints coincide: s = d = {vertex}")]
    SameEndpoints { vertex: usize },

    /// A vertex index (edge endpoint or face corner) is out of range.
    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexOutOfRange { index: usize, count: usize },

    /// An adjacent-face record is zero or too large to encode a face index.
    #[error("adjacent face record #{position} has invalid value {record}")]
    InvalidRecord { position: usize, record: i64 },

    /// An adjacent-face record points past the face table.
    #[error("face {face} out of range ({count} faces)")]
    FaceOutOfRange { face: usize, count: usize },

    /// An adjacent face does not contain the edge.
    #[error("face {face} does not contain edge ({s}, {d})")]
    FaceMissingEdge { face: usize, s: usize, d: usize },

    /// The edge endpoints sit at the same position.
    #[error("edge ({s}, {d}) has zero length")]
    DegenerateEdge { s: usize, d: usize },

    /// An adjacent face has no apex off the edge axis (zero area at the edge).
    #[error("face {face} is degenerate at edge ({s}, {d})")]
    DegenerateFace { face: usize, s: usize, d: usize },

    /// A vertex coordinate is not admitted by the predicate kernel.
    #[error("vertex {vertex} has a coordinate the kernel cannot represent")]
    InvalidCoordinate { vertex: usize },

    /// The pivot point lies on the edge axis.
    #[error("pivot point is collinear with edge ({s}, {d})")]
    DegeneratePivot { s: usize, d: usize },

    /// The pivot point has a coordinate the kernel cannot represent.
    #[error("pivot point has a coordinate the kernel cannot represent")]
    InvalidPivot,
}

/// Errors reported by [`crate::shortest_path::dijkstra`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("source vertex {vertex} out of range ({count} vertices)")]
    SourceOutOfRange { vertex: usize, count: usize },

    #[error("vertex {vertex} lists neighbor {neighbor} out of range ({count} vertices)")]
    NeighborOutOfRange {
        vertex: usize,
        neighbor: usize,
        count: usize,
    },

    #[error("expected {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },

    #[error("weight of vertex {vertex} is negative or NaN: {weight}")]
    InvalidWeight { vertex: usize, weight: f64 },
}
