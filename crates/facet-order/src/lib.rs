//! Ordering the faces of a triangle mesh around a shared edge.
//!
//! Non-manifold edges can carry any number of faces. Downstream passes
//! (boolean operations, orientation repair, outer-hull extraction) need to
//! know which face comes next when rotating about such an edge. This crate
//! answers that with exact geometric predicates and a deterministic tie-break.
//!
//! Layout
//! - `predicates`: orientation kernels (`DirectKernel<T>`, `FilteredKernel`,
//!   `IntegerKernel`).
//! - `fan`: clockwise ordering around `(s, d)`, with and without a pivot.
//! - `shortest_path`: Dijkstra helper on vertex adjacency.
//! - `rand`: reproducible random fans with known angles.
//!
//! API Policy
//! - Breaking changes are fine when they improve clarity; there is no stable
//!   public API yet.

pub mod error;
pub mod fan;
pub mod predicates;
pub mod rand;
pub mod shortest_path;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{OrderError, OrderResult, PathError};
pub use fan::{
    order_facets_around_edge, order_facets_around_edge_with_pivot, order_with_defaults,
    order_with_defaults_pivot, EdgeFan, Face, OrderCfg, SignedFace,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{OrderError, OrderResult, PathError};
    pub use crate::fan::{
        order_facets_around_edge, order_facets_around_edge_with_pivot, order_with_defaults,
        order_with_defaults_pivot, EdgeFan, Face, OrderCfg, SignedFace,
    };
    pub use crate::predicates::{
        DirectKernel, FilteredKernel, IntegerKernel, Orientation, Predicates,
    };
    pub use crate::rand::{draw_fan, FaceCount, FanCfg, RandomFan, ReplayToken};
    pub use crate::shortest_path::{dijkstra, path_to, EdgeWeights, ShortestPaths};
    pub use nalgebra::Vector3 as Vec3;
}
