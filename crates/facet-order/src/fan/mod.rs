//! Faces around an edge: clockwise ordering and pivot rebase.
//!
//! Purpose
//! - Given a directed edge `(s, d)` of a possibly non-manifold triangle mesh
//!   and the faces incident to it, produce one canonical clockwise order of
//!   those faces, so a repair or boolean pass can tell which face is "next"
//!   when walking around the edge.
//!
//! Why this design
//! - Exact predicates plus a fixed reference half-plane give a comparator that
//!   is a strict total order by construction; coincident faces are separated
//!   by their signed index, never by rounding luck.
//! - Validation happens before any sorting, so a call either returns a full
//!   permutation or an error, never a partial order.
//!
//! Conventions
//! - Clockwise means the left-hand rule about `d − s`.
//! - Adjacent faces are given as [`SignedFace`] records; outputs index into
//!   that list, not into the face table.
//!
//! Code cross-refs: `sweep::SweepFrame` (comparison), `sort` (canonical
//! order), `pivot` (rotation), `crate::predicates` (kernels).

mod pivot;
mod sort;
mod sweep;
mod types;

pub use pivot::{order_facets_around_edge_with_pivot, order_with_defaults_pivot};
pub use sort::{order_facets_around_edge, order_with_defaults};
pub use sweep::{Apex, Sector, SweepFrame};
pub use types::{EdgeFan, Face, OrderCfg, SignedFace};

#[cfg(test)]
mod tests;
