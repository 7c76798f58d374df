//! Rebase the circular order at a caller-supplied pivot direction.

use std::cmp::Ordering;

use nalgebra::Vector3;

use crate::error::{OrderError, OrderResult};
use crate::predicates::{FilteredKernel, Predicates};

use super::sort::canonical_order;
use super::sweep::{build_sweep, edge_points};
use super::types::{EdgeFan, OrderCfg};

/// Like [`super::order_facets_around_edge`], rotated so that `order[0]` is the
/// first face strictly clockwise of the half-plane through `pivot`.
///
/// The pivot need not be a mesh vertex. Faces in the pivot's own angular slot
/// count as predecessors, so they land at the end of the sequence. The result
/// is always a cyclic rotation of the canonical order.
pub fn order_facets_around_edge_with_pivot<T, K: Predicates<T>>(
    kernel: &K,
    fan: &EdgeFan<'_, T>,
    pivot: &Vector3<T>,
    cfg: OrderCfg,
) -> OrderResult<Vec<usize>> {
    let (s, d) = (fan.s, fan.d);
    let (ps, pd) = edge_points(kernel, fan)?;
    let pivot = kernel.prepare(pivot).ok_or(OrderError::InvalidPivot)?;
    if kernel.collinear(&ps, &pd, &pivot) {
        return Err(OrderError::DegeneratePivot { s, d });
    }
    let Some(sweep) = build_sweep(kernel, fan)? else {
        return Ok(Vec::new());
    };
    let mut order = canonical_order(&sweep, fan.adj_faces, cfg);
    let pivot = sweep
        .frame
        .classify(pivot)
        .ok_or(OrderError::DegeneratePivot { s, d })?;
    // Canonical order is sorted by angle, so faces at or before the pivot
    // form a prefix.
    let start = order.partition_point(|&i| {
        sweep.frame.compare(&sweep.apexes[i], &pivot) != Ordering::Greater
    });
    let len = order.len();
    order.rotate_left(start % len);
    if cfg.debug {
        tracing::debug!(pivot_sector = ?pivot.sector, start, ?order, "rebased order");
    }
    Ok(order)
}

/// `f64` pivot rebase with exact filtered predicates and default configuration.
pub fn order_with_defaults_pivot(
    fan: &EdgeFan<'_, f64>,
    pivot: &Vector3<f64>,
) -> OrderResult<Vec<usize>> {
    order_facets_around_edge_with_pivot(&FilteredKernel, fan, pivot, OrderCfg::default())
}
