//! Canonical clockwise order of the faces around an edge.

use crate::error::OrderResult;
use crate::predicates::{FilteredKernel, Predicates};

use super::sweep::{build_sweep, Sweep};
use super::types::{EdgeFan, OrderCfg, SignedFace};

/// Order the adjacent faces of `fan` clockwise around `d − s`.
///
/// Returns a permutation of `0..fan.len()` (indices into `fan.adj_faces`).
/// The sweep starts at the half-plane through the apex of `adj_faces[0]`.
/// Faces in the same angular slot are ordered by ascending signed index;
/// identical records fall back to their input position.
///
/// Errors on any precondition violation; see [`crate::OrderError`].
pub fn order_facets_around_edge<T, K: Predicates<T>>(
    kernel: &K,
    fan: &EdgeFan<'_, T>,
    cfg: OrderCfg,
) -> OrderResult<Vec<usize>> {
    match build_sweep(kernel, fan)? {
        Some(sweep) => Ok(canonical_order(&sweep, fan.adj_faces, cfg)),
        None => Ok(Vec::new()),
    }
}

/// `f64` fan with exact filtered predicates and default configuration.
pub fn order_with_defaults(fan: &EdgeFan<'_, f64>) -> OrderResult<Vec<usize>> {
    order_facets_around_edge(&FilteredKernel, fan, OrderCfg::default())
}

pub(crate) fn canonical_order<T, K: Predicates<T>>(
    sweep: &Sweep<'_, T, K>,
    records: &[SignedFace],
    cfg: OrderCfg,
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&i, &j| {
        sweep
            .frame
            .compare(&sweep.apexes[i], &sweep.apexes[j])
            .then_with(|| records[i].cmp(&records[j]))
            .then_with(|| i.cmp(&j))
    });
    if cfg.debug {
        for (position, apex) in sweep.apexes.iter().enumerate() {
            tracing::debug!(position, record = records[position].0, sector = ?apex.sector, "apex");
        }
        tracing::debug!(?order, "canonical order");
    }
    order
}
