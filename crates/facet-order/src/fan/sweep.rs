//! Angular comparison of apexes around the edge axis.
//!
//! Angles are measured clockwise about `d − s` by the left-hand rule (thumb
//! along `d − s`; equivalently clockwise when viewed from `d` looking back
//! toward `s`), starting at the half-plane spanned by the axis and a fixed
//! reference apex. No angle is ever computed: an apex is first placed in one
//! of four sectors, and two apexes of the same open half-plane are ordered by
//! the sign of `det[d − s, a − s, b − s]`.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::error::{OrderError, OrderResult};
use crate::predicates::{Orientation, Predicates};

use super::types::EdgeFan;

/// Position of an apex relative to the reference half-plane (clockwise angle θ).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sector {
    /// θ = 0: on the reference half-plane.
    Reference,
    /// 0 < θ < π.
    Leading,
    /// θ = π: on the half-plane opposite the reference.
    Opposite,
    /// π < θ < 2π.
    Trailing,
}

impl Sector {
    /// Whether two apexes in this sector can differ in angle.
    #[inline]
    fn is_open(self) -> bool {
        matches!(self, Sector::Leading | Sector::Trailing)
    }
}

/// Apex point tagged with its sector.
#[derive(Clone, Debug)]
pub struct Apex<P> {
    pub point: P,
    pub sector: Sector,
}

/// Edge axis plus reference half-plane, evaluated through a predicate kernel.
pub struct SweepFrame<'k, T, K: Predicates<T>> {
    kernel: &'k K,
    s: K::Point,
    d: K::Point,
    reference: K::Point,
    _scalar: PhantomData<fn(&T)>,
}

impl<'k, T, K: Predicates<T>> SweepFrame<'k, T, K> {
    /// Frame with axis `d − s` and reference half-plane through `reference`.
    ///
    /// `None` if `reference` lies on the axis line (or `s` and `d` coincide).
    pub fn new(kernel: &'k K, s: K::Point, d: K::Point, reference: K::Point) -> Option<Self> {
        if kernel.collinear(&s, &d, &reference) {
            return None;
        }
        Some(Self {
            kernel,
            s,
            d,
            reference,
            _scalar: PhantomData,
        })
    }

    /// Sector of `point`, or `None` if it lies on the axis line.
    pub fn sector(&self, point: &K::Point) -> Option<Sector> {
        let k = self.kernel;
        match k.orient3d(&self.s, &self.d, &self.reference, point) {
            Orientation::Negative => Some(Sector::Leading),
            Orientation::Positive => Some(Sector::Trailing),
            Orientation::Degenerate => {
                match k.coplanar_orientation(&self.s, &self.d, &self.reference, point) {
                    Orientation::Positive => Some(Sector::Reference),
                    Orientation::Negative => Some(Sector::Opposite),
                    Orientation::Degenerate => None,
                }
            }
        }
    }

    #[inline]
    pub fn classify(&self, point: K::Point) -> Option<Apex<K::Point>> {
        let sector = self.sector(&point)?;
        Some(Apex { point, sector })
    }

    /// Clockwise angular order of two apexes.
    ///
    /// `Less` = `a` comes first (before), `Greater` = after, `Equal` = same
    /// angular slot. Only the sign of a determinant is inspected.
    pub fn compare(&self, a: &Apex<K::Point>, b: &Apex<K::Point>) -> Ordering {
        match a.sector.cmp(&b.sector) {
            Ordering::Equal if a.sector.is_open() => {
                match self.kernel.orient3d(&self.s, &self.d, &a.point, &b.point) {
                    Orientation::Negative => Ordering::Less,
                    Orientation::Positive => Ordering::Greater,
                    Orientation::Degenerate => Ordering::Equal,
                }
            }
            by_sector => by_sector,
        }
    }
}

/// Validated fan: the frame anchored at the first record's apex, and one
/// classified apex per record.
pub(crate) struct Sweep<'k, T, K: Predicates<T>> {
    pub frame: SweepFrame<'k, T, K>,
    pub apexes: Vec<Apex<K::Point>>,
}

/// Validate `fan` and classify every apex.
///
/// Returns `Ok(None)` for an empty fan whose edge is otherwise valid.
pub(crate) fn build_sweep<'k, T, K: Predicates<T>>(
    kernel: &'k K,
    fan: &EdgeFan<'_, T>,
) -> OrderResult<Option<Sweep<'k, T, K>>> {
    let (s, d) = (fan.s, fan.d);
    let (ps, pd) = edge_points(kernel, fan)?;

    let mut apex_points = Vec::with_capacity(fan.len());
    let mut apex_faces = Vec::with_capacity(fan.len());
    for (position, record) in fan.adj_faces.iter().enumerate() {
        let face = record.face_index().ok_or(OrderError::InvalidRecord {
            position,
            record: record.0,
        })?;
        let corners = fan.faces.get(face).ok_or(OrderError::FaceOutOfRange {
            face,
            count: fan.faces.len(),
        })?;
        for &v in corners {
            check_vertex(v, fan.vertices.len())?;
        }
        if !corners.contains(&s) || !corners.contains(&d) {
            return Err(OrderError::FaceMissingEdge { face, s, d });
        }
        let apex = corners
            .iter()
            .copied()
            .find(|&v| v != s && v != d)
            .ok_or(OrderError::DegenerateFace { face, s, d })?;
        let point = kernel
            .prepare(&fan.vertices[apex])
            .ok_or(OrderError::InvalidCoordinate { vertex: apex })?;
        apex_points.push(point);
        apex_faces.push(face);
    }

    let Some(reference) = apex_points.first().cloned() else {
        return Ok(None);
    };
    let frame = SweepFrame::new(kernel, ps, pd, reference).ok_or(OrderError::DegenerateFace {
        face: apex_faces[0],
        s,
        d,
    })?;
    let apexes = apex_points
        .into_iter()
        .zip(&apex_faces)
        .map(|(point, &face)| {
            frame
                .classify(point)
                .ok_or(OrderError::DegenerateFace { face, s, d })
        })
        .collect::<OrderResult<Vec<_>>>()?;
    Ok(Some(Sweep { frame, apexes }))
}

/// Validate the edge and admit its endpoints.
pub(crate) fn edge_points<T, K: Predicates<T>>(
    kernel: &K,
    fan: &EdgeFan<'_, T>,
) -> OrderResult<(K::Point, K::Point)> {
    let (s, d) = (fan.s, fan.d);
    if s == d {
        return Err(OrderError::SameEndpoints { vertex: s });
    }
    check_vertex(s, fan.vertices.len())?;
    check_vertex(d, fan.vertices.len())?;
    let ps = kernel
        .prepare(&fan.vertices[s])
        .ok_or(OrderError::InvalidCoordinate { vertex: s })?;
    let pd = kernel
        .prepare(&fan.vertices[d])
        .ok_or(OrderError::InvalidCoordinate { vertex: d })?;
    if kernel.coincident(&ps, &pd) {
        return Err(OrderError::DegenerateEdge { s, d });
    }
    Ok((ps, pd))
}

#[inline]
fn check_vertex(index: usize, count: usize) -> OrderResult<()> {
    if index < count {
        Ok(())
    } else {
        Err(OrderError::VertexOutOfRange { index, count })
    }
}
