//! Exact geometric predicates behind a pluggable kernel.
//!
//! Purpose
//! - Give the sweep code sign-exact answers for the only three questions it
//!   asks: "which side of this plane", "same or opposite side of the axis",
//!   and "are these two points the same".
//!
//! Why this design
//! - The sorter relies on transitivity of its comparator, so a wrong sign is a
//!   correctness bug rather than an approximation. Backends are swappable via
//!   [`Predicates`] without touching the sorter.
//! - Each predicate is a fixed polynomial in the input coordinates. We write
//!   the polynomials once over a generic ring ([`Coord`]) and evaluate them in
//!   whatever arithmetic the backend chooses.
//!
//! Conventions
//! - `orient3d(p, q, r, t)` is the sign of `det[q − p, r − p, t − p]`
//!   (positive when `q − p, r − p, t − p` form a right-handed frame).
//!
//! Code cross-refs: `kernels::{DirectKernel, FilteredKernel, IntegerKernel}`, `crate::fan::sweep`.

mod kernels;

pub use kernels::{DirectKernel, FilteredKernel, IntegerKernel};

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::{Mul, Sub};

use nalgebra::{Scalar, Vector3};
use num_traits::Zero;

/// Scalar usable as a vertex coordinate.
///
/// Only ring operations and a comparison against zero are required, so
/// integers, rationals and floats all qualify. Whether evaluating in `T` is
/// exact is up to the kernel; see `DirectKernel` for the fixed-width bound.
pub trait Coord: Clone + PartialOrd + Debug + Zero + Sub<Output = Self> + Mul<Output = Self> + 'static {}

impl<T> Coord for T where
    T: Clone + PartialOrd + Debug + Zero + Sub<Output = T> + Mul<Output = T> + 'static
{
}

/// Sign of a predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Negative,
    Degenerate,
    Positive,
}

impl Orientation {
    /// Sign of `value`; incomparable values (NaN) map to `Degenerate`.
    #[inline]
    pub fn of<T: Coord>(value: &T) -> Self {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Less) => Orientation::Negative,
            Some(Ordering::Greater) => Orientation::Positive,
            _ => Orientation::Degenerate,
        }
    }

    #[inline]
    pub fn is_degenerate(self) -> bool {
        self == Orientation::Degenerate
    }
}

/// Pluggable geometric predicate capability.
///
/// Implementations must return the mathematically correct sign for every
/// admitted point; callers depend on that for a consistent total order.
pub trait Predicates<T> {
    /// Backend-specific point representation.
    type Point: Clone + Debug;

    /// Admit a coordinate triple, or `None` if the backend cannot represent it
    /// (e.g. NaN or infinite floats).
    fn prepare(&self, p: &Vector3<T>) -> Option<Self::Point>;

    /// Sign of `det[q − p, r − p, t − p]`.
    fn orient3d(&self, p: &Self::Point, q: &Self::Point, r: &Self::Point, t: &Self::Point)
        -> Orientation;

    /// Sign of `(r − p)⊥ · (t − p)⊥`, where `⊥` drops the component along `q − p`.
    ///
    /// For coplanar input this is the in-plane side test: `Positive` when `r`
    /// and `t` lie on the same side of line `pq`, `Negative` when on opposite
    /// sides, `Degenerate` when either lies on the line.
    fn coplanar_orientation(
        &self,
        p: &Self::Point,
        q: &Self::Point,
        r: &Self::Point,
        t: &Self::Point,
    ) -> Orientation;

    /// Exact coincidence test.
    fn coincident(&self, p: &Self::Point, q: &Self::Point) -> bool;

    /// Whether `r` lies on the line through `p` and `q`.
    ///
    /// `(r − p)⊥ · (r − p)⊥ = |(q − p) × (r − p)|² / |q − p|²`, so the
    /// side test of `r` against itself vanishes exactly on the line.
    #[inline]
    fn collinear(&self, p: &Self::Point, q: &Self::Point, r: &Self::Point) -> bool {
        self.coplanar_orientation(p, q, r, r).is_degenerate()
    }
}

#[inline]
pub(crate) fn to_array<T: Scalar>(p: &Vector3<T>) -> [T; 3] {
    [p.x.clone(), p.y.clone(), p.z.clone()]
}

#[inline]
fn diff<T: Coord>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[0].clone() - b[0].clone(),
        a[1].clone() - b[1].clone(),
        a[2].clone() - b[2].clone(),
    ]
}

#[inline]
fn dot<T: Coord>(a: &[T; 3], b: &[T; 3]) -> T {
    a[0].clone() * b[0].clone() + a[1].clone() * b[1].clone() + a[2].clone() * b[2].clone()
}

/// `det[q − p, r − p, t − p]` evaluated in `T`.
pub(crate) fn orient3d_value<T: Coord>(p: &[T; 3], q: &[T; 3], r: &[T; 3], t: &[T; 3]) -> T {
    let a = diff(q, p);
    let b = diff(r, p);
    let c = diff(t, p);
    let m0 = b[1].clone() * c[2].clone() - b[2].clone() * c[1].clone();
    let m1 = b[2].clone() * c[0].clone() - b[0].clone() * c[2].clone();
    let m2 = b[0].clone() * c[1].clone() - b[1].clone() * c[0].clone();
    a[0].clone() * m0 + a[1].clone() * m1 + a[2].clone() * m2
}

/// `(a·a)(b·c) − (a·b)(a·c)` with `a = q − p`, `b = r − p`, `c = t − p`.
///
/// Equals `|a|² · (b⊥ · c⊥)`; since `|a|² > 0` for a proper axis the sign
/// is the sign of the perpendicular dot product, computed without division.
pub(crate) fn coplanar_value<T: Coord>(p: &[T; 3], q: &[T; 3], r: &[T; 3], t: &[T; 3]) -> T {
    let a = diff(q, p);
    let b = diff(r, p);
    let c = diff(t, p);
    dot(&a, &a) * dot(&b, &c) - dot(&a, &b) * dot(&a, &c)
}
