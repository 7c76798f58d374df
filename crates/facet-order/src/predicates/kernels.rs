//! Predicate backends.
//!
//! - `DirectKernel<T>`: evaluates in `T`. Exact for unbounded `T`
//!   (`BigRational`) and for fixed-width integers with coordinates below
//!   `2^13` in magnitude; for floats it is the fast path with no robustness
//!   guarantee.
//! - `IntegerKernel`: `i64` input at any magnitude; checked `i128`
//!   arithmetic, exact `BigRational` fallback on overflow.
//! - `FilteredKernel`: `f64` input, floating-point filter with a static error
//!   bound, exact `BigRational` fallback when the sign is not certified.

use std::marker::PhantomData;

use nalgebra::Vector3;
use num_rational::BigRational;

use super::{coplanar_value, orient3d_value, to_array, Coord, Orientation, Predicates};

/// Kernel that evaluates every predicate directly in the coordinate type.
///
/// No widening happens: `coplanar_orientation` is degree 4 in the coordinate
/// differences, so fixed-width integers overflow once coordinates exceed
/// about `2^13` (`i64`). Use [`IntegerKernel`] for larger `i64` input.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectKernel<T> {
    _scalar: PhantomData<T>,
}

impl<T> DirectKernel<T> {
    #[inline]
    pub fn new() -> Self {
        Self {
            _scalar: PhantomData,
        }
    }
}

impl<T: Coord> Predicates<T> for DirectKernel<T> {
    type Point = [T; 3];

    fn prepare(&self, p: &Vector3<T>) -> Option<[T; 3]> {
        let zero = T::zero();
        // x − x is zero exactly for finite values; NaN and ±inf give NaN.
        if p.iter().all(|x| x.clone() - x.clone() == zero) {
            Some(to_array(p))
        } else {
            None
        }
    }

    #[inline]
    fn orient3d(&self, p: &[T; 3], q: &[T; 3], r: &[T; 3], t: &[T; 3]) -> Orientation {
        Orientation::of(&orient3d_value(p, q, r, t))
    }

    #[inline]
    fn coplanar_orientation(&self, p: &[T; 3], q: &[T; 3], r: &[T; 3], t: &[T; 3]) -> Orientation {
        Orientation::of(&coplanar_value(p, q, r, t))
    }

    #[inline]
    fn coincident(&self, p: &[T; 3], q: &[T; 3]) -> bool {
        p == q
    }
}

/// Unit roundoff of `f64` (2^-53).
const UNIT_ROUNDOFF: f64 = f64::EPSILON / 2.0;
/// Relative error bound for `orient3d_value` against its permanent.
const ORIENT3D_ERR: f64 = 16.0 * UNIT_ROUNDOFF;
/// Relative error bound for `coplanar_value` against its magnitude.
const COPLANAR_ERR: f64 = 32.0 * UNIT_ROUNDOFF;
/// Below this magnitude underflowed products may dominate; go exact.
const UNDERFLOW_GUARD: f64 = 1e-200;

/// `f64` point with its exact rational image.
#[derive(Clone, Debug)]
pub struct FilteredPoint {
    approx: [f64; 3],
    exact: [BigRational; 3],
}

/// Exact predicates for `f64` coordinates.
///
/// Every `f64` is a dyadic rational, so the exact fallback converts inputs
/// losslessly and evaluates the same polynomial in `BigRational`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilteredKernel;

impl FilteredKernel {
    #[inline]
    pub fn new() -> Self {
        FilteredKernel
    }
}

/// Sign of `approx` if `|approx|` clears the error bound, `None` otherwise.
#[inline]
fn certified(approx: f64, magnitude: f64, rel_err: f64) -> Option<Orientation> {
    if !(magnitude >= UNDERFLOW_GUARD) {
        return None;
    }
    let bound = rel_err * magnitude;
    if approx > bound {
        Some(Orientation::Positive)
    } else if approx < -bound {
        Some(Orientation::Negative)
    } else {
        None
    }
}

#[inline]
fn abs_diff(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [(a[0] - b[0]).abs(), (a[1] - b[1]).abs(), (a[2] - b[2]).abs()]
}

#[inline]
fn abs_dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn orient3d_permanent(p: &[f64; 3], q: &[f64; 3], r: &[f64; 3], t: &[f64; 3]) -> f64 {
    let a = abs_diff(q, p);
    let b = abs_diff(r, p);
    let c = abs_diff(t, p);
    a[0] * (b[1] * c[2] + b[2] * c[1])
        + a[1] * (b[2] * c[0] + b[0] * c[2])
        + a[2] * (b[0] * c[1] + b[1] * c[0])
}

fn coplanar_magnitude(p: &[f64; 3], q: &[f64; 3], r: &[f64; 3], t: &[f64; 3]) -> f64 {
    let a = abs_diff(q, p);
    let b = abs_diff(r, p);
    let c = abs_diff(t, p);
    abs_dot(&a, &a) * abs_dot(&b, &c) + abs_dot(&a, &b) * abs_dot(&a, &c)
}

impl Predicates<f64> for FilteredKernel {
    type Point = FilteredPoint;

    fn prepare(&self, p: &Vector3<f64>) -> Option<FilteredPoint> {
        let approx = to_array(p);
        let exact = [
            BigRational::from_float(approx[0])?,
            BigRational::from_float(approx[1])?,
            BigRational::from_float(approx[2])?,
        ];
        Some(FilteredPoint { approx, exact })
    }

    fn orient3d(
        &self,
        p: &FilteredPoint,
        q: &FilteredPoint,
        r: &FilteredPoint,
        t: &FilteredPoint,
    ) -> Orientation {
        let (pa, qa, ra, ta) = (&p.approx, &q.approx, &r.approx, &t.approx);
        let approx = orient3d_value(pa, qa, ra, ta);
        certified(approx, orient3d_permanent(pa, qa, ra, ta), ORIENT3D_ERR).unwrap_or_else(|| {
            Orientation::of(&orient3d_value(&p.exact, &q.exact, &r.exact, &t.exact))
        })
    }

    fn coplanar_orientation(
        &self,
        p: &FilteredPoint,
        q: &FilteredPoint,
        r: &FilteredPoint,
        t: &FilteredPoint,
    ) -> Orientation {
        let (pa, qa, ra, ta) = (&p.approx, &q.approx, &r.approx, &t.approx);
        let approx = coplanar_value(pa, qa, ra, ta);
        certified(approx, coplanar_magnitude(pa, qa, ra, ta), COPLANAR_ERR).unwrap_or_else(|| {
            Orientation::of(&coplanar_value(&p.exact, &q.exact, &r.exact, &t.exact))
        })
    }

    #[inline]
    fn coincident(&self, p: &FilteredPoint, q: &FilteredPoint) -> bool {
        p.approx == q.approx
    }
}

/// Exact predicates for `i64` coordinates of any magnitude.
///
/// Coordinate differences always fit `i128`; products are checked and any
/// overflow reevaluates the same polynomial in `BigRational`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerKernel;

impl IntegerKernel {
    #[inline]
    pub fn new() -> Self {
        IntegerKernel
    }
}

fn exact(p: &[i64; 3]) -> [BigRational; 3] {
    p.map(|x| BigRational::from_integer(x.into()))
}

#[inline]
fn wide_diff(a: &[i64; 3], b: &[i64; 3]) -> [i128; 3] {
    [
        a[0] as i128 - b[0] as i128,
        a[1] as i128 - b[1] as i128,
        a[2] as i128 - b[2] as i128,
    ]
}

#[inline]
fn checked_dot(a: &[i128; 3], b: &[i128; 3]) -> Option<i128> {
    a[0]
        .checked_mul(b[0])?
        .checked_add(a[1].checked_mul(b[1])?)?
        .checked_add(a[2].checked_mul(b[2])?)
}

fn checked_orient3d(p: &[i64; 3], q: &[i64; 3], r: &[i64; 3], t: &[i64; 3]) -> Option<i128> {
    let a = wide_diff(q, p);
    let b = wide_diff(r, p);
    let c = wide_diff(t, p);
    let minor = |i: usize, j: usize| -> Option<i128> {
        b[i].checked_mul(c[j])?.checked_sub(b[j].checked_mul(c[i])?)
    };
    let m = [minor(1, 2)?, minor(2, 0)?, minor(0, 1)?];
    checked_dot(&a, &m)
}

fn checked_coplanar(p: &[i64; 3], q: &[i64; 3], r: &[i64; 3], t: &[i64; 3]) -> Option<i128> {
    let a = wide_diff(q, p);
    let b = wide_diff(r, p);
    let c = wide_diff(t, p);
    let lhs = checked_dot(&a, &a)?.checked_mul(checked_dot(&b, &c)?)?;
    let rhs = checked_dot(&a, &b)?.checked_mul(checked_dot(&a, &c)?)?;
    lhs.checked_sub(rhs)
}

impl Predicates<i64> for IntegerKernel {
    type Point = [i64; 3];

    #[inline]
    fn prepare(&self, p: &Vector3<i64>) -> Option<[i64; 3]> {
        Some(to_array(p))
    }

    fn orient3d(&self, p: &[i64; 3], q: &[i64; 3], r: &[i64; 3], t: &[i64; 3]) -> Orientation {
        match checked_orient3d(p, q, r, t) {
            Some(v) => Orientation::of(&v),
            None => Orientation::of(&orient3d_value(&exact(p), &exact(q), &exact(r), &exact(t))),
        }
    }

    fn coplanar_orientation(
        &self,
        p: &[i64; 3],
        q: &[i64; 3],
        r: &[i64; 3],
        t: &[i64; 3],
    ) -> Orientation {
        match checked_coplanar(p, q, r, t) {
            Some(v) => Orientation::of(&v),
            None => Orientation::of(&coplanar_value(&exact(p), &exact(q), &exact(r), &exact(t))),
        }
    }

    #[inline]
    fn coincident(&self, p: &[i64; 3], q: &[i64; 3]) -> bool {
        p == q
    }
}
