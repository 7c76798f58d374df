//! Input types for ordering faces around an edge.

use nalgebra::Vector3;

/// Triangle as an ordered triple of vertex indices; the order is its orientation.
pub type Face = [usize; 3];

/// Adjacent-face record: `±(face_index + 1)`.
///
/// Positive when the face is consistently oriented, i.e. it contains the
/// directed edge `(d, s)`; negative otherwise. Zero encodes no face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SignedFace(pub i64);

impl SignedFace {
    /// Encode face `face` with the given orientation flag.
    #[inline]
    pub fn new(face: usize, consistent: bool) -> Self {
        let magnitude = face as i64 + 1;
        SignedFace(if consistent { magnitude } else { -magnitude })
    }

    /// Record for `face` around the directed edge `(s, d)`, or `None` if the
    /// face does not contain `{s, d}` as an edge.
    pub fn from_face(index: usize, face: &Face, s: usize, d: usize) -> Option<Self> {
        let directed = |a: usize, b: usize| (0..3).any(|i| face[i] == a && face[(i + 1) % 3] == b);
        if directed(d, s) {
            Some(Self::new(index, true))
        } else if directed(s, d) {
            Some(Self::new(index, false))
        } else {
            None
        }
    }

    /// Underlying face index, or `None` for the invalid record `0`.
    #[inline]
    pub fn face_index(self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        usize::try_from(self.0.unsigned_abs() - 1).ok()
    }

    #[inline]
    pub fn is_consistent(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for SignedFace {
    #[inline]
    fn from(v: i64) -> Self {
        SignedFace(v)
    }
}

/// Borrowed description of one edge and the faces around it.
///
/// Nothing is retained past the call that consumes it.
#[derive(Clone, Copy, Debug)]
pub struct EdgeFan<'a, T> {
    pub vertices: &'a [Vector3<T>],
    pub faces: &'a [Face],
    /// Source of the directed edge.
    pub s: usize,
    /// Destination of the directed edge; the sweep axis is `d − s`.
    pub d: usize,
    pub adj_faces: &'a [SignedFace],
}

impl<'a, T> EdgeFan<'a, T> {
    #[inline]
    pub fn new(
        vertices: &'a [Vector3<T>],
        faces: &'a [Face],
        s: usize,
        d: usize,
        adj_faces: &'a [SignedFace],
    ) -> Self {
        Self {
            vertices,
            faces,
            s,
            d,
            adj_faces,
        }
    }

    /// Number of adjacent faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.adj_faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.adj_faces.is_empty()
    }
}

/// Ordering configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct OrderCfg {
    /// Emit `tracing` debug events (sectors, final order). Never changes results.
    pub debug: bool,
}
