//! Scenario tests for the canonical order and the pivot rebase.

use super::*;
use crate::error::OrderError;
use crate::predicates::{DirectKernel, FilteredKernel, IntegerKernel};
use nalgebra::Vector3;
use num_rational::BigRational;

/// Apex at clockwise angle `deg` about the +z axis (left-hand rule).
fn apex(deg: f64) -> Vector3<f64> {
    let t = deg.to_radians();
    Vector3::new(t.cos(), -t.sin(), 0.5)
}

/// Edge (0, 1) along +z; face `i` is `[d, s, apex_i]` (consistent).
fn fan_at(angles: &[f64]) -> (Vec<Vector3<f64>>, Vec<Face>, Vec<SignedFace>) {
    let mut vertices = vec![Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0)];
    let mut faces = Vec::new();
    let mut adj = Vec::new();
    for (i, &deg) in angles.iter().enumerate() {
        vertices.push(apex(deg));
        faces.push([1, 0, 2 + i]);
        adj.push(SignedFace::new(i, true));
    }
    (vertices, faces, adj)
}

fn order_of(
    v: &[Vector3<f64>],
    f: &[Face],
    adj: &[SignedFace],
) -> Result<Vec<usize>, OrderError> {
    order_with_defaults(&EdgeFan::new(v, f, 0, 1, adj))
}

fn is_rotation(a: &[usize], b: &[usize]) -> bool {
    let n = a.len();
    n == b.len() && (n == 0 || (0..n).any(|k| (0..n).all(|i| a[(i + k) % n] == b[i])))
}

#[test]
fn signed_face_encoding() {
    assert_eq!(SignedFace::new(2, true), SignedFace(3));
    assert_eq!(SignedFace::new(6, false), SignedFace(-7));
    assert_eq!(SignedFace(-7).face_index(), Some(6));
    assert!(!SignedFace(-7).is_consistent());
    assert_eq!(SignedFace(0).face_index(), None);
    assert_eq!(SignedFace::from_face(4, &[5, 0, 1], 0, 1), Some(SignedFace(-5)));
    assert_eq!(SignedFace::from_face(4, &[1, 0, 5], 0, 1), Some(SignedFace(5)));
    assert_eq!(SignedFace::from_face(4, &[1, 2, 5], 0, 1), None);
}

#[test]
fn three_faces_a_third_turn_apart() {
    let (v, f, adj) = fan_at(&[0.0, 120.0, 240.0]);
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 1, 2]);

    // Listing them out of order changes the indices, not the sweep.
    let adj = vec![adj[0], adj[2], adj[1]];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 2, 1]);
}

#[test]
fn sweep_direction_follows_left_hand_rule() {
    // Reversing the edge reverses the sweep.
    let (v, f, adj) = fan_at(&[0.0, 90.0, 200.0, 300.0]);
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 1, 2, 3]);
    let reversed = order_with_defaults(&EdgeFan::new(&v, &f, 1, 0, &adj)).unwrap();
    assert_eq!(reversed, vec![0, 3, 2, 1]);
}

#[test]
fn single_and_empty_fans() {
    let (v, f, adj) = fan_at(&[37.0]);
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0]);
    assert_eq!(order_of(&v, &f, &[]).unwrap(), Vec::<usize>::new());
}

#[test]
fn duplicate_faces_break_ties_by_signed_index() {
    // Face 2 (consistent, record 3) and face 6 (inconsistent, record -7)
    // share the same apex; face 4 sits a quarter turn away.
    let v = vec![
        Vector3::zeros(),
        Vector3::new(0.0, 0.0, 1.0),
        apex(0.0),
        apex(90.0),
    ];
    let mut f = vec![[0, 0, 0]; 7];
    f[2] = [1, 0, 2];
    f[6] = [0, 1, 2];
    f[4] = [1, 0, 3];
    let adj = vec![SignedFace(3), SignedFace(-7), SignedFace(5)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![1, 0, 2]);
    let adj = vec![SignedFace(-7), SignedFace(3), SignedFace(5)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 1, 2]);
    // Reference elsewhere: the tie still resolves the same way.
    let adj = vec![SignedFace(5), SignedFace(3), SignedFace(-7)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 2, 1]);
}

#[test]
fn coplanar_faces_on_opposite_sides() {
    // Exactly representable apexes at 0°, 180° and 90°.
    let v = vec![
        Vector3::zeros(),
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(1.0, 0.0, 0.5),
        Vector3::new(-2.0, 0.0, 0.25),
        Vector3::new(0.0, -1.0, 3.0),
    ];
    let f = vec![[1, 0, 2], [0, 1, 3], [1, 0, 4]];
    let adj = vec![SignedFace(1), SignedFace(-2), SignedFace(3)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 2, 1]);
    let adj = vec![SignedFace(-2), SignedFace(1)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 1]);
    // From 180°, the 0° face is the opposite slot and 90° trails it.
    let adj = vec![SignedFace(-2), SignedFace(3), SignedFace(1)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![0, 2, 1]);
}

#[test]
fn coincident_apex_positions_tie_like_shared_vertices() {
    // Two distinct vertices at the same position, and one further out on the
    // same half-plane: all three share one angular slot.
    let mut v = vec![Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0)];
    v.push(apex(45.0));
    v.push(apex(45.0));
    v.push(apex(45.0) * 2.0);
    v.push(apex(10.0));
    let f = vec![[1, 0, 2], [1, 0, 3], [0, 1, 4], [1, 0, 5]];
    let adj = vec![SignedFace(1), SignedFace(2), SignedFace(-3), SignedFace(4)];
    assert_eq!(order_of(&v, &f, &adj).unwrap(), vec![2, 0, 1, 3]);
}

#[test]
fn invalid_inputs_are_rejected() {
    let (v, mut f, adj) = fan_at(&[0.0, 120.0, 240.0]);
    let fan = |s, d| order_with_defaults(&EdgeFan::new(&v, &f, s, d, &adj));
    assert_eq!(fan(0, 0), Err(OrderError::SameEndpoints { vertex: 0 }));
    assert_eq!(
        fan(0, 9),
        Err(OrderError::VertexOutOfRange { index: 9, count: 5 })
    );

    assert_eq!(
        order_of(&v, &f, &[SignedFace(0)]),
        Err(OrderError::InvalidRecord {
            position: 0,
            record: 0
        })
    );
    assert_eq!(
        order_of(&v, &f, &[SignedFace(-10)]),
        Err(OrderError::FaceOutOfRange { face: 9, count: 3 })
    );

    f[1] = [1, 2, 3];
    assert_eq!(
        order_of(&v, &f, &adj),
        Err(OrderError::FaceMissingEdge { face: 1, s: 0, d: 1 })
    );
}

#[test]
fn degenerate_geometry_is_rejected() {
    // Apex on the axis line (beyond d).
    let (mut v, f, adj) = fan_at(&[0.0, 120.0, 240.0]);
    v[3] = Vector3::new(0.0, 0.0, 2.0);
    assert_eq!(
        order_of(&v, &f, &adj),
        Err(OrderError::DegenerateFace { face: 1, s: 0, d: 1 })
    );
    // Repeated corner: no apex at all.
    let (v, mut f, adj) = fan_at(&[0.0, 120.0]);
    f[0] = [1, 0, 1];
    assert_eq!(
        order_of(&v, &f, &adj),
        Err(OrderError::DegenerateFace { face: 0, s: 0, d: 1 })
    );
    // Zero-length edge.
    let (mut v, f, adj) = fan_at(&[0.0, 120.0]);
    v[1] = v[0];
    assert_eq!(
        order_of(&v, &f, &adj),
        Err(OrderError::DegenerateEdge { s: 0, d: 1 })
    );
    // Non-finite coordinate.
    let (mut v, f, adj) = fan_at(&[0.0, 120.0]);
    v[3].y = f64::NAN;
    assert_eq!(
        order_of(&v, &f, &adj),
        Err(OrderError::InvalidCoordinate { vertex: 3 })
    );
}

#[test]
fn infinite_coordinates_are_invalid_for_every_kernel() {
    let (mut v, f, adj) = fan_at(&[0.0, 120.0]);
    v[2].x = f64::INFINITY;
    let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
    let expected = Err(OrderError::InvalidCoordinate { vertex: 2 });
    assert_eq!(order_with_defaults(&fan), expected);
    let direct = order_facets_around_edge(&DirectKernel::<f64>::new(), &fan, OrderCfg::default());
    assert_eq!(direct, expected);
}

#[test]
fn large_integer_coordinates_order_exactly() {
    // Apexes at 0°, 90°, ~206.6° clockwise about +z, scaled until i64
    // products would wrap.
    let f: Vec<Face> = (0..3).map(|i| [1, 0, 2 + i]).collect();
    let adj: Vec<SignedFace> = (0..3).map(|i| SignedFace::new(i, true)).collect();
    for m in [50_000i64, 1 << 31, 1_000_000_000_000, 4_000_000_000_000_000_000] {
        let v: Vec<Vector3<i64>> = [[0, 0, 0], [0, 0, 2], [2, 0, 1], [0, -2, 1], [-2, 1, 1]]
            .iter()
            .map(|&[x, y, z]| Vector3::new(x * m, y * m, z * m))
            .collect();
        let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
        let order = order_facets_around_edge(&IntegerKernel, &fan, OrderCfg::default()).unwrap();
        assert_eq!(order, vec![0, 1, 2], "scale {m}");
        let pivot = Vector3::new(m, -m, 0);
        let rebased =
            order_facets_around_edge_with_pivot(&IntegerKernel, &fan, &pivot, OrderCfg::default())
                .unwrap();
        assert_eq!(rebased, vec![1, 2, 0], "scale {m}");
    }
}

#[test]
fn debug_flag_does_not_change_order() {
    let (v, f, adj) = fan_at(&[15.0, 300.0, 95.0, 95.0, 181.0]);
    let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
    let quiet = order_facets_around_edge(&FilteredKernel, &fan, OrderCfg::default()).unwrap();
    let loud = order_facets_around_edge(&FilteredKernel, &fan, OrderCfg { debug: true }).unwrap();
    assert_eq!(quiet, loud);
    assert_eq!(quiet, vec![0, 2, 3, 4, 1]);
}

#[test]
fn exact_scalar_types_agree() {
    // Integer apexes at 0°, 45°, 90°, 180°, 270° (clockwise about +z).
    let vi: Vec<Vector3<i64>> = vec![
        Vector3::new(0, 0, 0),
        Vector3::new(0, 0, 4),
        Vector3::new(3, 0, 1),
        Vector3::new(2, -2, 7),
        Vector3::new(0, -5, 2),
        Vector3::new(-1, 0, -3),
        Vector3::new(0, 6, 0),
    ];
    let f: Vec<Face> = (0..5).map(|i| [1, 0, 2 + i]).collect();
    let adj: Vec<SignedFace> = [2usize, 4, 0, 3, 1]
        .iter()
        .map(|&i| SignedFace::new(i, true))
        .collect();
    let fan = EdgeFan::new(&vi, &f, 0, 1, &adj);
    let ints =
        order_facets_around_edge(&DirectKernel::<i64>::new(), &fan, OrderCfg::default()).unwrap();
    // Reference is face 2 (90°): 90°, 180°, 270°, 0°, 45°.
    assert_eq!(ints, vec![0, 3, 1, 2, 4]);

    let vr: Vec<Vector3<BigRational>> = vi
        .iter()
        .map(|p| p.map(|x| BigRational::from_integer(x.into())))
        .collect();
    let fan = EdgeFan::new(&vr, &f, 0, 1, &adj);
    let kernel = DirectKernel::<BigRational>::new();
    let rats = order_facets_around_edge(&kernel, &fan, OrderCfg::default()).unwrap();
    assert_eq!(rats, ints);

    let vf: Vec<Vector3<f64>> = vi.iter().map(|p| p.map(|x| x as f64)).collect();
    let fan = EdgeFan::new(&vf, &f, 0, 1, &adj);
    assert_eq!(order_with_defaults(&fan).unwrap(), ints);
}

#[test]
fn pivot_starts_after_its_slot() {
    let (v, f, adj) = fan_at(&[0.0, 120.0, 240.0]);
    let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
    let at = |deg: f64| order_with_defaults_pivot(&fan, &apex(deg)).unwrap();
    assert_eq!(at(60.0), vec![1, 2, 0]);
    assert_eq!(at(200.0), vec![2, 0, 1]);
    assert_eq!(at(300.0), vec![0, 1, 2]);
    // Pivot in a face's slot: that face is the predecessor.
    assert_eq!(at(0.0), vec![1, 2, 0]);
    assert_eq!(order_with_defaults_pivot(&fan, &(apex(120.0) * 2.0)).unwrap(), vec![2, 0, 1]);
}

#[test]
fn pivot_after_all_duplicates_in_its_slot() {
    let v = vec![
        Vector3::zeros(),
        Vector3::new(0.0, 0.0, 1.0),
        apex(90.0),
        apex(270.0),
    ];
    let f = vec![[1, 0, 2], [0, 1, 2], [1, 0, 3]];
    let adj = vec![SignedFace(1), SignedFace(-2), SignedFace(3)];
    let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
    assert_eq!(order_with_defaults(&fan).unwrap(), vec![1, 0, 2]);
    assert_eq!(order_with_defaults_pivot(&fan, &apex(90.0)).unwrap(), vec![2, 1, 0]);
    assert_eq!(order_with_defaults_pivot(&fan, &apex(45.0)).unwrap(), vec![1, 0, 2]);
}

#[test]
fn pivot_is_a_rotation_of_the_canonical_order() {
    let (v, f, adj) = fan_at(&[10.0, 350.0, 170.0, 171.0, 90.0, 90.0, 265.0]);
    let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
    let canonical = order_with_defaults(&fan).unwrap();
    for step in 0..72 {
        let pivot = apex(step as f64 * 5.0 + 0.5);
        let rebased = order_with_defaults_pivot(&fan, &pivot).unwrap();
        assert!(is_rotation(&canonical, &rebased), "{canonical:?} vs {rebased:?}");
    }
}

#[test]
fn degenerate_pivot_is_rejected() {
    let (v, f, adj) = fan_at(&[0.0, 120.0]);
    let fan = EdgeFan::new(&v, &f, 0, 1, &adj);
    assert_eq!(
        order_with_defaults_pivot(&fan, &Vector3::new(0.0, 0.0, -3.0)),
        Err(OrderError::DegeneratePivot { s: 0, d: 1 })
    );
    assert_eq!(
        order_with_defaults_pivot(&fan, &Vector3::new(f64::INFINITY, 0.0, 0.0)),
        Err(OrderError::InvalidPivot)
    );
    // Still validated when there is nothing to order.
    let empty = EdgeFan::new(&v, &f, 0, 1, &[]);
    assert!(order_with_defaults_pivot(&empty, &Vector3::new(0.0, 0.0, 0.5)).is_err());
    assert_eq!(
        order_with_defaults_pivot(&empty, &apex(10.0)).unwrap(),
        Vec::<usize>::new()
    );
}
