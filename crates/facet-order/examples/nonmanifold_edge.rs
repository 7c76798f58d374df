//! Walk around a non-manifold "book" edge.
//!
//! Purpose
//! - Show the typical call sequence on a mesh fragment where five triangles
//!   share the edge (0, 1): build the adjacent-face records, order them
//!   clockwise, rebase the order at a pivot, then route between two apexes on
//!   the vertex graph.
//!
//! Code: crates/facet-order/src/fan/sort.rs::order_with_defaults

use std::collections::BTreeSet;

use facet_order::prelude::*;
use facet_order::shortest_path::path_to;

fn main() {
    // Spine along +z; five pages with apexes around it.
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(1.0, 0.0, 0.5),
        Vec3::new(0.0, 1.0, 0.5),
        Vec3::new(-1.0, 0.2, 0.5),
        Vec3::new(-0.3, -1.0, 0.5),
        Vec3::new(0.7, -0.7, 0.5),
    ];
    let faces: Vec<Face> = vec![[1, 0, 2], [0, 1, 3], [1, 0, 4], [0, 1, 5], [1, 0, 6]];
    let (s, d) = (0, 1);
    let adj: Vec<SignedFace> = faces
        .iter()
        .enumerate()
        .filter_map(|(i, f)| SignedFace::from_face(i, f, s, d))
        .collect();
    let fan = EdgeFan::new(&vertices, &faces, s, d, &adj);

    let order = order_with_defaults(&fan).expect("valid fan");
    let labels: Vec<i64> = order.iter().map(|&i| adj[i].0).collect();
    println!("edge=({s},{d}) records={:?}", adj.iter().map(|r| r.0).collect::<Vec<_>>());
    println!("clockwise order={order:?} records={labels:?}");

    let pivot = Vec3::new(-1.0, -1.0, 0.0);
    let rebased = order_with_defaults_pivot(&fan, &pivot).expect("valid pivot");
    println!("pivot={:?} order={rebased:?}", pivot.as_slice());

    // Apex-to-apex route over the fan's edges.
    let mut adjacency = vec![Vec::new(); vertices.len()];
    for f in &faces {
        for k in 0..3 {
            let (a, b) = (f[k], f[(k + 1) % 3]);
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
    }
    let targets = BTreeSet::from([5]);
    let res = dijkstra(2, &targets, &adjacency, EdgeWeights::Euclidean(&vertices))
        .expect("valid graph");
    if let Some(t) = res.reached {
        println!(
            "route 2 -> {t}: distance={:.6} path={:?}",
            res.min_distance[t],
            path_to(t, &res.previous)
        );
    }
}
