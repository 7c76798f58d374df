//! Single-source shortest paths on a vertex adjacency graph (Dijkstra).
//!
//! Purpose
//! - Small helper consumed next to the facet-ordering code: walk from a source
//!   vertex to the nearest of a set of targets, then reconstruct the path.
//!
//! Conventions
//! - `adjacency[u]` lists the neighbors of `u`; edges are directed as listed.
//! - Weights are nonnegative. `PerVertex` charges `weights[u]` for leaving `u`.
//! - The search stops as soon as a target is popped, so distances of vertices
//!   farther than that target are upper bounds (or infinite).
//! - `None` in `previous` marks the source and unreached vertices.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use nalgebra::Vector3;

use crate::error::PathError;

/// Edge weights for [`dijkstra`].
#[derive(Clone, Copy, Debug)]
pub enum EdgeWeights<'a> {
    /// Every edge costs 1.
    Unit,
    /// Leaving vertex `u` costs `weights[u]`.
    PerVertex(&'a [f64]),
    /// Edge `(u, v)` costs `|positions[u] − positions[v]|`.
    Euclidean(&'a [Vector3<f64>]),
}

impl EdgeWeights<'_> {
    fn validate(&self, count: usize) -> Result<(), PathError> {
        match *self {
            EdgeWeights::Unit => Ok(()),
            EdgeWeights::PerVertex(w) => {
                if w.len() != count {
                    return Err(PathError::WeightCount {
                        expected: count,
                        actual: w.len(),
                    });
                }
                match w.iter().position(|&x| !(x >= 0.0)) {
                    Some(vertex) => Err(PathError::InvalidWeight {
                        vertex,
                        weight: w[vertex],
                    }),
                    None => Ok(()),
                }
            }
            EdgeWeights::Euclidean(p) if p.len() != count => Err(PathError::WeightCount {
                expected: count,
                actual: p.len(),
            }),
            EdgeWeights::Euclidean(_) => Ok(()),
        }
    }

    #[inline]
    fn cost(&self, u: usize, v: usize) -> f64 {
        match *self {
            EdgeWeights::Unit => 1.0,
            EdgeWeights::PerVertex(w) => w[u],
            EdgeWeights::Euclidean(p) => (p[u] - p[v]).norm(),
        }
    }
}

/// Result of a single-source search.
#[derive(Clone, Debug, PartialEq)]
pub struct ShortestPaths {
    /// First target reached, if any.
    pub reached: Option<usize>,
    /// Tentative distance from the source (`f64::INFINITY` if unreached).
    pub min_distance: Vec<f64>,
    /// Predecessor on the best known path.
    pub previous: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Path from `vertex` back to the source; see [`path_to`].
    #[inline]
    pub fn path_to(&self, vertex: usize) -> Vec<usize> {
        path_to(vertex, &self.previous)
    }
}

/// Heap entry ordered as a min-heap on (distance, vertex).
#[derive(Clone, Copy, Debug)]
struct State {
    distance: f64,
    vertex: usize,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Dijkstra from `source` until the first vertex of `targets` is settled.
///
/// Stale heap entries are skipped on pop instead of being removed on
/// relaxation.
pub fn dijkstra(
    source: usize,
    targets: &BTreeSet<usize>,
    adjacency: &[Vec<usize>],
    weights: EdgeWeights<'_>,
) -> Result<ShortestPaths, PathError> {
    let n = adjacency.len();
    if source >= n {
        return Err(PathError::SourceOutOfRange {
            vertex: source,
            count: n,
        });
    }
    for (vertex, neighbors) in adjacency.iter().enumerate() {
        if let Some(&neighbor) = neighbors.iter().find(|&&v| v >= n) {
            return Err(PathError::NeighborOutOfRange {
                vertex,
                neighbor,
                count: n,
            });
        }
    }
    weights.validate(n)?;

    let mut min_distance = vec![f64::INFINITY; n];
    let mut previous = vec![None; n];
    let mut heap = BinaryHeap::with_capacity(n);
    min_distance[source] = 0.0;
    heap.push(State {
        distance: 0.0,
        vertex: source,
    });

    while let Some(State { distance, vertex: u }) = heap.pop() {
        if distance > min_distance[u] {
            continue;
        }
        if targets.contains(&u) {
            return Ok(ShortestPaths {
                reached: Some(u),
                min_distance,
                previous,
            });
        }
        for &v in &adjacency[u] {
            let through_u = distance + weights.cost(u, v);
            if through_u < min_distance[v] {
                min_distance[v] = through_u;
                previous[v] = Some(u);
                heap.push(State {
                    distance: through_u,
                    vertex: v,
                });
            }
        }
    }
    Ok(ShortestPaths {
        reached: None,
        min_distance,
        previous,
    })
}

/// Follow predecessors from `vertex` until the chain ends.
///
/// Returns `[vertex, …, source]`; a vertex without predecessor yields `[vertex]`.
pub fn path_to(vertex: usize, previous: &[Option<usize>]) -> Vec<usize> {
    let mut path = vec![vertex];
    let mut cur = vertex;
    while let Some(p) = previous.get(cur).copied().flatten() {
        path.push(p);
        cur = p;
    }
    path
}
