//! Random edge fans with known clockwise angles (replay tokens).
//!
//! Purpose
//! - Deterministic sampler for the faces around one edge, used by property
//!   tests, benches, and the `sample` CLI command. Every fan carries the
//!   clockwise angle of each record, so the expected order is known up front.
//!
//! Model
//! - Random axis `d − s` (or the unit z-axis from the origin), an orthonormal
//!   frame `(u, w)` around it, and `n` apexes at jittered, equally spaced
//!   clockwise angles. Apex heights along the axis and radii are random; they
//!   do not affect the order.
//! - Optional duplicates reuse an existing apex vertex, so they tie exactly.
//! - Face orientations are random; records are shuffled.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `EdgeFan`, `SignedFace::from_face`.

use std::f64::consts::TAU;

use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::fan::{EdgeFan, Face, SignedFace};

/// Face count distribution (faces with distinct apexes).
#[derive(Clone, Copy, Debug)]
pub enum FaceCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl FaceCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            FaceCount::Fixed(n) => n.max(1),
            FaceCount::Uniform { min, max } => {
                let lo = min.max(1);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Random fan configuration.
#[derive(Clone, Copy, Debug)]
pub struct FanCfg {
    pub face_count: FaceCount,
    /// Extra faces sharing the apex of an existing face.
    pub duplicates: usize,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.3].
    pub angle_jitter_frac: f64,
    /// Random axis direction and origin; otherwise `s = 0`, `d = e_z`.
    pub random_axis: bool,
}
impl Default for FanCfg {
    fn default() -> Self {
        Self {
            face_count: FaceCount::Fixed(6),
            duplicates: 0,
            angle_jitter_frac: 0.3,
            random_axis: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Owned fan with the ground-truth clockwise angle of every record.
#[derive(Clone, Debug)]
pub struct RandomFan {
    /// `vertices[0] = s`, `vertices[1] = d`, apexes after that.
    pub vertices: Vec<Vector3<f64>>,
    pub faces: Vec<Face>,
    pub s: usize,
    pub d: usize,
    pub adj_faces: Vec<SignedFace>,
    /// Clockwise angle of record `i` relative to record 0, in `[0, 2π)`.
    pub angles: Vec<f64>,
    u: Vector3<f64>,
    w: Vector3<f64>,
    phase: f64,
}

impl RandomFan {
    /// Borrowed view for the ordering functions.
    pub fn as_fan(&self) -> EdgeFan<'_, f64> {
        EdgeFan::new(&self.vertices, &self.faces, self.s, self.d, &self.adj_faces)
    }

    /// Order implied by `angles`: ascending angle, then signed index, then position.
    pub fn expected_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.adj_faces.len()).collect();
        order.sort_by(|&i, &j| {
            self.angles[i]
                .total_cmp(&self.angles[j])
                .then_with(|| self.adj_faces[i].cmp(&self.adj_faces[j]))
                .then_with(|| i.cmp(&j))
        });
        order
    }

    /// Point off the axis at clockwise `angle` relative to record 0.
    pub fn point_at(&self, angle: f64) -> Vector3<f64> {
        let origin = self.vertices[self.s];
        origin + direction(&self.u, &self.w, self.phase + angle)
    }
}

/// Unit direction at clockwise angle `phi` in the frame `(u, w)`, `u × w` along the axis.
#[inline]
fn direction(u: &Vector3<f64>, w: &Vector3<f64>, phi: f64) -> Vector3<f64> {
    u * phi.cos() - w * phi.sin()
}

fn random_unit<R: Rng>(rng: &mut R) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let n = v.norm();
        if n > 0.1 && n <= 1.0 {
            return v / n;
        }
    }
}

/// Draw a random fan around one edge.
pub fn draw_fan(cfg: FanCfg, tok: ReplayToken) -> RandomFan {
    let mut rng = tok.to_std_rng();
    let n = cfg.face_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.3);

    let (origin, axis) = if cfg.random_axis {
        let origin = Vector3::new(
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-2.0..2.0),
        );
        (origin, random_unit(&mut rng) * rng.gen_range(0.5..3.0))
    } else {
        (Vector3::zeros(), Vector3::z())
    };
    let a = axis.normalize();
    let seed_dir = if a.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    let u = (seed_dir - a * a.dot(&seed_dir)).normalize();
    let w = a.cross(&u);

    let delta = TAU / n as f64;
    let phase = rng.gen::<f64>() * TAU;
    let offsets: Vec<f64> = (0..n)
        .map(|k| k as f64 * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta)
        .collect();

    let mut vertices = vec![origin, origin + axis];
    for &off in &offsets {
        let height = rng.gen_range(-0.5..1.5);
        let radius = rng.gen_range(0.5..2.0);
        vertices.push(origin + axis * height + direction(&u, &w, phase + off) * radius);
    }

    // (apex slot, consistent?) per face.
    let mut slots: Vec<(usize, bool)> = (0..n).map(|k| (k, rng.gen())).collect();
    for _ in 0..cfg.duplicates {
        slots.push((rng.gen_range(0..n), rng.gen()));
    }
    let (s, d) = (0, 1);
    let faces: Vec<Face> = slots
        .iter()
        .map(|&(k, consistent)| {
            let apex = k + 2;
            if consistent {
                [d, s, apex]
            } else {
                [s, d, apex]
            }
        })
        .collect();

    let mut records: Vec<(SignedFace, usize)> = slots
        .iter()
        .enumerate()
        .map(|(f, &(k, consistent))| (SignedFace::new(f, consistent), k))
        .collect();
    records.shuffle(&mut rng);

    let base = offsets[records[0].1];
    let angles = records
        .iter()
        .map(|&(_, k)| (offsets[k] - base).rem_euclid(TAU))
        .collect();
    RandomFan {
        vertices,
        faces,
        s,
        d,
        adj_faces: records.iter().map(|&(r, _)| r).collect(),
        angles,
        u,
        w,
        phase: phase + base,
    }
}
