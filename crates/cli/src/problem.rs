//! JSON problem files read and written by the CLI.

use anyhow::{Context, Result};
use facet_order::prelude::*;
use facet_order::rand::RandomFan;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One edge and the faces around it.
///
/// `adj_faces` is optional; when absent every face containing `{s, d}` is
/// listed in face order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FanFile {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<Face>,
    pub s: usize,
    pub d: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adj_faces: Option<Vec<i64>>,
}

impl FanFile {
    pub fn points(&self) -> Vec<Vec3<f64>> {
        self.vertices.iter().map(|&p| Vec3::from(p)).collect()
    }

    pub fn records(&self) -> Vec<SignedFace> {
        match &self.adj_faces {
            Some(r) => r.iter().map(|&v| SignedFace(v)).collect(),
            None => self
                .faces
                .iter()
                .enumerate()
                .filter_map(|(i, f)| SignedFace::from_face(i, f, self.s, self.d))
                .collect(),
        }
    }
}

impl From<&RandomFan> for FanFile {
    fn from(fan: &RandomFan) -> Self {
        Self {
            vertices: fan.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: fan.faces.clone(),
            s: fan.s,
            d: fan.d,
            adj_faces: Some(fan.adj_faces.iter().map(|r| r.0).collect()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderFile {
    /// Positions into the record list.
    pub order: Vec<usize>,
    /// Records in clockwise order.
    pub records: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<[f64; 3]>,
}

/// Edge weights as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeightFile {
    #[default]
    Unit,
    PerVertex { weights: Vec<f64> },
    Euclidean { positions: Vec<[f64; 3]> },
}

/// Shortest-path query on a vertex adjacency graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    pub adjacency: Vec<Vec<usize>>,
    pub source: usize,
    pub targets: Vec<usize>,
    #[serde(default)]
    pub weights: WeightFile,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathFile {
    pub reached: Option<usize>,
    /// Distance to `reached`.
    pub distance: Option<f64>,
    /// `[reached, …, source]`; empty if no target was reached.
    pub path: Vec<usize>,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Parse `x,y,z` into a point.
pub fn parse_point(s: &str) -> std::result::Result<[f64; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got {s:?}"));
    }
    let mut p = [0.0; 3];
    for (slot, part) in p.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("bad coordinate {part:?}: {e}"))?;
    }
    Ok(p)
}
