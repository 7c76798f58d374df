use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use facet_order::prelude::*;
use serde_json::json;
use std::collections::BTreeSet;
use std::panic::Location;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod problem;
mod provenance;

use problem::{parse_point, read_json, write_json, FanFile, GraphFile, OrderFile, PathFile, WeightFile};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Order faces around mesh edges and related utilities")]
struct Cmd {
    /// Free-form run tag; propagated to provenance and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    /// Log at debug level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Order the faces around an edge (optionally rebased at a pivot)
    Order {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Pivot point as x,y,z
        #[arg(long, value_parser = parse_point)]
        pivot: Option<[f64; 3]>,
        /// Trace sectors and the final order
        #[arg(long)]
        debug: bool,
    },
    /// Shortest path from a source to the nearest target
    Path {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a random fan
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 6)]
        faces: usize,
        #[arg(long, default_value_t = 0)]
        duplicates: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    let tag = cmd.tag;
    match cmd.action {
        Action::Order {
            input,
            out,
            pivot,
            debug,
        } => order(input, out, pivot, debug, tag),
        Action::Path { input, out } => path(input, out, tag),
        Action::Sample {
            seed,
            index,
            faces,
            duplicates,
            out,
        } => sample(seed, index, faces, duplicates, out, tag),
        Action::Report => report(tag),
    }
}

fn order(
    input: PathBuf,
    out: PathBuf,
    pivot: Option<[f64; 3]>,
    debug: bool,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), ?pivot, tag = ?tag, "order");
    let file: FanFile = read_json(&input)?;
    let vertices = file.points();
    let records = file.records();
    let fan = EdgeFan::new(&vertices, &file.faces, file.s, file.d, &records);
    let cfg = OrderCfg { debug };
    let order = match pivot {
        Some(p) => {
            order_facets_around_edge_with_pivot(&FilteredKernel, &fan, &Vec3::from(p), cfg)?
        }
        None => order_facets_around_edge(&FilteredKernel, &fan, cfg)?,
    };
    tracing::info!(faces = order.len(), "ordered");
    let result = OrderFile {
        records: order.iter().map(|&i| records[i].0).collect(),
        order,
        pivot,
    };
    write_json(&out, &result)?;
    let params = json!({
        "input": input.to_string_lossy(),
        "s": file.s,
        "d": file.d,
        "faces": records.len(),
        "pivot": pivot,
        "debug": debug
    });
    write_sidecar(&out, &Payload::new("order", params, tag))?;
    Ok(())
}

fn path(input: PathBuf, out: PathBuf, tag: Option<String>) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), tag = ?tag, "path");
    let graph: GraphFile = read_json(&input)?;
    let targets: BTreeSet<usize> = graph.targets.iter().copied().collect();
    let positions: Vec<Vec3<f64>>;
    let weights = match &graph.weights {
        WeightFile::Unit => EdgeWeights::Unit,
        WeightFile::PerVertex { weights } => EdgeWeights::PerVertex(weights),
        WeightFile::Euclidean { positions: raw } => {
            positions = raw.iter().map(|&p| Vec3::from(p)).collect();
            EdgeWeights::Euclidean(&positions)
        }
    };
    let res = dijkstra(graph.source, &targets, &graph.adjacency, weights)?;
    let result = match res.reached {
        Some(t) => PathFile {
            reached: Some(t),
            distance: Some(res.min_distance[t]),
            path: res.path_to(t),
        },
        None => {
            tracing::warn!(source = graph.source, "no target reachable");
            PathFile {
                reached: None,
                distance: None,
                path: Vec::new(),
            }
        }
    };
    write_json(&out, &result)?;
    let params = json!({
        "input": input.to_string_lossy(),
        "source": graph.source,
        "targets": graph.targets,
        "vertices": graph.adjacency.len()
    });
    write_sidecar(&out, &Payload::new("path", params, tag))?;
    Ok(())
}

fn sample(
    seed: u64,
    index: u64,
    faces: usize,
    duplicates: usize,
    out: PathBuf,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(seed, index, faces, duplicates, out = %out.display(), tag = ?tag, "sample");
    if faces == 0 {
        return Err(anyhow!("--faces must be at least 1"));
    }
    let cfg = FanCfg {
        face_count: FaceCount::Fixed(faces),
        duplicates,
        ..FanCfg::default()
    };
    let fan = draw_fan(cfg, ReplayToken { seed, index });
    write_json(&out, &FanFile::from(&fan))?;
    let params = json!({
        "seed": seed,
        "index": index,
        "faces": faces,
        "duplicates": duplicates,
        "angles": fan.angles
    });
    write_sidecar(&out, &Payload::new("sample", params, tag))?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let payload = Payload::new("report", json!({}), tag);
    let doc = provenance::document(&payload, &[], Location::caller());
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
