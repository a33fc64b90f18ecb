//! Engine runs and their on-disk forms (JSON report, CSV of hull vertices).

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ValueEnum;
use hull2d::polygon::sort_ccw;
use hull2d::{gift_wrap_with, quick_hull_with, HullCfg, Point, Trace};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[value(name = "quickhull")]
    QuickHull,
    #[value(name = "giftwrap")]
    GiftWrap,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuickHull => write!(f, "quickhull"),
            Self::GiftWrap => write!(f, "giftwrap"),
        }
    }
}

/// One timed engine run.
///
/// `hull` is the engine's path order for gift wrapping. QuickHull returns a set; it is
/// sorted counter-clockwise here for presentation only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineRun {
    pub engine: Engine,
    pub elapsed_ms: f64,
    pub hull: Vec<Point>,
    pub trace: Trace,
}

impl EngineRun {
    pub fn vertex_set(&self) -> HashSet<Point> {
        self.hull.iter().copied().collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub source: String,
    pub points: usize,
    /// The input field, listed by `replay` before the steps. Absent in older reports.
    #[serde(default)]
    pub field: Vec<Point>,
    pub runs: Vec<EngineRun>,
}

pub fn run_engine(engine: Engine, field: &[Point], cfg: HullCfg) -> EngineRun {
    let start = Instant::now();
    let (hull, trace) = match engine {
        Engine::QuickHull => {
            let (set, trace) = quick_hull_with(field, cfg);
            (set.into_iter().collect::<Vec<_>>(), trace)
        }
        Engine::GiftWrap => gift_wrap_with(field, cfg),
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    let hull = match engine {
        Engine::QuickHull => sort_ccw(hull),
        Engine::GiftWrap => hull,
    };
    EngineRun {
        engine,
        elapsed_ms,
        hull,
        trace,
    }
}

pub fn write_json(path: &Path, report: &RunReport) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(report)?;
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

pub fn read_json(path: &Path) -> Result<RunReport> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// One row per hull vertex: `engine, order, x, y`.
pub fn hull_frame(runs: &[EngineRun]) -> PolarsResult<DataFrame> {
    let rows = runs.iter().flat_map(|r| {
        r.hull
            .iter()
            .enumerate()
            .map(move |(i, p)| (r.engine.to_string(), i as u32, p.x, p.y))
    });
    let (mut engine, mut order, mut xs, mut ys) = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
    for (e, i, x, y) in rows {
        engine.push(e);
        order.push(i);
        xs.push(x);
        ys.push(y);
    }
    df!(
        "engine" => engine,
        "order" => order,
        "x" => xs,
        "y" => ys
    )
}

pub fn write_hull_csv(path: &Path, runs: &[EngineRun]) -> Result<()> {
    let mut frame = hull_frame(runs)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
