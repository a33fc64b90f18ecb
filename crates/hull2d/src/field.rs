//! Point-field acquisition: seeded random fields and `"x,y"` text files.
//!
//! - `generate_field`: `count` unique points, uniform in `[0, field_size)²`, reproducible
//!   per seed.
//! - `parse_points`: one `x,y` record per line. Blank lines are ignored; malformed records
//!   are skipped with a warning and parsing continues. Only I/O failures are errors.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::point::Point;

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("invalid field params: {reason}")]
    InvalidParams { reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FieldError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Random field parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldCfg {
    pub count: usize,
    /// Side length of the square `[0, field_size)²`.
    pub field_size: f64,
}

impl Default for FieldCfg {
    fn default() -> Self {
        Self {
            count: 100_000,
            field_size: 1_000_000.0,
        }
    }
}

impl FieldCfg {
    fn validate(&self) -> Result<(), FieldError> {
        if self.count == 0 {
            return Err(FieldError::invalid("count must be > 0"));
        }
        if !self.field_size.is_finite() || self.field_size <= 0.0 {
            return Err(FieldError::invalid("field_size must be finite and positive"));
        }
        Ok(())
    }
}

/// Draw `cfg.count` distinct points uniformly from the field square.
pub fn generate_field(cfg: FieldCfg, seed: u64) -> Result<Vec<Point>, FieldError> {
    cfg.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let coord = Uniform::new(0.0, cfg.field_size);
    let mut seen: HashSet<Point> = HashSet::with_capacity(cfg.count);
    let mut field = Vec::with_capacity(cfg.count);
    while field.len() < cfg.count {
        let p = Point::new(coord.sample(&mut rng), coord.sample(&mut rng));
        if seen.insert(p) {
            field.push(p);
        }
    }
    tracing::debug!(count = field.len(), seed, "generated field");
    Ok(field)
}

/// Parse `x,y` records, skipping malformed lines.
pub fn parse_points<R: BufRead>(reader: R) -> Result<Vec<Point>, FieldError> {
    let mut field = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() {
            continue;
        }
        match parse_record(record) {
            Some(p) => field.push(p),
            None => tracing::warn!(line = idx + 1, record, "skipping malformed point record"),
        }
    }
    Ok(field)
}

fn parse_record(record: &str) -> Option<Point> {
    let (xs, ys) = record.split_once(',')?;
    let x: f64 = xs.trim().parse().ok()?;
    let y: f64 = ys.trim().parse().ok()?;
    let p = Point::new(x, y);
    p.is_finite().then_some(p)
}

pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, FieldError> {
    let file = File::open(path)?;
    parse_points(BufReader::new(file))
}

/// Write one `x,y` record per point. `f64` display round-trips exactly.
pub fn write_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<(), FieldError> {
    let mut out = BufWriter::new(File::create(path)?);
    for p in points {
        writeln!(out, "{},{}", p.x, p.y)?;
    }
    out.flush()?;
    Ok(())
}
