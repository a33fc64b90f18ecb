//! Text playback of a recorded run: the input field first, then the trace one step per tick.

use std::io::Write;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use hull2d::{Point, Step};

use crate::report::EngineRun;

/// Playback timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after the field is listed, before the first step.
    pub field_pause: Duration,
    /// Pause after every step.
    pub step_delay: Duration,
}

impl Pacing {
    pub const ZERO: Self = Self {
        field_pause: Duration::ZERO,
        step_delay: Duration::ZERO,
    };
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            field_pause: Duration::from_millis(1000),
            step_delay: Duration::from_millis(500),
        }
    }
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

/// List `field`, pause, then write each step of `run.trace` to `out`.
/// Returns the number of steps played.
pub fn play<W: Write>(
    field: &[Point],
    run: &EngineRun,
    mut out: W,
    pacing: Pacing,
) -> Result<usize> {
    if !run.trace.is_replayable() {
        tracing::warn!(engine = %run.engine, "trace has edges before their endpoints");
    }
    if field.is_empty() {
        tracing::warn!(engine = %run.engine, "report carries no input field");
    }
    writeln!(
        out,
        "{}: {} points, {} steps, {} hull vertices",
        run.engine,
        field.len(),
        run.trace.len(),
        run.hull.len()
    )?;
    for p in field {
        writeln!(out, "[field] ({}, {})", p.x, p.y)?;
    }
    out.flush()?;
    pause(pacing.field_pause);

    for (i, step) in run.trace.steps().iter().enumerate() {
        match step {
            Step::Point(p) => writeln!(out, "[{i:>5}] point ({}, {})", p.x, p.y)?,
            Step::Edge { from, to } => writeln!(
                out,
                "[{i:>5}] edge  ({}, {}) -> ({}, {})",
                from.x, from.y, to.x, to.y
            )?,
        }
        out.flush()?;
        pause(pacing.step_delay);
    }
    Ok(run.trace.len())
}
