//! Run both engines on one random field and print vertex counts and timings.
//!
//! Usage:
//!   cargo run -p hull2d --release --example compare_engines -- 100000

use std::time::Instant;

use hull2d::field::{generate_field, FieldCfg};
use hull2d::{gift_wrap, quick_hull};

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000);
    let field = match generate_field(
        FieldCfg {
            count,
            ..FieldCfg::default()
        },
        2025,
    ) {
        Ok(f) => f,
        Err(err) => {
            eprintln!("compare_engines: {err}");
            return;
        }
    };

    let t = Instant::now();
    let (qh, qh_trace) = quick_hull(&field);
    let qh_ms = t.elapsed().as_secs_f64() * 1e3;

    let t = Instant::now();
    let (gw, gw_trace) = gift_wrap(&field);
    let gw_ms = t.elapsed().as_secs_f64() * 1e3;

    println!("quickhull: {} vertices, {} steps, {qh_ms:.3} ms", qh.len(), qh_trace.len());
    println!("giftwrap:  {} vertices, {} steps, {gw_ms:.3} ms", gw.len(), gw_trace.len());
    println!("agree: {}", gw.iter().all(|p| qh.contains(p)) && gw.len() == qh.len());
}
