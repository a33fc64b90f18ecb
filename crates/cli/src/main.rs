use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hull2d::field::{generate_field, read_points, write_points, FieldCfg};
use hull2d::{HullCfg, Point};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod provenance;
mod replay;
mod report;

use replay::Pacing;
use report::{Engine, EngineRun, RunReport};

#[derive(Parser)]
#[command(name = "hull2d")]
#[command(about = "Convex hulls via QuickHull and gift wrapping, with replayable step traces")]
struct Cmd {
    /// Worker threads for the parallel engines (default: one per core)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Write a random point field as `x,y` lines
    Generate {
        #[command(flatten)]
        field: FieldArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Time the engines on a field and print their hulls
    Run(RunArgs),
    /// Play back the trace of one engine from a JSON report
    Replay {
        #[arg(long)]
        trace: PathBuf,
        /// Engine to replay (default: first run in the report)
        #[arg(long, value_enum)]
        engine: Option<Engine>,
        /// Pause after each step
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
        /// Pause after the field is listed, before the first step
        #[arg(long, default_value_t = 1000)]
        field_pause_ms: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct FieldArgs {
    #[arg(long, default_value_t = 100_000)]
    count: usize,
    /// Points are drawn from `[0, field_size)²`
    #[arg(long, default_value_t = 1_000_000.0)]
    field_size: f64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

impl FieldArgs {
    fn cfg(&self) -> FieldCfg {
        FieldCfg {
            count: self.count,
            field_size: self.field_size,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    /// Read `x,y` records from this file instead of generating a field
    #[arg(long)]
    input: Option<PathBuf>,
    #[command(flatten)]
    field: FieldArgs,
    #[arg(long, value_enum, default_value_t = Algo::Both)]
    algo: Algo,
    /// Point scans below this size run sequentially
    #[arg(long, default_value_t = HullCfg::default().parallel_cutoff)]
    parallel_cutoff: usize,
    /// Write a JSON report (hulls + traces) and its provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write hull vertices as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Do not print hull vertices
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Algo {
    #[value(name = "quickhull")]
    QuickHull,
    #[value(name = "giftwrap")]
    GiftWrap,
    Both,
}

impl Algo {
    fn engines(self) -> &'static [Engine] {
        match self {
            Algo::QuickHull => &[Engine::QuickHull],
            Algo::GiftWrap => &[Engine::GiftWrap],
            Algo::Both => &[Engine::QuickHull, Engine::GiftWrap],
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cmd = Cmd::parse();
    if let Some(n) = cmd.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("configuring worker pool")?;
    }
    match cmd.action {
        Action::Generate { field, out } => generate(&field, out),
        Action::Run(args) => run(&args).map(|_| ()),
        Action::Replay {
            trace,
            engine,
            delay_ms,
            field_pause_ms,
        } => replay(
            trace,
            engine,
            Pacing {
                field_pause: Duration::from_millis(field_pause_ms),
                step_delay: Duration::from_millis(delay_ms),
            },
        ),
        Action::Report => report(),
    }
}

fn generate(args: &FieldArgs, out: PathBuf) -> Result<()> {
    tracing::info!(count = args.count, field_size = args.field_size, seed = args.seed, "generate");
    let field = generate_field(args.cfg(), args.seed)?;
    write_points(&out, &field).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(out = %out.display(), "field written");
    Ok(())
}

fn load_field(args: &RunArgs) -> Result<(Vec<Point>, String)> {
    match &args.input {
        Some(path) => {
            let field =
                read_points(path).with_context(|| format!("reading {}", path.display()))?;
            Ok((field, path.display().to_string()))
        }
        None => {
            let field = generate_field(args.field.cfg(), args.field.seed)?;
            let source = format!(
                "random(count={}, field_size={}, seed={})",
                args.field.count, args.field.field_size, args.field.seed
            );
            Ok((field, source))
        }
    }
}

fn run(args: &RunArgs) -> Result<RunReport> {
    let (field, source) = load_field(args)?;
    if field.is_empty() {
        bail!("no valid points in {source}");
    }
    tracing::info!(points = field.len(), source = %source, algo = ?args.algo, "run");

    let cfg = HullCfg {
        parallel_cutoff: args.parallel_cutoff,
    };
    let mut runs = Vec::new();
    for &engine in args.algo.engines() {
        let run = report::run_engine(engine, &field, cfg);
        tracing::info!(
            engine = %engine,
            elapsed_ms = run.elapsed_ms,
            vertices = run.hull.len(),
            steps = run.trace.len(),
            "engine finished"
        );
        if !args.quiet {
            print_run(&run);
        }
        runs.push(run);
    }
    if let [a, b] = runs.as_slice() {
        if a.vertex_set() == b.vertex_set() {
            tracing::info!(vertices = a.hull.len(), "engines agree");
        } else {
            tracing::warn!(
                quickhull = a.hull.len(),
                giftwrap = b.hull.len(),
                "engines disagree on the hull vertex set"
            );
        }
    }

    let report = RunReport {
        source,
        points: field.len(),
        field,
        runs,
    };
    if let Some(out) = &args.out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        report::write_json(out, &report)?;
        let params = serde_json::json!({
            "source": report.source,
            "points": report.points,
            "algo": format!("{:?}", args.algo),
            "parallel_cutoff": args.parallel_cutoff,
            "threads": rayon::current_num_threads(),
        });
        let sidecar = provenance::write_sidecar(out, params)?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "report written");
    }
    if let Some(csv) = &args.csv {
        report::write_hull_csv(csv, &report.runs)?;
        tracing::info!(csv = %csv.display(), "hull csv written");
    }
    Ok(report)
}

fn print_run(run: &EngineRun) {
    println!(
        "TIME TAKEN {}: {:.3} ms\n",
        run.engine.to_string().to_uppercase(),
        run.elapsed_ms
    );
    println!("CONVEX HULL POINTS:");
    for p in &run.hull {
        println!("[{}, {}]", p.x, p.y);
    }
    println!();
}

fn replay(path: PathBuf, engine: Option<Engine>, pacing: Pacing) -> Result<()> {
    let report = report::read_json(&path)?;
    let run = match engine {
        Some(e) => report.runs.iter().find(|r| r.engine == e),
        None => report.runs.first(),
    }
    .with_context(|| format!("no matching engine run in {}", path.display()))?;
    tracing::info!(engine = %run.engine, points = report.points, source = %report.source, "replay");
    let played = replay::play(&report.field, run, std::io::stdout().lock(), pacing)?;
    tracing::info!(steps = played, "replay finished");
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::Provenance::new(serde_json::json!({}), Vec::new());
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
