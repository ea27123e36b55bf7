use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kinetic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll through a page and print frame snapshots as JSON.
    Simulate(SimulateArgs),
    /// Write the built-in portfolio page as JSON.
    Preset(PresetArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (defaults to the bottom of the page).
    #[arg(long)]
    to: Option<f64>,

    /// Scroll distance between frames.
    #[arg(long, default_value_t = 120.0)]
    step: f64,

    /// Milliseconds between frames.
    #[arg(long, default_value_t = 16)]
    dt: u64,

    /// Override the page seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Write snapshots here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Seed for particle placement.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read page '{}'", args.in_path.display()))?;
    let mut page = kinetic::PageSpec::from_json(&text)
        .with_context(|| format!("load page '{}'", args.in_path.display()))?;
    if let Some(seed) = args.seed {
        page.settings.seed = seed;
    }

    let to = args.to.unwrap_or_else(|| page.max_scroll());
    let offsets = scroll_offsets(args.from, to, args.step)?;
    let mut scene = kinetic::Scene::build(&page).context("build scene")?;

    let mut frames = Vec::with_capacity(offsets.len());
    for (i, scroll_y) in offsets.into_iter().enumerate() {
        let now = kinetic::Millis(args.dt.saturating_mul(i as u64));
        let snap = scene
            .frame(now, scroll_y)
            .with_context(|| format!("evaluate frame at scroll {scroll_y}"))?;
        frames.push(snap);
    }
    tracing::info!(frames = frames.len(), "simulated");

    let json = serde_json::to_string_pretty(&frames).context("serialize frames")?;
    write_output(args.out.as_deref(), &json)
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let page = kinetic::portfolio(args.seed)?;
    let json = page.to_json_pretty()?;
    write_output(args.out.as_deref(), &json)
}

const MAX_FRAMES: f64 = 100_000.0;

/// Offsets from `from` to `to` inclusive, `step` apart, in either direction.
fn scroll_offsets(from: f64, to: f64, step: f64) -> anyhow::Result<Vec<f64>> {
    if !(from.is_finite() && to.is_finite()) {
        anyhow::bail!("--from and --to must be finite");
    }
    if !(step.is_finite() && step > 0.0) {
        anyhow::bail!("--step must be finite and > 0");
    }

    let steps = ((to - from).abs() / step).floor();
    if steps >= MAX_FRAMES {
        anyhow::bail!(
            "--step {step} over {from}..{to} would produce more than {MAX_FRAMES} frames"
        );
    }

    let dir = if to >= from { 1.0 } else { -1.0 };
    let count = steps as usize;
    let mut out: Vec<f64> = (0..=count).map(|i| from + dir * step * i as f64).collect();
    if out.last().is_some_and(|&last| last != to) {
        out.push(to);
    }
    Ok(out)
}

fn write_output(out: Option<&Path>, json: &str) -> anyhow::Result<()> {
    match out {
        None => {
            println!("{json}");
        }
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}
