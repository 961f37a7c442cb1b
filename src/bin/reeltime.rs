use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "reeltime", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a timeline document and print the report as JSON.
    Validate(ValidateArgs),
    /// Play a timeline headlessly and print the final target states as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset map JSON (`{ "name": { "url": .., "kind": .. } }`).
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset map JSON.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Engine step in milliseconds.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    step_ms: f64,

    /// Give up after this many milliseconds of engine time.
    #[arg(long, default_value_t = 600_000.0)]
    limit_ms: f64,

    /// Output canvas width; positions are authored at 1920x1080.
    #[arg(long, default_value_t = 1920.0)]
    width: f64,

    /// Output canvas height.
    #[arg(long, default_value_t = 1080.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse json '{}'", path.display()))
}

fn read_assets(path: Option<&Path>) -> anyhow::Result<reeltime::AssetMap> {
    let Some(path) = path else {
        return Ok(reeltime::AssetMap::new());
    };
    let value = read_json(path)?;
    serde_json::from_value(value).with_context(|| format!("decode asset map '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_json(&args.in_path)?;
    let assets = read_assets(args.assets.as_deref())?;
    let report = reeltime::validate_timeline_with_assets(&doc, &assets);
    println!("{}", serde_json::to_string_pretty(&report)?);
    if !report.is_ok() {
        anyhow::bail!(
            "'{}' has {} validation error(s)",
            args.in_path.display(),
            report.errors.len()
        );
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let doc = read_json(&args.in_path)?;
    let assets = read_assets(args.assets.as_deref())?;
    let space = reeltime::CoordinateSpace {
        design: reeltime::Resolution::new(1920.0, 1080.0)?,
        output: reeltime::Resolution::new(args.width, args.height)?,
    };

    let mut scene = reeltime::Scene::load(&doc, &assets, space)
        .with_context(|| format!("load timeline '{}'", args.in_path.display()))?;
    for warning in scene.warnings() {
        eprintln!("warning: {warning}");
    }

    let opts = reeltime::RunOpts {
        step_ms: args.step_ms,
        limit_ms: args.limit_ms,
    };
    let elapsed = scene.run(&opts)?;
    let targets: Vec<&reeltime::Target> = scene.stage().iter().collect();
    println!("{}", serde_json::to_string_pretty(&targets)?);

    eprintln!("settled after {elapsed} ms");
    Ok(())
}
