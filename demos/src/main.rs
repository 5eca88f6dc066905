//! Walk an actor across an ASCII map using the buffered route finder.
//!
//! Run: cargo run --bin walk -- [MAP] [--config FILE] [--no-diagonal]
//!      [--scatter SEED] [--ticks N]
//!
//! Set `RUST_LOG=debug` to watch buffer hits and memo updates.

use std::path::PathBuf;

use tilewalk_demos::{COURTYARD, DemoError, Scenario, load_config, render, walk};
use tilewalk_route::RouteConfig;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: walk [MAP] [--config FILE] [--no-diagonal] [--scatter SEED] [--ticks N]";
const SCATTER_DENSITY: f64 = 0.15;

struct Args {
    map: Option<PathBuf>,
    config: Option<PathBuf>,
    diagonal: bool,
    scatter: Option<u64>,
    ticks: usize,
}

fn parse_args() -> Result<Args, DemoError> {
    let mut args = Args {
        map: None,
        config: None,
        diagonal: true,
        scatter: None,
        ticks: 1000,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(PathBuf::from(value(&mut it, &arg)?)),
            "--no-diagonal" => args.diagonal = false,
            "--scatter" => args.scatter = Some(number(&value(&mut it, &arg)?)?),
            "--ticks" => args.ticks = number(&value(&mut it, &arg)?)?,
            "-h" | "--help" => return Err(DemoError::Usage(USAGE.to_string())),
            s if s.starts_with('-') => {
                return Err(DemoError::Usage(format!("unknown option {s}\n{USAGE}")));
            }
            _ => args.map = Some(PathBuf::from(&arg)),
        }
    }
    Ok(args)
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, DemoError> {
    it.next()
        .ok_or_else(|| DemoError::Usage(format!("{flag} needs a value\n{USAGE}")))
}

fn number<T: std::str::FromStr>(s: &str) -> Result<T, DemoError> {
    s.parse()
        .map_err(|_| DemoError::Usage(format!("not a number: {s}\n{USAGE}")))
}

fn run() -> Result<(), DemoError> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RouteConfig::default(),
    };
    let mut scenario = match &args.map {
        Some(path) => Scenario::load(path)?,
        None => Scenario::parse(COURTYARD)?,
    };
    if let Some(seed) = args.scatter {
        scenario.scatter(seed, SCATTER_DENSITY);
    }

    log::info!(
        "walking {} -> {} (diagonal: {}, max expansions: {})",
        scenario.start,
        scenario.goal,
        args.diagonal,
        config.max_expansions
    );
    let result = walk(&scenario, config, args.diagonal, args.ticks);

    print!("{}", render(&scenario, &result));
    let status = match result.halt {
        Some(h) if h.is_stuck() => format!("stuck ({h})"),
        Some(h) => h.to_string(),
        None => "out of ticks".to_string(),
    };
    println!(
        "{status}: {} steps, {} blocked, {} searches, ended at {}",
        result.trail.len() - 1,
        result.blocked,
        result.searches,
        result.end()
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
