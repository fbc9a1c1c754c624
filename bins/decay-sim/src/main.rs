//! decay-sim — Headless driver for the Digital Decay engine.
//!
//! Runs the decay engine frame by frame on a simulated clock and prints the
//! percentage, tier, bar and colors, so decay times and gameplay deltas can
//! be tuned without launching the game.

use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use decay_core::clock::ManualClock;
use decay_core::constants::decay_rate;
use decay_core::traits::Clock;
use decay_engine::{DecayBar, DecayEngine, EngineConfig};
use serde::Serialize;
use tracing::{error, info};

/// Upper bound on frames when simulating until depletion.
const MAX_FRAMES: u64 = 10_000_000;

/// Digital Decay engine simulator.
#[derive(Parser, Debug)]
#[command(name = "decay-sim", version, about = "Headless simulator for the decay engine")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, default_value = "text", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a session frame by frame.
    Simulate(SimulateArgs),
    /// Print the palette for a percentage.
    Palette(PaletteArgs),
    /// Print a color as distorted at a percentage.
    Color(ColorArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// 60 second decay.
    Default,
    /// 120 second decay, used for a full game session.
    Session,
    /// 30 second decay, used by the start screen.
    Intro,
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// JSON config file (takes precedence over --preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Built-in config preset
    #[arg(long, value_enum, default_value = "default")]
    preset: Preset,

    /// Seconds for the percentage to fall from 100 to 0
    #[arg(long)]
    decay_time: Option<f64>,

    /// Disable color noise
    #[arg(long)]
    no_noise: bool,

    /// Seed for color noise
    #[arg(long)]
    seed: Option<u64>,
}

impl EngineArgs {
    /// Resolve the config: file or preset, then `DECAY_*` env vars, then flags.
    fn into_config(self) -> Result<EngineConfig> {
        let base = match &self.config {
            Some(path) => EngineConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => match self.preset {
                Preset::Default => EngineConfig::default(),
                Preset::Session => EngineConfig::session(),
                Preset::Intro => EngineConfig::intro(),
            },
        };
        let mut config = base.with_env().context("invalid DECAY_* environment")?;

        if let Some(decay_time) = self.decay_time {
            config.decay_time_secs = decay_time;
        }
        if self.no_noise {
            config.noise = false;
        }
        if self.seed.is_some() {
            config.noise_seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Seconds per frame
    #[arg(long, default_value_t = 0.5)]
    dt: f64,

    /// Number of frames (default: run until the percentage reaches 0)
    #[arg(long)]
    frames: Option<u64>,

    /// Gameplay delta applied after a frame, as FRAME:AMOUNT (repeatable)
    #[arg(long = "modify", value_name = "FRAME:AMOUNT")]
    modifications: Vec<Modification>,

    /// Print every Nth frame
    #[arg(long, default_value_t = 1)]
    every: u64,

    /// Width of the text bar in characters
    #[arg(long, default_value_t = 40)]
    width: u32,

    /// Emit one JSON object per printed frame
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PaletteArgs {
    /// Decay percentage (0-100)
    #[arg(long)]
    percentage: f64,
}

#[derive(Args, Debug)]
struct ColorArgs {
    #[command(flatten)]
    engine: EngineArgs,

    /// Decay percentage (0-100)
    #[arg(long)]
    percentage: f64,

    /// Base color as comma-separated components; invalid input falls back to white
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "255,255,255")]
    rgb: Vec<String>,
}

/// Parse raw `--rgb` parts, mapping anything that isn't a number to NaN so the
/// engine's white fallback handles it.
fn color_components(raw: &[String]) -> Vec<f64> {
    raw.iter()
        .map(|part| part.trim().parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}

/// A scheduled `modify` call.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Modification {
    frame: u64,
    amount: f64,
}

impl FromStr for Modification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (frame, amount) = s
            .split_once(':')
            .ok_or_else(|| format!("expected FRAME:AMOUNT, got {s:?}"))?;
        let frame = frame
            .trim()
            .parse()
            .map_err(|_| format!("invalid frame number {frame:?}"))?;
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| format!("invalid amount {amount:?}"))?;
        if !amount.is_finite() {
            return Err(format!("amount must be finite, got {amount}"));
        }
        Ok(Self { frame, amount })
    }
}

#[derive(Serialize)]
struct FrameReport<'a> {
    frame: u64,
    elapsed_secs: f64,
    percentage: f64,
    tier: &'a str,
    reached_zero: bool,
    bar: &'a decay_engine::BarSnapshot,
    palette: decay_core::types::Palette,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let result = match cli.command {
        Commands::Simulate(args) => simulate(args),
        Commands::Palette(args) => palette(args),
        Commands::Color(args) => color(args),
    };

    if let Err(e) = result {
        error!("{e:#}");
        process::exit(1);
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    if !args.dt.is_finite() || args.dt <= 0.0 {
        bail!("--dt must be a positive number of seconds, got {}", args.dt);
    }
    if args.every == 0 {
        bail!("--every must be at least 1");
    }

    let config = args.engine.into_config()?;
    let clock = ManualClock::new();
    let mut engine = DecayEngine::from_config(&config, &clock)?;
    let bar = DecayBar::default();

    info!(
        decay_time = config.decay_time_secs,
        rate_per_sec = decay_rate(config.decay_time_secs),
        dt = args.dt,
        "simulation started"
    );

    let limit = args.frames.unwrap_or(MAX_FRAMES);
    let mut frame = 0;
    while frame < limit {
        frame += 1;
        clock.advance_secs(args.dt);
        engine.tick();

        for m in args.modifications.iter().filter(|m| m.frame == frame) {
            engine.modify(m.amount);
        }

        let last = frame == limit || (args.frames.is_none() && engine.is_depleted());
        if frame % args.every == 0 || last {
            print_frame(&engine, &bar, frame, clock.now().as_secs_f64(), args.width, args.json)?;
        }
        if last {
            break;
        }
    }

    info!(
        frames = frame,
        percentage = engine.percentage(),
        zero_crossings = engine.zero_crossings(),
        "simulation finished"
    );
    Ok(())
}

fn print_frame(
    engine: &DecayEngine<&ManualClock>,
    bar: &DecayBar,
    frame: u64,
    elapsed_secs: f64,
    width: u32,
    json: bool,
) -> Result<()> {
    let snap = bar.snapshot(engine, width);
    if json {
        let report = FrameReport {
            frame,
            elapsed_secs,
            percentage: engine.percentage(),
            tier: engine.tier().as_str(),
            reached_zero: engine.reached_zero(),
            bar: &snap,
            palette: engine.current_palette(),
        };
        println!("{}", serde_json::to_string(&report)?);
    } else {
        let filled = snap.fill_width as usize;
        let empty = (width as usize).saturating_sub(filled);
        println!(
            "{frame:>6} {elapsed_secs:>9.2}s [{}{}] {:>6} {} {}",
            "#".repeat(filled),
            ".".repeat(empty),
            snap.percentage_label,
            snap.time_label,
            engine.tier(),
        );
    }
    Ok(())
}

fn palette(args: PaletteArgs) -> Result<()> {
    let config = EngineConfig {
        noise: false,
        initial_percentage: args.percentage,
        ..EngineConfig::default()
    };
    let engine = DecayEngine::from_config(&config, ManualClock::new())
        .context("percentage must be within 0..=100")?;

    let out = serde_json::json!({
        "percentage": engine.percentage(),
        "tier": engine.tier(),
        "palette": engine.current_palette(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn color(args: ColorArgs) -> Result<()> {
    let mut config = args.engine.into_config()?;
    config.initial_percentage = args.percentage;
    let engine = DecayEngine::from_config(&config, ManualClock::new())
        .context("percentage must be within 0..=100")?;

    let decayed = engine.decay_color_lenient(&color_components(&args.rgb));
    let out = serde_json::json!({
        "percentage": engine.percentage(),
        "strength": engine.decay_factor(),
        "color": decayed,
        "hex": decayed.to_hex(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Initialize tracing subscriber with the given log level and output format.
///
/// Logs go to stderr so `--json` frame output on stdout stays machine-readable.
fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
