//! `planner` CLI — generate schedules and inspect recurrence expansion from JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Generate a timeline (stdin → stdout)
//! cat week.json | planner generate
//!
//! # Pin "now" and write a human-readable agenda
//! planner generate -i week.json --now 2026-03-16T08:00:00 --format text
//!
//! # Layer configuration: defaults < TOML file < flags
//! planner generate -i week.json --config planner.toml --granularity 30
//!
//! # List every event occurrence over a two-week horizon
//! planner expand -i week.json --horizon 14
//! ```
//!
//! The input document is `{"events": [...], "tasks": [...], "now": "..."}`;
//! all three keys are optional. When `now` is neither passed as a flag nor
//! present in the document, the local wall clock is used.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use schedule_engine::{Event, GenerationResult, GeneratorConfig, ItemKind, Task};
use serde::Deserialize;
use std::fmt::Write as _;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "planner",
    version,
    about = "Deterministic schedule generator for events and deadline-bound tasks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log placement decisions to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Place tasks around events and print the timeline
    Generate {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Override "now" (e.g. 2026-03-16T08:00:00)
        #[arg(long)]
        now: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print every event occurrence within the recurrence horizon
    Expand {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Override "now" (e.g. 2026-03-16T08:00:00)
        #[arg(long)]
        now: Option<String>,
        /// Days past today to expand recurring events over
        #[arg(long)]
        horizon: Option<u32>,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// First hour of the working window
    #[arg(long)]
    work_start: Option<u32>,
    /// Hour the working window closes (24 = midnight)
    #[arg(long)]
    work_end: Option<u32>,
    /// Slot scan step in minutes
    #[arg(long)]
    granularity: Option<u32>,
    /// Days past today to expand recurring events over
    #[arg(long)]
    horizon: Option<u32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// The JSON document both subcommands read.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InputDocument {
    #[serde(default)]
    events: Vec<Event>,
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    now: Option<NaiveDateTime>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            now,
            format,
            config,
        } => {
            let doc = read_document(input.as_deref())?;
            let now = resolve_now(now.as_deref(), doc.now)?;
            let config = resolve_config(
                config.config.as_deref(),
                config.work_start,
                config.work_end,
                config.granularity,
                config.horizon,
            )?;
            tracing::debug!(%now, ?config, events = doc.events.len(), tasks = doc.tasks.len(), "generating");

            let result = schedule_engine::generate(&doc.events, &doc.tasks, now, &config)
                .context("Failed to generate schedule")?;

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&result)?,
                OutputFormat::Text => render_text(&result),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Expand {
            input,
            output,
            now,
            horizon,
            config,
        } => {
            let doc = read_document(input.as_deref())?;
            let now = resolve_now(now.as_deref(), doc.now)?;
            let config = resolve_config(config.as_deref(), None, None, None, horizon)?;

            for event in &doc.events {
                event.validate().context("Failed to expand events")?;
            }
            let occurrences =
                schedule_engine::expand_all(&doc.events, now.date(), config.recurrence_horizon_days());

            write_output(output.as_deref(), &serde_json::to_string_pretty(&occurrences)?)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}

/// Build the generator configuration: defaults, then the TOML file, then flags.
fn resolve_config(
    path: Option<&std::path::Path>,
    work_start: Option<u32>,
    work_end: Option<u32>,
    granularity: Option<u32>,
    horizon: Option<u32>,
) -> Result<GeneratorConfig> {
    let base = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str::<GeneratorConfig>(&text)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    GeneratorConfig::new(
        work_start.unwrap_or(base.work_window_start()),
        work_end.unwrap_or(base.work_window_end()),
        granularity.unwrap_or(base.slot_granularity_minutes()),
        horizon.unwrap_or(base.recurrence_horizon_days()),
    )
    .context("Invalid generator configuration")
}

/// Pick "now": the flag, then the document, then the local clock.
fn resolve_now(flag: Option<&str>, from_document: Option<NaiveDateTime>) -> Result<NaiveDateTime> {
    match (flag, from_document) {
        (Some(raw), _) => parse_datetime(raw),
        (None, Some(now)) => Ok(now),
        (None, None) => Ok(Local::now().naive_local()),
    }
}

/// Accepts naive local time (`2026-03-16T08:00:00`) or RFC 3339, whose
/// wall-clock part is kept and offset dropped.
fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    if let Ok(naive) = s.parse::<NaiveDateTime>() {
        return Ok(naive);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .with_context(|| format!("Invalid datetime '{}'", s))
}

fn render_text(result: &GenerationResult) -> String {
    let mut out = String::new();
    let mut current_day = None;

    for item in &result.items {
        if current_day != Some(item.day()) {
            current_day = Some(item.day());
            let _ = writeln!(out, "{}", item.day().format("%A %Y-%m-%d"));
        }
        let kind = match item.kind {
            ItemKind::Event => "event",
            ItemKind::Task => "task",
        };
        let _ = writeln!(
            out,
            "  {}-{}  {:<5}  {}",
            item.start.format("%H:%M"),
            item.end.format("%H:%M"),
            kind,
            item.name
        );
    }

    if !result.unplaced.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "Unplaced ({}):", result.unplaced.len());
        for task in &result.unplaced {
            let _ = writeln!(
                out,
                "  {}  {} ({} min, due {})",
                task.id,
                task.name,
                task.duration_minutes,
                task.deadline.format("%Y-%m-%d %H:%M")
            );
        }
    }

    out
}

fn read_document(path: Option<&str>) -> Result<InputDocument> {
    let raw = read_input(path)?;
    serde_json::from_str(&raw).context("Failed to parse input JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
