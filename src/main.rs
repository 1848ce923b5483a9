//! numconnect: replay pointer drags against the Number Connect game state.

mod app;

use anyhow::{Context, Result};
use app::{App, Coords};
use clap::{Parser, ValueEnum};
use numconnect::{GameConfig, HighScoreFile, JsonReporter, ScoreReporter, SelectionRule, parse_script};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = args.game_config()?;
    let script = read_script(args.script.as_deref())?;
    let events = parse_script(&script).context("parsing pointer script")?;

    let coords = if args.cells { Coords::Cells } else { Coords::Pixels };
    let event_out = args.events.then(std::io::stdout);
    let mut app = App::new(config, coords, event_out)?;
    let report = app.run(&events)?;

    match args.report {
        ReportFormat::Json => JsonReporter::new(std::io::stdout()).report(&report)?,
        ReportFormat::Full => JsonReporter::detailed(std::io::stdout()).report(&report)?,
        ReportFormat::Off => {}
    }
    if args.high_score {
        let mut file = HighScoreFile::default_location()?;
        file.report(&report)
            .with_context(|| format!("saving high score to {}", file.path().display()))?;
    }
    Ok(())
}

/// Logs go to stderr; stdout carries events and the report.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("reading script {}", p.display())),
        None => {
            let mut s = String::new();
            std::io::stdin()
                .read_to_string(&mut s)
                .context("reading script from stdin")?;
            Ok(s)
        }
    }
}

/// Number Connect game-state engine, driven headless.
#[derive(Debug, Parser)]
#[command(
    name = "numconnect",
    version,
    about = "Number Connect: drag through equal numbers to merge them. Replays a pointer script and reports the score.",
    long_about = "numconnect replays a script of pointer events against a Number Connect grid.\n\n\
        Drag a path through cells of the same value; on release they merge into the first \
        cell, which takes value x path length, and the score grows by that amount. Every \
        thousand points raises the level and seeds higher numbers. A special block (∞) \
        matches anything.\n\n\
        SCRIPT (one per line):\n  down X Y   pointer pressed\n  move X Y   pointer moved\n  up         pointer released\n  end        end the session\n\n\
        Coordinates are logical pixels (cell 60 + margin 5) unless --cells is given."
)]
pub struct Args {
    /// Pointer script; read from stdin when absent.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// JSON config file (GameConfig fields). Flags below override it.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Grid width in columns.
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Grid height in rows.
    #[arg(long, value_name = "ROWS")]
    pub height: Option<usize>,

    /// RNG seed for a reproducible session.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Chance of a special block after each drag (0.0..=1.0).
    #[arg(long, value_name = "P")]
    pub special_chance: Option<f64>,

    /// Points per level.
    #[arg(long, value_name = "N")]
    pub level_step: Option<u64>,

    /// Path rule: free (any matching cell), orthogonal, or diagonal neighbours.
    #[arg(long)]
    pub selection: Option<SelectionRule>,

    /// Script coordinates are column/row instead of pixels.
    #[arg(long)]
    pub cells: bool,

    /// Print every game event as a JSON line.
    #[arg(long)]
    pub events: bool,

    /// Session report: json ({"score":N}), full, or none.
    #[arg(long, default_value = "json")]
    pub report: ReportFormat,

    /// Keep the best score in the config dir (XDG_CONFIG_HOME or ~/.config).
    #[arg(long)]
    pub high_score: bool,

    /// Log filter when RUST_LOG is unset.
    #[arg(long, default_value = "warn", value_name = "FILTER")]
    pub log_level: String,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(h) = self.height {
            config.height = h;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(p) = self.special_chance {
            config.special_chance = p;
        }
        if let Some(step) = self.level_step {
            config.level_step = step;
        }
        if let Some(rule) = self.selection {
            config.selection = rule;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Full,
    #[value(name = "none")]
    Off,
}
