use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridboard::camera::{Point, TransformState};
use gridboard::config::BoardConfig;
use gridboard::engine::EngineCore;
use gridboard::error::CanvasError;
use gridboard::grid::canvas_to_grid;
use gridboard::placement::place_external;
use serde_json::{Value, json};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod script;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("io error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("write failed: {0}")]
    Write(#[from] io::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error(transparent)]
    Board(#[from] CanvasError),
}

#[derive(Parser, Debug)]
#[command(name = "gridboard", about = "Replay and inspect whiteboard coordinate transforms")]
struct Cli {
    /// Fallback log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Feed a JSONL event script through the engine and print each action as a JSON line.
    Replay(ReplayArgs),
    /// Convert one point between screen and canvas space.
    Project(ProjectArgs),
    /// Print the effective board configuration.
    Config(BoardArgs),
}

#[derive(Args, Debug)]
struct BoardArgs {
    /// JSON board configuration file.
    #[arg(long, env = "GRIDBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long)]
    cell_size: Option<f64>,

    /// Turn grid snapping off.
    #[arg(long, default_value_t = false)]
    no_snap: bool,

    /// Keep shapes out of negative canvas space.
    #[arg(long, default_value_t = false)]
    bounded: bool,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    board: BoardArgs,

    #[arg(long, default_value = "-", help = "Script file path, or - for stdin")]
    input: String,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Space {
    Screen,
    Canvas,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    board: BoardArgs,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Space the input point is given in.
    #[arg(long, value_enum, default_value_t = Space::Screen)]
    from: Space,

    #[arg(allow_hyphen_values = true)]
    x: f64,

    #[arg(allow_hyphen_values = true)]
    y: f64,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::Project(args) => run_project(&args),
        Command::Config(args) => {
            let config = load_config(&args)?;
            print_json(&serde_json::to_value(&config)?)
        }
    }
}

fn load_config(args: &BoardArgs) -> Result<BoardConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| CliError::Io { path: path.display().to_string(), source })?;
            BoardConfig::from_json(&raw)?
        }
        None => BoardConfig::default(),
    };
    if let Some(cell_size) = args.cell_size {
        config.cell_size = cell_size;
    }
    if args.no_snap {
        config.snap_to_grid = false;
    }
    if args.bounded {
        config.allow_negative = false;
    }
    config.validate()?;
    debug!(?config, "board config loaded");
    Ok(config)
}

fn run_replay(args: ReplayArgs) -> Result<(), CliError> {
    let config = load_config(&args.board)?;
    let mut core = EngineCore::with_config(config)?;
    core.set_viewport(args.width, args.height);

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input).map_err(|source| CliError::Io { path: args.input.clone(), source })?;
        Box::new(BufReader::new(file))
    };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = script::replay(&mut core, reader, &mut out)?;
    out.flush()?;
    info!(events = stats.events, actions = stats.actions, skipped = stats.skipped, "replay finished");
    Ok(())
}

fn run_project(args: &ProjectArgs) -> Result<(), CliError> {
    let config = load_config(&args.board)?;
    let t = TransformState::new(args.pan_x, args.pan_y, args.scale)?;
    print_json(&project(&config, &t, Point::new(args.x, args.y), args.from))
}

/// Describe a point in both spaces, plus where a palette drop there would land.
fn project(config: &BoardConfig, t: &TransformState, input: Point, from: Space) -> Value {
    let (screen, canvas) = match from {
        Space::Screen => (input, t.screen_to_canvas(input)),
        Space::Canvas => (t.canvas_to_screen(input), input),
    };
    let drop = place_external(screen, t, &config.grid(), config.snap_to_grid, config.allow_negative);
    json!({
        "transform": t,
        "screen": screen,
        "canvas": canvas,
        "cell": canvas_to_grid(canvas, config.cell_size),
        "block": drop.grid,
        "drop": drop,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
