//! # Dungen Command Line Entry Point
//!
//! Generates one dungeon floor and prints it as text, HTML or JSON.

use clap::{Parser, ValueEnum};
use dungen::{
    config, DungenResult, FloorGenerator, FloorRenderer, FloorResult, GenerationConfig, Generator,
    HtmlRenderer, TextRenderer,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;

/// Output formats for a generated floor.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Html,
    Json,
}

/// Command line arguments for the floor generator.
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(about = "Generates one floor of a tarot-driven dungeon")]
#[command(version)]
struct Args {
    /// Side length of the square grid
    #[arg(short = 'n', long, default_value_t = config::DEFAULT_GRID_SIZE)]
    size: usize,

    /// Random seed for reproducible floors
    #[arg(short, long)]
    seed: Option<u64>,

    /// Walks to try before giving up on dead ends
    #[arg(short, long, default_value_t = config::DEFAULT_MAX_ATTEMPTS)]
    attempts: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(err) = run(&args) {
        eprintln!("dungen: {err}");
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = log_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Warn);

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

fn run(args: &Args) -> DungenResult<()> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let config = GenerationConfig::new(seed)
        .with_grid_size(args.size)
        .with_max_attempts(args.attempts);
    info!("Starting dungen v{} with seed {}", dungen::VERSION, seed);

    let generator = FloorGenerator::new();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let floor = generator.generate(&config, &mut rng)?;
    generator.validate(&floor, &config)?;

    let output = render(&floor, args.format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}

fn render(floor: &FloorResult, format: Format) -> DungenResult<String> {
    Ok(match format {
        Format::Text => TextRenderer::new().render(floor),
        Format::Html => HtmlRenderer::new().render(floor),
        Format::Json => serde_json::to_string_pretty(floor)?,
    })
}
