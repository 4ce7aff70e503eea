use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sort_visualiser_core::{
    Algorithm, AppConfig, ArrayState, Highlight, HighlightKind, Renderer, SortVizError,
    StepOutcome, ToneSink, VisualizerSession,
};
use tracing_subscriber::EnvFilter;

fn main() -> sort_visualiser_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            algorithm,
            length,
            tick_ms,
            config,
        } => run_animation(&algorithm, length, tick_ms, config.as_deref()),
        Commands::Trace {
            algorithm,
            length,
            values,
        } => dump_trace(&algorithm, length, values.as_deref()),
        Commands::List => {
            for algorithm in Algorithm::ALL {
                println!("{algorithm}");
            }
            Ok(())
        }
    }
}

fn run_animation(
    algorithm: &str,
    length: Option<usize>,
    tick_ms: Option<u64>,
    config_path: Option<&std::path::Path>,
) -> sort_visualiser_core::Result<()> {
    let mut config = match config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(length) = length {
        config.array.length = length;
    }
    if let Some(tick_ms) = tick_ms {
        config.replay.tick_ms = tick_ms;
    }

    let mut session = VisualizerSession::new(config);
    let mut renderer = TermRenderer;
    let mut tones = TracingTones;

    session.select_algorithm(algorithm, &mut renderer)?;
    tracing::info!(algorithm, bars = session.values().len(), "starting replay");
    session.play()?;

    let tick = session.tick_interval();
    while session.step(&mut renderer, &mut tones)? == StepOutcome::Advanced {
        std::thread::sleep(tick);
    }
    tracing::info!(algorithm, "replay finished");
    Ok(())
}

fn dump_trace(
    algorithm: &str,
    length: usize,
    values: Option<&str>,
) -> sort_visualiser_core::Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let input = match values {
        Some(csv) => parse_values(csv)?,
        None => ArrayState::random(length).values().to_vec(),
    };

    tracing::info!(%algorithm, elements = input.len(), "recording trace");
    let trace = algorithm.sort(&input)?;
    println!("{}", trace.to_json()?);
    Ok(())
}

fn parse_values(csv: &str) -> sort_visualiser_core::Result<Vec<f32>> {
    csv.split(',')
        .map(|item| {
            item.trim()
                .parse::<f32>()
                .map_err(|_| SortVizError::InvalidInput("values must be comma-separated numbers"))
        })
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

const BAR_WIDTH: f32 = 40.0;

/// Renders each frame as a block of horizontal bars, one row per element,
/// with a marker column flagging the touched indices.
struct TermRenderer;

impl Renderer for TermRenderer {
    fn render(&mut self, values: &[f32], highlight: Option<&Highlight>) {
        let mut frame = String::new();
        for (i, &value) in values.iter().enumerate() {
            let width = (value.clamp(0.0, 1.0) * BAR_WIDTH).round() as usize;
            let marker = match highlight {
                Some(h) if h.indices.contains(&i) => match h.kind {
                    HighlightKind::Swap => '*',
                    HighlightKind::Compare => '?',
                    HighlightKind::Overwrite => '>',
                },
                _ => ' ',
            };
            frame.push_str(&format!("{marker} {value:5.2} {}\n", "█".repeat(width)));
        }
        println!("{frame}");
    }
}

/// Stands in for the host's oscillator; tones surface as debug log lines.
struct TracingTones;

impl ToneSink for TracingTones {
    fn play_tone(&mut self, frequency_hz: f32) {
        tracing::debug!(frequency_hz, "tone");
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Animated sorting algorithm visualiser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Animate a sorting run as terminal bar frames.
    Run {
        /// Algorithm to visualise.
        #[arg(short, long, default_value = "quick")]
        algorithm: String,
        /// Number of bars to sort (overrides the config file).
        #[arg(short, long)]
        length: Option<usize>,
        /// Milliseconds between replay steps (overrides the config file).
        #[arg(long)]
        tick_ms: Option<u64>,
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Record one sorting run and print its operation trace as JSON.
    Trace {
        /// Algorithm to record.
        #[arg(short, long, default_value = "quick")]
        algorithm: String,
        /// Number of random values to sort.
        #[arg(short, long, default_value_t = 20)]
        length: usize,
        /// Explicit comma-separated values to sort instead of random ones.
        #[arg(short, long)]
        values: Option<String>,
    },
    /// List the supported algorithm names.
    List,
}
