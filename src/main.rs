use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use irpointer::modules::input::{RollEstimator, TraceInput};
use irpointer::modules::output::TextOutput;
use irpointer::modules::OutputData;
use irpointer::{FilterChain, FilterModule, InputModule, IrPointer, OutputModule, Settings};

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Default settings file, read when present.
const DEFAULT_SETTINGS: &str = "vset.toml";

#[derive(Parser)]
#[command(name = "irpointer-replay")]
#[command(about = "Replay a recorded IR camera trace through the pointer engine and filters")]
#[command(version)]
struct Cli {
	/// Settings file. Defaults to ./vset.toml if it exists, built-in defaults otherwise.
	#[arg(long)]
	settings: Option<PathBuf>,

	/// Trace file, one report per line. Reads stdin when omitted.
	trace: Option<PathBuf>,
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(io::stderr)
		.init();

	let cli = Cli::parse();
	let settings = load_settings(cli.settings.as_deref())?;

	let reader: Box<dyn BufRead> = match &cli.trace {
		Some(path) => Box::new(BufReader::new(
			File::open(path).with_context(|| format!("failed to open trace {}", path.display()))?,
		)),
		None => Box::new(io::stdin().lock()),
	};

	let stdout = io::stdout();
	let mut output = TextOutput::new(BufWriter::new(stdout.lock()));
	let mut input = TraceInput::new(reader);

	let mut roll = RollEstimator::new(settings.roll.clone());
	let mut pointer = IrPointer::new(settings.pointer.clone());
	let mut chain = FilterChain::from_settings(&settings.filter);

	// Trace time drives the time-aware filters, not the replay speed.
	let start = Instant::now();
	while let Some(sample) = input.run()? {
		let raw = pointer.step(&sample.slots, roll.update(sample.accel));
		let filtered = chain.run_at(raw, start + Duration::from_millis(sample.t_ms));
		output.run(OutputData {
			t_ms: sample.t_ms,
			frame: filtered,
		})?;
	}
	output.flush()?;

	let (frames, valid) = output.counts();
	info!(frames, valid, health = %pointer.health(), "replay finished");
	Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
	let path = match path {
		Some(path) => path,
		None if Path::new(DEFAULT_SETTINGS).exists() => Path::new(DEFAULT_SETTINGS),
		None => {
			info!("no settings file, using defaults");
			return Ok(Settings::default());
		}
	};

	let settings = Settings::load(path).with_context(|| format!("loading {}", path.display()))?;
	info!(path = %path.display(), "loaded settings");
	Ok(settings)
}
