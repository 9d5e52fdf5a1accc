use thiserror::Error;

use std::io;
use std::path::PathBuf;

#[derive(Debug, Error)]
pub enum Error {
	#[error("failed to read settings from {}: {source}", path.display())]
	ReadSettings {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("failed to parse settings: {0}")]
	ParseSettings(#[from] toml::de::Error),
	#[error("invalid settings: {0}")]
	InvalidSettings(String),
	#[error("trace line {line}: {reason}")]
	Trace { line: usize, reason: String },
	#[error("i/o error: {0}")]
	Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
