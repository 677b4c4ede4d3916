use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "mergebar")]
#[command(about = "Drive a merging menu host from a script")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Script to run (runs the built-in tour if omitted)
	pub script: Option<PathBuf>,

	/// Chrome configuration file (TOML)
	#[arg(long, short = 'c', value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// More logging; repeat for trace output
	#[arg(short, long, action = ArgAction::Count)]
	pub verbose: u8,
}
