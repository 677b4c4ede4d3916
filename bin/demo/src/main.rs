//! `mergebar`: runs a script of focus changes against a document container
//! and prints the chrome after every render.

mod cli;
mod documents;
mod script;

use std::io;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use mergebar_config::ChromeConfig;
use mergebar_mdi::TextRenderer;

/// Script run when none is given.
const TOUR: &str = "\
open text notes
open image photo
focus photo
modify notes
close-all
focus notes
save notes
menu notes 2
close notes
";

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	let config = match &cli.config {
		Some(path) => ChromeConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
		None => ChromeConfig::parse(documents::DEFAULT_CONFIG)?,
	};
	let source = match &cli.script {
		Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
		None => TOUR.to_owned(),
	};
	let steps = script::parse(&source)?;

	let mut container = documents::container(&config);
	container
		.host_mut()
		.set_renderer(Some(Box::new(TextRenderer::new(io::stdout()))));
	container.host_mut().render();

	tracing::info!(steps = steps.len(), "running script");
	let mut session = script::Session::new(container);
	session.run(&steps)?;

	tracing::info!(open = session.container().len(), "script finished");
	Ok(())
}

fn setup_tracing(verbosity: u8) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbosity {
		0 => EnvFilter::new("warn,mergebar=info"),
		1 => EnvFilter::new("info,mergebar_mdi=debug,mergebar=debug"),
		_ => EnvFilter::new("debug,mergebar_mdi=trace,mergebar_actions=trace,mergebar=trace"),
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.init();
}
