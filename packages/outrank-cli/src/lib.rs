//! Command-line plumbing shared by outrank binaries: version banner, help colors, and logging.

use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects, Style},
};
use tracing_subscriber::EnvFilter;

/// `<package version>-<git sha>-<target triple>`.
pub const VERSION: &str = concat!(
	env!("CARGO_PKG_VERSION"),
	"-",
	env!("VERGEN_GIT_SHA"),
	"-",
	env!("VERGEN_CARGO_TARGET_TRIPLE"),
);

const FALLBACK_LOG_LEVEL: &str = "info";

/// Help colors. Headings stand out; placeholders read like the dimmed rows of a chooser.
pub fn styles() -> Styles {
	let heading = AnsiColor::Magenta.on_default() | Effects::BOLD;

	Styles::styled()
		.header(heading)
		.usage(heading)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(Style::new().dimmed())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
		.invalid(AnsiColor::Yellow.on_default())
}

/// Installs the global subscriber. Events go to stderr so stdout carries only candidates.
///
/// An unparsable `log_level` falls back to `info` rather than failing the run.
pub fn init_tracing(log_level: &str) {
	tracing_subscriber::fmt()
		.with_env_filter(env_filter(log_level))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn env_filter(log_level: &str) -> EnvFilter {
	EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_LEVEL))
}
