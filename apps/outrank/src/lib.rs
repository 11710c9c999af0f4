pub mod outline;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre;
use time::OffsetDateTime;

use crate::outline::{HistoryScorer, JsonOutline, OutlineFilter, StateFilter};
use outrank_config::Config;
use outrank_domain::RootPath;
use outrank_service::{
	Candidate, CandidatePipeline, Mode, PipelineRequest, QueryScope, ScopeSession, policy,
};

#[derive(Debug, Parser)]
#[command(
	version = outrank_cli::VERSION,
	rename_all = "kebab",
	styles = outrank_cli::styles(),
)]
pub struct Args {
	/// Configuration file. Built-in defaults apply when omitted.
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: Option<PathBuf>,
	/// JSON array of outline entries.
	#[arg(long, short = 'r', value_name = "FILE")]
	pub records: PathBuf,
	#[arg(long, value_enum, default_value_t = ModeArg::Flat)]
	pub mode: ModeArg,
	/// Project root for scoped mode, `/`-separated. Overrides `scopes.roots`.
	#[arg(long = "root", value_name = "PATH")]
	pub roots: Vec<String>,
	/// Outline position the scoped session is opened from.
	#[arg(long, value_name = "PATH")]
	pub anchor: Option<String>,
	#[arg(long, value_enum, default_value_t = StateArg::Any)]
	pub state: StateArg,
	#[arg(long = "match", value_name = "TEXT")]
	pub text: Option<String>,
	/// Restrict the query to entries of this document.
	#[arg(long, value_name = "NAME")]
	pub document: Option<String>,
	/// Label width in grapheme clusters.
	#[arg(long, value_name = "COLUMNS")]
	pub width: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
	Flat,
	Scoped,
	Grouped,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StateArg {
	Open,
	Done,
	Any,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let cfg = match args.config.as_deref() {
		Some(path) => outrank_config::load(path)?,
		None => Config::default(),
	};

	outrank_cli::init_tracing(&cfg.service.log_level);

	let outline = JsonOutline::load(&args.records)?;
	let candidates = rank(&args, cfg, outline, OffsetDateTime::now_utc())?;

	tracing::info!(candidates = candidates.len(), "Ranked candidates.");

	println!("{}", render(&candidates, args.json)?);

	Ok(())
}

/// Runs one ranking pass over `outline` as of `now`.
pub fn rank(
	args: &Args,
	cfg: Config,
	outline: JsonOutline,
	now: OffsetDateTime,
) -> color_eyre::Result<Vec<Candidate<usize>>> {
	let mode = match args.mode {
		ModeArg::Flat => Mode::Flat,
		ModeArg::Grouped => Mode::Grouped,
		ModeArg::Scoped => Mode::Scoped(scope_session(args, &cfg)?),
	};
	let outline = outline.with_current_document(args.document.clone());
	let scorer = HistoryScorer::new(&outline, cfg.frecency.buckets.clone(), now);
	let pipeline = CandidatePipeline::new(cfg, outline, scorer)?;
	let filter = OutlineFilter {
		state: match args.state {
			StateArg::Open => StateFilter::Open,
			StateArg::Done => StateFilter::Done,
			StateArg::Any => StateFilter::Any,
		},
		text: args.text.clone(),
	};
	let mut req = PipelineRequest::new(filter, mode);

	if args.document.is_some() {
		req.scope = QueryScope::CurrentDocument;
	}

	req.label_width = args.width;

	Ok(pipeline.run(&req)?)
}

/// One label per line, dimmed entries prefixed with `~`, or pretty JSON.
pub fn render(candidates: &[Candidate<usize>], json: bool) -> color_eyre::Result<String> {
	if json {
		return Ok(serde_json::to_string_pretty(candidates)?);
	}

	let lines = candidates
		.iter()
		.map(|candidate| {
			if candidate.dimmed { format!("~ {}", candidate.label) } else { candidate.label.clone() }
		})
		.collect::<Vec<_>>();

	Ok(lines.join("\n"))
}

fn scope_session(args: &Args, cfg: &Config) -> color_eyre::Result<ScopeSession> {
	let roots = if args.roots.is_empty() {
		policy::resolve_roots(cfg)
	} else {
		args.roots.iter().map(|root| RootPath::parse(root)).collect()
	};

	if roots.is_empty() {
		return Err(eyre::eyre!("Scoped mode needs at least one root."));
	}

	let session = ScopeSession::new(roots);

	Ok(match args.anchor.as_deref() {
		Some(anchor) => session.with_anchor(RootPath::parse(anchor).segments().to_vec()),
		None => session,
	})
}
