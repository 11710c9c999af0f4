use clap::Parser;
use time::{OffsetDateTime, macros::datetime};

use outrank::{
	Args, ModeArg, StateArg,
	outline::{HistoryScorer, JsonOutline, OutlineFilter, StateFilter},
	rank, render,
};
use outrank_config::Config;
use outrank_domain::TodoState;
use outrank_service::{
	GroupingDimension, QueryEngine, QueryScope, SelectOptions, Target, TemporalScorer,
};

const RECORDS: &str = include_str!("fixtures/records.json");
const NOW: OffsetDateTime = datetime!(2026-03-02 09:30 UTC);

fn outline() -> JsonOutline {
	JsonOutline::from_json(RECORDS).expect("Fixture records must parse.")
}

fn args(extra: &[&str]) -> Args {
	let argv = ["outrank", "--records", "records.json"].into_iter().chain(extra.iter().copied());

	Args::try_parse_from(argv).expect("Test arguments must parse.")
}

fn labels(extra: &[&str]) -> Vec<String> {
	let candidates =
		rank(&args(extra), Config::default(), outline(), NOW).expect("Ranking must succeed.");

	candidates.into_iter().map(|candidate| candidate.label).collect()
}

#[test]
fn parses_defaults() {
	let args = args(&[]);

	assert_eq!(args.mode, ModeArg::Flat);
	assert_eq!(args.state, StateArg::Any);
	assert!(args.roots.is_empty());
	assert!(!args.json);
}

#[test]
fn parses_repeated_roots() {
	let args = args(&["--mode", "scoped", "--root", "work/site", "--root", "home"]);

	assert_eq!(args.mode, ModeArg::Scoped);
	assert_eq!(args.roots, vec!["work/site".to_string(), "home".to_string()]);
}

#[test]
fn rejects_missing_records_flag() {
	assert!(Args::try_parse_from(["outrank"]).is_err());
}

#[test]
fn rejects_empty_paths() {
	let err = JsonOutline::from_json(r#"[{"path": []}]"#)
		.err()
		.expect("Expected an empty path to be rejected.");

	assert!(err.to_string().contains("Record 0"), "Unexpected error: {err}");
}

#[test]
fn select_filters_by_state_and_text() {
	let outline = outline();
	let filter = OutlineFilter { state: StateFilter::Open, text: Some("SITE".to_string()) };
	let records =
		outline.select(&filter, &SelectOptions::default()).expect("Select must succeed.");
	let locations = records.iter().map(|record| record.location).collect::<Vec<_>>();

	assert_eq!(locations, vec![0, 1]);
	assert!(records.iter().all(|record| record.todo_state == TodoState::Open));
}

#[test]
fn select_derives_group_key_from_dimension() {
	let outline = outline();
	let options =
		SelectOptions { scope: QueryScope::Corpus, dimension: GroupingDimension::Remote };
	let records =
		outline.select(&OutlineFilter::default(), &options).expect("Select must succeed.");
	let keys = records.iter().map(|record| record.group_key.as_deref()).collect::<Vec<_>>();

	assert_eq!(
		keys,
		vec![Some("git@example.com:site.git"), Some("git@example.com:site.git"), None, None]
	);
}

#[test]
fn current_document_scope_needs_a_document() {
	let options =
		SelectOptions { scope: QueryScope::CurrentDocument, dimension: GroupingDimension::None };
	let unset = outline()
		.select(&OutlineFilter::default(), &options)
		.expect("Select must succeed.");
	let home = outline()
		.with_current_document(Some("home.org".to_string()))
		.select(&OutlineFilter::default(), &options)
		.expect("Select must succeed.");

	assert_eq!(unset.len(), 4);
	assert_eq!(home.len(), 1);
	assert_eq!(home[0].location, 3);
}

#[test]
fn scorer_skips_unparsable_visits() {
	let outline = outline();
	let scorer = HistoryScorer::new(&outline, Config::default().frecency.buckets, NOW);
	let plants = scorer.scan(&3);

	assert_eq!(plants.samples, 1);
	assert_eq!(plants.frecency(), Some(100.0));
	assert_eq!(plants.last_instant(), Some(datetime!(2026-02-25 10:00 UTC)));
	assert!(scorer.scan(&0).is_empty());
	assert!(scorer.scan(&99).is_empty());
	assert_eq!(scorer.now(), NOW);
}

#[test]
fn flat_mode_ranks_urgent_then_frecent() {
	assert_eq!(
		labels(&[]),
		vec![
			"work/site/Fix login".to_string(),
			"work/site/Write docs".to_string(),
			"home/Water plants".to_string(),
			"work/api/Rotate keys".to_string(),
		]
	);
}

#[test]
fn state_and_text_flags_filter_candidates() {
	assert_eq!(labels(&["--state", "done"]), vec!["home/Water plants".to_string()]);
	assert_eq!(
		labels(&["--state", "open", "--match", "docs"]),
		vec!["work/site/Write docs".to_string()]
	);
}

#[test]
fn document_flag_restricts_to_that_document() {
	assert_eq!(labels(&["--document", "home.org"]), vec!["home/Water plants".to_string()]);
}

#[test]
fn scoped_mode_labels_relative_to_root() {
	assert_eq!(
		labels(&["--mode", "scoped", "--root", "work/site"]),
		vec!["site/Fix login".to_string(), "site/Write docs".to_string()]
	);
}

#[test]
fn scoped_mode_falls_back_to_configured_roots() {
	let mut cfg = Config::default();

	cfg.scopes.roots = vec!["home".to_string()];

	let candidates = rank(&args(&["--mode", "scoped"]), cfg, outline(), NOW)
		.expect("Ranking must succeed.");

	assert_eq!(candidates.len(), 1);
	assert_eq!(candidates[0].label, "Water plants");
}

#[test]
fn scoped_mode_without_roots_fails() {
	let result = rank(&args(&["--mode", "scoped"]), Config::default(), outline(), NOW);

	assert!(result.is_err());
}

#[test]
fn anchor_outside_every_root_fails() {
	let err = rank(
		&args(&["--mode", "scoped", "--root", "work/site", "--anchor", "home/Water plants"]),
		Config::default(),
		outline(),
		NOW,
	)
	.err()
	.expect("Expected a missing root to fail.");

	assert!(err.to_string().contains("home/Water plants"), "Unexpected error: {err}");
}

#[test]
fn grouped_mode_sorts_groups_by_aggregate_frecency() {
	let candidates = rank(&args(&["--mode", "grouped"]), Config::default(), outline(), NOW)
		.expect("Ranking must succeed.");
	let rendered = render(&candidates, false).expect("Render must succeed.");

	assert_eq!(rendered, "~/src/site (2)\n[ungrouped] (1)\n~ ~/src/api (1)");

	let Target::Group(site) = &candidates[0].target else {
		panic!("Expected a group target.");
	};

	assert_eq!(site.members, vec![0, 1]);
	assert_eq!(site.aggregate.frecency(), Some(200.0));
}

#[test]
fn width_flag_truncates_labels() {
	assert_eq!(labels(&["--state", "done", "--width", "8"]), vec!["home/...".to_string()]);
}

#[test]
fn render_marks_blocked_entries() {
	let candidates =
		rank(&args(&[]), Config::default(), outline(), NOW).expect("Ranking must succeed.");
	let rendered = render(&candidates, false).expect("Render must succeed.");

	assert_eq!(rendered.lines().last(), Some("~ work/api/Rotate keys"));
}

#[test]
fn render_json_tags_targets() {
	let candidates = rank(&args(&["--state", "done"]), Config::default(), outline(), NOW)
		.expect("Ranking must succeed.");
	let rendered = render(&candidates, true).expect("Render must succeed.");
	let value: serde_json::Value = serde_json::from_str(&rendered).expect("Output must be JSON.");

	assert_eq!(value[0]["label"], "home/Water plants");
	assert_eq!(value[0]["dimmed"], false);
	assert_eq!(value[0]["target"]["kind"], "entry");
	assert_eq!(value[0]["target"]["location"], 3);
}
