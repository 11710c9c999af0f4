//! JSON outline dump used as the query engine, plus the history-based scorer.

use std::{fs, path::Path};

use color_eyre::eyre::{self, WrapErr};
use serde::Deserialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use outrank_config::FrecencyBucket;
use outrank_domain::{Record, TemporalInfo, TodoState, frecency};
use outrank_service::{
	GroupingDimension, QueryEngine, QueryScope, Result, SelectOptions, TemporalScorer,
};

#[derive(Clone, Debug, Deserialize)]
pub struct OutlineEntry {
	pub path: Vec<String>,
	#[serde(default)]
	pub todo: TodoState,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub scheduled: Option<OffsetDateTime>,
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub deadline: Option<OffsetDateTime>,
	#[serde(default)]
	pub blocked: bool,
	pub document: Option<String>,
	pub directory: Option<String>,
	pub remote: Option<String>,
	/// RFC 3339 visit stamps. Unparsable stamps are skipped.
	#[serde(default)]
	pub history: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StateFilter {
	Open,
	Done,
	#[default]
	Any,
}

#[derive(Clone, Debug, Default)]
pub struct OutlineFilter {
	pub state: StateFilter,
	/// Case-insensitive substring matched against every path segment.
	pub text: Option<String>,
}
impl OutlineFilter {
	fn matches(&self, entry: &OutlineEntry) -> bool {
		let state_ok = match self.state {
			StateFilter::Open => entry.todo == TodoState::Open,
			StateFilter::Done => entry.todo == TodoState::Done,
			StateFilter::Any => true,
		};
		let Some(text) = self.text.as_deref() else {
			return state_ok;
		};
		let needle = text.to_lowercase();

		state_ok && entry.path.iter().any(|segment| segment.to_lowercase().contains(&needle))
	}
}

/// Outline entries addressed by their index in the dump.
pub struct JsonOutline {
	pub entries: Vec<OutlineEntry>,
	pub current_document: Option<String>,
}
impl JsonOutline {
	pub fn load(path: &Path) -> color_eyre::Result<Self> {
		let raw = fs::read_to_string(path)
			.wrap_err_with(|| format!("Failed to read records at {path:?}."))?;

		Self::from_json(&raw).wrap_err_with(|| format!("Failed to parse records at {path:?}."))
	}

	pub fn from_json(raw: &str) -> color_eyre::Result<Self> {
		let entries: Vec<OutlineEntry> = serde_json::from_str(raw)?;

		if let Some(idx) = entries.iter().position(|entry| entry.path.is_empty()) {
			return Err(eyre::eyre!("Record {idx} has an empty path."));
		}

		Ok(Self { entries, current_document: None })
	}

	pub fn with_current_document(mut self, document: Option<String>) -> Self {
		self.current_document = document;

		self
	}

	fn in_scope(&self, entry: &OutlineEntry, scope: QueryScope) -> bool {
		match (scope, self.current_document.as_deref()) {
			(QueryScope::CurrentDocument, Some(current)) =>
				entry.document.as_deref() == Some(current),
			_ => true,
		}
	}
}
impl QueryEngine for JsonOutline {
	type Location = usize;
	type Predicate = OutlineFilter;

	fn select(
		&self,
		predicate: &Self::Predicate,
		options: &SelectOptions,
	) -> Result<Vec<Record<usize>>> {
		let records = self
			.entries
			.iter()
			.enumerate()
			.filter(|(_, entry)| self.in_scope(entry, options.scope) && predicate.matches(entry))
			.map(|(idx, entry)| Record {
				full_path: entry.path.clone(),
				todo_state: entry.todo,
				scheduled: entry.scheduled,
				deadline: entry.deadline,
				temporal: TemporalInfo::EMPTY,
				group_key: match options.dimension {
					GroupingDimension::Directory => entry.directory.clone(),
					GroupingDimension::Remote => entry.remote.clone(),
					GroupingDimension::None => None,
				},
				blocked: entry.blocked,
				location: idx,
			})
			.collect();

		Ok(records)
	}
}

/// Scores outline entries from their visit history with a clock frozen at construction.
pub struct HistoryScorer {
	histories: Vec<Vec<OffsetDateTime>>,
	buckets: Vec<FrecencyBucket>,
	now: OffsetDateTime,
}
impl HistoryScorer {
	pub fn new(outline: &JsonOutline, buckets: Vec<FrecencyBucket>, now: OffsetDateTime) -> Self {
		let histories = outline
			.entries
			.iter()
			.enumerate()
			.map(|(idx, entry)| parse_history(idx, entry))
			.collect();

		Self { histories, buckets, now }
	}
}
impl TemporalScorer<usize> for HistoryScorer {
	fn scan(&self, location: &usize) -> TemporalInfo {
		match self.histories.get(*location) {
			Some(history) => frecency::score_history(history, self.now, &self.buckets),
			None => TemporalInfo::EMPTY,
		}
	}

	fn now(&self) -> OffsetDateTime {
		self.now
	}
}

fn parse_history(idx: usize, entry: &OutlineEntry) -> Vec<OffsetDateTime> {
	entry
		.history
		.iter()
		.filter_map(|raw| match OffsetDateTime::parse(raw, &Rfc3339) {
			Ok(stamp) => Some(stamp),
			Err(err) => {
				tracing::warn!(
					record = idx,
					stamp = %raw,
					error = %err,
					"Skipping unparsable visit."
				);

				None
			},
		})
		.collect()
}
