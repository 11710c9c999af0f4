//! Fixtures shared by the outrank integration tests.

use std::{cell::Cell, collections::HashMap};

use time::{Duration, OffsetDateTime, macros::datetime};

use outrank_domain::{Record, Score, TemporalInfo, TodoState};
use outrank_service::{
	Error, GroupingDimension, QueryEngine, Result, SelectOptions, TemporalScorer,
};

/// Clock reading every fixture scorer reports.
pub const NOW: OffsetDateTime = datetime!(2026-03-02 09:30 UTC);

/// `NOW` shifted by whole days.
pub fn day(offset: i64) -> OffsetDateTime {
	NOW + Duration::days(offset)
}

pub fn path(raw: &str) -> Vec<String> {
	raw.split('/').map(str::to_string).collect()
}

pub fn scored(frecency: f64) -> TemporalInfo {
	TemporalInfo {
		last_instant: Some(NOW),
		frecency: Some(Score::from_points(frecency)),
		samples: 1,
	}
}

/// One outline entry plus the attributes grouping dimensions are derived from.
#[derive(Clone, Debug)]
pub struct Entry {
	pub record: Record<u32>,
	pub directory: Option<String>,
	pub remote: Option<String>,
}

pub struct EntryBuilder {
	entry: Entry,
}
impl EntryBuilder {
	pub fn state(mut self, state: TodoState) -> Self {
		self.entry.record.todo_state = state;

		self
	}

	pub fn scheduled(mut self, at: OffsetDateTime) -> Self {
		self.entry.record.scheduled = Some(at);

		self
	}

	pub fn deadline(mut self, at: OffsetDateTime) -> Self {
		self.entry.record.deadline = Some(at);

		self
	}

	pub fn frecency(mut self, frecency: f64) -> Self {
		self.entry.record.temporal = scored(frecency);

		self
	}

	pub fn blocked(mut self) -> Self {
		self.entry.record.blocked = true;

		self
	}

	pub fn directory(mut self, directory: &str) -> Self {
		self.entry.directory = Some(directory.to_string());

		self
	}

	pub fn remote(mut self, remote: &str) -> Self {
		self.entry.remote = Some(remote.to_string());

		self
	}

	pub fn build(self) -> Entry {
		self.entry
	}

	pub fn record(self) -> Record<u32> {
		self.entry.record
	}
}

/// Starts an entry at the `/`-separated outline `raw_path`, located by `id`.
pub fn entry(id: u32, raw_path: &str) -> EntryBuilder {
	let record = Record::new(path(raw_path), id);

	EntryBuilder { entry: Entry { record, directory: None, remote: None } }
}

/// In-memory query engine over a fixed outline.
///
/// The predicate filters on todo state; `None` matches everything.
pub struct VecEngine {
	entries: Vec<Entry>,
	failure: Option<String>,
	last_options: Cell<Option<SelectOptions>>,
}
impl VecEngine {
	pub fn new(entries: Vec<Entry>) -> Self {
		Self { entries, failure: None, last_options: Cell::new(None) }
	}

	pub fn failing(message: &str) -> Self {
		Self {
			entries: Vec::new(),
			failure: Some(message.to_string()),
			last_options: Cell::new(None),
		}
	}

	pub fn last_options(&self) -> Option<SelectOptions> {
		self.last_options.get()
	}
}
impl QueryEngine for VecEngine {
	type Location = u32;
	type Predicate = Option<TodoState>;

	fn select(
		&self,
		predicate: &Self::Predicate,
		options: &SelectOptions,
	) -> Result<Vec<Record<u32>>> {
		self.last_options.set(Some(*options));

		if let Some(message) = &self.failure {
			return Err(Error::Query { message: message.clone() });
		}

		Ok(self
			.entries
			.iter()
			.filter(|entry| predicate.is_none_or(|state| entry.record.todo_state == state))
			.map(|entry| {
				let mut record = entry.record.clone();

				// Raw matches carry no score; the pipeline attaches one.
				record.temporal = TemporalInfo::EMPTY;
				record.group_key = match options.dimension {
					GroupingDimension::Directory => entry.directory.clone(),
					GroupingDimension::Remote => entry.remote.clone(),
					GroupingDimension::None => None,
				};

				record
			})
			.collect())
	}
}

/// Scorer with a frozen clock and precomputed summaries keyed by location.
pub struct FixedScorer {
	pub now: OffsetDateTime,
	pub scores: HashMap<u32, TemporalInfo>,
}
impl FixedScorer {
	pub fn new(now: OffsetDateTime) -> Self {
		Self { now, scores: HashMap::new() }
	}

	/// Scores each location with the summary its fixture entry was built with.
	pub fn from_entries(entries: &[Entry]) -> Self {
		let scores =
			entries.iter().map(|entry| (entry.record.location, entry.record.temporal)).collect();

		Self { now: NOW, scores }
	}
}
impl TemporalScorer<u32> for FixedScorer {
	fn scan(&self, location: &u32) -> TemporalInfo {
		self.scores.get(location).copied().unwrap_or(TemporalInfo::EMPTY)
	}

	fn now(&self) -> OffsetDateTime {
		self.now
	}
}
