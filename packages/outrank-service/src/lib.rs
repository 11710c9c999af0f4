pub mod group;
pub mod label;
pub mod pipeline;
pub mod policy;
pub mod ranker;
pub mod scope;

mod error;

pub use error::{Error, Result};
pub use group::{Group, GroupKey, GroupSort, GroupingDimension};
pub use pipeline::{Candidate, CandidatePipeline, GroupSummary, Mode, PipelineRequest, Target};
pub use ranker::{EntryComparator, Rank, RankFields, RankingPolicy, TwoTierRanker};
pub use scope::ScopeSession;

use time::{Duration, OffsetDateTime, Time};

use outrank_domain::{Record, TemporalInfo};

/// Which part of the collection a query scans.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum QueryScope {
	#[default]
	Corpus,
	CurrentDocument,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SelectOptions {
	pub scope: QueryScope,
	/// Dimension the engine derives `group_key` from. [`GroupingDimension::None`] leaves it unset.
	pub dimension: GroupingDimension,
}

/// Structured query engine that yields the raw matches for a predicate.
pub trait QueryEngine {
	type Location;
	type Predicate;

	fn select(
		&self,
		predicate: &Self::Predicate,
		options: &SelectOptions,
	) -> Result<Vec<Record<Self::Location>>>;
}

/// Single-record temporal scoring model plus the clock the ranking pass reads.
pub trait TemporalScorer<L> {
	/// Summarizes the timestamp history below `location`. Unreadable history yields an empty
	/// summary, never an error.
	fn scan(&self, location: &L) -> TemporalInfo;

	fn now(&self) -> OffsetDateTime;

	/// Start of the day `days` after today, or `None` past the representable calendar.
	fn midnight_in_days(&self, days: u32) -> Option<OffsetDateTime> {
		self.now().replace_time(Time::MIDNIGHT).checked_add(Duration::days(i64::from(days)))
	}
}
