//! One ranking pass: query, score, scope, then rank or group.
//!
//! A pass reads the clock once and mutates nothing it does not own, so a caller that re-runs the
//! pipeline on every keystroke can discard a stale result at any time.

use std::sync::Arc;

use serde::Serialize;

use crate::{
	EntryComparator, Error, GroupKey, GroupingDimension, QueryEngine, QueryScope, RankFields,
	RankingPolicy, Result, ScopeSession, SelectOptions, TemporalScorer, TwoTierRanker,
	group, label, policy, ranker, scope,
};
use outrank_config::Config;
use outrank_domain::{Record, TemporalInfo};

#[derive(Clone, Debug, Default)]
pub enum Mode {
	#[default]
	Flat,
	/// Keep only records under the session's roots and label them relative to their root.
	Scoped(ScopeSession),
	/// One candidate per group along the configured grouping dimension.
	Grouped,
}

#[derive(Clone, Debug)]
pub struct PipelineRequest<P> {
	pub predicate: P,
	pub scope: QueryScope,
	pub mode: Mode,
	/// Viewport width in grapheme clusters. Defaults to `display.label_width`.
	pub label_width: Option<usize>,
}
impl<P> PipelineRequest<P> {
	pub fn new(predicate: P, mode: Mode) -> Self {
		Self { predicate, scope: QueryScope::Corpus, mode, label_width: None }
	}
}

#[derive(Clone, Debug, Serialize)]
pub struct Candidate<L> {
	pub label: String,
	pub dimmed: bool,
	pub target: Target<L>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Target<L> {
	Entry { location: L, temporal: TemporalInfo },
	Group(GroupSummary<L>),
}

#[derive(Clone, Debug, Serialize)]
pub struct GroupSummary<L> {
	pub key: GroupKey,
	pub member_count: usize,
	pub aggregate: TemporalInfo,
	pub members: Vec<L>,
}

pub struct CandidatePipeline<Q, S> {
	pub cfg: Config,
	pub engine: Q,
	pub scorer: S,
	pub comparator: Arc<dyn EntryComparator>,
}
impl<Q, S> CandidatePipeline<Q, S>
where
	Q: QueryEngine,
	S: TemporalScorer<Q::Location>,
{
	pub fn new(cfg: Config, engine: Q, scorer: S) -> Result<Self> {
		outrank_config::validate(&cfg)?;

		Ok(Self { cfg, engine, scorer, comparator: Arc::new(TwoTierRanker) })
	}

	pub fn with_comparator(mut self, comparator: Arc<dyn EntryComparator>) -> Self {
		self.comparator = comparator;

		self
	}

	pub fn run(
		&self,
		req: &PipelineRequest<Q::Predicate>,
	) -> Result<Vec<Candidate<Q::Location>>> {
		let width = req.label_width.unwrap_or(self.cfg.display.label_width as usize);

		match &req.mode {
			Mode::Flat => {
				let records = self.select(req, GroupingDimension::None)?;
				let entries = records
					.into_iter()
					.map(|record| ScopedEntry { record, local_path: None })
					.collect();

				Ok(self.emit_entries(entries, width))
			},
			Mode::Scoped(session) => {
				let roots = session.active_roots()?;
				let records = self.select(req, GroupingDimension::None)?;
				let selected = records.len();
				let mut entries = Vec::with_capacity(selected);

				for record in records {
					let Some(local_path) = scope::resolve(&record.full_path, roots.iter().copied())
					else {
						continue;
					};
					let local_path = local_path.to_vec();

					entries.push(ScopedEntry { record, local_path: Some(local_path) });
				}

				tracing::debug!(
					roots = roots.len(),
					kept = entries.len(),
					dropped = selected - entries.len(),
					"Resolved records against scope roots."
				);

				Ok(self.emit_entries(entries, width))
			},
			Mode::Grouped => self.emit_groups(req, width),
		}
	}

	fn select(
		&self,
		req: &PipelineRequest<Q::Predicate>,
		dimension: GroupingDimension,
	) -> Result<Vec<Record<Q::Location>>> {
		let options = SelectOptions { scope: req.scope, dimension };
		let mut records = self.engine.select(&req.predicate, &options)?;

		for record in &mut records {
			record.temporal = self.scorer.scan(&record.location);
		}

		tracing::debug!(
			selected = records.len(),
			dimension = dimension.as_str(),
			"Selected and scored records."
		);

		Ok(records)
	}

	fn ranking_policy(&self) -> RankingPolicy {
		policy::resolve_ranking_policy::<Q::Location, S>(&self.cfg, &self.scorer)
	}

	fn emit_entries(
		&self,
		mut entries: Vec<ScopedEntry<Q::Location>>,
		width: usize,
	) -> Vec<Candidate<Q::Location>> {
		let ranking = self.ranking_policy();

		ranker::stable_sort_by_rank(&mut entries, |a, b| {
			let a = RankFields::from(&a.record);
			let b = RankFields::from(&b.record);

			self.comparator.rank(&a, &b, &ranking)
		});

		entries
			.into_iter()
			.map(|entry| {
				let path = entry.local_path.as_deref().unwrap_or(entry.record.full_path.as_slice());

				Candidate {
					label: label::entry_label(path, width),
					dimmed: self.cfg.display.dim_blocked && entry.record.blocked,
					target: Target::Entry {
						location: entry.record.location,
						temporal: entry.record.temporal,
					},
				}
			})
			.collect()
	}

	fn emit_groups(
		&self,
		req: &PipelineRequest<Q::Predicate>,
		width: usize,
	) -> Result<Vec<Candidate<Q::Location>>> {
		let dimension = policy::resolve_grouping_dimension(&self.cfg)?;

		if dimension == GroupingDimension::None {
			return Err(Error::InvalidRequest {
				message: "Grouped mode requires grouping.dimension to be directory or remote."
					.to_string(),
			});
		}

		let sort = policy::resolve_group_sort(&self.cfg)?;
		let records = self.select(req, dimension)?;
		let mut groups = group::group(records, |record| record.group_key.as_deref());

		group::sort_groups(&mut groups, sort);

		tracing::debug!(groups = groups.len(), "Grouped records.");

		Ok(groups
			.into_iter()
			.map(|group| {
				let member_count = group.members.len();
				// Groups are never empty.
				let dimmed = self.cfg.display.dim_blocked
					&& group.members.iter().all(|member| member.blocked);

				Candidate {
					label: label::group_label(&group.key, member_count, width),
					dimmed,
					target: Target::Group(GroupSummary {
						key: group.key,
						member_count,
						aggregate: group.aggregate,
						members: group.members.into_iter().map(|member| member.location).collect(),
					}),
				}
			})
			.collect())
	}
}

struct ScopedEntry<L> {
	record: Record<L>,
	/// Path relative to the matched root; `None` outside scoped mode.
	local_path: Option<Vec<String>>,
}
