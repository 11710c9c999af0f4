use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Score;

/// Summary of a timestamp history, as produced by a temporal scorer.
///
/// `frecency` is `None` when no score could be computed. [`TemporalInfo::EMPTY`] is the identity
/// of [`TemporalInfo::merge`], so folding any number of summaries starting from it describes their
/// union regardless of order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalInfo {
	#[serde(with = "time::serde::rfc3339::option", default)]
	pub last_instant: Option<OffsetDateTime>,
	pub frecency: Option<Score>,
	pub samples: u32,
}
impl TemporalInfo {
	pub const EMPTY: Self = Self { last_instant: None, frecency: None, samples: 0 };

	/// Frecency in points.
	pub fn frecency(&self) -> Option<f64> {
		self.frecency.map(Score::points)
	}

	pub fn score(&self) -> Option<Score> {
		self.frecency
	}

	pub fn last_instant(&self) -> Option<OffsetDateTime> {
		self.last_instant
	}

	pub fn is_empty(&self) -> bool {
		self.last_instant.is_none() && self.frecency.is_none() && self.samples == 0
	}

	/// Combines two summaries into one describing the union of their histories.
	pub fn merge(self, other: Self) -> Self {
		let last_instant = match (self.last_instant, other.last_instant) {
			(Some(a), Some(b)) => Some(a.max(b)),
			(a, b) => a.or(b),
		};
		let frecency = match (self.frecency, other.frecency) {
			(Some(a), Some(b)) => Some(a.saturating_add(b)),
			(a, b) => a.or(b),
		};

		Self { last_instant, frecency, samples: self.samples.saturating_add(other.samples) }
	}
}

impl FromIterator<TemporalInfo> for TemporalInfo {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = TemporalInfo>,
	{
		iter.into_iter().fold(Self::EMPTY, Self::merge)
	}
}
