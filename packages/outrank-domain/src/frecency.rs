//! Reference scorer that turns a visit history into a [`TemporalInfo`].
//!
//! Each visit contributes the weight of the first bucket whose age limit covers it. Weights are
//! summed as [`Score`]s, so scoring the union of two histories equals merging their scores.

use time::OffsetDateTime;

use crate::{Score, TemporalInfo};
use outrank_config::FrecencyBucket;

pub fn score_history(
	history: &[OffsetDateTime],
	now: OffsetDateTime,
	buckets: &[FrecencyBucket],
) -> TemporalInfo {
	if history.is_empty() {
		return TemporalInfo::EMPTY;
	}

	let mut frecency = Score::ZERO;

	for visit in history {
		frecency = frecency.saturating_add(Score::from_points(visit_weight(*visit, now, buckets)));
	}

	TemporalInfo {
		last_instant: history.iter().copied().max(),
		frecency: Some(frecency),
		samples: u32::try_from(history.len()).unwrap_or(u32::MAX),
	}
}

fn visit_weight(visit: OffsetDateTime, now: OffsetDateTime, buckets: &[FrecencyBucket]) -> f64 {
	// Visits stamped in the future count as fresh.
	let age_days = (now - visit).whole_days().max(0);

	buckets
		.iter()
		.find(|bucket| age_days <= i64::from(bucket.max_age_days))
		.map(|bucket| bucket.weight)
		.unwrap_or(0.0)
}
