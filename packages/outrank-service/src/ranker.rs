//! Two-tier ordering of entries: scheduling urgency first, then frecency.
//!
//! The ordering is partial on purpose. Pairs that neither tier separates keep their arrival order,
//! which is why sorting goes through [`stable_sort_by_rank`] instead of `slice::sort_by`.

use time::OffsetDateTime;

use outrank_domain::{Record, TodoState};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rank {
	Before,
	After,
	Unordered,
}

/// The parts of a record the ranking looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RankFields {
	pub todo_state: TodoState,
	pub scheduled: Option<OffsetDateTime>,
	pub deadline: Option<OffsetDateTime>,
	pub frecency: Option<f64>,
}
impl<L> From<&Record<L>> for RankFields {
	fn from(record: &Record<L>) -> Self {
		Self {
			todo_state: record.todo_state,
			scheduled: record.scheduled,
			deadline: record.deadline,
			frecency: record.temporal.frecency(),
		}
	}
}

/// Ranking inputs resolved once per invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankingPolicy {
	pub threshold_frecency: f64,
	/// Schedules at or after this instant are snoozed. `None` disables snoozing.
	pub snooze_cutoff: Option<OffsetDateTime>,
}
impl Default for RankingPolicy {
	fn default() -> Self {
		Self { threshold_frecency: 50.0, snooze_cutoff: None }
	}
}

pub trait EntryComparator
where
	Self: Send + Sync,
{
	/// Where `a` belongs relative to `b`. Implementations need not be antisymmetric.
	fn rank(&self, a: &RankFields, b: &RankFields, policy: &RankingPolicy) -> Rank;
}

/// Default comparator.
///
/// When either side is urgent, urgency alone decides: the earlier instant wins and an urgent
/// entry goes before a non-urgent one. Otherwise an entry goes first only on a clear frecency
/// win: it clears the threshold while the other does not, or both clear it and it scores
/// strictly higher.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoTierRanker;
impl EntryComparator for TwoTierRanker {
	fn rank(&self, a: &RankFields, b: &RankFields, policy: &RankingPolicy) -> Rank {
		if let Some(rank) = rank_by_urgency(a, b, policy) {
			return rank;
		}

		rank_by_frecency(a.frecency, b.frecency, policy.threshold_frecency)
	}
}

/// Instant an entry is due, unless it is done or snoozed past the cutoff.
pub fn urgency(fields: &RankFields, policy: &RankingPolicy) -> Option<OffsetDateTime> {
	if fields.todo_state == TodoState::Done {
		return None;
	}

	let due = fields.scheduled.or(fields.deadline)?;

	match policy.snooze_cutoff {
		Some(cutoff) if due >= cutoff => None,
		_ => Some(due),
	}
}

/// Stable merge sort that moves an element ahead of an earlier one only when the comparator says
/// it ranks [`Rank::Before`] it.
///
/// Never panics on inconsistent answers, so comparators that are neither antisymmetric nor
/// transitive are fine.
pub fn stable_sort_by_rank<T, F>(items: &mut Vec<T>, mut rank: F)
where
	F: FnMut(&T, &T) -> Rank,
{
	if items.len() < 2 {
		return;
	}

	let identity = (0..items.len()).collect::<Vec<_>>();
	let order =
		merge_order(&identity, items, &mut |a: &T, b: &T| rank(a, b) == Rank::Before);
	let mut slots = items.drain(..).map(Some).collect::<Vec<_>>();

	items.extend(order.into_iter().filter_map(|idx| slots[idx].take()));
}

fn rank_by_urgency(a: &RankFields, b: &RankFields, policy: &RankingPolicy) -> Option<Rank> {
	match (urgency(a, policy), urgency(b, policy)) {
		(Some(ua), Some(ub)) => Some(if ua < ub { Rank::Before } else { Rank::After }),
		(Some(_), None) => Some(Rank::Before),
		(None, Some(_)) => Some(Rank::After),
		(None, None) => None,
	}
}

fn rank_by_frecency(fa: Option<f64>, fb: Option<f64>, threshold: f64) -> Rank {
	if clear_frecency_win(fa, fb, threshold) {
		Rank::Before
	} else if clear_frecency_win(fb, fa, threshold) {
		Rank::After
	} else {
		Rank::Unordered
	}
}

fn clear_frecency_win(fa: Option<f64>, fb: Option<f64>, threshold: f64) -> bool {
	// Absent frecency sits below every threshold.
	let fa = fa.unwrap_or(f64::NEG_INFINITY);
	let fb = fb.unwrap_or(f64::NEG_INFINITY);

	fa >= threshold && (fb < threshold || fa > fb)
}

fn merge_order<T, F>(order: &[usize], items: &[T], precedes: &mut F) -> Vec<usize>
where
	F: FnMut(&T, &T) -> bool,
{
	if order.len() < 2 {
		return order.to_vec();
	}

	let (left, right) = order.split_at(order.len() / 2);
	let left = merge_order(left, items, precedes);
	let right = merge_order(right, items, precedes);
	let mut merged = Vec::with_capacity(order.len());
	let (mut i, mut j) = (0, 0);

	while i < left.len() && j < right.len() {
		if precedes(&items[right[j]], &items[left[i]]) {
			merged.push(right[j]);

			j += 1;
		} else {
			merged.push(left[i]);

			i += 1;
		}
	}

	merged.extend_from_slice(&left[i..]);
	merged.extend_from_slice(&right[j..]);

	merged
}
