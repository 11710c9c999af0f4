use std::cmp::Ordering;

use indexmap::IndexMap;
use serde::Serialize;

use outrank_domain::{Record, Score, TemporalInfo};

/// Attribute the query engine derives group keys from. Chosen once per invocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GroupingDimension {
	Directory,
	Remote,
	#[default]
	None,
}
impl GroupingDimension {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Directory => "directory",
			Self::Remote => "remote",
			Self::None => "none",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GroupSort {
	#[default]
	Frecency,
	None,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
	Named(String),
	/// Records without a derivable key.
	Ungrouped,
}

#[derive(Clone, Debug)]
pub struct Group<L> {
	pub key: GroupKey,
	pub members: Vec<Record<L>>,
	pub aggregate: TemporalInfo,
}

/// Partitions `records` by `key_of`, keeping groups in first-seen order and members in input
/// order.
pub fn group<L, F>(records: Vec<Record<L>>, key_of: F) -> Vec<Group<L>>
where
	F: Fn(&Record<L>) -> Option<&str>,
{
	let mut buckets: IndexMap<GroupKey, Vec<Record<L>>> = IndexMap::new();

	for record in records {
		let key = match key_of(&record) {
			Some(key) => GroupKey::Named(key.to_string()),
			None => GroupKey::Ungrouped,
		};

		buckets.entry(key).or_default().push(record);
	}

	buckets
		.into_iter()
		.map(|(key, members)| {
			let aggregate = members.iter().map(|member| member.temporal).collect();

			Group { key, members, aggregate }
		})
		.collect()
}

/// Orders groups by `sort`. Frecency sorts descending with absent scores last; ties keep their
/// grouping order.
pub fn sort_groups<L>(groups: &mut [Group<L>], sort: GroupSort) {
	match sort {
		GroupSort::Frecency => groups.sort_by(|a, b| {
			cmp_frecency_desc(a.aggregate.score(), b.aggregate.score())
		}),
		GroupSort::None => {},
	}
}

fn cmp_frecency_desc(a: Option<Score>, b: Option<Score>) -> Ordering {
	match (a, b) {
		(Some(a), Some(b)) => b.cmp(&a),
		(Some(_), None) => Ordering::Less,
		(None, Some(_)) => Ordering::Greater,
		(None, None) => Ordering::Equal,
	}
}
