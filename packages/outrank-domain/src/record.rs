use std::fmt;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::TemporalInfo;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoState {
	#[default]
	Open,
	Done,
	/// Any keyword that is neither actionable nor finished.
	Other,
}

/// One matched outline entry for a single ranking pass.
///
/// `location` is the collaborator's handle to the entry's source. It is carried through ranking
/// and handed back to the caller untouched.
#[derive(Clone, Debug)]
pub struct Record<L> {
	/// Outline segments, outermost first. The last segment is the entry itself.
	pub full_path: Vec<String>,
	pub todo_state: TodoState,
	pub scheduled: Option<OffsetDateTime>,
	pub deadline: Option<OffsetDateTime>,
	pub temporal: TemporalInfo,
	/// Present only when the query ran with a grouping dimension.
	pub group_key: Option<String>,
	/// Display-only.
	pub blocked: bool,
	pub location: L,
}
impl<L> Record<L> {
	pub fn new(full_path: Vec<String>, location: L) -> Self {
		Self {
			full_path,
			todo_state: TodoState::Open,
			scheduled: None,
			deadline: None,
			temporal: TemporalInfo::EMPTY,
			group_key: None,
			blocked: false,
			location,
		}
	}

	pub fn heading(&self) -> Option<&str> {
		self.full_path.last().map(String::as_str)
	}
}

/// A project boundary in the outline hierarchy.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct RootPath(Vec<String>);
impl RootPath {
	pub fn new<I, S>(segments: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self(segments.into_iter().map(Into::into).collect())
	}

	/// Parses a `/`-separated outline path. Empty segments are skipped.
	pub fn parse(raw: &str) -> Self {
		Self::new(raw.split('/').map(str::trim).filter(|segment| !segment.is_empty()))
	}

	pub fn segments(&self) -> &[String] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Whether `path` starts with every segment of this root, compared segment-wise.
	pub fn is_prefix_of(&self, path: &[String]) -> bool {
		path.starts_with(&self.0)
	}
}

impl fmt::Display for RootPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0.join("/"))
	}
}
