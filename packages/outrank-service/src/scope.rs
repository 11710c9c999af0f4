//! Rewrites global outline paths into project-relative ones.

use outrank_domain::RootPath;

use crate::{Error, Result};

/// Roots of one scoped session.
///
/// The session is built once when the user enters scoped mode and is read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct ScopeSession {
	pub roots: Vec<RootPath>,
	/// Outline position the session was opened from.
	pub anchor: Option<Vec<String>>,
}
impl ScopeSession {
	pub fn new(roots: Vec<RootPath>) -> Self {
		Self { roots, anchor: None }
	}

	pub fn with_anchor(mut self, anchor: Vec<String>) -> Self {
		self.anchor = Some(anchor);

		self
	}

	/// Roots records are resolved against.
	///
	/// With an anchor, the scope narrows to the root that contains it and a missing root is an
	/// error. Without one, every root participates.
	pub fn active_roots(&self) -> Result<Vec<&RootPath>> {
		let Some(anchor) = self.anchor.as_deref() else {
			return Ok(self.roots.iter().collect());
		};

		match find_root(anchor, &self.roots) {
			Some(root) => Ok(vec![root]),
			None => Err(Error::NoRoot { anchor: anchor.join("/") }),
		}
	}
}

/// First root, in the given order, that is a segment-wise prefix of `full_path`.
pub fn find_root<'r, I>(full_path: &[String], roots: I) -> Option<&'r RootPath>
where
	I: IntoIterator<Item = &'r RootPath>,
{
	roots.into_iter().find(|root| root.is_prefix_of(full_path))
}

/// Path of `full_path` relative to the first matching root, or `None` when no root matches.
///
/// The last segment of the root is kept so the entry still shows which project it belongs to;
/// a single-segment root is dropped entirely.
pub fn resolve<'p, 'r, I>(full_path: &'p [String], roots: I) -> Option<&'p [String]>
where
	I: IntoIterator<Item = &'r RootPath>,
{
	let root = find_root(full_path, roots)?;
	let drop = root.len().saturating_sub(1).max(1).min(full_path.len());

	Some(&full_path[drop..])
}
