use unicode_segmentation::UnicodeSegmentation;

use crate::GroupKey;

const ELLIPSIS: &str = "...";

pub fn entry_label(segments: &[String], width: usize) -> String {
	truncate_graphemes(&segments.join("/"), width)
}

pub fn group_label(key: &GroupKey, member_count: usize, width: usize) -> String {
	let name = match key {
		GroupKey::Named(name) => name.as_str(),
		GroupKey::Ungrouped => "[ungrouped]",
	};

	truncate_graphemes(&format!("{name} ({member_count})"), width)
}

/// Cuts `raw` to at most `width` grapheme clusters, marking the cut with an ellipsis.
pub fn truncate_graphemes(raw: &str, width: usize) -> String {
	let count = raw.graphemes(true).count();

	if count <= width {
		return raw.to_string();
	}
	if width <= ELLIPSIS.len() {
		return raw.graphemes(true).take(width).collect();
	}

	let mut out = raw.graphemes(true).take(width - ELLIPSIS.len()).collect::<String>();

	out.push_str(ELLIPSIS);

	out
}
