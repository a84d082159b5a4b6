//! Case-insensitive note search.

use notepane_primitives::DocumentId;
use serde::Serialize;

use crate::history::caret::flatten;
use crate::model::{Folder, Note};

/// Characters of context kept on each side of a content match.
pub const EXCERPT_CONTEXT: usize = 50;

/// What part of a note matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchMatch {
	Title { text: String },
	Tags { tags: Vec<String> },
	Folder { name: String },
	Content { excerpt: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
	pub id: DocumentId,
	pub title: String,
	pub matches: Vec<SearchMatch>,
}

/// Searches titles, tags, folder names and flattened content.
///
/// A blank query matches nothing. Hits keep the order of `notes`.
pub fn search(notes: &[Note], folders: &[Folder], query: &str) -> Vec<SearchHit> {
	let needle = query.trim().to_lowercase();
	if needle.is_empty() {
		return Vec::new();
	}
	notes
		.iter()
		.filter_map(|note| {
			let matches = match_note(note, folders, &needle);
			(!matches.is_empty()).then(|| SearchHit {
				id: note.id.clone(),
				title: note.title.clone(),
				matches,
			})
		})
		.collect()
}

fn match_note(note: &Note, folders: &[Folder], needle: &str) -> Vec<SearchMatch> {
	let mut matches = Vec::new();
	if note.title.to_lowercase().contains(needle) {
		matches.push(SearchMatch::Title { text: note.title.clone() });
	}

	let tags: Vec<String> = note.tags.iter().filter(|tag| tag.to_lowercase().contains(needle)).cloned().collect();
	if !tags.is_empty() {
		matches.push(SearchMatch::Tags { tags });
	}

	if let Some(folder_id) = &note.folder_id
		&& let Some(folder) = folders.iter().find(|folder| &folder.id == folder_id)
		&& folder.name.to_lowercase().contains(needle)
	{
		matches.push(SearchMatch::Folder { name: folder.name.clone() });
	}

	if let Some(excerpt) = excerpt(&flatten(&note.content), needle) {
		matches.push(SearchMatch::Content { excerpt });
	}
	matches
}

/// Cuts the text around the first match of `needle`, marking elided ends
/// with `...`. Offsets are in characters.
fn excerpt(text: &str, needle: &str) -> Option<String> {
	let chars: Vec<char> = text.chars().collect();
	let lowered: Vec<char> = chars.iter().map(|c| c.to_lowercase().next().unwrap_or(*c)).collect();
	let target: Vec<char> = needle.chars().collect();
	if target.len() > lowered.len() {
		return None;
	}
	let at = lowered.windows(target.len()).position(|window| window == target.as_slice())?;

	let start = at.saturating_sub(EXCERPT_CONTEXT);
	let end = (at + target.len() + EXCERPT_CONTEXT).min(chars.len());
	let mut out = String::new();
	if start > 0 {
		out.push_str("...");
	}
	out.extend(&chars[start..end]);
	if end < chars.len() {
		out.push_str("...");
	}
	Some(out)
}
