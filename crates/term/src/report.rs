//! Printable results of one command.

use std::fmt;

use notepane_workspace::search::{SearchHit, SearchMatch};
use notepane_workspace::{DocumentId, FolderId, Side, Workspace};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
	pub id: DocumentId,
	pub title: String,
	pub pinned: bool,
	pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneView {
	pub side: Side,
	pub tabs: Vec<TabView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowView {
	pub id: DocumentId,
	pub minimized: bool,
	pub focused: bool,
}

/// Snapshot of everything the panes and windows show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
	pub split: bool,
	pub panes: Vec<PaneView>,
	pub windows: Vec<WindowView>,
	pub notes: usize,
	pub trash: usize,
}

impl StatusView {
	pub fn capture(ws: &Workspace) -> Self {
		let title = |id: &DocumentId| ws.note(id).map(|note| note.title.clone()).unwrap_or_default();
		let panes = Side::ALL
			.into_iter()
			.map(|side| {
				let active = ws.layout().slot(side).active();
				PaneView {
					side,
					tabs: ws
						.ordered_tabs(side)
						.into_iter()
						.map(|id| TabView {
							id: id.clone(),
							title: title(id),
							pinned: ws.layout().is_pinned(id),
							active: active == Some(id),
						})
						.collect(),
				}
			})
			.collect();
		let focused = ws.windows().focused();
		let windows = ws
			.windows()
			.iter()
			.map(|(id, state)| WindowView {
				id: id.clone(),
				minimized: state.minimized,
				focused: focused == Some(id),
			})
			.collect();
		Self {
			split: ws.layout().split_mode(),
			panes,
			windows,
			notes: ws.notes().len(),
			trash: ws.trash().len(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderView {
	pub id: String,
	pub name: String,
	pub depth: usize,
	pub open: bool,
	pub notes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrashView {
	pub id: String,
	pub label: String,
	pub deleted_at: String,
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Report {
	Status(StatusView),
	Created { id: DocumentId, status: StatusView },
	Changed { changed: bool, status: StatusView },
	Content { id: DocumentId, content: String, caret: Option<usize> },
	Unchanged { reason: String },
	Search { hits: Vec<SearchHit> },
	Folders { folders: Vec<FolderView> },
	Trash { items: Vec<TrashView> },
	Exported { path: String, notes: usize },
	Imported { folder: FolderId, folder_name: String, notes: Vec<DocumentId> },
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Report::Status(status) => write_status(f, status),
			Report::Created { id, status } => {
				writeln!(f, "created {id}")?;
				write_status(f, status)
			}
			Report::Changed { changed, status } => {
				if !changed {
					writeln!(f, "nothing changed")?;
				}
				write_status(f, status)
			}
			Report::Content { id, content, caret } => {
				writeln!(f, "{id}:")?;
				writeln!(f, "{content}")?;
				if let Some(caret) = caret {
					writeln!(f, "caret at {caret}")?;
				}
				Ok(())
			}
			Report::Unchanged { reason } => writeln!(f, "{reason}"),
			Report::Search { hits } => {
				if hits.is_empty() {
					return writeln!(f, "no matches");
				}
				for hit in hits {
					writeln!(f, "{}  {}", hit.id, hit.title)?;
					for found in &hit.matches {
						match found {
							SearchMatch::Title { .. } => writeln!(f, "    title")?,
							SearchMatch::Tags { tags } => writeln!(f, "    tags: {}", tags.join(", "))?,
							SearchMatch::Folder { name } => writeln!(f, "    folder: {name}")?,
							SearchMatch::Content { excerpt } => writeln!(f, "    {excerpt}")?,
						}
					}
				}
				Ok(())
			}
			Report::Folders { folders } => {
				for folder in folders {
					let marker = if folder.open { '-' } else { '+' };
					writeln!(f, "{:indent$}{marker} {} ({} notes)  {}", "", folder.name, folder.notes, folder.id, indent = folder.depth * 2)?;
				}
				Ok(())
			}
			Report::Trash { items } => {
				if items.is_empty() {
					return writeln!(f, "trash is empty");
				}
				for item in items {
					writeln!(f, "{}  {}  {}", item.deleted_at, item.id, item.label)?;
				}
				Ok(())
			}
			Report::Exported { path, notes } => writeln!(f, "exported {notes} notes to {path}"),
			Report::Imported { folder_name, notes, .. } => writeln!(f, "imported {} notes into \"{folder_name}\"", notes.len()),
		}
	}
}

fn write_status(f: &mut fmt::Formatter<'_>, status: &StatusView) -> fmt::Result {
	writeln!(f, "split: {}", if status.split { "on" } else { "off" })?;
	for pane in &status.panes {
		write!(f, "{:>5}:", pane.side.as_str())?;
		if pane.tabs.is_empty() {
			write!(f, " (empty)")?;
		}
		for tab in &pane.tabs {
			let pin = if tab.pinned { "^" } else { "" };
			if tab.active {
				write!(f, " [{pin}{}]", tab.title)?;
			} else {
				write!(f, " {pin}{}", tab.title)?;
			}
		}
		writeln!(f)?;
	}
	for window in &status.windows {
		let state = match (window.minimized, window.focused) {
			(true, _) => "docked",
			(false, true) => "focused",
			(false, false) => "floating",
		};
		writeln!(f, "window {} ({state})", window.id)?;
	}
	writeln!(f, "{} notes, {} in trash", status.notes, status.trash)
}
