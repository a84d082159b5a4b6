//! Applies one parsed command to a hydrated workspace.

use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail, ensure};
use chrono::Local;
use notepane_workspace::{Cursor, DocumentId, EditOutcome, EditTrigger, Folder, FolderId, HistoryOutcome, Workspace};
use tracing::debug;

use crate::cli::{Command, Toggle, WindowAction};
use crate::report::{FolderView, Report, StatusView, TrashView};

/// Runs `command` against `ws`. Unknown note ids are errors; operations the
/// workspace rejects for other reasons report `changed: false`.
pub fn execute(ws: &mut Workspace, command: Command) -> Result<Report> {
	debug!(?command, "executing");
	let changed = match command {
		Command::Status => return Ok(Report::Status(StatusView::capture(ws))),
		Command::New { title } => {
			let id = ws.create_note(title.as_deref());
			return Ok(Report::Created {
				id,
				status: StatusView::capture(ws),
			});
		}
		Command::Open { id, side } => {
			let id = known_note(ws, &id)?;
			match side {
				Some(side) => ws.open_in(side, &id),
				None => ws.open_note(&id).is_some(),
			}
		}
		Command::Close { id, side } => ws.close_tab(side, &known_note(ws, &id)?),
		Command::Drop { id, from } => ws.drop_on_zone(from, &known_note(ws, &id)?),
		Command::Duplicate { id } => {
			let Some(id) = ws.duplicate_note(&known_note(ws, &id)?) else {
				bail!("no note with id '{id}'");
			};
			return Ok(Report::Created {
				id,
				status: StatusView::capture(ws),
			});
		}
		Command::Export { path } => return export(ws, &path),
		Command::Import { path } => return import(ws, &path),
		Command::Split { state: Toggle::On } => ws.enable_split(),
		Command::Split { state: Toggle::Off } => ws.disable_split(),
		Command::Swap => ws.swap_panes(),
		Command::Pin { id } => ws.toggle_pin(&known_note(ws, &id)?),
		Command::Window { action } => window(ws, action)?,
		Command::Trash { id } => {
			let note = DocumentId::from(id.as_str());
			if ws.has_note(&note) {
				ws.trash_note(&note)
			} else if ws.trash_folder(&FolderId::from(id.as_str())) {
				true
			} else {
				bail!("no note or folder with id '{id}'");
			}
		}
		Command::Restore { id } => {
			ensure!(ws.trash().iter().any(|item| item.id() == id), "nothing in the trash with id '{id}'");
			ws.restore_from_trash(&id)
		}
		Command::TrashList => return Ok(trash_list(ws)),
		Command::Home => ws.home(),
		Command::Search { query } => {
			return Ok(Report::Search {
				hits: ws.search(&query.join(" ")),
			});
		}
		Command::Edit { id, content, offset } => return edit(ws, &known_note(ws, &id)?, &content, offset),
		Command::Undo { id } => return history(ws, &known_note(ws, &id)?, true),
		Command::Redo { id } => return history(ws, &known_note(ws, &id)?, false),
		Command::Folders => return Ok(folder_tree(ws)),
	};
	Ok(Report::Changed {
		changed,
		status: StatusView::capture(ws),
	})
}

fn known_note(ws: &Workspace, id: &str) -> Result<DocumentId> {
	let id = DocumentId::from(id);
	ensure!(ws.has_note(&id), "no note with id '{id}'");
	Ok(id)
}

fn export(ws: &Workspace, path: &Path) -> Result<Report> {
	let json = ws.export_notes().context("failed to encode notes")?;
	std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
	Ok(Report::Exported {
		path: path.display().to_string(),
		notes: ws.notes().len(),
	})
}

fn import(ws: &mut Workspace, path: &Path) -> Result<Report> {
	let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	let summary = ws.import_notes(&raw, Local::now()).with_context(|| format!("failed to import {}", path.display()))?;
	Ok(Report::Imported {
		folder: summary.folder,
		folder_name: summary.folder_name,
		notes: summary.notes,
	})
}

fn window(ws: &mut Workspace, action: WindowAction) -> Result<bool> {
	Ok(match action {
		WindowAction::Open { id } => ws.open_window(&known_note(ws, &id)?).is_some(),
		WindowAction::Minimize { id } => ws.minimize_window(&known_note(ws, &id)?),
		WindowAction::Restore { id } => ws.restore_window(&known_note(ws, &id)?),
		WindowAction::Close { id } => ws.close_window(&known_note(ws, &id)?),
	})
}

/// A one-shot process never idles, so a deferred commit is settled right
/// away.
fn edit(ws: &mut Workspace, id: &DocumentId, content: &str, offset: Option<usize>) -> Result<Report> {
	let now = Instant::now();
	match ws.edit(id, content, offset.map(Cursor::at), EditTrigger::Typing, now) {
		EditOutcome::Locked => {
			return Ok(Report::Unchanged {
				reason: format!("note '{id}' is locked"),
			});
		}
		EditOutcome::Unknown => bail!("no note with id '{id}'"),
		EditOutcome::Scheduled(_) | EditOutcome::Committed | EditOutcome::Applied => {}
	}
	if let Some(deadline) = ws.next_commit_deadline() {
		ws.tick(deadline);
	}
	Ok(Report::Content {
		id: id.clone(),
		content: content.to_owned(),
		caret: offset,
	})
}

fn history(ws: &mut Workspace, id: &DocumentId, undo: bool) -> Result<Report> {
	let outcome = if undo { ws.undo(id) } else { ws.redo(id) };
	Ok(match outcome {
		HistoryOutcome::Applied { content, caret } => Report::Content {
			id: id.clone(),
			content,
			caret: caret.offset(),
		},
		HistoryOutcome::NothingToUndo => Report::Unchanged {
			reason: "nothing to undo".to_owned(),
		},
		HistoryOutcome::NothingToRedo => Report::Unchanged {
			reason: "nothing to redo".to_owned(),
		},
		HistoryOutcome::Unknown => bail!("no note with id '{id}'"),
	})
}

/// Folders depth first, children right after their parent.
fn folder_tree(ws: &Workspace) -> Report {
	let mut walk = FolderWalk {
		ws,
		seen: HashSet::new(),
		out: Vec::with_capacity(ws.folders().len()),
	};
	for root in ws.folders().iter().filter(|folder| folder.parent_id.is_none()) {
		walk.visit(root, 0);
	}
	// Folders whose parent chain never reaches a root (missing parent or a
	// cycle) are listed at the top level.
	for folder in ws.folders() {
		walk.visit(folder, 0);
	}
	Report::Folders { folders: walk.out }
}

struct FolderWalk<'a> {
	ws: &'a Workspace,
	seen: HashSet<&'a FolderId>,
	out: Vec<FolderView>,
}

impl<'a> FolderWalk<'a> {
	fn visit(&mut self, folder: &'a Folder, depth: usize) {
		if !self.seen.insert(&folder.id) {
			return;
		}
		let ws = self.ws;
		self.out.push(FolderView {
			id: folder.id.to_string(),
			name: folder.name.clone(),
			depth,
			open: ws.is_folder_open(folder.id.as_str()),
			notes: ws.notes().iter().filter(|note| note.folder_id.as_ref() == Some(&folder.id)).count(),
		});
		for child in ws.folders().iter().filter(|child| child.parent_id.as_ref() == Some(&folder.id)) {
			self.visit(child, depth + 1);
		}
	}
}

fn trash_list(ws: &Workspace) -> Report {
	Report::Trash {
		items: ws
			.trash()
			.iter()
			.map(|item| TrashView {
				id: item.id().to_owned(),
				label: item.label().to_owned(),
				deleted_at: item.deleted_at.format("%Y-%m-%d %H:%M").to_string(),
			})
			.collect(),
	}
}
