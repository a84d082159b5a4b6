#![allow(unused_crate_dependencies)]

use chrono::Utc;
use notepane_store::JsonStore;
use notepane_workspace::persist::run_jobs;
use notepane_workspace::storage::Collection;
use notepane_workspace::{DocumentId, Note, Settings, Side, Storage, StorageError, Workspace, WorkspaceOptions};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn missing_files_load_as_defaults() {
	let dir = tempfile::tempdir().unwrap();
	let store = JsonStore::new(dir.path().join("never-created"));
	assert!(store.load_notes().await.unwrap().is_empty());
	assert!(store.load_folders().await.unwrap().is_empty());
	assert!(store.load_trash().await.unwrap().is_empty());
	assert_eq!(store.load_settings().await.unwrap(), Settings::default());
}

#[tokio::test]
async fn malformed_json_reports_the_path() {
	let dir = tempfile::tempdir().unwrap();
	let store = JsonStore::new(dir.path());
	tokio::fs::write(store.path(Collection::Notes), "{ not json").await.unwrap();

	let err = store.load_notes().await.unwrap_err();
	let StorageError::Json { path, .. } = &err else {
		panic!("expected a JSON error, got {err}");
	};
	assert_eq!(path, &store.path(Collection::Notes));
}

#[tokio::test]
async fn files_use_the_app_field_names() {
	let dir = tempfile::tempdir().unwrap();
	let store = JsonStore::new(dir.path());
	store.save_notes(vec![Note::new(DocumentId::from("n1"), "Groceries", Utc::now())]).await.unwrap();

	let raw = tokio::fs::read_to_string(store.path(Collection::Notes)).await.unwrap();
	let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
	assert_eq!(value[0]["id"], "n1");
	assert_eq!(value[0]["title"], "Groceries");
	assert!(value[0].get("createdAt").is_some());
}

#[tokio::test]
async fn workspace_round_trips_through_the_directory() {
	let dir = tempfile::tempdir().unwrap();
	let store = JsonStore::new(dir.path());

	let mut ws = Workspace::new(WorkspaceOptions::default());
	let a = ws.create_note(Some("a"));
	let b = ws.create_note(Some("b"));
	let folder = ws.create_folder("Work", None).unwrap();
	ws.move_note_to_folder(&a, Some(&folder));
	ws.open_in(Side::Left, &a);
	ws.split_note(&b);
	ws.trash_note(&b);
	let session = ws.session();
	assert_eq!(run_jobs(&store, ws.take_persist_jobs()).await, 0);

	let restored = Workspace::hydrate(WorkspaceOptions::default(), &store).await;
	assert_eq!(restored.session(), session);
	assert_eq!(restored.note(&a).unwrap().folder_id.as_ref(), Some(&folder));
	assert_eq!(restored.trash().len(), 1);
	assert_eq!(restored.trash()[0].id(), b.as_str());
	assert!(restored.dirty().is_empty());
}

#[tokio::test]
async fn desktop_data_directory_loads() {
	let dir = tempfile::tempdir().unwrap();
	let store = JsonStore::new(dir.path());
	let note = serde_json::json!({
		"id": "n1",
		"title": "Trip",
		"contentHtml": "<p>pack</p>",
		"tags": [],
		"folderId": null,
		"images": [{ "id": "img1" }],
		"history": [{ "html": "<p>pack</p>", "images": [], "cursor": null }],
		"historyIndex": -1,
		"createdAt": "2024-02-05T09:30:00.000Z",
		"updatedAt": "2024-02-05T09:30:00.000Z"
	});
	let mut trashed = note.clone();
	trashed["id"] = "n2".into();
	trashed["deletedAt"] = "2024-03-01T12:00:00.000Z".into();
	tokio::fs::write(store.path(Collection::Notes), serde_json::to_vec(&[note]).unwrap()).await.unwrap();
	tokio::fs::write(store.path(Collection::Trash), serde_json::to_vec(&[trashed]).unwrap()).await.unwrap();

	let mut ws = Workspace::hydrate(WorkspaceOptions::default(), &store).await;
	assert!(ws.unreadable().is_empty());
	let n1 = DocumentId::from("n1");
	assert_eq!(ws.note(&n1).unwrap().content, "<p>pack</p>");
	assert_eq!(ws.note(&n1).unwrap().history.index(), Some(0));
	assert_eq!(ws.trash()[0].id(), "n2");

	ws.rename_note(&n1, "Trip 2");
	assert_eq!(run_jobs(&store, ws.take_persist_jobs()).await, 0);
	let raw: serde_json::Value = serde_json::from_slice(&tokio::fs::read(store.path(Collection::Notes)).await.unwrap()).unwrap();
	assert_eq!(raw[0]["images"][0]["id"], "img1");
	assert_eq!(raw[0]["title"], "Trip 2");
}

#[tokio::test]
async fn unparsable_notes_are_never_overwritten() {
	let dir = tempfile::tempdir().unwrap();
	let store = JsonStore::new(dir.path());
	let broken = r#"[{ "id": "n1", "history": "not a list" }]"#;
	tokio::fs::write(store.path(Collection::Notes), broken).await.unwrap();

	let mut ws = Workspace::hydrate(WorkspaceOptions::default(), &store).await;
	assert!(ws.notes().is_empty());
	ws.create_note(Some("fresh"));
	let jobs = ws.take_persist_jobs();
	assert!(jobs.iter().all(|job| job.collection() != Collection::Notes));
	assert_eq!(run_jobs(&store, jobs).await, 0);

	assert_eq!(tokio::fs::read_to_string(store.path(Collection::Notes)).await.unwrap(), broken);
	assert!(store.path(Collection::Settings).exists());
}
