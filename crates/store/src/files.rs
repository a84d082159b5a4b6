use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use notepane_workspace::storage::{Result, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};
use uuid::Uuid;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
	move |source| StorageError::Io { path: path.to_path_buf(), source }
}

/// Reads and parses `path`. A missing or blank file yields `T::default()`.
pub(crate) async fn read_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
	let bytes = match tokio::fs::read(path).await {
		Ok(bytes) => bytes,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			trace!(path = %path.display(), "no backing file; using default");
			return Ok(T::default());
		}
		Err(err) => return Err(io_error(path)(err)),
	};
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(T::default());
	}
	serde_json::from_slice(&bytes).map_err(|source| StorageError::Json { path: path.to_path_buf(), source })
}

/// Serializes `value` and replaces `path` through a temp file rename.
///
/// Every call writes its own temp file, so concurrent writers to one path
/// never share a partially written file. The last rename wins.
pub(crate) async fn write_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
	let json = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Json { path: path.to_path_buf(), source })?;

	if let Some(parent) = path.parent()
		&& !parent.as_os_str().is_empty()
	{
		tokio::fs::create_dir_all(parent).await.map_err(io_error(parent))?;
	}

	let tmp = temp_path(path);
	tokio::fs::write(&tmp, &json).await.map_err(io_error(&tmp))?;
	if let Err(err) = tokio::fs::rename(&tmp, path).await {
		if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
			warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp file");
		}
		return Err(io_error(path)(err));
	}
	trace!(path = %path.display(), bytes = json.len(), "collection written");
	Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
	let name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
	path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}
