use crate::domain::tts::AudioFormat;
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Local, Utc};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Result of a delete request against the history directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    AlreadyAbsent,
}

/// Flat directory of synthesized audio files.
///
/// Entries are immutable once written and are addressed only by filename.
/// Every filename coming from a caller is resolved against the canonical
/// directory path and refused if it lands outside of it.
pub struct HistoryRepository {
    dir: PathBuf,
}

impl HistoryRepository {
    /// Open the history directory, creating it if needed
    pub async fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref();

        fs::create_dir_all(dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to create history directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let dir = fs::canonicalize(dir).await.map_err(|e| {
            AppError::Internal(format!(
                "Failed to resolve history directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        Ok(Self { dir })
    }

    /// Canonical path of the history directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{YYYYMMDD_HHMMSS}_{8 hex}.{ext}` using local time
    pub fn generate_filename(format: AudioFormat) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}_{}.{}",
            Local::now().format("%Y%m%d_%H%M%S"),
            &suffix[..8],
            format.extension()
        )
    }

    /// Write a new entry and return its filename
    pub async fn put(&self, data: &[u8], format: AudioFormat) -> AppResult<String> {
        let filename = Self::generate_filename(format);
        let path = self.dir.join(&filename);

        fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(format!("Failed to write history file {}: {}", filename, e))
        })?;

        tracing::debug!(filename = %filename, size = data.len(), "Saved history audio");

        Ok(filename)
    }

    /// All entries, most recently modified first
    pub async fn list(&self) -> AppResult<Vec<String>> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read history directory: {}", e)))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read history directory: {}", e)))?
        {
            let metadata = match fs::metadata(entry.path()).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!(path = ?entry.path(), error = %e, "Skipping unreadable history entry");
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };
            files.push((modified, entry.file_name().to_string_lossy().into_owned()));
        }

        files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        Ok(files.into_iter().map(|(_, name)| name).collect())
    }

    /// Read the bytes of an entry
    pub async fn read(&self, filename: &str) -> AppResult<Vec<u8>> {
        let path = self.resolve(filename).await?;

        // Only regular files are entries
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(AppError::NotFound(filename.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(filename.to_string()))
            }
            Err(e) => {
                return Err(AppError::Internal(format!(
                    "Failed to inspect history file {}: {}",
                    filename, e
                )))
            }
        }

        fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound(filename.to_string()),
            _ => AppError::Internal(format!("Failed to read history file {}: {}", filename, e)),
        })
    }

    /// Delete an entry. Deleting a missing entry is not an error.
    pub async fn delete(&self, filename: &str) -> AppResult<DeleteOutcome> {
        let path = self.resolve(filename).await?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(filename = %filename, "Deleted history audio");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyAbsent),
            Err(e) => {
                tracing::error!(filename = %filename, error = %e, "Failed to delete history file");
                Err(AppError::Internal(
                    "Internal error while deleting the file.".to_string(),
                ))
            }
        }
    }

    /// Remove every file modified strictly before `threshold`.
    ///
    /// Files that cannot be inspected or removed are logged and skipped.
    /// Returns the number of files removed.
    pub async fn remove_older_than(&self, threshold: DateTime<Utc>) -> AppResult<usize> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read history directory: {}", e)))?;

        let mut deleted = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read history directory: {}", e)))?
        {
            let path = entry.path();
            match Self::remove_if_expired(&path, threshold).await {
                Ok(true) => deleted += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(
                        file = %entry.file_name().to_string_lossy(),
                        error = %e,
                        "Failed to process history file during cleanup"
                    );
                }
            }
        }

        Ok(deleted)
    }

    /// Whether the directory can currently be read
    pub async fn is_accessible(&self) -> bool {
        fs::metadata(&self.dir)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }

    async fn remove_if_expired(path: &Path, threshold: DateTime<Utc>) -> std::io::Result<bool> {
        let metadata = fs::metadata(path).await?;
        if !metadata.is_file() {
            return Ok(false);
        }

        let modified: DateTime<Utc> = metadata.modified()?.into();
        if modified < threshold {
            fs::remove_file(path).await?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Resolve a caller supplied name to a path inside the directory
    async fn resolve(&self, filename: &str) -> AppResult<PathBuf> {
        let candidate = self.dir.join(filename);

        // Missing files cannot be canonicalized, fall back to lexical resolution
        let resolved = match fs::canonicalize(&candidate).await {
            Ok(path) => path,
            Err(_) => normalize(&candidate),
        };

        if resolved == self.dir || !resolved.starts_with(&self.dir) {
            tracing::warn!(filename = %filename, "Refused access outside history directory");
            return Err(AppError::Forbidden(format!(
                "'{}' is outside the history directory",
                filename
            )));
        }

        Ok(resolved)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
