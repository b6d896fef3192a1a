// src/download.rs

use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{error::AppError, models::content::DownloadResponse};

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]+"#).expect("valid regex"));

const FALLBACK_FILENAME: &str = "chapter.md";

/// Makes a service-supplied filename safe to create inside the download directory.
///
/// * Path separators and characters Windows rejects become `_`.
/// * Leading dots are stripped so nothing lands hidden or as `..`.
/// * An empty result falls back to `chapter.md`.
pub fn sanitize_filename(raw: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(raw.trim(), "_");
    let cleaned = cleaned.trim_start_matches('.').trim();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Writes a downloaded chapter into `dir`, creating it if needed. Returns the written path.
pub async fn save_chapter(dir: &Path, download: &DownloadResponse) -> Result<PathBuf, AppError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        tracing::error!("Failed to create download directory {}: {:?}", dir.display(), e);
        AppError::from(e)
    })?;

    let path = dir.join(sanitize_filename(&download.filename));
    tokio::fs::write(&path, download.content.as_bytes())
        .await
        .map_err(|e| {
            tracing::error!("Failed to write {}: {:?}", path.display(), e);
            AppError::from(e)
        })?;

    tracing::info!("Saved chapter to {}", path.display());
    Ok(path)
}
