// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload intake: files picked in a dialog or dropped on the upload zone are
// listed immediately as pending, read asynchronously into data URLs, and then
// marked ready or failed.
//
// Format and size hints shown in the upload zone are labels only. Nothing here
// rejects a file because of its type or size.

use std::path::{Path, PathBuf};

use signwerk_core::error::{Result, SignwerkError};
use signwerk_core::types::{DocumentDescriptor, DocumentKind, UploadId, UploadStatus, UploadedFile};
use signwerk_core::{Notice, data_url};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};

/// A file chosen by the user, before it has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
}

impl FileSource {
    /// Describe `path` from its file name and metadata.
    ///
    /// The MIME type is guessed from the extension. A file whose metadata
    /// cannot be read is reported with size 0; its read will fail later.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        let mime_type = DocumentKind::from_file_name(&name).mime_type().to_owned();
        Self {
            path,
            name,
            size,
            mime_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read a source and encode it as a data URL.
#[instrument(skip_all, fields(name = %source.name, size = source.size))]
pub async fn read_source(source: &FileSource) -> Result<String> {
    let bytes = tokio::fs::read(&source.path)
        .await
        .map_err(|err| SignwerkError::FileRead {
            name: source.name.clone(),
            reason: err.to_string(),
        })?;
    debug!(bytes = bytes.len(), "File read");
    Ok(data_url::encode(&source.mime_type, &bytes))
}

/// Render a byte count the way the upload list shows it: `0 Bytes`, `512 Bytes`,
/// `1.5 KB`, `2 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

/// The upload list, in selection order.
#[derive(Debug, Default)]
pub struct UploadIntake {
    files: Vec<UploadedFile>,
}

impl UploadIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// List `source` as pending and return its id.
    pub fn admit(&mut self, source: &FileSource) -> UploadId {
        let entry = UploadedFile::pending(&source.name, source.size, &source.mime_type);
        let id = entry.id;
        debug!(%id, name = %source.name, mime = %source.mime_type, "Upload admitted");
        self.files.push(entry);
        id
    }

    /// Record the outcome of a read and return the notification to show.
    ///
    /// Returns `None` when the entry was removed while its read was in
    /// flight; the late result is dropped.
    pub fn complete(&mut self, id: UploadId, result: Result<String>) -> Option<Notice> {
        let Some(entry) = self.files.iter_mut().find(|f| f.id == id) else {
            debug!(%id, "Read finished for a removed upload");
            return None;
        };

        match result {
            Ok(url) => {
                entry.status = UploadStatus::Ready;
                entry.data_url = Some(url);
                info!(%id, name = %entry.name, "Upload ready");
                Some(Notice::success(format!("{} uploaded successfully", entry.name)))
            }
            Err(err) => {
                entry.status = UploadStatus::Failed;
                entry.data_url = None;
                warn!(%id, name = %entry.name, error = %err, "Upload failed");
                Some(Notice::error(format!("Failed to upload {}", entry.name)).with_detail(err.to_string()))
            }
        }
    }

    /// Admit every source, read them concurrently and complete each entry.
    ///
    /// Notices come back in completion order. A failed read only fails its
    /// own entry.
    #[instrument(skip_all, fields(count = sources.len()))]
    pub async fn ingest(&mut self, sources: Vec<FileSource>) -> Vec<Notice> {
        let mut reads: JoinSet<(UploadId, Result<String>)> = JoinSet::new();
        for source in sources {
            let id = self.admit(&source);
            reads.spawn(async move { (id, read_source(&source).await) });
        }

        let mut notices = Vec::new();
        while let Some(joined) = reads.join_next().await {
            match joined {
                Ok((id, result)) => notices.extend(self.complete(id, result)),
                Err(err) => warn!(error = %err, "Upload read task did not finish"),
            }
        }
        notices
    }

    /// Drop an entry. Returns whether it existed.
    pub fn remove(&mut self, id: UploadId) -> bool {
        let before = self.files.len();
        self.files.retain(|f| f.id != id);
        let removed = self.files.len() != before;
        if removed {
            debug!(%id, "Upload removed");
        }
        removed
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn get(&self, id: UploadId) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether "Start Signing" should be offered.
    pub fn has_ready(&self) -> bool {
        self.files.iter().any(|f| f.status == UploadStatus::Ready)
    }

    /// Navigation payload: ready entries only, in upload order.
    pub fn ready_descriptors(&self) -> Vec<DocumentDescriptor> {
        self.files.iter().filter_map(UploadedFile::descriptor).collect()
    }
}
