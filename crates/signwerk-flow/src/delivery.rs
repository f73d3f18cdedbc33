// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export delivery: writes signatures and signed documents to the downloads
// directory under timestamped names.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use signwerk_core::AppConfig;
use signwerk_core::error::Result;
use signwerk_document::export::{PDF_EXTENSION, PNG_EXTENSION, signed_file_name};
use signwerk_document::{DocumentCanvas, FlattenedDocument, SignatureImage};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// Destination for everything the user downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloads {
    dir: PathBuf,
}

/// What a completed save-and-export produced.
#[derive(Debug, Clone)]
pub struct SavedExport {
    pub flattened: FlattenedDocument,
    pub pdf_path: PathBuf,
}

impl Downloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The configured directory, or `~/Downloads`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.download_dir.clone().unwrap_or_else(default_download_dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `signature.png`.
    pub async fn save_signature(&self, signature: &SignatureImage) -> Result<PathBuf> {
        self.write(signature.file_name(), &signature.png).await
    }

    /// Write the flattened raster as `signed-<stem>-<timestamp>.png`.
    pub async fn save_flattened(
        &self,
        document_name: &str,
        flattened: &FlattenedDocument,
        at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let file_name = signed_file_name(document_name, at, PNG_EXTENSION);
        self.write(&file_name, &flattened.png).await
    }

    /// Write PDF bytes as `signed-<stem>-<timestamp>.pdf`.
    pub async fn save_pdf(&self, document_name: &str, pdf: &[u8], at: DateTime<Utc>) -> Result<PathBuf> {
        let file_name = signed_file_name(document_name, at, PDF_EXTENSION);
        self.write(&file_name, pdf).await
    }

    #[instrument(skip(self, bytes), fields(dir = %self.dir.display(), bytes = bytes.len()))]
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let (mut file, path) = create_unique(&self.dir, file_name).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        info!(path = %path.display(), "Download written");
        Ok(path)
    }
}

/// Save the canvas, then export it as a PDF after the settle delays.
///
/// `on_saved` sees the canvas as soon as the save succeeds, before any
/// delay. The overlay stays locked even when the export then fails.
#[instrument(skip_all, fields(name = %canvas.name()))]
pub async fn save_and_export(
    canvas: &mut DocumentCanvas,
    downloads: &Downloads,
    config: &AppConfig,
    on_saved: impl FnOnce(&DocumentCanvas),
) -> Result<SavedExport> {
    let flattened = canvas.flatten()?.clone();
    on_saved(canvas);
    settle(config.save_settle()).await;
    let pdf_path = export_after_capture(canvas, downloads, config.capture_settle()).await?;
    Ok(SavedExport { flattened, pdf_path })
}

/// Wait for `capture_settle`, wrap the canvas in a PDF and write it.
pub async fn export_after_capture(
    canvas: &DocumentCanvas,
    downloads: &Downloads,
    capture_settle: Duration,
) -> Result<PathBuf> {
    settle(capture_settle).await;
    let pdf = canvas.export_pdf()?;
    downloads.save_pdf(canvas.name(), &pdf, Utc::now()).await
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        debug!(ms = delay.as_millis() as u64, "Waiting for canvas to settle");
        tokio::time::sleep(delay).await;
    }
}

fn default_download_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join("Downloads"),
        Err(_) => std::env::temp_dir(),
    }
}

/// Create `dir/name`, or `dir/stem (n).ext` for the first free `n`.
/// Creation is exclusive, so concurrent writers never share a file.
async fn create_unique(dir: &Path, file_name: &str) -> Result<(File, PathBuf)> {
    let (stem, ext) = match file_name.rfind('.') {
        Some(idx) if idx > 0 => (&file_name[..idx], &file_name[idx..]),
        _ => (file_name, ""),
    };
    let mut n = 0u32;
    loop {
        let path = match n {
            0 => dir.join(file_name),
            n => dir.join(format!("{stem} ({n}){ext}")),
        };
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn config_directory_wins() {
        let config = AppConfig {
            download_dir: Some(PathBuf::from("/srv/out")),
            ..AppConfig::default()
        };
        assert_eq!(Downloads::from_config(&config).dir(), Path::new("/srv/out"));
    }

    #[tokio::test]
    async fn repeated_signature_downloads_do_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let sig = SignatureImage {
            png: vec![1, 2, 3],
            width: 1,
            height: 1,
        };
        let first = downloads.save_signature(&sig).await.unwrap();
        let second = downloads.save_signature(&sig).await.unwrap();
        assert_eq!(first.file_name().unwrap(), "signature.png");
        assert_eq!(second.file_name().unwrap(), "signature (1).png");
    }

    #[tokio::test]
    async fn pdf_gets_timestamped_name() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path().join("nested"));
        let path = downloads.save_pdf("lease.pdf", b"%PDF-1.7", at()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), "signed-lease-2025-01-02T03-04-05.pdf");
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn concurrent_downloads_get_distinct_files() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let sig = |byte| SignatureImage {
            png: vec![byte; 4],
            width: 1,
            height: 1,
        };
        let (one, two, three) = (sig(1), sig(2), sig(3));
        let (a, b, c) = tokio::join!(
            downloads.save_signature(&one),
            downloads.save_signature(&two),
            downloads.save_signature(&three),
        );
        let mut paths = vec![a.unwrap(), b.unwrap(), c.unwrap()];
        let mut contents: Vec<_> = paths.iter().map(|p| std::fs::read(p).unwrap()).collect();
        contents.sort();
        assert_eq!(contents, vec![vec![1; 4], vec![2; 4], vec![3; 4]]);
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 3);
    }

    #[tokio::test]
    async fn save_hands_over_the_locked_canvas_before_export() {
        use signwerk_core::DocumentKind;
        use signwerk_document::canvas::CanvasSettings;

        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let config = AppConfig {
            save_settle_ms: 0,
            capture_settle_ms: 0,
            ..AppConfig::default()
        };
        let mut canvas = DocumentCanvas::new("memo.txt", DocumentKind::Other, CanvasSettings::default());
        canvas.load_background(b"plain text");

        let mut seen = None;
        let saved = save_and_export(&mut canvas, &downloads, &config, |c| {
            seen = Some((c.is_saved(), dir.path().read_dir().unwrap().count()));
        })
        .await
        .unwrap();
        assert_eq!(seen, Some((true, 0)));
        assert!(saved.pdf_path.starts_with(dir.path()));
        assert_eq!(saved.flattened.pixel_width, 1600);
    }
}
