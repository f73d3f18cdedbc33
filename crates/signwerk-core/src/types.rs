// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Signwerk signing flow.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Random local identifier assigned to an uploaded file.
///
/// Lives only as long as the upload list or signing session that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadId(pub Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a single upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadStatus {
    /// Registered, read still in flight.
    Pending,
    /// Read finished; the data URL is available.
    Ready,
    /// Read failed; the entry stays in the list until removed.
    Failed,
}

/// Document formats advertised by the upload zone.
///
/// The list is a label only: nothing rejects other formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Png,
    Jpeg,
    Other,
}

impl DocumentKind {
    /// Every kind shown in the "Supported formats" label, in display order.
    pub const ADVERTISED: [DocumentKind; 5] = [
        DocumentKind::Pdf,
        DocumentKind::Doc,
        DocumentKind::Docx,
        DocumentKind::Png,
        DocumentKind::Jpeg,
    ];

    /// MIME type reported for this kind.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Other => "application/octet-stream",
        }
    }

    /// Short label for the upload zone.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Doc => "DOC",
            Self::Docx => "DOCX",
            Self::Png => "PNG",
            Self::Jpeg => "JPG",
            Self::Other => "other",
        }
    }

    /// Infer the kind from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "doc" => Self::Doc,
            "docx" => Self::Docx,
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Other,
        }
    }

    /// Infer the kind from a file name.
    pub fn from_file_name(name: &str) -> Self {
        std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Other)
    }

    /// Reverse lookup from a MIME type.
    pub fn from_mime_type(mime: &str) -> Self {
        Self::ADVERTISED
            .into_iter()
            .find(|kind| kind.mime_type() == mime)
            .unwrap_or(Self::Other)
    }
}

/// An entry in the upload list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub id: UploadId,
    pub name: String,
    /// Size in bytes as reported at selection time.
    pub size: u64,
    pub mime_type: String,
    pub status: UploadStatus,
    /// Inline file content, present once the read succeeded.
    pub data_url: Option<String>,
}

impl UploadedFile {
    pub fn pending(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            id: UploadId::new(),
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            status: UploadStatus::Pending,
            data_url: None,
        }
    }

    /// Navigation payload for a ready entry.
    pub fn descriptor(&self) -> Option<DocumentDescriptor> {
        match (self.status, &self.data_url) {
            (UploadStatus::Ready, Some(data_url)) => Some(DocumentDescriptor {
                id: self.id,
                name: self.name.clone(),
                size: self.size,
                mime_type: self.mime_type.clone(),
                data_url: data_url.clone(),
            }),
            _ => None,
        }
    }
}

/// Document handed from the upload zone to the signing editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub id: UploadId,
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub data_url: String,
}

impl DocumentDescriptor {
    pub fn kind(&self) -> DocumentKind {
        match DocumentKind::from_mime_type(&self.mime_type) {
            DocumentKind::Other => DocumentKind::from_file_name(&self.name),
            kind => kind,
        }
    }
}

/// Which editor behaviour the signing session follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionMode {
    /// Raw pointer pad; the signature is cleared when moving between
    /// documents and progress follows the current position.
    Basic,
    /// Brush pad with placement canvas; the signature carries over and
    /// progress counts saved documents.
    #[default]
    Enhanced,
}

/// An RGB colour parsed from `#rrggbb` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}
