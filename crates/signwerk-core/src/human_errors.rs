// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transient notifications and the mapping from errors to plain-language text.
//
// Every failure in the signing flow is "notify and continue": the view shows a
// short message and the user decides what to do next. Nothing is retried.

use serde::{Deserialize, Serialize};

use crate::error::SignwerkError;

/// Visual level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A short-lived message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    /// One-line summary.
    pub message: String,
    /// Optional second line with a suggestion.
    pub detail: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            detail: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
            detail: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&SignwerkError> for Notice {
    fn from(err: &SignwerkError) -> Self {
        humanize_error(err)
    }
}

/// Convert a `SignwerkError` into a notification the user can act on.
pub fn humanize_error(err: &SignwerkError) -> Notice {
    match err {
        // -- Intake --
        SignwerkError::FileRead { name, .. } => Notice::error(format!("Failed to upload {name}"))
            .with_detail("Check that the file still exists and is readable, then add it again."),

        SignwerkError::DataUrl(_) => Notice::error("This file could not be loaded.")
            .with_detail("Try uploading the file again."),

        // -- Documents --
        SignwerkError::ImageError(_) => Notice::error("There's a problem with this image.")
            .with_detail("Try saving it as a PNG or JPEG first."),

        SignwerkError::PdfError(_) => Notice::error("The PDF could not be created.")
            .with_detail("Save the document again, then retry the download."),

        SignwerkError::Font(_) => Notice::error("The configured font could not be loaded.")
            .with_detail("Choose a TrueType or OpenType font file in Settings."),

        // -- Canvas --
        SignwerkError::EmptyCanvas => Notice::error("Canvas is empty - cannot create PDF")
            .with_detail("Wait for the document preview to appear, then save again."),

        SignwerkError::NoSignaturePlaced => Notice::error("Add your signature to the document first."),

        SignwerkError::OverlayLocked | SignwerkError::AlreadySaved => {
            Notice::info("This document is already saved.")
                .with_detail("Place a new signature to edit it again.")
        }

        // -- Flow --
        SignwerkError::NoDocuments => Notice::error("No documents found for signing"),

        SignwerkError::NoSignature => Notice::error("Please create your signature first"),

        SignwerkError::NoNextDocument => Notice::info("This is the last document."),

        SignwerkError::NoPreviousDocument => Notice::info("This is the first document."),

        SignwerkError::FinalizeInProgress => Notice::info("Your documents are being processed."),

        SignwerkError::DocumentsRemaining => Notice::info("Sign the remaining documents first.")
            .with_detail("Finalizing is available on the last document."),

        // -- Storage --
        SignwerkError::Io(io) => Notice::error("A file could not be written.")
            .with_detail(format!("Check the download folder in Settings. ({io})")),

        SignwerkError::Serialization(_) => Notice::error("Settings could not be read.")
            .with_detail("Default settings are in use."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_read_names_the_file() {
        let err = SignwerkError::FileRead {
            name: "lease.pdf".into(),
            reason: "permission denied".into(),
        };
        let notice = humanize_error(&err);
        assert!(notice.is_error());
        assert_eq!(notice.message, "Failed to upload lease.pdf");
    }

    #[test]
    fn locked_overlay_is_informational() {
        let notice = Notice::from(&SignwerkError::OverlayLocked);
        assert_eq!(notice.level, NoticeLevel::Info);
        assert!(notice.detail.is_some());
    }

    #[test]
    fn missing_documents_message() {
        let notice = humanize_error(&SignwerkError::NoDocuments);
        assert_eq!(notice.message, "No documents found for signing");
    }

    #[test]
    fn empty_canvas_is_an_error() {
        assert!(humanize_error(&SignwerkError::EmptyCanvas).is_error());
    }
}
