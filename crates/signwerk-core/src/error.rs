// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Signwerk.

use thiserror::Error;

/// Top-level error type for all Signwerk operations.
#[derive(Debug, Error)]
pub enum SignwerkError {
    // -- Intake errors --
    #[error("failed to read {name}: {reason}")]
    FileRead { name: String, reason: String },

    #[error("malformed data URL: {0}")]
    DataUrl(String),

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("font could not be loaded: {0}")]
    Font(String),

    // -- Canvas errors --
    #[error("canvas is empty, nothing to export")]
    EmptyCanvas,

    #[error("no signature is placed on the document")]
    NoSignaturePlaced,

    #[error("signature is locked after saving")]
    OverlayLocked,

    #[error("document has already been saved")]
    AlreadySaved,

    // -- Signing flow --
    #[error("no documents found for signing")]
    NoDocuments,

    #[error("a signature is required first")]
    NoSignature,

    #[error("already at the last document")]
    NoNextDocument,

    #[error("already at the first document")]
    NoPreviousDocument,

    #[error("signing is already being finalized")]
    FinalizeInProgress,

    #[error("documents remain before the last one")]
    DocumentsRemaining,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SignwerkError>;
