// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Multi-document signing session.
//
// Walks the uploaded documents in order with one current signature and keeps
// each document's flattened output. The two session modes differ in whether
// the signature survives navigation and in what progress measures.

use std::collections::HashMap;
use std::time::Duration;

use signwerk_core::error::{Result, SignwerkError};
use signwerk_core::types::{DocumentDescriptor, SessionMode, UploadId};
use signwerk_core::Notice;
use signwerk_document::{FlattenedDocument, SignatureImage};
use tracing::{debug, info, instrument};

/// Shown on the start view once finalisation completes.
pub const COMPLETION_MESSAGE: &str = "Your documents have been signed and processed successfully!";

/// Editor tabs of an enhanced session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTab {
    /// Static preview plus signature pad.
    #[default]
    Sign,
    /// Interactive placement canvas.
    Preview,
}

/// Signing progress as shown under the navigation buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f32 / self.total as f32
    }

    /// Bar width in whole percent.
    pub fn percent(&self) -> u32 {
        (self.fraction() * 100.0).round() as u32
    }
}

/// Result of a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    /// Transient notification.
    pub notice: Notice,
    /// Banner for the start view.
    pub message: String,
}

/// The document list plus the state of the editor walking it.
#[derive(Debug)]
pub struct SigningSession {
    documents: Vec<DocumentDescriptor>,
    index: usize,
    mode: SessionMode,
    signature: Option<SignatureImage>,
    outputs: HashMap<UploadId, FlattenedDocument>,
    tab: EditorTab,
    finalizing: bool,
}

impl SigningSession {
    /// Start a session from the navigation handoff.
    ///
    /// A missing or empty list fails with [`SignwerkError::NoDocuments`]; the
    /// caller sends the user back to the start view.
    pub fn from_handoff(documents: Option<Vec<DocumentDescriptor>>, mode: SessionMode) -> Result<Self> {
        let documents = documents.filter(|d| !d.is_empty()).ok_or(SignwerkError::NoDocuments)?;
        info!(count = documents.len(), ?mode, "Signing session started");
        Ok(Self {
            documents,
            index: 0,
            mode,
            signature: None,
            outputs: HashMap::new(),
            tab: EditorTab::Sign,
            finalizing: false,
        })
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn documents(&self) -> &[DocumentDescriptor] {
        &self.documents
    }

    pub fn current(&self) -> &DocumentDescriptor {
        &self.documents[self.index]
    }

    /// 1-based position and total, for the "N of M" badge.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.documents.len())
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.documents.len()
    }

    // -- Signature ------------------------------------------------------------

    pub fn signature(&self) -> Option<&SignatureImage> {
        self.signature.as_ref()
    }

    pub fn has_signature(&self) -> bool {
        self.signature.is_some()
    }

    /// Replace the current signature; `None` when the pad was cleared.
    pub fn set_signature(&mut self, signature: Option<SignatureImage>) {
        self.signature = signature;
        if self.signature.is_none() {
            self.tab = EditorTab::Sign;
        }
    }

    // -- Navigation -----------------------------------------------------------

    /// Move to the next document. Requires a signature.
    pub fn advance(&mut self) -> Result<&DocumentDescriptor> {
        if self.is_last() {
            return Err(SignwerkError::NoNextDocument);
        }
        if self.signature.is_none() {
            return Err(SignwerkError::NoSignature);
        }
        self.index += 1;
        self.after_navigation();
        Ok(self.current())
    }

    /// Move to the previous document.
    pub fn retreat(&mut self) -> Result<&DocumentDescriptor> {
        if self.is_first() {
            return Err(SignwerkError::NoPreviousDocument);
        }
        self.index -= 1;
        self.after_navigation();
        Ok(self.current())
    }

    fn after_navigation(&mut self) {
        if self.mode == SessionMode::Basic {
            self.signature = None;
        }
        debug!(
            index = self.index,
            name = %self.documents[self.index].name,
            keeps_signature = self.signature.is_some(),
            "Moved to document"
        );
    }

    // -- Tabs -----------------------------------------------------------------

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    /// The placement tab needs a signature to place.
    pub fn can_preview(&self) -> bool {
        self.mode == SessionMode::Enhanced && self.signature.is_some()
    }

    /// Switch tabs. Returns whether the switch happened.
    pub fn select_tab(&mut self, tab: EditorTab) -> bool {
        if tab == EditorTab::Preview && !self.can_preview() {
            return false;
        }
        self.tab = tab;
        true
    }

    // -- Outputs --------------------------------------------------------------

    /// Keep the flattened output of a saved document. A later save of the
    /// same document replaces it.
    pub fn record_output(&mut self, id: UploadId, flattened: FlattenedDocument) {
        info!(%id, bytes = flattened.png.len(), "Document output recorded");
        self.outputs.insert(id, flattened);
    }

    pub fn is_signed(&self, id: UploadId) -> bool {
        self.outputs.contains_key(&id)
    }

    pub fn completed(&self) -> usize {
        self.outputs.len()
    }

    pub fn progress(&self) -> Progress {
        let total = self.documents.len();
        let done = match self.mode {
            SessionMode::Basic => self.index + 1,
            SessionMode::Enhanced => self.completed(),
        };
        Progress { done, total }
    }

    // -- Finalisation ---------------------------------------------------------

    pub fn is_finalizing(&self) -> bool {
        self.finalizing
    }

    pub fn can_finalize(&self) -> bool {
        self.is_last() && self.signature.is_some() && !self.finalizing
    }

    /// Mark the session as processing. Pair with [`finish`](Self::finish)
    /// once the simulated processing time has passed.
    pub fn begin_finalize(&mut self) -> Result<()> {
        if !self.can_finalize() {
            return Err(if self.finalizing {
                SignwerkError::FinalizeInProgress
            } else if self.signature.is_none() {
                SignwerkError::NoSignature
            } else {
                SignwerkError::DocumentsRemaining
            });
        }
        self.finalizing = true;
        info!(completed = self.completed(), total = self.documents.len(), "Finalizing");
        Ok(())
    }

    /// End processing and produce the completion notices.
    pub fn finish(&mut self) -> Finalized {
        self.finalizing = false;
        let toast = match self.mode {
            SessionMode::Basic => "Documents signed successfully!",
            SessionMode::Enhanced => "All documents signed successfully!",
        };
        Finalized {
            notice: Notice::success(toast),
            message: COMPLETION_MESSAGE.to_owned(),
        }
    }

    /// Finalize in one call, waiting `delay` in between.
    #[instrument(skip(self), fields(total = self.documents.len()))]
    pub async fn finalize(&mut self, delay: Duration) -> Result<Finalized> {
        self.begin_finalize()?;
        tokio::time::sleep(delay).await;
        Ok(self.finish())
    }
}
