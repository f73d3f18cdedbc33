// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use std::time::{Duration, Instant};

use signwerk_core::types::DocumentDescriptor;
use signwerk_core::{AppConfig, Notice};

use crate::services::app_services::AppServices;

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// A notice currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
    pub expires: Instant,
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application settings.
    pub config: AppConfig,
    /// Documents handed from the upload zone to the signing editor.
    /// `None` until the user starts signing.
    pub handoff: Option<Vec<DocumentDescriptor>>,
    /// Completion message shown on the home page after finalizing.
    pub banner: Option<String>,
    /// Toasts, oldest first.
    pub toasts: Vec<Toast>,
    next_toast: u64,
}

impl AppState {
    /// Create initial state from the services.
    pub fn new(svc: &AppServices) -> Self {
        Self::with_config(svc.config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            handoff: None,
            banner: None,
            toasts: Vec::new(),
            next_toast: 0,
        }
    }

    /// Show `notice` as a toast.
    pub fn notify(&mut self, notice: Notice) -> u64 {
        self.notify_at(notice, Instant::now())
    }

    fn notify_at(&mut self, notice: Notice, now: Instant) -> u64 {
        let id = self.next_toast;
        self.next_toast += 1;
        if notice.is_error() {
            tracing::warn!(message = %notice.message, detail = ?notice.detail, "toast");
        } else {
            tracing::debug!(message = %notice.message, "toast");
        }
        self.toasts.push(Toast {
            id,
            notice,
            expires: now + TOAST_LIFETIME,
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Drop toasts that have expired by `now`. Returns whether any were removed.
    pub fn prune_toasts(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires > now);
        self.toasts.len() != before
    }

    /// Hand `documents` to the signing editor.
    pub fn start_signing(&mut self, documents: Vec<DocumentDescriptor>) {
        tracing::info!(count = documents.len(), "handing documents to the editor");
        self.handoff = Some(documents);
        self.banner = None;
    }

    /// Return to the start view with the completion message.
    pub fn finish_signing(&mut self, message: String) {
        self.handoff = None;
        self.banner = Some(message);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_in_order() {
        let mut state = AppState::default();
        let start = Instant::now();
        let first = state.notify_at(Notice::success("one"), start);
        let second = state.notify_at(Notice::error("two"), start + Duration::from_secs(1));
        assert_ne!(first, second);

        assert!(!state.prune_toasts(start + Duration::from_millis(3_999)));
        assert!(state.prune_toasts(start + TOAST_LIFETIME));
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].notice.message, "two");
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut state = AppState::default();
        let a = state.notify(Notice::info("a"));
        state.notify(Notice::info("b"));
        state.dismiss(a);
        assert_eq!(state.toasts.len(), 1);
        assert_eq!(state.toasts[0].notice.message, "b");
    }

    #[test]
    fn finishing_clears_the_handoff() {
        let mut state = AppState::default();
        state.start_signing(Vec::new());
        assert!(state.handoff.is_some());
        state.finish_signing("done".into());
        assert!(state.handoff.is_none());
        assert_eq!(state.banner.as_deref(), Some("done"));
    }
}
