// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Toast stack in the bottom-right corner.

use std::time::{Duration, Instant};

use dioxus::prelude::*;
use signwerk_core::NoticeLevel;

use crate::state::AppState;

const PRUNE_INTERVAL: Duration = Duration::from_millis(250);

#[component]
pub fn Toasts() -> Element {
    let mut state = use_context::<Signal<AppState>>();

    // Expiry sweep. Lives as long as the layout.
    use_future(move || async move {
        loop {
            tokio::time::sleep(PRUNE_INTERVAL).await;
            let now = Instant::now();
            let expired = state.peek().toasts.iter().any(|t| t.expires <= now);
            if expired {
                state.write().prune_toasts(now);
            }
        }
    });

    let toasts = state.read().toasts.clone();

    rsx! {
        div {
            style: "position: fixed; right: 16px; bottom: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 100; max-width: 360px;",
            for toast in toasts {
                div { key: "{toast.id}",
                    style: "display: flex; gap: 12px; align-items: flex-start; padding: 12px 16px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.12); background: white; border-left: 4px solid {accent(toast.notice.level)};",
                    div { style: "flex: 1;",
                        div { style: "font-size: 14px; font-weight: 500;", "{toast.notice.message}" }
                        if let Some(detail) = toast.notice.detail.as_ref() {
                            div { style: "font-size: 12px; color: #64748b; margin-top: 4px;", "{detail}" }
                        }
                    }
                    button {
                        style: "border: none; background: none; color: #94a3b8; cursor: pointer; font-size: 14px;",
                        onclick: move |_| state.write().dismiss(toast.id),
                        "✕"
                    }
                }
            }
        }
    }
}

fn accent(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "#059669",
        NoticeLevel::Info => "#1e40af",
        NoticeLevel::Error => "#dc2626",
    }
}
