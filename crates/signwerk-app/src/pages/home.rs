// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page: marketing sections around the upload zone.

use dioxus::prelude::*;

use crate::components::marketing::{Hero, IndustrySection, TrustSection};
use crate::components::upload_zone::UploadZone;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let banner = state.read().banner.clone();

    rsx! {
        div {
            if let Some(message) = banner {
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 24px; background: #ecfdf5; color: #065f46; border-bottom: 1px solid #a7f3d0;",
                    span { "{message}" }
                    button {
                        style: "border: none; background: none; color: #065f46; cursor: pointer;",
                        onclick: move |_| state.write().banner = None,
                        "✕"
                    }
                }
            }
            Hero {}
            IndustrySection {}
            UploadZone {}
            TrustSection {}
        }
    }
}
