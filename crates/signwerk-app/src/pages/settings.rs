// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent app configuration.

use std::path::PathBuf;

use dioxus::prelude::*;

use signwerk_core::types::SessionMode;

use crate::services::app_services::AppServices;
use crate::state::AppState;

const ROW: &str = "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;";
const INPUT: &str = "width: 96px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right;";
const PATH_INPUT: &str = "width: 320px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;";

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    let config = state.read().config.clone();
    let font_path = path_text(&config.font_path);
    let download_dir = path_text(&config.download_dir);
    let data_dir = svc.data_dir().display().to_string();

    rsx! {
        div { style: "max-width: 720px; margin: 0 auto; padding: 24px;",
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Signing" }
                div { style: ROW,
                    span { "Editor" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: mode_label(config.session_mode),
                        onchange: move |evt| {
                            if let Some(mode) = mode_from_label(&evt.value()) {
                                state.write().config.session_mode = mode;
                            }
                        },
                        option { value: "Enhanced", "Enhanced (brush pad and placement)" }
                        option { value: "Basic", "Basic (pointer pad)" }
                    }
                }
                NumberRow {
                    label: "Processing delay on finalize (ms)",
                    value: config.finalize_delay_ms,
                    on_change: move |v: u64| state.write().config.finalize_delay_ms = v,
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Document canvas" }
                NumberRow {
                    label: "Canvas width (px)",
                    value: config.canvas_width as u64,
                    on_change: move |v: u64| {
                        if let Ok(w) = u32::try_from(v) && w > 0 {
                            state.write().config.canvas_width = w;
                        }
                    },
                }
                NumberRow {
                    label: "Canvas height (px)",
                    value: config.canvas_height as u64,
                    on_change: move |v: u64| {
                        if let Ok(h) = u32::try_from(v) && h > 0 {
                            state.write().config.canvas_height = h;
                        }
                    },
                }
                NumberRow {
                    label: "Export resolution multiplier",
                    value: config.export_multiplier as u64,
                    on_change: move |v: u64| {
                        if let Ok(m) = u32::try_from(v) && (1..=4).contains(&m) {
                            state.write().config.export_multiplier = m;
                        }
                    },
                }
                NumberRow {
                    label: "Delay before export after save (ms)",
                    value: config.save_settle_ms,
                    on_change: move |v: u64| state.write().config.save_settle_ms = v,
                }
                NumberRow {
                    label: "Delay before capturing the canvas (ms)",
                    value: config.capture_settle_ms,
                    on_change: move |v: u64| state.write().config.capture_settle_ms = v,
                }
                div { style: ROW,
                    span { "Placeholder font (TTF/OTF)" }
                    input {
                        style: PATH_INPUT,
                        value: "{font_path}",
                        placeholder: "system default",
                        onchange: move |evt| state.write().config.font_path = path_value(&evt.value()),
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Downloads" }
                div { style: ROW,
                    span { "Download folder" }
                    input {
                        style: PATH_INPUT,
                        value: "{download_dir}",
                        placeholder: "~/Downloads",
                        onchange: move |evt| state.write().config.download_dir = path_value(&evt.value()),
                    }
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #1e40af; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => save_msg.set(Some("Settings saved.".into())),
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #059669; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Signwerk v0.3.0"
                    br {}
                    "Local document e-signature"
                    br {}
                    "Settings stored in {data_dir}"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn NumberRow(label: &'static str, value: u64, on_change: EventHandler<u64>) -> Element {
    rsx! {
        div { style: ROW,
            span { "{label}" }
            input {
                r#type: "number",
                style: INPUT,
                value: "{value}",
                onchange: move |evt| {
                    if let Ok(v) = evt.value().trim().parse::<u64>() {
                        on_change.call(v);
                    }
                },
            }
        }
    }
}

fn mode_label(mode: SessionMode) -> &'static str {
    match mode {
        SessionMode::Basic => "Basic",
        SessionMode::Enhanced => "Enhanced",
    }
}

fn mode_from_label(label: &str) -> Option<SessionMode> {
    match label {
        "Basic" => Some(SessionMode::Basic),
        "Enhanced" => Some(SessionMode::Enhanced),
        _ => None,
    }
}

fn path_text(path: &Option<PathBuf>) -> String {
    path.as_ref().map(|p| p.display().to_string()).unwrap_or_default()
}

/// Blank input clears the setting.
fn path_value(text: &str) -> Option<PathBuf> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_labels_round_trip() {
        for mode in [SessionMode::Basic, SessionMode::Enhanced] {
            assert_eq!(mode_from_label(mode_label(mode)), Some(mode));
        }
        assert_eq!(mode_from_label("Fancy"), None);
    }

    #[test]
    fn blank_path_clears_setting() {
        assert_eq!(path_value("   "), None);
        assert_eq!(path_value(" /tmp/out "), Some(PathBuf::from("/tmp/out")));
    }
}
