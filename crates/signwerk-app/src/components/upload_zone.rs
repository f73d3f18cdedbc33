// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload zone: native multi-file picker plus drag-and-drop, the upload list,
// and the hand-off to the signing editor.

use dioxus::prelude::*;

use signwerk_core::types::{DocumentKind, UploadStatus};
use signwerk_flow::{FileSource, UploadIntake, format_file_size, read_source};

use crate::Route;
use crate::state::AppState;

/// Extensions offered by the file dialog. Dropped files are not filtered.
const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "png", "jpg", "jpeg"];

#[component]
pub fn UploadZone() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let mut intake = use_signal(UploadIntake::new);
    let mut drag_over = use_signal(|| false);
    let nav = use_navigator();

    let formats = DocumentKind::ADVERTISED
        .iter()
        .map(|k| k.label())
        .collect::<Vec<_>>()
        .join(", ");
    let files = intake.read().files().to_vec();
    let has_ready = intake.read().has_ready();
    let zone_border = if drag_over() { "#1e40af" } else { "#cbd5e1" };
    let zone_background = if drag_over() { "rgba(30,64,175,0.05)" } else { "#f8fafc" };

    rsx! {
        section { id: "upload", style: "padding: 80px 24px;",
            div { style: "max-width: 860px; margin: 0 auto;",
                div { style: "text-align: center; margin-bottom: 48px;",
                    h2 { style: "font-size: 36px; margin: 0 0 16px 0;", "Secure Document Upload" }
                    p { style: "font-size: 20px; color: #64748b; margin: 0;",
                        "Drag and drop your documents or click to browse. All files are encrypted and stored securely."
                    }
                }

                div { style: "border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px; margin-bottom: 32px;",
                    h3 { style: "margin: 0 0 4px 0;", "Upload Documents" }
                    p { style: "margin: 0 0 16px 0; color: #64748b; font-size: 14px;",
                        "Supported formats: {formats} (Max 10MB per file)"
                    }
                    div {
                        style: "padding: 48px; text-align: center; cursor: pointer; border: 2px dashed {zone_border}; border-radius: 8px; background: {zone_background};",
                        ondragover: move |evt| {
                            evt.prevent_default();
                            drag_over.set(true);
                        },
                        ondragleave: move |evt| {
                            evt.prevent_default();
                            drag_over.set(false);
                        },
                        ondrop: move |evt| {
                            evt.prevent_default();
                            drag_over.set(false);
                            let sources = evt
                                .files()
                                .into_iter()
                                .map(|file| FileSource::from_path(file.path()))
                                .collect();
                            start_reads(intake, state, sources);
                        },
                        onclick: move |_| {
                            start_reads(intake, state, pick_documents());
                        },
                        h3 { style: "margin: 0 0 8px 0;", "Drop files here or click to browse" }
                        p { style: "margin: 0 0 16px 0; color: #64748b;",
                            "Upload multiple documents at once for batch processing"
                        }
                        span { style: "display: inline-block; padding: 8px 16px; border: 1px solid #cbd5e1; border-radius: 8px; background: white;",
                            "Select Files"
                        }
                    }
                }

                if !files.is_empty() {
                    div { style: "border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px;",
                        h3 { style: "margin: 0 0 16px 0;", "Uploaded Files ({files.len()})" }
                        for file in files {
                            div { key: "{file.id}",
                                style: "display: flex; justify-content: space-between; align-items: center; padding: 16px; margin-bottom: 12px; border-radius: 8px; background: #f1f5f9;",
                                div {
                                    p { style: "margin: 0; font-weight: 500;", "{file.name}" }
                                    p { style: "margin: 4px 0 0 0; font-size: 14px; color: #64748b;",
                                        "{format_file_size(file.size)}"
                                    }
                                }
                                div { style: "display: flex; align-items: center; gap: 12px;",
                                    StatusMark { status: file.status }
                                    button {
                                        style: "border: none; background: none; cursor: pointer; font-size: 16px; color: #64748b;",
                                        onclick: move |_| {
                                            intake.write().remove(file.id);
                                        },
                                        "✕"
                                    }
                                }
                            }
                        }
                        if has_ready {
                            div { style: "margin-top: 24px; padding-top: 24px; border-top: 1px solid #e5e7eb;",
                                button {
                                    style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #1e40af; color: white; font-size: 16px; cursor: pointer;",
                                    onclick: move |_| {
                                        let documents = intake.read().ready_descriptors();
                                        state.write().start_signing(documents);
                                        nav.push(Route::Sign {});
                                    },
                                    "Process Documents for E-Signature"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn StatusMark(status: UploadStatus) -> Element {
    let (mark, color) = match status {
        UploadStatus::Pending => ("…", "#1e40af"),
        UploadStatus::Ready => ("✓", "#059669"),
        UploadStatus::Failed => ("!", "#dc2626"),
    };
    rsx! {
        span { style: "font-size: 18px; font-weight: 700; color: {color};", "{mark}" }
    }
}

/// List every source as pending and read each one on its own task.
///
/// Each read completes its entry independently; an entry removed meanwhile
/// is skipped when its read lands.
fn start_reads(mut intake: Signal<UploadIntake>, mut state: Signal<AppState>, sources: Vec<FileSource>) {
    if sources.is_empty() {
        return;
    }
    tracing::info!(count = sources.len(), "files selected");
    for source in sources {
        let id = intake.write().admit(&source);
        spawn(async move {
            let result = read_source(&source).await;
            if let Some(notice) = intake.write().complete(id, result) {
                state.write().notify(notice);
            }
        });
    }
}

#[cfg(not(any(target_os = "ios", target_os = "android")))]
fn pick_documents() -> Vec<FileSource> {
    rfd::FileDialog::new()
        .add_filter("Documents", &ACCEPTED_EXTENSIONS)
        .pick_files()
        .unwrap_or_default()
        .into_iter()
        .map(FileSource::from_path)
        .collect()
}

#[cfg(any(target_os = "ios", target_os = "android"))]
fn pick_documents() -> Vec<FileSource> {
    tracing::warn!(extensions = ?ACCEPTED_EXTENSIONS, "no native file dialog on this platform");
    Vec::new()
}
