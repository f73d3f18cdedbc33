// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signing editor: walks the handed-off documents with one signature and
// finalizes the batch. Without a hand-off it redirects to the home page.

use dioxus::prelude::*;

use signwerk_core::human_errors::humanize_error;
use signwerk_core::types::{DocumentDescriptor, SessionMode};
use signwerk_document::{FlattenedDocument, SignatureImage};
use signwerk_flow::{EditorTab, Progress, SigningSession, format_file_size};

use crate::Route;
use crate::components::document_viewer::DocumentViewer;
use crate::components::signature_pad::{PadStyle, SignaturePad};
use crate::state::AppState;

#[component]
pub fn Sign() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let opened = use_hook(move || {
        let state = state.peek();
        match SigningSession::from_handoff(state.handoff.clone(), state.config.session_mode) {
            Ok(session) => Ok(Signal::new(session)),
            Err(e) => {
                tracing::warn!(error = %e, "signing editor opened without documents");
                Err(humanize_error(&e))
            }
        }
    });

    let redirect = opened.as_ref().err().cloned();
    use_effect(move || {
        if let Some(notice) = redirect.clone() {
            state.write().notify(notice);
            nav.replace(Route::Home {});
        }
    });

    match opened {
        Ok(session) => match session.peek().mode() {
            SessionMode::Basic => rsx! { BasicEditor { session } },
            SessionMode::Enhanced => rsx! { EnhancedEditor { session } },
        },
        Err(_) => rsx! {},
    }
}

#[component]
fn BasicEditor(mut session: Signal<SigningSession>) -> Element {
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let s = session.read();
    let doc = s.current().clone();
    let (position, total) = s.position();
    let (is_first, is_last) = (s.is_first(), s.is_last());
    let has_signature = s.has_signature();
    let signature_url = s.signature().map(SignatureImage::to_data_url);
    let finalizing = s.is_finalizing();
    let progress = s.progress();
    drop(s);

    rsx! {
        div {
            EditorHeader { title: "Document Signature", position, total }
            div { style: "max-width: 860px; margin: 0 auto; padding: 32px 24px; display: flex; flex-direction: column; gap: 24px;",
                CurrentDocument { document: doc.clone(), signed: false }

                div { style: "border: 1px solid #e5e7eb; border-radius: 12px; padding: 32px;",
                    div { style: "aspect-ratio: 8.5 / 11; max-height: 480px; margin: 0 auto; display: flex; flex-direction: column; align-items: center; justify-content: center; border: 1px solid #e5e7eb; border-radius: 8px; background: white;",
                        h3 { style: "margin: 0 0 8px 0;", "Document Preview" }
                        p { style: "margin: 0; color: #64748b;", "{doc.name}" }
                        if let Some(src) = signature_url {
                            img {
                                src: "{src}",
                                alt: "Your signature",
                                style: "margin-top: 24px; max-width: 240px; max-height: 80px;",
                            }
                        }
                    }
                }

                SignaturePad {
                    key: "{doc.id}",
                    style: PadStyle::Pointer,
                    on_change: move |sig: Option<SignatureImage>| session.write().set_signature(sig),
                }

                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    div { style: "display: flex; gap: 8px;",
                        button {
                            style: OUTLINE_BUTTON,
                            disabled: is_first,
                            onclick: move |_| step(session, state, Step::Back),
                            "Previous Document"
                        }
                        if !is_last {
                            button {
                                style: PRIMARY_BUTTON,
                                disabled: !has_signature,
                                onclick: move |_| step(session, state, Step::Forward),
                                "Next Document"
                            }
                        }
                    }
                    if is_last {
                        button {
                            style: PRIMARY_BUTTON,
                            disabled: !has_signature || finalizing,
                            onclick: move |_| finalize(session, state, nav),
                            if finalizing { "Processing..." } else { "Finalize Signing" }
                        }
                    }
                }

                ProgressBar { progress, caption: "documents" }
            }
        }
    }
}

#[component]
fn EnhancedEditor(mut session: Signal<SigningSession>) -> Element {
    let state = use_context::<Signal<AppState>>();
    let nav = use_navigator();

    let s = session.read();
    let doc = s.current().clone();
    let (position, total) = s.position();
    let (is_first, is_last) = (s.is_first(), s.is_last());
    let has_signature = s.has_signature();
    let signature = s.signature().cloned();
    let signed = s.is_signed(doc.id);
    let tab = s.tab();
    let can_preview = s.can_preview();
    let finalizing = s.is_finalizing();
    let can_finalize = s.can_finalize();
    let progress = s.progress();
    drop(s);

    let doc_id = doc.id;

    rsx! {
        div {
            EditorHeader { title: "Enhanced Document Signature", position, total }
            div { style: "max-width: 1100px; margin: 0 auto; padding: 32px 24px; display: flex; flex-direction: column; gap: 24px;",
                CurrentDocument { document: doc.clone(), signed }

                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 4px; padding: 4px; border-radius: 8px; background: #f1f5f9;",
                    TabButton {
                        label: "Create Signature",
                        active: tab == EditorTab::Sign,
                        enabled: true,
                        on_select: move |_| { session.write().select_tab(EditorTab::Sign); },
                    }
                    TabButton {
                        label: "Preview & Place",
                        active: tab == EditorTab::Preview,
                        enabled: can_preview,
                        on_select: move |_| { session.write().select_tab(EditorTab::Preview); },
                    }
                }

                {match tab {
                    EditorTab::Sign => rsx! {
                        SignaturePad {
                            style: PadStyle::Brush,
                            on_change: move |sig: Option<SignatureImage>| session.write().set_signature(sig),
                        }
                    },
                    EditorTab::Preview => rsx! {
                        DocumentViewer {
                            key: "{doc_id}",
                            document: doc.clone(),
                            signature: signature.clone(),
                            on_saved: move |flat: FlattenedDocument| session.write().record_output(doc_id, flat),
                        }
                    },
                }}

                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    button {
                        style: OUTLINE_BUTTON,
                        disabled: is_first,
                        onclick: move |_| step(session, state, Step::Back),
                        "Previous Document"
                    }
                    if is_last {
                        button {
                            style: PRIMARY_BUTTON,
                            disabled: !can_finalize,
                            onclick: move |_| finalize(session, state, nav),
                            if finalizing { "Processing..." } else { "Finalize All Documents" }
                        }
                    } else {
                        button {
                            style: PRIMARY_BUTTON,
                            disabled: !has_signature,
                            onclick: move |_| step(session, state, Step::Forward),
                            "Next Document"
                        }
                    }
                }

                ProgressBar { progress, caption: "documents completed" }
            }
        }
    }
}

const OUTLINE_BUTTON: &str = "padding: 10px 16px; border-radius: 8px; border: 1px solid #cbd5e1; background: white; cursor: pointer;";
const PRIMARY_BUTTON: &str = "padding: 10px 16px; min-width: 140px; border-radius: 8px; border: none; background: #1e40af; color: white; cursor: pointer;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Back,
    Forward,
}

fn step(mut session: Signal<SigningSession>, mut state: Signal<AppState>, direction: Step) {
    let moved = {
        let mut s = session.write();
        match direction {
            Step::Back => s.retreat().map(|d| d.name.clone()),
            Step::Forward => s.advance().map(|d| d.name.clone()),
        }
    };
    match moved {
        Ok(name) => tracing::debug!(document = %name, ?direction, "moved to document"),
        Err(e) => state.write().notify(humanize_error(&e)),
    }
}

/// Run the processing delay, then return home with the completion message.
fn finalize(mut session: Signal<SigningSession>, mut state: Signal<AppState>, nav: Navigator) {
    if let Err(e) = session.write().begin_finalize() {
        state.write().notify(humanize_error(&e));
        return;
    }
    let delay = state.peek().config.finalize_delay();
    spawn(async move {
        tokio::time::sleep(delay).await;
        let done = session.write().finish();
        {
            let mut st = state.write();
            st.notify(done.notice);
            st.finish_signing(done.message);
        }
        nav.push(Route::Home {});
    });
}

#[component]
fn EditorHeader(title: &'static str, position: usize, total: usize) -> Element {
    rsx! {
        div { style: "display: flex; align-items: center; gap: 16px; padding: 16px 24px; border-bottom: 1px solid #e5e7eb; background: #ffffff;",
            Link { to: Route::Home {},
                style: "color: #334155; text-decoration: none; font-size: 14px;",
                "← Back to Documents"
            }
            div { style: "width: 1px; height: 24px; background: #e5e7eb;" }
            h1 { style: "margin: 0; font-size: 24px;", "{title}" }
            span { style: "padding: 2px 10px; border: 1px solid #cbd5e1; border-radius: 999px; font-size: 13px;",
                "{position} of {total}"
            }
        }
    }
}

#[component]
fn CurrentDocument(document: DocumentDescriptor, signed: bool) -> Element {
    rsx! {
        div { style: "border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px;",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h3 { style: "margin: 0;", "Current Document: {document.name}" }
                if signed {
                    span { style: "padding: 2px 10px; border-radius: 999px; background: #059669; color: white; font-size: 13px;",
                        "✓ Signed"
                    }
                }
            }
            div { style: "padding: 16px; border-radius: 8px; background: #f1f5f9;",
                p { style: "margin: 0; font-weight: 500;", "{document.name}" }
                p { style: "margin: 4px 0 0 0; font-size: 14px; color: #64748b;",
                    "{format_file_size(document.size)} • {document.mime_type}"
                }
            }
        }
    }
}

#[component]
fn TabButton(label: &'static str, active: bool, enabled: bool, on_select: EventHandler<()>) -> Element {
    let (background, color) = if active { ("white", "#0f172a") } else { ("transparent", "#64748b") };
    let cursor = if enabled { "pointer" } else { "not-allowed" };
    rsx! {
        button {
            style: "padding: 8px; border: none; border-radius: 6px; background: {background}; color: {color}; cursor: {cursor};",
            disabled: !enabled,
            onclick: move |_| on_select.call(()),
            "{label}"
        }
    }
}

#[component]
fn ProgressBar(progress: Progress, caption: &'static str) -> Element {
    let percent = progress.percent();
    rsx! {
        div { style: "margin-top: 16px;",
            div { style: "display: flex; justify-content: space-between; margin-bottom: 8px; font-size: 14px;",
                span { style: "font-weight: 500;", "Signing Progress" }
                span { style: "color: #64748b;", "{progress.done} of {progress.total} {caption}" }
            }
            div { style: "width: 100%; height: 8px; border-radius: 999px; background: #e2e8f0;",
                div { style: "width: {percent}%; height: 8px; border-radius: 999px; background: #1e40af;" }
            }
        }
    }
}
