// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document viewer: shows the document canvas with the placed signature, lets
// the user drag and resize it, then saves and downloads the signed result.
//
// The background decodes on a blocking task. Each load bumps a generation
// counter and a decode that finishes for an older generation is dropped, so a
// slow document never lands on the canvas of the next one.
//
// The view stacks two images: the background layer and the overlay layer.
// Each is re-encoded only when its revision changes; dragging the overlay
// just moves its image.

use std::time::Duration;

use chrono::Utc;
use dioxus::prelude::*;

use signwerk_core::Notice;
use signwerk_core::human_errors::humanize_error;
use signwerk_core::types::DocumentDescriptor;
use signwerk_document::canvas::{Background, CanvasSettings, Hit};
use signwerk_document::signature::Point;
use signwerk_document::{DocumentCanvas, FlattenedDocument, SignatureImage};
use signwerk_flow::{export_after_capture, save_and_export};

use crate::services::app_services::AppServices;
use crate::state::AppState;

const BUTTON: &str = "padding: 6px 12px; border-radius: 6px; border: 1px solid #cbd5e1; background: white; cursor: pointer;";
const PRIMARY_BUTTON: &str = "padding: 6px 12px; border-radius: 6px; border: none; background: #1e40af; color: white; cursor: pointer;";

/// An in-progress pointer drag: what was grabbed and the last view position.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    hit: Hit,
    last: Point,
}

#[component]
pub fn DocumentViewer(
    document: DocumentDescriptor,
    signature: Option<SignatureImage>,
    on_saved: EventHandler<FlattenedDocument>,
) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let settings = CanvasSettings::from(&state.peek().config);

    let mut canvas = use_signal(|| {
        DocumentCanvas::new(&document.name, document.kind(), settings).with_font(svc.font())
    });
    let mut generation = use_signal(|| 0u64);
    let mut current_signature = use_signal(|| None::<SignatureImage>);
    let mut drag = use_signal(|| None::<Drag>);

    // (Re)load the background whenever the document changes.
    let font_svc = svc.clone();
    use_effect(use_reactive!(|(document,)| {
        let load = *generation.peek() + 1;
        generation.set(load);

        let mut fresh = DocumentCanvas::new(&document.name, document.kind(), settings)
            .with_font(font_svc.font());
        if let Some(sig) = current_signature.peek().as_ref()
            && let Err(e) = fresh.place_signature(sig)
        {
            tracing::warn!(error = %e, "could not re-place signature");
        }
        let size = fresh.size();
        canvas.set(fresh);

        let doc = document.clone();
        spawn(async move {
            let decoded = tokio::task::spawn_blocking(move || {
                Background::decode_data_url(&doc.data_url, &doc.name, doc.kind(), size)
            })
            .await;
            if *generation.peek() != load {
                tracing::debug!(load, "discarding stale background");
                return;
            }
            match decoded {
                Ok(background) => canvas.write().set_background(background),
                Err(e) => tracing::error!(error = %e, "background decode task failed"),
            }
        });
    }));

    // Put each new signature on the canvas.
    use_effect(use_reactive!(|(signature,)| {
        current_signature.set(signature.clone());
        let Some(sig) = signature else {
            return;
        };
        let notice = match canvas.write().place_signature(&sig) {
            Ok(()) => Notice::success("Signature added! Drag and resize as needed."),
            Err(e) => humanize_error(&e),
        };
        state.write().notify(notice);
    }));

    let background_revision = use_memo(move || canvas.read().background_revision());
    let background_layer = use_memo(move || {
        background_revision();
        match canvas.peek().render_background_data_url() {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!(error = %e, "background render failed");
                None
            }
        }
    });
    let overlay_revision = use_memo(move || canvas.read().overlay_revision());
    let overlay_layer = use_memo(move || {
        overlay_revision();
        canvas.peek().render_overlay_data_url().unwrap_or_else(|e| {
            tracing::error!(error = %e, "overlay render failed");
            None
        })
    });

    let (saved, pending, zoom_percent, (width, height), zoom, overlay_at) = {
        let c = canvas.read();
        (
            c.is_saved(),
            c.background().is_pending(),
            c.zoom_percent(),
            c.size(),
            c.zoom(),
            c.overlay_view_position(),
        )
    };
    let view_width = (width as f32 * zoom).round();
    let view_height = (height as f32 * zoom).round();
    let cursor = if saved { "default" } else { "move" };

    let save_svc = svc.clone();
    let pdf_svc = svc.clone();
    let image_svc = svc.clone();

    rsx! {
        div { style: "border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px;",
            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 16px;",
                h3 { style: "margin: 0;", "Document Preview" }
                div { style: "display: flex; gap: 8px; align-items: center;",
                    if !saved {
                        button { style: BUTTON, onclick: move |_| { canvas.write().zoom_out(); }, "−" }
                        span { style: "min-width: 48px; text-align: center; font-size: 14px;", "{zoom_percent}%" }
                        button { style: BUTTON, onclick: move |_| { canvas.write().zoom_in(); }, "+" }
                        button { style: BUTTON, onclick: move |_| { canvas.write().reset_zoom(); }, "Reset" }
                        button {
                            style: PRIMARY_BUTTON,
                            onclick: move |_| save(canvas, state, &save_svc, on_saved),
                            "Save Document"
                        }
                    } else {
                        button {
                            style: PRIMARY_BUTTON,
                            onclick: move |_| {
                                let snapshot = canvas.read().clone();
                                download_pdf(snapshot, state, &pdf_svc, Duration::ZERO);
                            },
                            "Download PDF"
                        }
                        button {
                            style: BUTTON,
                            onclick: move |_| download_image(canvas, state, &image_svc),
                            "Download Image"
                        }
                    }
                }
            }

            div { style: "overflow: auto; max-height: 80vh; border: 1px solid #e5e7eb; border-radius: 8px; background: #f1f5f9;",
                div {
                    style: "position: relative; width: {view_width}px; height: {view_height}px; cursor: {cursor}; user-select: none;",
                    onmousedown: move |evt| {
                        let at = evt.element_coordinates();
                        let at = Point::new(at.x as f32, at.y as f32);
                        let hit = canvas.write().press(at);
                        drag.set(hit.map(|hit| Drag { hit, last: at }));
                    },
                    onmousemove: move |evt| {
                        let Some(current) = *drag.peek() else {
                            return;
                        };
                        let at = evt.element_coordinates();
                        let at = Point::new(at.x as f32, at.y as f32);
                        let moved = canvas.write().drag(current.hit, at.x - current.last.x, at.y - current.last.y);
                        match moved {
                            Ok(()) => drag.set(Some(Drag { last: at, ..current })),
                            Err(e) => {
                                tracing::debug!(error = %e, "drag ignored");
                                drag.set(None);
                            }
                        }
                    },
                    onmouseup: move |_| drag.set(None),
                    onmouseleave: move |_| drag.set(None),

                    if let Some(src) = background_layer() {
                        img {
                            src: "{src}",
                            width: "{view_width}",
                            height: "{view_height}",
                            draggable: "false",
                            style: "display: block; pointer-events: none;",
                        }
                    }
                    if let (Some(src), Some((left, top))) = (overlay_layer(), overlay_at) {
                        img {
                            src: "{src}",
                            draggable: "false",
                            style: "position: absolute; left: {left}px; top: {top}px; pointer-events: none;",
                        }
                    }
                    if pending {
                        div { style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; color: #64748b;",
                            "Loading document…"
                        }
                    }
                }
            }
        }
    }
}

/// Save a working copy of the canvas. The locked copy replaces the canvas
/// and reaches the parent as soon as it is flattened; the PDF follows once
/// the canvas has settled.
fn save(
    mut canvas: Signal<DocumentCanvas>,
    mut state: Signal<AppState>,
    svc: &AppServices,
    on_saved: EventHandler<FlattenedDocument>,
) {
    let mut working = canvas.peek().clone();
    let config = state.peek().config.clone();
    let downloads = svc.downloads();
    spawn(async move {
        let result = save_and_export(&mut working, &downloads, &config, move |locked| {
            canvas.set(locked.clone());
            if let Some(flattened) = locked.saved() {
                on_saved.call(flattened.clone());
            }
            state.write().notify(Notice::success("Document saved and downloading..."));
        })
        .await;
        let notice = match result {
            Ok(saved) => Notice::success("Document downloaded successfully!")
                .with_detail(saved.pdf_path.display().to_string()),
            Err(e) => humanize_error(&e),
        };
        state.write().notify(notice);
    });
}

fn download_pdf(snapshot: DocumentCanvas, mut state: Signal<AppState>, svc: &AppServices, settle: Duration) {
    let downloads = svc.downloads();
    spawn(async move {
        let notice = match export_after_capture(&snapshot, &downloads, settle).await {
            Ok(path) => Notice::success("Document downloaded successfully!")
                .with_detail(path.display().to_string()),
            Err(e) => humanize_error(&e),
        };
        state.write().notify(notice);
    });
}

fn download_image(canvas: Signal<DocumentCanvas>, mut state: Signal<AppState>, svc: &AppServices) {
    let (name, flattened) = {
        let c = canvas.peek();
        (c.name().to_owned(), c.saved().cloned())
    };
    let Some(flattened) = flattened else {
        return;
    };
    let downloads = svc.downloads();
    spawn(async move {
        let notice = match downloads.save_flattened(&name, &flattened, Utc::now()).await {
            Ok(path) => Notice::success("Document downloaded successfully!")
                .with_detail(path.display().to_string()),
            Err(e) => humanize_error(&e),
        };
        state.write().notify(notice);
    });
}
