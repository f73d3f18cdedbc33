// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signature pad card. Strokes are drawn live as SVG paths over a white
// surface; the parent receives the rasterised signature after each stroke.

use dioxus::prelude::*;

use signwerk_core::human_errors::humanize_error;
use signwerk_core::Notice;
use signwerk_document::signature::brush_pad::{PALETTE, WIDTHS};
use signwerk_document::signature::{Point, Stroke};
use signwerk_document::{BrushPad, PointerPad, SignatureImage, SignatureSurface};

use crate::services::app_services::AppServices;
use crate::state::AppState;

/// Logical size of the basic pad.
const POINTER_PAD_SIZE: (u32, u32) = (600, 200);

/// Which surface the card drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadStyle {
    /// Fixed pen, no controls.
    Pointer,
    /// Colour palette and width picker, 2x output.
    Brush,
}

enum Pad {
    Pointer(PointerPad),
    Brush(BrushPad),
}

impl Pad {
    fn new(style: PadStyle) -> Self {
        match style {
            PadStyle::Pointer => Pad::Pointer(PointerPad::new(POINTER_PAD_SIZE.0, POINTER_PAD_SIZE.1)),
            PadStyle::Brush => Pad::Brush(BrushPad::new()),
        }
    }

    fn surface(&self) -> &dyn SignatureSurface {
        match self {
            Pad::Pointer(pad) => pad,
            Pad::Brush(pad) => pad,
        }
    }

    fn surface_mut(&mut self) -> &mut dyn SignatureSurface {
        match self {
            Pad::Pointer(pad) => pad,
            Pad::Brush(pad) => pad,
        }
    }

    fn brush(&self) -> Option<&BrushPad> {
        match self {
            Pad::Brush(pad) => Some(pad),
            Pad::Pointer(_) => None,
        }
    }

    fn brush_mut(&mut self) -> Option<&mut BrushPad> {
        match self {
            Pad::Brush(pad) => Some(pad),
            Pad::Pointer(_) => None,
        }
    }
}

#[component]
pub fn SignaturePad(style: PadStyle, on_change: EventHandler<Option<SignatureImage>>) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut pad = use_signal(|| Pad::new(style));

    let (width, height) = pad.read().surface().size();
    let paths: Vec<(String, String, f32)> = {
        let pad = pad.read();
        let surface = pad.surface();
        surface
            .strokes()
            .iter()
            .chain(surface.open_stroke())
            .map(|s| (svg_path(s), s.style.color.to_hex(), s.style.width))
            .collect()
    };
    let has_signature = pad.read().surface().has_signature();
    let brush = pad.read().brush().map(|b| (b.color(), b.width()));
    let (title, hint) = match style {
        PadStyle::Pointer => ("Sign Here", "Draw your signature using your mouse or finger"),
        PadStyle::Brush => (
            "Create Your Signature",
            "Draw your signature smoothly using your mouse or finger",
        ),
    };

    rsx! {
        div { style: "border: 1px solid #e5e7eb; border-radius: 12px; padding: 24px;",
            h3 { style: "margin: 0 0 4px 0;", "{title}" }
            p { style: "margin: 0 0 16px 0; font-size: 14px; color: #64748b;", "{hint}" }

            if let Some((current_color, current_width)) = brush {
                div { style: "display: flex; gap: 24px; align-items: center; padding: 12px; margin-bottom: 16px; border-radius: 8px; background: #f1f5f9;",
                    div { style: "display: flex; gap: 6px; align-items: center;",
                        span { style: "font-size: 14px; font-weight: 500;", "Color:" }
                        for color in PALETTE {
                            button {
                                style: "width: 24px; height: 24px; border-radius: 50%; cursor: pointer; background: {color.to_hex()}; border: 2px solid {swatch_border(color == current_color)};",
                                onclick: move |_| {
                                    if let Some(b) = pad.write().brush_mut() {
                                        b.set_color(color);
                                    }
                                },
                            }
                        }
                    }
                    div { style: "display: flex; gap: 4px; align-items: center;",
                        span { style: "font-size: 14px; font-weight: 500;", "Width:" }
                        for w in WIDTHS {
                            button {
                                style: "width: 32px; height: 24px; border-radius: 4px; cursor: pointer; font-size: 12px; {width_button_style(w == current_width)}",
                                onclick: move |_| {
                                    if let Some(b) = pad.write().brush_mut() {
                                        b.set_width(w);
                                    }
                                },
                                "{w}"
                            }
                        }
                    }
                }
            }

            div {
                style: "position: relative; width: {width}px; height: {height}px; background: white; border: 2px dashed #cbd5e1; border-radius: 8px; cursor: crosshair; overflow: hidden; user-select: none;",
                onmousedown: move |evt| {
                    let at = evt.element_coordinates();
                    pad.write().surface_mut().begin_stroke(Point::new(at.x as f32, at.y as f32));
                },
                onmousemove: move |evt| {
                    if pad.peek().surface().is_drawing() {
                        let at = evt.element_coordinates();
                        pad.write().surface_mut().extend_stroke(Point::new(at.x as f32, at.y as f32));
                    }
                },
                onmouseup: move |_| finish_stroke(pad, state, on_change),
                onmouseleave: move |_| finish_stroke(pad, state, on_change),

                svg {
                    width: "{width}",
                    height: "{height}",
                    style: "position: absolute; inset: 0; pointer-events: none;",
                    for (i, (d, color, stroke_width)) in paths.into_iter().enumerate() {
                        path {
                            key: "{i}",
                            d: "{d}",
                            fill: "none",
                            stroke: "{color}",
                            stroke_width: "{stroke_width}",
                            stroke_linecap: "round",
                            stroke_linejoin: "round",
                        }
                    }
                }
                if !has_signature && !pad.read().surface().is_drawing() {
                    div { style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; pointer-events: none; color: #94a3b8;",
                        "Draw your signature here"
                    }
                }
            }

            div { style: "display: flex; gap: 8px; margin-top: 16px;",
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #cbd5e1; background: white; cursor: pointer;",
                    disabled: !has_signature,
                    onclick: move |_| {
                        pad.write().surface_mut().clear();
                        on_change.call(None);
                        state.write().notify(Notice::success("Signature cleared"));
                    },
                    "Clear"
                }
                button {
                    style: "padding: 6px 12px; border-radius: 6px; border: 1px solid #cbd5e1; background: white; cursor: pointer;",
                    disabled: !has_signature,
                    onclick: move |_| {
                        let Some(signature) = pad.read().surface().signature().cloned() else {
                            return;
                        };
                        let downloads = svc.downloads();
                        spawn(async move {
                            let notice = match downloads.save_signature(&signature).await {
                                Ok(_) => Notice::success("Signature downloaded"),
                                Err(e) => humanize_error(&e),
                            };
                            state.write().notify(notice);
                        });
                    },
                    "Download"
                }
            }
        }
    }
}

fn finish_stroke(
    mut pad: Signal<Pad>,
    mut state: Signal<AppState>,
    on_change: EventHandler<Option<SignatureImage>>,
) {
    if !pad.peek().surface().is_drawing() {
        return;
    }
    let finished = pad.write().surface_mut().end_stroke();
    match finished {
        Ok(Some(signature)) => on_change.call(Some(signature)),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "signature rasterisation failed");
            state.write().notify(humanize_error(&e));
        }
    }
}

/// `M x y L x y ...`; a single point becomes a zero-length segment so the
/// round cap draws a dot.
fn svg_path(stroke: &Stroke) -> String {
    let mut points = stroke.points.iter();
    let Some(first) = points.next() else {
        return String::new();
    };
    let mut d = format!("M {} {} L {} {}", first.x, first.y, first.x, first.y);
    for p in points {
        d.push_str(&format!(" L {} {}", p.x, p.y));
    }
    d
}

fn swatch_border(selected: bool) -> &'static str {
    if selected { "#0f172a" } else { "#e5e7eb" }
}

fn width_button_style(selected: bool) -> &'static str {
    if selected {
        "background: #1e40af; color: white; border: 1px solid #1e40af;"
    } else {
        "background: white; color: #0f172a; border: 1px solid #e5e7eb;"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signwerk_core::Rgb;
    use signwerk_document::signature::StrokeStyle;

    fn stroke(points: &[(f32, f32)]) -> Stroke {
        Stroke {
            style: StrokeStyle {
                color: Rgb(0, 0, 0),
                width: 2.0,
            },
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    #[test]
    fn dot_becomes_zero_length_segment() {
        assert_eq!(svg_path(&stroke(&[(3.0, 4.0)])), "M 3 4 L 3 4");
    }

    #[test]
    fn polyline_path() {
        assert_eq!(
            svg_path(&stroke(&[(0.0, 0.0), (10.5, 2.0), (20.0, 8.0)])),
            "M 0 0 L 0 0 L 10.5 2 L 20 8"
        );
    }

    #[test]
    fn pad_styles_pick_their_surface() {
        assert_eq!(Pad::new(PadStyle::Pointer).surface().size(), POINTER_PAD_SIZE);
        assert!(Pad::new(PadStyle::Pointer).brush().is_none());
        assert_eq!(Pad::new(PadStyle::Brush).surface().size(), (600, 200));
        assert!(Pad::new(PadStyle::Brush).brush().is_some());
    }
}
