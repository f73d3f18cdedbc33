// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scene painter shared by the on-screen view and the flattened export.
//
// The scene is painted in logical canvas units multiplied by `scale`: the zoom
// factor for the view, the export multiplier for the flattened raster.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as PixelRect;

use super::background::{
    Background, DocumentImage, PLACEHOLDER_BORDER, PLACEHOLDER_PAGE, PLACEHOLDER_TEXT_ORIGIN,
    PLACEHOLDER_TEXT_SIZE, Placeholder,
};
use super::overlay::{Corner, PlacedSignature, Rect};
use crate::font::FontHandle;
use crate::image::processor::scaled_dimension;
use crate::signature::Point;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Light grey used for page and frame borders.
const BORDER: Rgba<u8> = Rgba([0xe5, 0xe7, 0xeb, 255]);
const TEXT: Rgba<u8> = Rgba([0x37, 0x41, 0x51, 255]);
const CAPTION: Rgba<u8> = Rgba([0x6b, 0x72, 0x80, 255]);
/// Selection frame and handle colour.
const SELECTION: Rgba<u8> = Rgba([178, 204, 255, 255]);
/// Corner handle edge length in view pixels.
pub const HANDLE_SIZE: u32 = 13;
/// Transparent border around an overlay layer, wide enough for half a handle.
const LAYER_MARGIN: u32 = HANDLE_SIZE / 2 + 1;
const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

/// Inputs for one paint pass.
pub struct Scene<'a> {
    pub size: (u32, u32),
    pub background: &'a Background,
    pub overlay: Option<&'a PlacedSignature>,
    pub font: &'a FontHandle,
}

/// Paint the scene at `scale`. Selection decorations are drawn only when
/// `decorations` is set and the overlay is selected.
pub fn paint(scene: &Scene<'_>, scale: f32, decorations: bool) -> RgbaImage {
    let width = scaled_dimension(scene.size.0, scale);
    let height = scaled_dimension(scene.size.1, scale);
    let mut target = RgbaImage::from_pixel(width, height, WHITE);

    match scene.background {
        Background::Pending => {}
        Background::Image(doc) => paint_document(&mut target, doc, scale),
        Background::Placeholder(placeholder) => {
            paint_placeholder(&mut target, placeholder, scene.font, scale)
        }
    }

    if let Some(overlay) = scene.overlay {
        paint_overlay(&mut target, overlay, scale, ORIGIN, decorations);
    }

    target
}

/// Paint only the background at `scale`.
pub fn paint_background(scene: &Scene<'_>, scale: f32) -> RgbaImage {
    paint(&Scene { overlay: None, ..*scene }, scale, false)
}

/// Top-left of the overlay layer in view pixels.
pub fn overlay_layer_position(overlay: &PlacedSignature, scale: f32) -> (i32, i32) {
    let bounds = overlay.bounds();
    (
        (bounds.x * scale).round() as i32 - LAYER_MARGIN as i32,
        (bounds.y * scale).round() as i32 - LAYER_MARGIN as i32,
    )
}

/// Paint the overlay alone on a transparent layer at `scale`, with room
/// around the frame for the corner handles.
pub fn paint_overlay_layer(overlay: &PlacedSignature, scale: f32, decorations: bool) -> RgbaImage {
    let bounds = overlay.bounds();
    let margin = LAYER_MARGIN as f32 / scale;
    let origin = Point::new(bounds.x - margin, bounds.y - margin);
    let width = scaled_dimension(1, bounds.width * scale) + 2 * LAYER_MARGIN + 1;
    let height = scaled_dimension(1, bounds.height * scale) + 2 * LAYER_MARGIN + 1;
    let mut layer = RgbaImage::new(width, height);
    paint_overlay(&mut layer, overlay, scale, origin, decorations);
    layer
}

fn paint_document(target: &mut RgbaImage, doc: &DocumentImage, scale: f32) {
    let factor = doc.scale * scale;
    let width = scaled_dimension(doc.image.width(), factor);
    let height = scaled_dimension(doc.image.height(), factor);
    let resized = imageops::resize(&doc.image, width, height, FilterType::Triangle);
    imageops::overlay(
        target,
        &resized,
        (doc.left * scale).round() as i64,
        (doc.top * scale).round() as i64,
    );
}

fn paint_placeholder(target: &mut RgbaImage, placeholder: &Placeholder, font: &FontHandle, scale: f32) {
    let (x, y, w, h) = PLACEHOLDER_PAGE;
    let page = Rect { x, y, width: w, height: h };
    fill_rect(target, &page, scale, WHITE);
    stroke_rect(target, &page, scale, PLACEHOLDER_BORDER * scale, BORDER);

    let (tx, ty) = PLACEHOLDER_TEXT_ORIGIN;
    let size = PLACEHOLDER_TEXT_SIZE * scale;
    font.draw(
        target,
        &placeholder.name,
        (tx * scale).round() as i32,
        (ty * scale).round() as i32,
        size,
        TEXT,
    );
    if let Some(caption) = placeholder.caption() {
        font.draw(
            target,
            &caption,
            (tx * scale).round() as i32,
            ((ty + PLACEHOLDER_TEXT_SIZE * 1.5) * scale).round() as i32,
            size * 0.66,
            CAPTION,
        );
    }
}

fn paint_overlay(
    target: &mut RgbaImage,
    overlay: &PlacedSignature,
    scale: f32,
    origin: Point,
    decorations: bool,
) {
    let frame = shifted(overlay.bounds(), origin);
    fill_rect(target, &frame, scale, WHITE);
    stroke_rect(target, &frame, scale, scale, BORDER);

    let inner = shifted(overlay.image_bounds(), origin);
    let width = scaled_dimension(overlay.image().width(), overlay.scale() * scale);
    let height = scaled_dimension(overlay.image().height(), overlay.scale() * scale);
    let resized = imageops::resize(overlay.image(), width, height, FilterType::Triangle);
    imageops::overlay(
        target,
        &resized,
        (inner.x * scale).round() as i64,
        (inner.y * scale).round() as i64,
    );

    if decorations && overlay.is_selected() && !overlay.is_locked() {
        paint_selection(target, &frame, scale);
    }
}

fn paint_selection(target: &mut RgbaImage, bounds: &Rect, scale: f32) {
    stroke_rect(target, bounds, scale, 1.0, SELECTION);

    let half = HANDLE_SIZE as f32 / 2.0;
    for corner in Corner::ALL {
        let c = bounds.corner(corner);
        let handle = PixelRect::at(
            (c.x * scale - half).round() as i32,
            (c.y * scale - half).round() as i32,
        )
        .of_size(HANDLE_SIZE, HANDLE_SIZE);
        draw_filled_rect_mut(target, handle, SELECTION);
    }
}

fn shifted(rect: Rect, origin: Point) -> Rect {
    Rect {
        x: rect.x - origin.x,
        y: rect.y - origin.y,
        ..rect
    }
}

fn to_pixels(rect: &Rect, scale: f32) -> PixelRect {
    PixelRect::at((rect.x * scale).round() as i32, (rect.y * scale).round() as i32).of_size(
        ((rect.width * scale).round() as u32).max(1),
        ((rect.height * scale).round() as u32).max(1),
    )
}

fn fill_rect(target: &mut RgbaImage, rect: &Rect, scale: f32, color: Rgba<u8>) {
    draw_filled_rect_mut(target, to_pixels(rect, scale), color);
}

/// Border drawn inward from the rectangle edge, `thickness` pixels wide.
fn stroke_rect(target: &mut RgbaImage, rect: &Rect, scale: f32, thickness: f32, color: Rgba<u8>) {
    let outer = to_pixels(rect, scale);
    let rings = (thickness.round() as u32).max(1);
    for i in 0..rings {
        let (w, h) = (outer.width(), outer.height());
        if w <= 2 * i || h <= 2 * i {
            break;
        }
        let ring = PixelRect::at(outer.left() + i as i32, outer.top() + i as i32)
            .of_size(w - 2 * i, h - 2 * i);
        draw_hollow_rect_mut(target, ring, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static BLOCK: FontHandle = FontHandle::builtin();

    fn scene<'a>(background: &'a Background, overlay: Option<&'a PlacedSignature>) -> Scene<'a> {
        Scene {
            size: (800, 1000),
            background,
            overlay,
            font: &BLOCK,
        }
    }

    fn count(img: &RgbaImage, color: Rgba<u8>, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| *img.get_pixel(x, y) == color)
            .count()
    }

    #[test]
    fn pending_scene_is_blank_white() {
        let bg = Background::Pending;
        let out = paint(&scene(&bg, None), 0.5, true);
        assert_eq!(out.dimensions(), (400, 500));
        assert!(out.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn placeholder_border_is_drawn() {
        let bg = Background::Placeholder(Placeholder {
            name: "x.docx".into(),
            page_count: None,
        });
        let out = paint(&scene(&bg, None), 1.0, false);
        assert_eq!(*out.get_pixel(50, 300), BORDER);
        assert_eq!(*out.get_pixel(51, 300), BORDER);
        assert_eq!(*out.get_pixel(52, 300), WHITE);
    }

    #[test]
    fn document_pixels_are_scaled_into_place() {
        let doc = DocumentImage {
            image: RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255])),
            scale: 1.0,
            left: 100.0,
            top: 0.0,
        };
        let bg = Background::Image(doc);
        let out = paint(&scene(&bg, None), 2.0, false);
        assert_eq!(*out.get_pixel(210, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*out.get_pixel(190, 10), WHITE);
    }

    #[test]
    fn selection_only_when_requested() {
        let bg = Background::Pending;
        let overlay = PlacedSignature::new(RgbaImage::from_pixel(100, 40, Rgba([0, 0, 0, 255])));
        let corner = (200, 400);

        let plain = paint(&scene(&bg, Some(&overlay)), 1.0, false);
        assert_ne!(*plain.get_pixel(corner.0 - 4, corner.1 - 4), SELECTION);

        let decorated = paint(&scene(&bg, Some(&overlay)), 1.0, true);
        assert_eq!(*decorated.get_pixel(corner.0 - 4, corner.1 - 4), SELECTION);
    }

    #[test]
    fn signature_sits_inside_padded_frame() {
        let bg = Background::Pending;
        let overlay = PlacedSignature::new(RgbaImage::from_pixel(100, 40, Rgba([0, 0, 0, 255])));
        let out = paint(&scene(&bg, Some(&overlay)), 1.0, false);
        // Frame border, then white padding, then ink.
        assert_eq!(*out.get_pixel(200, 420), BORDER);
        assert_eq!(*out.get_pixel(205, 420), WHITE);
        assert_eq!(*out.get_pixel(215, 420), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn placeholder_names_the_document() {
        let bg = Background::Placeholder(Placeholder {
            name: "contract.docx".into(),
            page_count: None,
        });
        let out = paint(&scene(&bg, None), 1.0, false);
        assert!(count(&out, TEXT, 100..400, 100..130) > 100);
        assert_eq!(count(&out, TEXT, 52..100, 52..100), 0);
        assert_eq!(count(&out, CAPTION, 100..400, 130..170), 0);
    }

    #[test]
    fn pdf_placeholder_adds_page_caption() {
        let bg = Background::Placeholder(Placeholder {
            name: "deed.pdf".into(),
            page_count: Some(3),
        });
        let out = paint(&scene(&bg, None), 1.0, false);
        assert!(count(&out, TEXT, 100..400, 100..130) > 0);
        assert!(count(&out, CAPTION, 100..400, 136..160) > 0);
    }

    #[test]
    fn placeholder_text_follows_scale() {
        let bg = Background::Placeholder(Placeholder {
            name: "contract.docx".into(),
            page_count: None,
        });
        let out = paint(&scene(&bg, None), 2.0, false);
        assert_eq!(count(&out, TEXT, 0..200, 0..200), 0);
        assert!(count(&out, TEXT, 200..800, 200..260) > 400);
    }
}
