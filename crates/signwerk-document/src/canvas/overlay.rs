// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placed signature: the movable, corner-resizable overlay on the document
// canvas. All geometry is in logical canvas pixels.

use image::RgbaImage;
use signwerk_core::error::{Result, SignwerkError};
use tracing::debug;

use crate::signature::Point;

/// Horizontal padding of the white frame on each side of the signature.
pub const FRAME_PAD_X: f32 = 10.0;
/// Vertical padding of the white frame above and below the signature.
pub const FRAME_PAD_Y: f32 = 5.0;
/// Where a new overlay lands.
pub const INITIAL_POSITION: Point = Point { x: 200.0, y: 400.0 };
/// Widest a freshly placed overlay may be before it is scaled down.
pub const INITIAL_MAX_WIDTH: f32 = 300.0;
/// Smallest allowed scale; keeps the overlay grabbable.
pub const MIN_SCALE: f32 = 0.05;

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::TopLeft => Point::new(self.x, self.y),
            Corner::TopRight => Point::new(self.right(), self.y),
            Corner::BottomLeft => Point::new(self.x, self.bottom()),
            Corner::BottomRight => Point::new(self.right(), self.bottom()),
        }
    }
}

/// Resize handles. Edge and rotation handles are not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn opposite(&self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }
}

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Body,
    Handle(Corner),
}

/// The signature group: a white padded frame with the signature inside.
#[derive(Debug, Clone)]
pub struct PlacedSignature {
    image: RgbaImage,
    left: f32,
    top: f32,
    scale: f32,
    selected: bool,
    locked: bool,
}

impl PlacedSignature {
    /// Place `image` at the initial position, selected and unlocked.
    pub fn new(image: RgbaImage) -> Self {
        let natural_width = image.width() as f32 + 2.0 * FRAME_PAD_X;
        let scale = (INITIAL_MAX_WIDTH / natural_width).min(1.0);
        Self {
            image,
            left: INITIAL_POSITION.x,
            top: INITIAL_POSITION.y,
            scale,
            selected: true,
            locked: false,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Frame bounds on the canvas.
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.left,
            y: self.top,
            width: (self.image.width() as f32 + 2.0 * FRAME_PAD_X) * self.scale,
            height: (self.image.height() as f32 + 2.0 * FRAME_PAD_Y) * self.scale,
        }
    }

    /// Where the signature pixels sit inside the frame.
    pub fn image_bounds(&self) -> Rect {
        Rect {
            x: self.left + FRAME_PAD_X * self.scale,
            y: self.top + FRAME_PAD_Y * self.scale,
            width: self.image.width() as f32 * self.scale,
            height: self.image.height() as f32 * self.scale,
        }
    }

    /// Classify a point. Handles win over the body and are only live while
    /// the overlay is selected and unlocked. A locked overlay is inert.
    pub fn hit_test(&self, p: Point, handle_radius: f32) -> Option<Hit> {
        if self.locked {
            return None;
        }
        let bounds = self.bounds();
        if self.selected {
            for corner in Corner::ALL {
                let c = bounds.corner(corner);
                if (p.x - c.x).abs() <= handle_radius && (p.y - c.y).abs() <= handle_radius {
                    return Some(Hit::Handle(corner));
                }
            }
        }
        bounds.contains(p).then_some(Hit::Body)
    }

    pub fn select(&mut self) {
        if !self.locked {
            self.selected = true;
        }
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    /// Drag the overlay by (`dx`, `dy`).
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<()> {
        self.ensure_unlocked()?;
        self.left += dx;
        self.top += dy;
        Ok(())
    }

    /// Drag `corner` by (`dx`, `dy`), scaling uniformly while the opposite
    /// corner stays put.
    pub fn resize_from(&mut self, corner: Corner, dx: f32, dy: f32) -> Result<()> {
        self.ensure_unlocked()?;

        let before = self.bounds();
        let anchor = before.corner(corner.opposite());
        let grow_x = if corner.is_left() { -dx } else { dx };
        let grow_y = if corner.is_top() { -dy } else { dy };
        let factor = ((before.width + grow_x) / before.width + (before.height + grow_y) / before.height) / 2.0;

        self.scale = (self.scale * factor).max(MIN_SCALE);
        let after = self.bounds();
        self.left = if corner.is_left() { anchor.x - after.width } else { anchor.x };
        self.top = if corner.is_top() { anchor.y - after.height } else { anchor.y };

        debug!(?corner, scale = self.scale, "Signature resized");
        Ok(())
    }

    /// Freeze the overlay in place. Irreversible for this overlay.
    pub fn lock(&mut self) {
        self.locked = true;
        self.selected = false;
    }

    fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            Err(SignwerkError::OverlayLocked)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(width: u32, height: u32) -> PlacedSignature {
        PlacedSignature::new(RgbaImage::new(width, height))
    }

    #[test]
    fn small_signature_keeps_natural_size() {
        let sig = placed(100, 40);
        assert_eq!(sig.scale(), 1.0);
        assert_eq!(
            sig.bounds(),
            Rect { x: 200.0, y: 400.0, width: 120.0, height: 50.0 }
        );
        assert_eq!(sig.image_bounds().x, 210.0);
        assert_eq!(sig.image_bounds().y, 405.0);
        assert!(sig.is_selected());
    }

    #[test]
    fn wide_signature_is_scaled_to_fit() {
        // 1200px brush pad output + 20px padding = 1220 wide.
        let sig = placed(1200, 400);
        assert!((sig.bounds().width - INITIAL_MAX_WIDTH).abs() < 0.01);
    }

    #[test]
    fn hit_test_prefers_handles() {
        let sig = placed(100, 40);
        assert_eq!(sig.hit_test(Point::new(320.0, 450.0), 6.0), Some(Hit::Handle(Corner::BottomRight)));
        assert_eq!(sig.hit_test(Point::new(250.0, 420.0), 6.0), Some(Hit::Body));
        assert_eq!(sig.hit_test(Point::new(10.0, 10.0), 6.0), None);
    }

    #[test]
    fn handles_are_dead_when_unselected() {
        let mut sig = placed(100, 40);
        sig.deselect();
        assert_eq!(sig.hit_test(Point::new(200.0, 400.0), 6.0), Some(Hit::Body));
    }

    #[test]
    fn bottom_right_resize_keeps_top_left() {
        let mut sig = placed(100, 40);
        sig.resize_from(Corner::BottomRight, 120.0, 50.0).unwrap();
        assert!((sig.scale() - 2.0).abs() < 1e-4);
        assert_eq!(sig.position(), Point::new(200.0, 400.0));
        assert!((sig.bounds().width - 240.0).abs() < 1e-3);
    }

    #[test]
    fn top_left_resize_keeps_bottom_right() {
        let mut sig = placed(100, 40);
        let anchor = sig.bounds().corner(Corner::BottomRight);
        sig.resize_from(Corner::TopLeft, 60.0, 25.0).unwrap();
        assert!((sig.scale() - 0.5).abs() < 1e-4);
        let after = sig.bounds().corner(Corner::BottomRight);
        assert!((after.x - anchor.x).abs() < 1e-3 && (after.y - anchor.y).abs() < 1e-3);
    }

    #[test]
    fn resize_never_inverts() {
        let mut sig = placed(100, 40);
        sig.resize_from(Corner::BottomRight, -1000.0, -1000.0).unwrap();
        assert_eq!(sig.scale(), MIN_SCALE);
    }

    #[test]
    fn locked_overlay_rejects_edits() {
        let mut sig = placed(100, 40);
        sig.lock();
        assert!(matches!(sig.translate(5.0, 5.0), Err(SignwerkError::OverlayLocked)));
        assert!(matches!(
            sig.resize_from(Corner::TopRight, 5.0, 5.0),
            Err(SignwerkError::OverlayLocked)
        ));
        assert_eq!(sig.position(), Point::new(200.0, 400.0));
        assert_eq!(sig.hit_test(Point::new(250.0, 420.0), 6.0), None);
        sig.select();
        assert!(!sig.is_selected());
    }
}
