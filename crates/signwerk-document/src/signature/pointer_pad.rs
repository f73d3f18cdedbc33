// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raw pointer pad: fixed dark pen, 1x output, sized by the layout.

use signwerk_core::Rgb;
use signwerk_core::error::Result;
use tracing::debug;

use super::stroke::{self, Point, Stroke, StrokeStyle};
use super::{SignatureImage, SignatureSurface};

/// Pen used by the pointer pad.
pub const POINTER_PEN: StrokeStyle = StrokeStyle {
    color: Rgb(0x1e, 0x29, 0x3b),
    width: 2.0,
};

/// Minimal drawing surface.
///
/// The pad counts as signed as soon as the pointer moves while pressed; a
/// press and release without movement draws nothing. The signature is
/// re-rasterised on release only when the pad is signed.
#[derive(Debug, Clone)]
pub struct PointerPad {
    width: u32,
    height: u32,
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
    has_signature: bool,
    signature: Option<SignatureImage>,
}

impl PointerPad {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            strokes: Vec::new(),
            current: None,
            has_signature: false,
            signature: None,
        }
    }
}

impl SignatureSurface for PointerPad {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn begin_stroke(&mut self, at: Point) {
        self.current = Some(Stroke::start(POINTER_PEN, at));
    }

    fn extend_stroke(&mut self, to: Point) {
        if let Some(stroke) = self.current.as_mut() {
            stroke.points.push(to);
            self.has_signature = true;
        }
    }

    fn end_stroke(&mut self) -> Result<Option<SignatureImage>> {
        let Some(stroke) = self.current.take() else {
            return Ok(None);
        };
        if stroke.has_movement() {
            self.strokes.push(stroke);
        }
        if !self.has_signature {
            return Ok(None);
        }

        let image = stroke::rasterize(&self.strokes, self.size(), 1)?;
        debug!(strokes = self.strokes.len(), "Pointer pad signature updated");
        self.signature = Some(image.clone());
        Ok(Some(image))
    }

    fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
        self.has_signature = false;
        self.signature = None;
    }

    fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    fn open_stroke(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    fn signature(&self) -> Option<&SignatureImage> {
        self.signature.as_ref()
    }

    fn is_drawing(&self) -> bool {
        self.current.is_some()
    }
}
