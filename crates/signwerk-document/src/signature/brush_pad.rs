// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Brush pad: 600x200 surface with a colour palette and adjustable pen width,
// rasterised at 2x.

use signwerk_core::Rgb;
use signwerk_core::error::Result;
use tracing::debug;

use super::stroke::{self, Point, Stroke, StrokeStyle};
use super::{SignatureImage, SignatureSurface};

pub const BRUSH_PAD_WIDTH: u32 = 600;
pub const BRUSH_PAD_HEIGHT: u32 = 200;
/// Output resolution multiplier.
pub const BRUSH_PAD_MULTIPLIER: u32 = 2;

/// Colours offered by the pad, default first.
pub const PALETTE: [Rgb; 5] = [
    Rgb(0x1e, 0x29, 0x3b),
    Rgb(0x0f, 0x17, 0x2a),
    Rgb(0x1e, 0x40, 0xaf),
    Rgb(0xdc, 0x26, 0x26),
    Rgb(0x05, 0x96, 0x69),
];

/// Pen widths offered by the pad.
pub const WIDTHS: [u8; 5] = [1, 2, 3, 4, 5];

pub const DEFAULT_WIDTH: u8 = 3;

/// Drawing surface with a configurable brush.
///
/// Every completed path marks the pad as signed, including a single click
/// (which leaves a dot). Brush changes apply to strokes started afterwards.
#[derive(Debug, Clone)]
pub struct BrushPad {
    color: Rgb,
    width: u8,
    strokes: Vec<Stroke>,
    current: Option<Stroke>,
    signature: Option<SignatureImage>,
}

impl BrushPad {
    pub fn new() -> Self {
        Self {
            color: PALETTE[0],
            width: DEFAULT_WIDTH,
            strokes: Vec::new(),
            current: None,
            signature: None,
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Set the pen width, clamped to the offered range.
    pub fn set_width(&mut self, width: u8) {
        self.width = width.clamp(WIDTHS[0], WIDTHS[WIDTHS.len() - 1]);
    }

    fn brush(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.width as f32,
        }
    }
}

impl Default for BrushPad {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureSurface for BrushPad {
    fn size(&self) -> (u32, u32) {
        (BRUSH_PAD_WIDTH, BRUSH_PAD_HEIGHT)
    }

    fn begin_stroke(&mut self, at: Point) {
        self.current = Some(Stroke::start(self.brush(), at));
    }

    fn extend_stroke(&mut self, to: Point) {
        if let Some(stroke) = self.current.as_mut() {
            stroke.points.push(to);
        }
    }

    fn end_stroke(&mut self) -> Result<Option<SignatureImage>> {
        let Some(stroke) = self.current.take() else {
            return Ok(None);
        };
        self.strokes.push(stroke);

        let image = stroke::rasterize(&self.strokes, self.size(), BRUSH_PAD_MULTIPLIER)?;
        debug!(
            strokes = self.strokes.len(),
            color = %self.color.to_hex(),
            width = self.width,
            "Brush pad signature updated"
        );
        self.signature = Some(image.clone());
        Ok(Some(image))
    }

    fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
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
