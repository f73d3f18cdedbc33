// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signature capture: freehand stroke recording and rasterisation.
//
// Two interchangeable surfaces implement `SignatureSurface`: `PointerPad`, a
// raw pointer pad with a fixed pen, and `BrushPad`, which adds colour and width
// choices and renders at twice its logical size.

pub mod brush_pad;
pub mod pointer_pad;
pub mod stroke;

pub use brush_pad::BrushPad;
pub use pointer_pad::PointerPad;
pub use stroke::{Point, Stroke, StrokeStyle};

use signwerk_core::data_url;
use signwerk_core::error::Result;

/// File name used when the signature itself is downloaded.
pub const SIGNATURE_FILE_NAME: &str = "signature.png";

/// Rasterised signature, regenerated after every completed stroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureImage {
    /// PNG-encoded pixels.
    pub png: Vec<u8>,
    /// Pixel width of the encoded image.
    pub width: u32,
    /// Pixel height of the encoded image.
    pub height: u32,
}

impl SignatureImage {
    pub fn to_data_url(&self) -> String {
        data_url::encode("image/png", &self.png)
    }

    pub fn file_name(&self) -> &'static str {
        SIGNATURE_FILE_NAME
    }
}

/// A drawing surface that turns pointer input into a signature image.
///
/// Coordinates are in the surface's logical pixel space with the origin at the
/// top-left corner. Points outside the surface are accepted and clipped when
/// rendering.
pub trait SignatureSurface {
    /// Logical size (width, height).
    fn size(&self) -> (u32, u32);

    /// Pointer pressed at `at`.
    fn begin_stroke(&mut self, at: Point);

    /// Pointer moved to `to` while pressed. Ignored when no stroke is open.
    fn extend_stroke(&mut self, to: Point);

    /// Pointer released or left the surface.
    ///
    /// Returns the freshly rasterised signature when the completed stroke
    /// changed it, `None` otherwise.
    fn end_stroke(&mut self) -> Result<Option<SignatureImage>>;

    /// Remove every stroke and forget the current signature.
    fn clear(&mut self);

    /// Completed strokes, oldest first.
    fn strokes(&self) -> &[Stroke];

    /// The stroke being drawn right now, for live preview.
    fn open_stroke(&self) -> Option<&Stroke>;

    /// Current signature image, if anything has been drawn.
    fn signature(&self) -> Option<&SignatureImage>;

    fn has_signature(&self) -> bool {
        self.signature().is_some()
    }

    /// Whether a stroke is currently open.
    fn is_drawing(&self) -> bool;
}
