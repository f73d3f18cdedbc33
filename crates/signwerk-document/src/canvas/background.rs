// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Canvas background: the uploaded document decoded as an image, or a page
// placeholder when it is not an image.

use image::RgbaImage;
use signwerk_core::DocumentKind;
use signwerk_core::data_url::DataUrl;
use tracing::{debug, info, warn};

use crate::image::processor::{ImageProcessor, fit_scale};
use crate::pdf::reader::PdfReader;

/// Placeholder page geometry in logical canvas pixels.
pub const PLACEHOLDER_PAGE: (f32, f32, f32, f32) = (50.0, 50.0, 700.0, 900.0);
/// Placeholder page border width.
pub const PLACEHOLDER_BORDER: f32 = 2.0;
/// Top-left of the document name on the placeholder.
pub const PLACEHOLDER_TEXT_ORIGIN: (f32, f32) = (100.0, 100.0);
pub const PLACEHOLDER_TEXT_SIZE: f32 = 24.0;

/// What sits beneath the signature.
#[derive(Debug, Clone)]
pub enum Background {
    /// Decode not finished yet. Nothing is drawn and export is refused.
    Pending,
    Image(DocumentImage),
    Placeholder(Placeholder),
}

/// A decoded document scaled to the canvas.
#[derive(Debug, Clone)]
pub struct DocumentImage {
    /// Pixels at the document's native resolution.
    pub image: RgbaImage,
    /// Native → canvas scale.
    pub scale: f32,
    pub left: f32,
    pub top: f32,
}

/// Stand-in page for documents that cannot be decoded as images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    /// Known for PDFs that `lopdf` can open.
    pub page_count: Option<usize>,
}

impl Placeholder {
    /// Secondary caption under the document name.
    pub fn caption(&self) -> Option<String> {
        match self.page_count {
            Some(1) => Some("1 page".into()),
            Some(n) => Some(format!("{n} pages")),
            None => None,
        }
    }
}

impl Background {
    /// Decode `bytes` for a canvas of `canvas_size`.
    ///
    /// Images are scaled to fit (up or down), centred horizontally and aligned
    /// to the top. Anything that fails to decode becomes a placeholder.
    pub fn decode(bytes: &[u8], name: &str, kind: DocumentKind, canvas_size: (u32, u32)) -> Self {
        match ImageProcessor::from_bytes(bytes) {
            Ok(processor) => {
                let scale = fit_scale(processor.width(), processor.height(), canvas_size.0, canvas_size.1);
                let left = (canvas_size.0 as f32 - processor.width() as f32 * scale) / 2.0;
                info!(
                    name,
                    width = processor.width(),
                    height = processor.height(),
                    scale,
                    "Document image loaded"
                );
                Self::Image(DocumentImage {
                    image: processor.into_rgba(),
                    scale,
                    left,
                    top: 0.0,
                })
            }
            Err(err) => {
                debug!(name, error = %err, "Image loading failed, creating placeholder");
                let page_count = match kind {
                    DocumentKind::Pdf => PdfReader::from_bytes(bytes).ok().map(|r| r.page_count()),
                    _ => None,
                };
                Self::Placeholder(Placeholder {
                    name: name.to_owned(),
                    page_count,
                })
            }
        }
    }

    /// Decode the payload of a data URL; a malformed URL yields a placeholder.
    pub fn decode_data_url(url: &str, name: &str, kind: DocumentKind, canvas_size: (u32, u32)) -> Self {
        match DataUrl::parse(url) {
            Ok(parsed) => Self::decode(&parsed.data, name, kind, canvas_size),
            Err(err) => {
                warn!(name, error = %err, "Document data URL unreadable");
                Self::Placeholder(Placeholder {
                    name: name.to_owned(),
                    page_count: None,
                })
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}
