// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// signwerk-document: Raster and PDF side of the Signwerk signing flow.
//
// Provides signature capture surfaces (stroke recording and rasterisation), the
// document canvas that composites a signature over a document preview, and PDF
// export of the flattened result.

pub mod canvas;
pub mod export;
pub mod font;
pub mod image;
pub mod pdf;
pub mod signature;

// Re-export the primary structs so callers can use `signwerk_document::DocumentCanvas` etc.
pub use canvas::{DocumentCanvas, FlattenedDocument};
pub use font::FontHandle;
pub use crate::image::processor::ImageProcessor;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
pub use signature::{BrushPad, PointerPad, SignatureImage, SignatureSurface};
