// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer: wrap a flattened canvas raster in a single-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use signwerk_core::error::SignwerkError;
use tracing::{debug, info, instrument, warn};

use crate::canvas::FlattenedDocument;

/// Millimetres per PDF point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Creates signed-document PDFs.
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: String,
}

impl PdfWriter {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    /// Create a one-page PDF whose page matches the flattened canvas.
    ///
    /// The page is `page_width` x `page_height` points and the raster fills it
    /// edge to edge, so the higher-resolution export keeps its detail.
    #[instrument(skip_all, fields(title = %self.title, px_w = flat.pixel_width, px_h = flat.pixel_height))]
    pub fn create_from_flattened(&self, flat: &FlattenedDocument) -> Result<Vec<u8>, SignwerkError> {
        let rgb_image = ::image::load_from_memory(&flat.png)
            .map_err(|err| {
                SignwerkError::ImageError(format!("failed to decode flattened canvas: {}", err))
            })?
            .to_rgb8();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb_image.into_raw()),
            width: flat.pixel_width as usize,
            height: flat.pixel_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let mut doc = PdfDocument::new(&self.title);
        let xobject_id = doc.add_image(&raw);

        // At this DPI the raster's natural size equals the page size.
        let dpi = flat.pixel_width as f32 * 72.0 / flat.page_width;

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                dpi: Some(dpi),
                rotate: None,
            },
        }];

        let page_w = Mm(flat.page_width * MM_PER_PT);
        let page_h = Mm(flat.page_height * MM_PER_PT);
        doc.with_pages(vec![PdfPage::new(page_w, page_h, ops)]);

        info!(
            page_w_pt = flat.page_width,
            page_h_pt = flat.page_height,
            dpi,
            "Flattened canvas placed on page"
        );

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "PDF serialisation produced warnings");
        }

        debug!(output_bytes = output.len(), "PDF serialised");
        Ok(output)
    }
}
