// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the signwerk-document crate. Measures flattening a
// full-size canvas (800x1000 at 2x) with an image background and a placed
// brush-pad signature, and wrapping the saved raster in a PDF. Together they
// are the hot path of every save.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};

use signwerk_core::DocumentKind;
use signwerk_document::canvas::CanvasSettings;
use signwerk_document::signature::Point;
use signwerk_document::{BrushPad, DocumentCanvas, ImageProcessor, SignatureImage, SignatureSurface};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn page_png() -> Vec<u8> {
    let mut page = RgbaImage::from_pixel(600, 800, Rgba([250, 250, 250, 255]));
    for y in (40..760).step_by(24) {
        for x in 40..560 {
            page.put_pixel(x, y, Rgba([60, 60, 60, 255]));
        }
    }
    ImageProcessor::from_rgba(page)
        .to_png_bytes()
        .expect("encode page")
}

fn signature() -> SignatureImage {
    let mut pad = BrushPad::new();
    pad.begin_stroke(Point::new(40.0, 150.0));
    for i in 0..50 {
        let t = i as f32 / 50.0;
        pad.extend_stroke(Point::new(40.0 + t * 500.0, 100.0 + (t * 12.0).sin() * 50.0));
    }
    pad.end_stroke()
        .expect("rasterise")
        .expect("signature present")
}

fn signed_canvas(page_png: &[u8], signature: &SignatureImage) -> DocumentCanvas {
    let mut canvas = DocumentCanvas::new("bench.png", DocumentKind::Png, CanvasSettings::default());
    canvas.load_background(page_png);
    canvas.place_signature(signature).expect("place");
    canvas
}

/// Flatten a canvas whose background is a 600x800 synthetic page.
fn bench_flatten(c: &mut Criterion) {
    let page_png = page_png();
    let signature = signature();

    c.bench_function("flatten (800x1000 @2x)", |b| {
        b.iter(|| {
            let mut canvas = signed_canvas(black_box(&page_png), &signature);
            let flat = canvas.flatten().expect("flatten");
            black_box(flat.png.len());
        });
    });
}

/// Wrap an already saved canvas in a one-page PDF.
fn bench_export_pdf(c: &mut Criterion) {
    let mut canvas = signed_canvas(&page_png(), &signature());
    canvas.flatten().expect("flatten");

    c.bench_function("export_pdf (1600x2000 raster)", |b| {
        b.iter(|| {
            let pdf = black_box(&canvas).export_pdf().expect("export");
            black_box(pdf.len());
        });
    });
}

criterion_group!(benches, bench_flatten, bench_export_pdf);
criterion_main!(benches);
