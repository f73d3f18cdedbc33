// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document canvas: composites a placed signature over a document preview and
// flattens the result for export.
//
// The canvas owns one logical scene (background plus at most one signature
// overlay) measured in logical pixels. Zoom only changes how the scene is
// painted for display; flattening always paints at the export multiplier.
//
// The view is painted as two layers, background and overlay. Each carries a
// revision that changes only when that layer would paint differently, so a
// caller can keep encoded layers while the overlay is merely dragged.

pub mod background;
pub mod overlay;
mod render;

pub use background::{Background, DocumentImage, Placeholder};
pub use overlay::{Corner, Hit, PlacedSignature, Rect};
pub use render::HANDLE_SIZE;

use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;
use signwerk_core::error::{Result, SignwerkError};
use signwerk_core::{AppConfig, DocumentKind};
use tracing::{debug, info, instrument, warn};

use crate::export::strip_extension;
use crate::font::FontHandle;
use crate::image::processor::ImageProcessor;
use crate::pdf::writer::PdfWriter;
use crate::signature::{Point, SignatureImage};
use render::Scene;

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

/// Layer revisions are unique across canvases.
fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// PDF points per logical canvas pixel.
pub const PT_PER_PX: f32 = 0.75;

/// Geometry and zoom limits of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub export_multiplier: u32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
}

impl From<&AppConfig> for CanvasSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            width: config.canvas_width.max(1),
            height: config.canvas_height.max(1),
            export_multiplier: config.export_multiplier.max(1),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom.max(config.min_zoom),
            zoom_step: config.zoom_step,
        }
    }
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// The saved, flattened canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedDocument {
    /// PNG-encoded raster at the export multiplier.
    pub png: Vec<u8>,
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Page width in PDF points.
    pub page_width: f32,
    /// Page height in PDF points.
    pub page_height: f32,
}

impl FlattenedDocument {
    /// Encode `raster`, sizing the page from the logical canvas size.
    pub fn from_raster(raster: RgbaImage, logical: (u32, u32)) -> Result<Self> {
        let (pixel_width, pixel_height) = raster.dimensions();
        let png = ImageProcessor::from_rgba(raster).to_png_bytes()?;
        Ok(Self {
            png,
            pixel_width,
            pixel_height,
            page_width: logical.0 as f32 * PT_PER_PX,
            page_height: logical.1 as f32 * PT_PER_PX,
        })
    }
}

/// Interactive signing surface for one document.
///
/// Cloning snapshots the whole scene, including any saved output.
#[derive(Debug, Clone)]
pub struct DocumentCanvas {
    name: String,
    kind: DocumentKind,
    settings: CanvasSettings,
    background: Background,
    overlay: Option<PlacedSignature>,
    zoom: f32,
    saved: Option<FlattenedDocument>,
    font: FontHandle,
    background_revision: u64,
    overlay_revision: u64,
}

impl DocumentCanvas {
    /// Empty canvas waiting for its background.
    pub fn new(name: impl Into<String>, kind: DocumentKind, settings: CanvasSettings) -> Self {
        Self {
            name: name.into(),
            kind,
            settings,
            background: Background::Pending,
            overlay: None,
            zoom: 1.0,
            saved: None,
            font: FontHandle::builtin(),
            background_revision: next_revision(),
            overlay_revision: next_revision(),
        }
    }

    /// Font for placeholder text. Defaults to the built-in block face.
    pub fn with_font(mut self, font: FontHandle) -> Self {
        self.font = font;
        self.background_revision = next_revision();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    /// Logical (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.settings.width, self.settings.height)
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn overlay(&self) -> Option<&PlacedSignature> {
        self.overlay.as_ref()
    }

    // -- Scene ----------------------------------------------------------------

    /// Decode the document bytes into the background.
    #[instrument(skip(self, bytes), fields(name = %self.name, bytes_len = bytes.len()))]
    pub fn load_background(&mut self, bytes: &[u8]) {
        let background = Background::decode(bytes, &self.name, self.kind, self.size());
        self.set_background(background);
    }

    /// Install a background decoded elsewhere (e.g. on a blocking task).
    pub fn set_background(&mut self, background: Background) {
        debug!(name = %self.name, pending = background.is_pending(), "Background set");
        self.background = background;
        self.background_revision = next_revision();
    }

    /// Put `signature` on the canvas, replacing any previous overlay and
    /// discarding a previous save.
    #[instrument(skip_all, fields(name = %self.name, width = signature.width, height = signature.height))]
    pub fn place_signature(&mut self, signature: &SignatureImage) -> Result<()> {
        let image = ImageProcessor::from_bytes(&signature.png)?.into_rgba();
        let placed = PlacedSignature::new(image);
        info!(scale = placed.scale(), "Signature placed");
        self.overlay = Some(placed);
        self.saved = None;
        self.overlay_revision = next_revision();
        Ok(())
    }

    // -- Pointer input --------------------------------------------------------

    /// Map a point in view pixels to logical canvas pixels.
    pub fn view_to_canvas(&self, view: Point) -> Point {
        Point::new(view.x / self.zoom, view.y / self.zoom)
    }

    /// Pointer pressed at `view`. Selects the overlay when it is hit and
    /// deselects it otherwise.
    pub fn press(&mut self, view: Point) -> Option<Hit> {
        let at = self.view_to_canvas(view);
        let radius = HANDLE_SIZE as f32 / 2.0 / self.zoom;
        let overlay = self.overlay.as_mut()?;
        let hit = overlay.hit_test(at, radius);
        let was_selected = overlay.is_selected();
        if hit.is_some() {
            overlay.select();
        } else {
            overlay.deselect();
        }
        if overlay.is_selected() != was_selected {
            self.overlay_revision = next_revision();
        }
        hit
    }

    /// Continue a drag that started on `hit` by a view-pixel delta.
    pub fn drag(&mut self, hit: Hit, view_dx: f32, view_dy: f32) -> Result<()> {
        let (dx, dy) = (view_dx / self.zoom, view_dy / self.zoom);
        match hit {
            Hit::Body => self.move_signature(dx, dy),
            Hit::Handle(corner) => self.resize_signature(corner, dx, dy),
        }
    }

    /// Move the overlay by a logical delta.
    pub fn move_signature(&mut self, dx: f32, dy: f32) -> Result<()> {
        self.overlay_mut()?.translate(dx, dy)
    }

    /// Drag a corner handle by a logical delta.
    pub fn resize_signature(&mut self, corner: Corner, dx: f32, dy: f32) -> Result<()> {
        self.overlay_mut()?.resize_from(corner, dx, dy)?;
        self.overlay_revision = next_revision();
        Ok(())
    }

    fn overlay_mut(&mut self) -> Result<&mut PlacedSignature> {
        self.overlay.as_mut().ok_or(SignwerkError::NoSignaturePlaced)
    }

    // -- Zoom -----------------------------------------------------------------

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Zoom as a whole percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_zoom(self.zoom * self.settings.zoom_step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_zoom(self.zoom / self.settings.zoom_step)
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.set_zoom(1.0)
    }

    fn set_zoom(&mut self, zoom: f32) -> f32 {
        let zoom = zoom.clamp(self.settings.min_zoom, self.settings.max_zoom);
        if zoom != self.zoom {
            self.zoom = zoom;
            self.background_revision = next_revision();
            self.overlay_revision = next_revision();
        }
        self.zoom
    }

    // -- Output ---------------------------------------------------------------

    fn scene(&self) -> Scene<'_> {
        Scene {
            size: self.size(),
            background: &self.background,
            overlay: self.overlay.as_ref(),
            font: &self.font,
        }
    }

    /// Changes whenever the background layer would paint differently.
    pub fn background_revision(&self) -> u64 {
        self.background_revision
    }

    /// Changes whenever the overlay layer would paint differently. Moving
    /// the overlay only changes its position.
    pub fn overlay_revision(&self) -> u64 {
        self.overlay_revision
    }

    /// Paint the background at the current zoom.
    pub fn render_background(&self) -> RgbaImage {
        render::paint_background(&self.scene(), self.zoom)
    }

    /// [`render_background`](Self::render_background) encoded as a PNG data URL.
    pub fn render_background_data_url(&self) -> Result<String> {
        ImageProcessor::from_rgba(self.render_background()).to_png_data_url()
    }

    /// Paint the overlay with its selection decorations on a transparent
    /// layer at the current zoom.
    pub fn render_overlay(&self) -> Option<RgbaImage> {
        let overlay = self.overlay.as_ref()?;
        Some(render::paint_overlay_layer(overlay, self.zoom, true))
    }

    /// [`render_overlay`](Self::render_overlay) encoded as a PNG data URL.
    pub fn render_overlay_data_url(&self) -> Result<Option<String>> {
        self.render_overlay()
            .map(|layer| ImageProcessor::from_rgba(layer).to_png_data_url())
            .transpose()
    }

    /// Where the overlay layer sits in view pixels.
    pub fn overlay_view_position(&self) -> Option<(i32, i32)> {
        let overlay = self.overlay.as_ref()?;
        Some(render::overlay_layer_position(overlay, self.zoom))
    }

    /// Save: deselect, rasterise at the export multiplier and lock the overlay.
    ///
    /// Refused while the background is still pending and after a previous
    /// save. A canvas without a signature can still be saved.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn flatten(&mut self) -> Result<&FlattenedDocument> {
        if self.saved.is_some() {
            return Err(SignwerkError::AlreadySaved);
        }
        if self.background.is_pending() {
            warn!("Save requested before the background settled");
            return Err(SignwerkError::EmptyCanvas);
        }
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.deselect();
        }

        let multiplier = self.settings.export_multiplier as f32;
        let raster = render::paint(&self.scene(), multiplier, false);
        let flat = FlattenedDocument::from_raster(raster, self.size())?;

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.lock();
            self.overlay_revision = next_revision();
        }
        info!(
            width = flat.pixel_width,
            height = flat.pixel_height,
            png_bytes = flat.png.len(),
            "Canvas flattened"
        );
        let flat = self.saved.insert(flat);
        Ok(&*flat)
    }

    pub fn is_saved(&self) -> bool {
        self.saved.is_some()
    }

    pub fn saved(&self) -> Option<&FlattenedDocument> {
        self.saved.as_ref()
    }

    /// Wrap the canvas in a one-page PDF.
    ///
    /// Uses the saved raster when there is one; otherwise the current scene is
    /// rasterised without locking anything.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn export_pdf(&self) -> Result<Vec<u8>> {
        if self.background.is_pending() {
            return Err(SignwerkError::EmptyCanvas);
        }
        let writer = PdfWriter::new(format!("Signed {}", strip_extension(&self.name)));
        match &self.saved {
            Some(flat) => writer.create_from_flattened(flat),
            None => {
                let multiplier = self.settings.export_multiplier as f32;
                let raster = render::paint(&self.scene(), multiplier, false);
                writer.create_from_flattened(&FlattenedDocument::from_raster(raster, self.size())?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{BrushPad, SignatureSurface};
    use image::Rgba;

    fn small_settings() -> CanvasSettings {
        CanvasSettings {
            width: 200,
            height: 250,
            ..CanvasSettings::default()
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        ImageProcessor::from_rgba(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])))
            .to_png_bytes()
            .unwrap()
    }

    fn signature() -> SignatureImage {
        let mut pad = BrushPad::new();
        pad.begin_stroke(Point::new(20.0, 20.0));
        pad.extend_stroke(Point::new(80.0, 60.0));
        pad.end_stroke().unwrap().unwrap()
    }

    fn loaded(settings: CanvasSettings) -> DocumentCanvas {
        let mut canvas = DocumentCanvas::new("lease.png", DocumentKind::Png, settings);
        canvas.load_background(&png(40, 50));
        canvas
    }

    #[test]
    fn settings_follow_config() {
        let config = AppConfig {
            canvas_width: 640,
            export_multiplier: 3,
            ..AppConfig::default()
        };
        let settings = CanvasSettings::from(&config);
        assert_eq!(settings.width, 640);
        assert_eq!(settings.height, 1000);
        assert_eq!(settings.export_multiplier, 3);
    }

    #[test]
    fn flatten_before_background_is_empty_canvas() {
        let mut canvas = DocumentCanvas::new("a.png", DocumentKind::Png, small_settings());
        assert!(matches!(canvas.flatten(), Err(SignwerkError::EmptyCanvas)));
        assert!(matches!(canvas.export_pdf(), Err(SignwerkError::EmptyCanvas)));
    }

    #[test]
    fn flatten_is_doubled_and_locks_overlay() {
        let mut canvas = loaded(small_settings());
        canvas.place_signature(&signature()).unwrap();
        canvas.move_signature(-150.0, -350.0).unwrap();

        let flat = canvas.flatten().unwrap().clone();
        assert_eq!((flat.pixel_width, flat.pixel_height), (400, 500));
        assert_eq!((flat.page_width, flat.page_height), (150.0, 187.5));
        assert!(!flat.png.is_empty());

        let overlay = canvas.overlay().unwrap();
        assert!(overlay.is_locked());
        assert!(!overlay.is_selected());
        assert!(matches!(canvas.move_signature(1.0, 1.0), Err(SignwerkError::OverlayLocked)));
        assert!(matches!(
            canvas.resize_signature(Corner::BottomRight, 5.0, 5.0),
            Err(SignwerkError::OverlayLocked)
        ));
    }

    #[test]
    fn second_save_is_rejected_until_new_signature() {
        let mut canvas = loaded(small_settings());
        canvas.flatten().unwrap();
        assert!(matches!(canvas.flatten(), Err(SignwerkError::AlreadySaved)));

        canvas.place_signature(&signature()).unwrap();
        assert!(!canvas.is_saved());
        assert!(!canvas.overlay().unwrap().is_locked());
        canvas.flatten().unwrap();
        assert!(canvas.is_saved());
    }

    #[test]
    fn editing_without_overlay_is_reported() {
        let mut canvas = loaded(small_settings());
        assert!(matches!(
            canvas.move_signature(1.0, 1.0),
            Err(SignwerkError::NoSignaturePlaced)
        ));
        assert_eq!(canvas.press(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn zoom_is_clamped_and_maps_pointer() {
        let mut canvas = loaded(CanvasSettings::default());
        for _ in 0..20 {
            canvas.zoom_in();
        }
        assert_eq!(canvas.zoom(), 3.0);
        for _ in 0..40 {
            canvas.zoom_out();
        }
        assert!((canvas.zoom() - 0.3).abs() < 1e-6);
        assert_eq!(canvas.zoom_percent(), 30);

        canvas.reset_zoom();
        canvas.zoom_in();
        assert_eq!(canvas.zoom_percent(), 120);
        let p = canvas.view_to_canvas(Point::new(120.0, 240.0));
        assert!((p.x - 100.0).abs() < 1e-3 && (p.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn press_selects_and_deselects() {
        let mut canvas = loaded(CanvasSettings::default());
        canvas.place_signature(&signature()).unwrap();

        assert_eq!(canvas.press(Point::new(10.0, 10.0)), None);
        assert!(!canvas.overlay().unwrap().is_selected());

        assert_eq!(canvas.press(Point::new(250.0, 420.0)), Some(Hit::Body));
        assert!(canvas.overlay().unwrap().is_selected());
    }

    #[test]
    fn drag_uses_view_delta_divided_by_zoom() {
        let mut canvas = loaded(CanvasSettings::default());
        canvas.place_signature(&signature()).unwrap();
        canvas.zoom_in();
        canvas.zoom_in();
        let zoom = canvas.zoom();
        canvas.drag(Hit::Body, 10.0 * zoom, 20.0 * zoom).unwrap();
        let pos = canvas.overlay().unwrap().position();
        assert!((pos.x - 210.0).abs() < 1e-3 && (pos.y - 420.0).abs() < 1e-3);
    }

    #[test]
    fn view_follows_zoom() {
        let mut canvas = loaded(small_settings());
        canvas.zoom_out();
        let view = canvas.render_background();
        let expected = crate::image::processor::scaled_dimension(200, canvas.zoom());
        assert_eq!(view.width(), expected);
        assert!(canvas.render_background_data_url().unwrap().starts_with("data:image/png;base64,"));
        assert_eq!(canvas.render_overlay_data_url().unwrap(), None);
    }

    #[test]
    fn export_pdf_uses_canvas_page() {
        let mut canvas = loaded(small_settings());
        canvas.flatten().unwrap();
        let pdf = canvas.export_pdf().unwrap();
        assert_eq!(crate::pdf::reader::PdfReader::from_bytes(&pdf).unwrap().page_count(), 1);
    }

    #[test]
    fn zoom_does_not_change_export_resolution() {
        let mut canvas = loaded(CanvasSettings::default());
        canvas.place_signature(&signature()).unwrap();
        canvas.zoom_in();
        canvas.zoom_in();
        assert!(canvas.zoom() > 1.0);

        let flat = canvas.flatten().unwrap();
        assert_eq!((flat.pixel_width, flat.pixel_height), (1600, 2000));
        assert_eq!((flat.page_width, flat.page_height), (600.0, 750.0));
    }

    #[test]
    fn default_placeholder_shows_document_name() {
        let text = Rgba([0x37, 0x41, 0x51, 255]);
        let mut canvas = DocumentCanvas::new(
            "contract.docx",
            DocumentKind::Docx,
            CanvasSettings::from(&AppConfig::default()),
        );
        canvas.load_background(b"PK\x03\x04 not an image");
        assert!(matches!(canvas.background(), Background::Placeholder(_)));

        let view = canvas.render_background();
        let inked = (100..500)
            .flat_map(|x| (100..130).map(move |y| (x, y)))
            .filter(|&(x, y)| *view.get_pixel(x, y) == text)
            .count();
        assert!(inked > 100, "only {inked} name pixels on the placeholder");
    }

    #[test]
    fn dragging_keeps_both_layers() {
        let mut canvas = loaded(CanvasSettings::default());
        canvas.place_signature(&signature()).unwrap();
        let background = canvas.background_revision();
        let overlay = canvas.overlay_revision();
        let before = canvas.overlay_view_position().unwrap();

        canvas.drag(Hit::Body, 30.0, -20.0).unwrap();
        assert_eq!(canvas.background_revision(), background);
        assert_eq!(canvas.overlay_revision(), overlay);
        assert_eq!(canvas.overlay_view_position().unwrap(), (before.0 + 30, before.1 - 20));

        canvas.drag(Hit::Handle(Corner::BottomRight), 20.0, 20.0).unwrap();
        assert_eq!(canvas.background_revision(), background);
        assert_ne!(canvas.overlay_revision(), overlay);
    }

    #[test]
    fn zoom_and_new_background_repaint_layers() {
        let mut canvas = loaded(CanvasSettings::default());
        canvas.place_signature(&signature()).unwrap();
        let (background, overlay) = (canvas.background_revision(), canvas.overlay_revision());

        canvas.reset_zoom();
        assert_eq!(canvas.background_revision(), background);

        canvas.zoom_in();
        assert_ne!(canvas.background_revision(), background);
        assert_ne!(canvas.overlay_revision(), overlay);

        let zoomed = canvas.background_revision();
        canvas.load_background(&png(10, 10));
        assert_ne!(canvas.background_revision(), zoomed);

        let fresh = loaded(CanvasSettings::default());
        assert_ne!(fresh.background_revision(), canvas.background_revision());
    }

    #[test]
    fn overlay_layer_is_drawn_at_its_position() {
        let mut canvas = loaded(CanvasSettings::default());
        canvas.place_signature(&signature()).unwrap();
        let layer = canvas.render_overlay().unwrap();
        let bounds = canvas.overlay().unwrap().bounds();
        assert!(layer.width() > bounds.width as u32 && layer.width() < bounds.width as u32 + 20);
        assert!(layer.height() > bounds.height as u32);

        let (left, top) = canvas.overlay_view_position().unwrap();
        assert_eq!((left, top), (200 - 7, 400 - 7));
        assert_eq!(layer.get_pixel(0, 0)[3], 0);
        assert_eq!(*layer.get_pixel(7, 7), Rgba([178, 204, 255, 255]));
    }
}
