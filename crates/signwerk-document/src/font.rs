// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fonts for text drawn onto rasters (placeholder document names).
//
// Resolution order: an explicitly configured font file, then a well-known
// system font, then a built-in 5x7 block face so text is never dropped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use signwerk_core::error::{Result, SignwerkError};
use tracing::{debug, info, warn};

#[cfg(target_os = "linux")]
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];

#[cfg(target_os = "macos")]
const SYSTEM_FONTS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Geneva.ttf",
];

#[cfg(target_os = "windows")]
const SYSTEM_FONTS: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const SYSTEM_FONTS: &[&str] = &[];

#[derive(Clone)]
enum Face {
    Outline(Arc<FontVec>),
    Block,
}

/// A font ready to draw with, cheap to clone.
#[derive(Clone)]
pub struct FontHandle {
    face: Face,
    path: Option<PathBuf>,
}

impl FontHandle {
    /// Load a font file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let mut handle = Self::from_bytes(data)
            .map_err(|err| SignwerkError::Font(format!("{}: {err}", path.display())))?;
        handle.path = Some(path.to_path_buf());
        info!(path = %path.display(), "Font loaded");
        Ok(handle)
    }

    /// Parse font bytes already in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data)
            .map_err(|err| SignwerkError::Font(err.to_string()))?;
        Ok(Self {
            face: Face::Outline(Arc::new(font)),
            path: None,
        })
    }

    /// The built-in block face. Always available.
    pub const fn builtin() -> Self {
        Self {
            face: Face::Block,
            path: None,
        }
    }

    /// First well-known system font that loads.
    pub fn system() -> Option<Self> {
        SYSTEM_FONTS.iter().map(Path::new).filter(|p| p.is_file()).find_map(|p| {
            FontHandle::load(p)
                .inspect_err(|err| debug!(path = %p.display(), error = %err, "System font skipped"))
                .ok()
        })
    }

    /// Configured font if it loads, else a system font, else the block face.
    pub fn resolve(configured: Option<&Path>) -> Self {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) => return font,
                Err(err) => warn!(path = %path.display(), error = %err, "Configured font unavailable"),
            }
        }
        Self::system().unwrap_or_else(|| {
            info!("No system font found, using built-in block face");
            Self::builtin()
        })
    }

    /// File the font came from; `None` for the block face and in-memory fonts.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Block)
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, size_px: f32, color: Rgba<u8>) {
        match &self.face {
            Face::Outline(font) => {
                draw_text_mut(canvas, color, x, y, PxScale::from(size_px), &**font, text)
            }
            Face::Block => draw_block_text(canvas, text, x, y, size_px, color),
        }
    }
}

impl Default for FontHandle {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("FontHandle");
        s.field("builtin", &self.is_builtin());
        if let Some(path) = &self.path {
            s.field("path", path);
        }
        s.finish()
    }
}

// -- Block face ---------------------------------------------------------------

/// Glyph cells per em; a 7-row glyph fills roughly the cap height.
const CELLS_PER_EM: f32 = 9.0;
const ADVANCE_CELLS: f32 = 6.0;

fn draw_block_text(canvas: &mut RgbaImage, text: &str, x: i32, y: i32, size_px: f32, color: Rgba<u8>) {
    let cell = (size_px / CELLS_PER_EM).max(1.0);
    let dot = cell.ceil() as u32;
    let mut pen = x as f32;
    for ch in text.chars() {
        for (row, bits) in glyph(ch).iter().enumerate() {
            for col in 0..5 {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let left = (pen + col as f32 * cell).round() as i32;
                let top = (y as f32 + row as f32 * cell).round() as i32;
                draw_filled_rect_mut(canvas, Rect::at(left, top).of_size(dot, dot), color);
            }
        }
        pen += ADVANCE_CELLS * cell;
    }
}

/// 5x7 rows, most significant of the low five bits is the left column.
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        ' ' => [0; 7],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([0x37, 0x41, 0x51, 255]);
    const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn inked(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| **p == INK).count()
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let err = FontHandle::from_bytes(b"not a font".to_vec()).unwrap_err();
        assert!(matches!(err, SignwerkError::Font(_)));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        let err = FontHandle::load("/nonexistent/signwerk/font.ttf").unwrap_err();
        assert!(matches!(err, SignwerkError::Io(_)));
    }

    #[test]
    fn unloadable_configured_font_falls_back() {
        let missing = Path::new("/nonexistent/signwerk/font.ttf");
        let font = FontHandle::resolve(Some(missing));
        assert_ne!(font.path(), Some(missing));
    }

    #[test]
    fn block_face_draws_in_the_requested_colour() {
        let mut img = RgbaImage::from_pixel(200, 40, PAPER);
        FontHandle::builtin().draw(&mut img, "Lease", 10, 8, 24.0, INK);
        assert!(inked(&img) > 50);
        // Nothing left of the origin or above it.
        assert!((0..10).all(|x| (0..40).all(|y| *img.get_pixel(x, y) == PAPER)));
        assert!((0..200).all(|x| (0..8).all(|y| *img.get_pixel(x, y) == PAPER)));
    }

    #[test]
    fn block_face_scales_with_size() {
        let mut small = RgbaImage::from_pixel(200, 60, PAPER);
        let mut large = small.clone();
        FontHandle::builtin().draw(&mut small, "AB", 0, 0, 12.0, INK);
        FontHandle::builtin().draw(&mut large, "AB", 0, 0, 36.0, INK);
        assert!(inked(&large) > inked(&small) * 3);
    }

    #[test]
    fn spaces_draw_nothing_and_unknown_chars_draw_a_box() {
        let mut img = RgbaImage::from_pixel(60, 30, PAPER);
        FontHandle::builtin().draw(&mut img, "   ", 0, 0, 18.0, INK);
        assert_eq!(inked(&img), 0);
        FontHandle::builtin().draw(&mut img, "§", 0, 0, 18.0, INK);
        assert!(inked(&img) > 0);
    }

    #[test]
    fn system_font_draws_when_present() {
        let Some(font) = FontHandle::system() else {
            return;
        };
        assert!(!font.is_builtin());
        let mut img = RgbaImage::from_pixel(200, 40, PAPER);
        font.draw(&mut img, "Lease", 10, 8, 24.0, INK);
        assert!(img.pixels().any(|p| *p != PAPER));
    }
}
