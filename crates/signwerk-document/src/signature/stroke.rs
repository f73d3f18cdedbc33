// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stroke geometry and rasterisation.
//
// Strokes are polylines rendered with round caps and joins: a filled disc is
// stamped along every segment at sub-radius spacing. There is no smoothing and
// no pressure model.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use serde::{Deserialize, Serialize};
use signwerk_core::Rgb;
use signwerk_core::error::Result;
use tracing::debug;

use super::SignatureImage;
use crate::image::processor::ImageProcessor;

/// A point in logical surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Pen colour and width for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Rgb,
    /// Line width in logical pixels.
    pub width: f32,
}

/// A single pen-down to pen-up polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub style: StrokeStyle,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn start(style: StrokeStyle, at: Point) -> Self {
        Self {
            style,
            points: vec![at],
        }
    }

    /// Whether the pointer moved after going down.
    pub fn has_movement(&self) -> bool {
        self.points.len() > 1
    }

    /// Paint onto `canvas`, scaling logical coordinates by `multiplier`.
    pub fn paint(&self, canvas: &mut RgbaImage, multiplier: f32) {
        let Rgb(r, g, b) = self.style.color;
        let color = Rgba([r, g, b, 255]);
        let radius = (self.style.width * multiplier / 2.0).max(0.5);
        let pixel_radius = radius.round().max(1.0) as i32;
        let spacing = (radius / 2.0).max(0.5);

        let scaled: Vec<Point> = self
            .points
            .iter()
            .map(|p| Point::new(p.x * multiplier, p.y * multiplier))
            .collect();

        let mut stamp = |p: Point| {
            draw_filled_circle_mut(canvas, (p.x.round() as i32, p.y.round() as i32), pixel_radius, color);
        };

        match scaled.as_slice() {
            [] => {}
            [only] => stamp(*only),
            points => {
                for pair in points.windows(2) {
                    let (from, to) = (pair[0], pair[1]);
                    let steps = (from.distance(&to) / spacing).ceil().max(1.0) as u32;
                    for i in 0..=steps {
                        let t = i as f32 / steps as f32;
                        stamp(Point::new(
                            from.x + (to.x - from.x) * t,
                            from.y + (to.y - from.y) * t,
                        ));
                    }
                }
            }
        }
    }
}

/// Render strokes over a white background of `size` logical pixels, scaled by
/// `multiplier`, and encode the result as PNG.
pub fn rasterize(strokes: &[Stroke], size: (u32, u32), multiplier: u32) -> Result<SignatureImage> {
    let multiplier = multiplier.max(1);
    let (width, height) = (size.0 * multiplier, size.1 * multiplier);
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));

    for stroke in strokes {
        stroke.paint(&mut canvas, multiplier as f32);
    }

    let png = ImageProcessor::from_rgba(canvas).to_png_bytes()?;
    debug!(strokes = strokes.len(), width, height, bytes = png.len(), "Signature rasterised");

    Ok(SignatureImage { png, width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: StrokeStyle = StrokeStyle {
        color: Rgb(0x1e, 0x29, 0x3b),
        width: 2.0,
    };

    fn is_ink(pixel: &Rgba<u8>) -> bool {
        pixel.0 == [0x1e, 0x29, 0x3b, 255]
    }

    #[test]
    fn horizontal_line_is_continuous() {
        let mut stroke = Stroke::start(INK, Point::new(5.0, 10.0));
        stroke.points.push(Point::new(45.0, 10.0));

        let mut canvas = RgbaImage::from_pixel(50, 20, Rgba([255, 255, 255, 255]));
        stroke.paint(&mut canvas, 1.0);

        for x in 5..=45 {
            assert!(is_ink(canvas.get_pixel(x, 10)), "gap at x={x}");
        }
        assert!(!is_ink(canvas.get_pixel(48, 10)));
        assert!(!is_ink(canvas.get_pixel(20, 2)));
    }

    #[test]
    fn single_point_leaves_a_dot() {
        let stroke = Stroke::start(INK, Point::new(10.0, 10.0));
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
        stroke.paint(&mut canvas, 1.0);
        assert!(is_ink(canvas.get_pixel(10, 10)));
    }

    #[test]
    fn strokes_off_the_surface_are_clipped() {
        let mut stroke = Stroke::start(INK, Point::new(-30.0, -30.0));
        stroke.points.push(Point::new(500.0, 500.0));
        let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        stroke.paint(&mut canvas, 1.0);
        assert!(is_ink(canvas.get_pixel(5, 5)));
    }

    #[test]
    fn rasterize_applies_multiplier() {
        let mut stroke = Stroke::start(INK, Point::new(1.0, 1.0));
        stroke.points.push(Point::new(8.0, 3.0));
        let image = rasterize(&[stroke], (10, 4), 2).unwrap();
        assert_eq!((image.width, image.height), (20, 8));

        let decoded = ImageProcessor::from_bytes(&image.png).unwrap().into_rgba();
        assert!(is_ink(decoded.get_pixel(2, 2)));
    }
}
