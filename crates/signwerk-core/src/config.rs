// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::SessionMode;

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logical width of the document canvas in pixels.
    pub canvas_width: u32,
    /// Logical height of the document canvas in pixels.
    pub canvas_height: u32,
    /// Resolution multiplier applied when flattening. Independent of zoom.
    pub export_multiplier: u32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Factor applied per zoom-in / zoom-out click.
    pub zoom_step: f32,
    /// Delay between saving and starting the PDF export.
    pub save_settle_ms: u64,
    /// Delay between a render request and capturing the canvas for export.
    pub capture_settle_ms: u64,
    /// Simulated processing time when finalizing a signing session.
    pub finalize_delay_ms: u64,
    pub session_mode: SessionMode,
    /// TrueType/OpenType font for placeholder page text. When unset a system
    /// font is used, or the built-in block face if none is found.
    pub font_path: Option<PathBuf>,
    /// Where downloads are written. Defaults to `~/Downloads`.
    pub download_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn save_settle(&self) -> Duration {
        Duration::from_millis(self.save_settle_ms)
    }

    pub fn capture_settle(&self) -> Duration {
        Duration::from_millis(self.capture_settle_ms)
    }

    pub fn finalize_delay(&self) -> Duration {
        Duration::from_millis(self.finalize_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 1000,
            export_multiplier: 2,
            min_zoom: 0.3,
            max_zoom: 3.0,
            zoom_step: 1.2,
            save_settle_ms: 500,
            capture_settle_ms: 300,
            finalize_delay_ms: 2000,
            session_mode: SessionMode::Enhanced,
            font_path: None,
            download_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{ "canvas_width": 640 }"#).unwrap();
        assert_eq!(config.canvas_width, 640);
        assert_eq!(config.canvas_height, 1000);
        assert_eq!(config.session_mode, SessionMode::Enhanced);
    }

    #[test]
    fn delays_convert_to_durations() {
        let config = AppConfig::default();
        assert_eq!(config.save_settle(), Duration::from_millis(500));
        assert_eq!(config.capture_settle(), Duration::from_millis(300));
        assert_eq!(config.finalize_delay(), Duration::from_secs(2));
    }
}
