// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: loads persisted settings and the placeholder font,
// and hands the UI a downloads destination built from the current settings.
//
// Shared between components through `use_context::<AppServices>()`. The
// config and font sit behind `Arc<Mutex<>>` so clones observe saved changes.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use signwerk_core::AppConfig;
use signwerk_core::error::Result;
use signwerk_document::FontHandle;
use signwerk_flow::Downloads;
use tracing::{info, warn};

use super::data_dir;

/// Shared application services.
///
/// All fields are cheaply cloneable (Arc-wrapped) so that the struct can be
/// passed into closures and async blocks without lifetime issues.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
    font: Arc<Mutex<FontHandle>>,
}

impl AppServices {
    /// Initialise services. Call once at app startup.
    ///
    /// A missing or unreadable config file falls back to defaults.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::open(dir)
    }

    fn open(dir: PathBuf) -> Self {
        let config = load_config(&dir).unwrap_or_default();
        let font = FontHandle::resolve(config.font_path.as_deref());
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
            font: Arc::new(Mutex::new(font)),
        }
    }

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Update and persist the config, reloading the font if its path changed.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let font_changed = {
            let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);
            let changed = current.font_path != config.font_path;
            *current = config.clone();
            changed
        };
        if font_changed {
            let font = FontHandle::resolve(config.font_path.as_deref());
            *self.font.lock().unwrap_or_else(PoisonError::into_inner) = font;
        }
        persist_config(&self.data_dir, config)
    }

    /// Font for placeholder page text: the configured file when it loads,
    /// otherwise a system font or the built-in face.
    pub fn font(&self) -> FontHandle {
        self.font.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Where downloads go under the current settings.
    pub fn downloads(&self) -> Downloads {
        Downloads::from_config(&self.config())
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring invalid config file");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signwerk_core::SessionMode;

    #[test]
    fn saved_settings_survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::open(dir.path().to_path_buf());
        assert_eq!(svc.config(), AppConfig::default());

        let config = AppConfig {
            session_mode: SessionMode::Basic,
            download_dir: Some(dir.path().join("out")),
            ..AppConfig::default()
        };
        svc.save_config(&config).unwrap();

        let reopened = AppServices::open(dir.path().to_path_buf());
        assert_eq!(reopened.config(), config);
        assert_eq!(reopened.downloads().dir(), dir.path().join("out"));
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        let svc = AppServices::open(dir.path().to_path_buf());
        assert_eq!(svc.config(), AppConfig::default());
    }

    #[test]
    fn unreadable_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::open(dir.path().to_path_buf());
        let missing = dir.path().join("missing.ttf");
        let config = AppConfig {
            font_path: Some(missing.clone()),
            ..AppConfig::default()
        };
        svc.save_config(&config).unwrap();
        assert_ne!(svc.font().path(), Some(missing.as_path()));
    }

    #[test]
    fn broken_font_file_keeps_default_face() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::open(dir.path().to_path_buf());
        let before = svc.font().path().map(Path::to_path_buf);

        let broken = dir.path().join("broken.ttf");
        std::fs::write(&broken, b"not a font").unwrap();
        svc.save_config(&AppConfig {
            font_path: Some(broken),
            ..AppConfig::default()
        })
        .unwrap();
        assert_eq!(svc.font().path().map(Path::to_path_buf), before);
    }
}
