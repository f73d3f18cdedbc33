// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Signwerk: Core types and error definitions shared across all crates.

pub mod config;
pub mod data_url;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::AppConfig;
pub use data_url::DataUrl;
pub use error::SignwerkError;
pub use human_errors::{Notice, NoticeLevel};
pub use types::*;
