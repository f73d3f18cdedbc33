// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Download file naming for signed exports.

use chrono::{DateTime, Utc};

/// Extension of a signed PDF export.
pub const PDF_EXTENSION: &str = "pdf";
/// Extension of a flattened image export.
pub const PNG_EXTENSION: &str = "png";

/// ISO-8601 timestamp with `:` and `.` made filename-safe, truncated to
/// seconds: `2024-05-01T13-45-09`.
pub fn export_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Drop the last `.ext` suffix. A trailing dot or a dot inside a directory
/// component is left alone.
pub fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() && !name[idx..].contains('/') => &name[..idx],
        _ => name,
    }
}

/// `signed-<stem>-<timestamp>.<extension>`
pub fn signed_file_name(name: &str, at: DateTime<Utc>, extension: &str) -> String {
    format!(
        "signed-{}-{}.{}",
        strip_extension(name),
        export_timestamp(at),
        extension
    )
}
