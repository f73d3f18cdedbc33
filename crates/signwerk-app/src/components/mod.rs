// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Reusable UI pieces shared by the pages.

pub mod document_viewer;
pub mod marketing;
pub mod signature_pad;
pub mod toasts;
pub mod upload_zone;
