// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// signwerk-flow: the stateful side of the signing flow.
//
// `intake` turns picked or dropped files into in-memory data URLs,
// `session` walks a list of documents through one signature, and `delivery`
// writes signatures and signed exports to the downloads directory.

pub mod delivery;
pub mod intake;
pub mod session;

pub use delivery::{Downloads, SavedExport, export_after_capture, save_and_export};
pub use intake::{FileSource, UploadIntake, format_file_size, read_source};
pub use session::{COMPLETION_MESSAGE, EditorTab, Finalized, Progress, SigningSession};
