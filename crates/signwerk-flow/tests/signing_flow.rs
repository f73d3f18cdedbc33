// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end: upload two documents, sign both with one signature, export,
// and finalize.

use std::path::Path;
use std::time::Duration;

use image::{Rgba, RgbaImage};
use signwerk_core::{AppConfig, SessionMode, SignwerkError, UploadStatus};
use signwerk_document::canvas::{Background, CanvasSettings};
use signwerk_document::signature::Point;
use signwerk_document::{BrushPad, DocumentCanvas, PdfReader, SignatureSurface};
use signwerk_flow::{Downloads, FileSource, SigningSession, UploadIntake, save_and_export};

fn write_png(dir: &Path, name: &str) -> FileSource {
    let path = dir.join(name);
    RgbaImage::from_pixel(120, 160, Rgba([230, 230, 240, 255]))
        .save(&path)
        .unwrap();
    FileSource::from_path(path)
}

fn write_docx(dir: &Path, name: &str) -> FileSource {
    let path = dir.join(name);
    std::fs::write(&path, b"PK\x03\x04 not really a word file").unwrap();
    FileSource::from_path(path)
}

fn quick_config(download_dir: &Path) -> AppConfig {
    AppConfig {
        canvas_width: 400,
        canvas_height: 500,
        save_settle_ms: 0,
        capture_settle_ms: 0,
        finalize_delay_ms: 1,
        download_dir: Some(download_dir.to_path_buf()),
        ..AppConfig::default()
    }
}

fn draw_signature(pad: &mut BrushPad) {
    pad.begin_stroke(Point::new(30.0, 120.0));
    pad.extend_stroke(Point::new(120.0, 60.0));
    pad.extend_stroke(Point::new(260.0, 140.0));
    pad.end_stroke().unwrap();
}

#[tokio::test]
async fn upload_sign_and_export_two_documents() {
    let inbox = tempfile::tempdir().unwrap();
    let outbox = tempfile::tempdir().unwrap();
    let config = quick_config(outbox.path());
    let downloads = Downloads::from_config(&config);

    // -- Upload --
    let mut intake = UploadIntake::new();
    let notices = intake
        .ingest(vec![
            write_png(inbox.path(), "invoice.png"),
            write_docx(inbox.path(), "contract.docx"),
            FileSource::from_path(inbox.path().join("vanished.pdf")),
        ])
        .await;
    assert_eq!(notices.len(), 3);
    assert_eq!(intake.files().len(), 3);
    assert!(intake.files().iter().all(|f| f.status != UploadStatus::Pending));
    let handoff = intake.ready_descriptors();
    assert_eq!(handoff.len(), 2);

    // -- Sign --
    let mut session = SigningSession::from_handoff(Some(handoff), SessionMode::Enhanced).unwrap();
    let mut pad = BrushPad::new();
    draw_signature(&mut pad);
    session.set_signature(pad.signature().cloned());

    let downloaded_signature = downloads.save_signature(session.signature().unwrap()).await.unwrap();
    assert!(downloaded_signature.ends_with("signature.png"));

    loop {
        let doc = session.current().clone();
        let mut canvas = DocumentCanvas::new(&doc.name, doc.kind(), CanvasSettings::from(&config));
        canvas.set_background(Background::decode_data_url(
            &doc.data_url,
            &doc.name,
            doc.kind(),
            canvas.size(),
        ));
        canvas.place_signature(session.signature().unwrap()).unwrap();
        canvas.move_signature(-150.0, -300.0).unwrap();

        let saved = save_and_export(&mut canvas, &downloads, &config, |_| {}).await.unwrap();
        assert_eq!((saved.flattened.pixel_width, saved.flattened.pixel_height), (800, 1000));
        let pdf = std::fs::read(&saved.pdf_path).unwrap();
        assert_eq!(PdfReader::from_bytes(&pdf).unwrap().page_count(), 1);
        assert!(matches!(
            canvas.move_signature(1.0, 1.0),
            Err(SignwerkError::OverlayLocked)
        ));

        session.record_output(doc.id, saved.flattened);
        if session.is_last() {
            break;
        }
        session.advance().unwrap();
    }

    assert_eq!(session.progress().done, 2);
    assert!(matches!(session.advance(), Err(SignwerkError::NoNextDocument)));

    // -- Finalize --
    assert!(session.can_finalize());
    let done = session.finalize(Duration::from_millis(1)).await.unwrap();
    assert_eq!(done.notice.message, "All documents signed successfully!");

    let mut pdfs: Vec<String> = std::fs::read_dir(outbox.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".pdf"))
        .collect();
    pdfs.sort();
    assert_eq!(pdfs.len(), 2);
    assert!(pdfs[0].starts_with("signed-contract-"));
    assert!(pdfs[1].starts_with("signed-invoice-"));
}

#[tokio::test]
async fn basic_session_requires_fresh_signature_per_document() {
    let docs = {
        let inbox = tempfile::tempdir().unwrap();
        let mut intake = UploadIntake::new();
        intake
            .ingest(vec![
                write_png(inbox.path(), "a.png"),
                write_png(inbox.path(), "b.png"),
            ])
            .await;
        intake.ready_descriptors()
    };

    let mut session = SigningSession::from_handoff(Some(docs), SessionMode::Basic).unwrap();
    let mut pad = BrushPad::new();
    draw_signature(&mut pad);
    session.set_signature(pad.signature().cloned());
    session.advance().unwrap();

    assert!(!session.can_finalize());
    assert!(matches!(
        session.finalize(Duration::ZERO).await,
        Err(SignwerkError::NoSignature)
    ));
}

#[test]
fn missing_handoff_redirects() {
    let err = SigningSession::from_handoff(None, SessionMode::Enhanced).unwrap_err();
    assert_eq!(
        signwerk_core::human_errors::humanize_error(&err).message,
        "No documents found for signing"
    );
}

#[tokio::test]
async fn export_before_background_is_refused() {
    let outbox = tempfile::tempdir().unwrap();
    let config = quick_config(outbox.path());
    let mut canvas = DocumentCanvas::new(
        "pending.png",
        signwerk_core::DocumentKind::Png,
        CanvasSettings::from(&config),
    );
    let mut saved = false;
    let err = save_and_export(&mut canvas, &Downloads::from_config(&config), &config, |_| saved = true)
        .await
        .unwrap_err();
    assert!(matches!(err, SignwerkError::EmptyCanvas));
    assert!(!saved);
    assert_eq!(std::fs::read_dir(outbox.path()).unwrap().count(), 0);
}
