// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Data URL codec: `data:<mime>;base64,<payload>` strings that carry file
// content inline between the upload zone, the signature pad, and the canvas.

use base64::Engine as Base64Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Result, SignwerkError};

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUrl {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Render as a base64 data URL string.
    pub fn encode(&self) -> String {
        encode(&self.mime_type, &self.data)
    }

    /// Parse a data URL string.
    ///
    /// Only base64 payloads are accepted; that is the only form the signing
    /// flow produces. An empty MIME part defaults to `text/plain` as browsers do.
    pub fn parse(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| SignwerkError::DataUrl("missing `data:` scheme".into()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| SignwerkError::DataUrl("missing `,` separator".into()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| SignwerkError::DataUrl("only base64 payloads are supported".into()))?;
        let data = STANDARD
            .decode(payload.trim())
            .map_err(|err| SignwerkError::DataUrl(format!("invalid base64: {err}")))?;

        let mime_type = if mime.is_empty() { "text/plain" } else { mime };
        Ok(Self::new(mime_type, data))
    }
}

/// Encode raw bytes as a data URL with the given MIME type.
pub fn encode(mime_type: &str, data: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_header() {
        let url = encode("image/png", &[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn parse_recovers_payload() {
        let parsed = DataUrl::parse("data:application/pdf;base64,JVBERi0=").unwrap();
        assert_eq!(parsed.mime_type, "application/pdf");
        assert_eq!(parsed.data, b"%PDF-");
    }

    #[test]
    fn empty_mime_defaults_to_text() {
        let parsed = DataUrl::parse("data:;base64,aGk=").unwrap();
        assert_eq!(parsed.mime_type, "text/plain");
        assert_eq!(parsed.data, b"hi");
    }

    #[test]
    fn rejects_non_base64_form() {
        assert!(matches!(
            DataUrl::parse("data:text/plain,hello"),
            Err(SignwerkError::DataUrl(_))
        ));
        assert!(DataUrl::parse("https://example.com/a.png").is_err());
    }
}
