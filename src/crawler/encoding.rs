//! Character encoding detection for fetched pages
//!
//! Legacy Chinese news pages are frequently served with a missing or wrong
//! `Content-Type` charset, so the decision is made from the body bytes:
//!
//! 1. Byte-order mark
//! 2. Strict UTF-8 validity
//! 3. `<meta charset>` / `<meta http-equiv="Content-Type">` in the first 1024 bytes
//! 4. The site's fallback encoding

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::OnceLock;

/// Number of leading bytes searched for a charset declaration
const SNIFF_LEN: usize = 1024;

fn charset_meta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#)
            .expect("valid charset regex")
    })
}

/// Detects the encoding of an HTML body
///
/// # Examples
///
/// ```
/// use corpus_crawler::crawler::detect_encoding;
///
/// let fallback = encoding_rs::GB18030;
/// assert_eq!(detect_encoding("新闻".as_bytes(), fallback), encoding_rs::UTF_8);
/// ```
pub fn detect_encoding(body: &[u8], fallback: &'static Encoding) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(body) {
        return encoding;
    }

    if std::str::from_utf8(body).is_ok() {
        return UTF_8;
    }

    if let Some(encoding) = declared_encoding(body) {
        // A page that claims UTF-8 but failed validation above is mislabeled
        if encoding != UTF_8 {
            return encoding;
        }
    }

    fallback
}

/// Reads a charset declaration from the head of the document
fn declared_encoding(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    charset_meta_re()
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Decodes a body with the given encoding, replacing malformed sequences
pub fn decode_body(body: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _encoding_used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::trace!("Malformed {} sequences replaced", encoding.name());
    }
    decoded.into_owned()
}
