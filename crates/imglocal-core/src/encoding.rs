//! Best-effort text decoding for HTML of unknown provenance.
//!
//! Documents are tried against a fixed chain of encodings and always come
//! out as a `String`; the caller writes them back as UTF-8.

use anyhow::{Context, Result};
use encoding_rs::WINDOWS_1252;
use std::fmt;
use std::fs;
use std::path::Path;

/// UTF-8 BOM: EF BB BF
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Bytes Windows-1252 leaves undefined; their presence rules that encoding out.
const WINDOWS_1252_UNDEFINED: &[u8] = &[0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Encoding a document was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Valid UTF-8; a leading BOM, if any, is kept in the text.
    Utf8,
    /// UTF-8 after stripping the signature.
    Utf8Sig,
    Windows1252,
    Latin1,
    /// Nothing matched; invalid sequences were replaced with U+FFFD.
    Utf8Lossy,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEncoding::Utf8 => write!(f, "UTF-8"),
            SourceEncoding::Utf8Sig => write!(f, "UTF-8 with BOM"),
            SourceEncoding::Windows1252 => write!(f, "windows-1252"),
            SourceEncoding::Latin1 => write!(f, "ISO-8859-1"),
            SourceEncoding::Utf8Lossy => write!(f, "UTF-8 (lossy)"),
        }
    }
}

/// Decoded document text and the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: SourceEncoding,
}

/// Reads `path` and decodes it with [`decode_best_effort`].
pub fn read_text_best_effort(path: &Path) -> Result<DecodedText> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(decode_best_effort(bytes))
}

type Decoder = fn(&[u8]) -> Option<String>;

/// Fallbacks tried, in order, once strict UTF-8 has failed.
const FALLBACK_CHAIN: &[(SourceEncoding, Decoder)] = &[
    (SourceEncoding::Utf8Sig, decode_utf8_sig),
    (SourceEncoding::Windows1252, decode_windows_1252),
    (SourceEncoding::Latin1, decode_latin1),
];

/// Decodes `bytes`, trying UTF-8, UTF-8 without signature, Windows-1252 and
/// ISO-8859-1 in that order, then lossy UTF-8. Never fails.
pub fn decode_best_effort(bytes: Vec<u8>) -> DecodedText {
    let bytes = match String::from_utf8(bytes) {
        Ok(text) => return decoded(text, SourceEncoding::Utf8),
        Err(e) => e.into_bytes(),
    };

    FALLBACK_CHAIN
        .iter()
        .find_map(|(encoding, decode)| decode(&bytes).map(|text| decoded(text, *encoding)))
        .unwrap_or_else(|| {
            decoded(
                String::from_utf8_lossy(&bytes).into_owned(),
                SourceEncoding::Utf8Lossy,
            )
        })
}

fn decode_utf8_sig(bytes: &[u8]) -> Option<String> {
    let rest = bytes.strip_prefix(UTF8_BOM)?;
    std::str::from_utf8(rest).ok().map(str::to_string)
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    if bytes.iter().any(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
        return None;
    }
    WINDOWS_1252
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> Option<String> {
    Some(bytes.iter().map(|&b| char::from(b)).collect())
}

fn decoded(text: String, encoding: SourceEncoding) -> DecodedText {
    DecodedText { text, encoding }
}
