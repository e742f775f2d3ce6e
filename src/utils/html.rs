use crate::utils::error::Result;
use std::fs;
use std::path::Path;

const CLOSE_TAG: &[u8] = b"</html>";

/// Result of trimming one file: whether it was rewritten and how many bytes
/// the rewrite saved (negative when only a trailing newline was added).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimOutcome {
    pub changed: bool,
    pub saved_bytes: i64,
}

/// Returns the document truncated after its closing `</html>` tag, or `None`
/// when the tag is missing or the document is already clean.
///
/// The tag match is case-insensitive; everything after it is dropped and the
/// result always ends with exactly one newline.
pub fn trim_after_close_tag(text: &str) -> Option<String> {
    let end = find_close_tag(text)? + CLOSE_TAG.len();
    let trimmed = format!("{}\n", text[..end].trim_end());
    (trimmed != text).then_some(trimmed)
}

fn find_close_tag(text: &str) -> Option<usize> {
    // Byte-wise scan keeps indices valid for slicing; the tag itself is ASCII.
    text.as_bytes()
        .windows(CLOSE_TAG.len())
        .position(|window| window.eq_ignore_ascii_case(CLOSE_TAG))
}

/// Trims one file in place. Files without the closing tag, or already in the
/// trimmed form, are left untouched.
pub fn trim_document(path: &Path) -> Result<TrimOutcome> {
    let text = fs::read_to_string(path)?;

    match trim_after_close_tag(&text) {
        Some(trimmed) => {
            let saved = text.len() as i64 - trimmed.len() as i64;
            fs::write(path, trimmed)?;
            Ok(TrimOutcome {
                changed: true,
                saved_bytes: saved,
            })
        }
        None => Ok(TrimOutcome {
            changed: false,
            saved_bytes: 0,
        }),
    }
}
