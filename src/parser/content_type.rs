//! Content-Type resolution: media type, boundary, and charset extraction.
//!
//! The input value has already been through encoded-word decoding along
//! with every other header, so a boundary or charset token that happened
//! to look like `=?..?=` would arrive here altered. Known quirk, kept.

/// Media type and the two parameters the decoder cares about, pulled from
/// one Content-Type value.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeInfo {
    /// Lowercased media type, e.g. `text/plain` or `multipart/mixed`.
    pub media_type: String,
    /// The multipart boundary token, quotes stripped.
    pub boundary: Option<String>,
    /// Lowercased charset label.
    pub charset: Option<String>,
}

/// Extract [`ContentTypeInfo`] from a raw Content-Type header value.
///
/// A parameter that is absent yields `None`, never an error.
pub fn resolve(value: &str) -> ContentTypeInfo {
    ContentTypeInfo {
        media_type: value
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase(),
        boundary: find_parameter(value, "boundary"),
        charset: find_parameter(value, "charset").map(|c| c.to_lowercase()),
    }
}

/// First case-insensitive occurrence of `name=`, followed by an optionally
/// quoted value of at least one character, terminated by `"`, `;` or
/// whitespace. An occurrence with an empty value is skipped in favor of a
/// later one.
fn find_parameter(value: &str, name: &str) -> Option<String> {
    let bytes = value.as_bytes();
    let pattern = format!("{name}=");
    let pattern = pattern.as_bytes();

    let mut i = 0;
    while i + pattern.len() <= bytes.len() {
        if bytes[i..i + pattern.len()].eq_ignore_ascii_case(pattern) {
            let mut start = i + pattern.len();
            if bytes.get(start) == Some(&b'"') {
                start += 1;
            }
            let mut end = start;
            while end < bytes.len() {
                let b = bytes[end];
                if b == b'"' || b == b';' || b.is_ascii_whitespace() {
                    break;
                }
                end += 1;
            }
            if end > start {
                // Terminators are ASCII, so the range is char-aligned.
                return Some(value[start..end].to_string());
            }
        }
        i += 1;
    }
    None
}
