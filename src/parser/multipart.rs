//! Single-level multipart body splitting.
//!
//! Parts are returned raw; a part whose own Content-Type is `multipart/*`
//! is opaque content here — nested boundaries are not descended into.

/// Split `body` into raw part texts at every `--{boundary}` delimiter.
///
/// A delimiter is the literal `--{boundary}`, optionally followed by the
/// `--` terminal marker, then any run of whitespace. The preamble (before
/// the first delimiter) and the epilogue (after the closing one) are
/// discarded; each remaining segment is trimmed. Without at least two
/// delimiters there are no parts.
pub fn split_parts(body: &str, boundary: &str) -> Vec<String> {
    let delimiter = format!("--{boundary}");
    let mut segments: Vec<&str> = Vec::new();

    let mut pos = 0;
    while let Some(found) = body[pos..].find(&delimiter) {
        let start = pos + found;
        segments.push(&body[pos..start]);

        let mut end = start + delimiter.len();
        if body[end..].starts_with("--") {
            end += 2;
        }
        end += body[end..]
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum::<usize>();
        pos = end;
    }
    segments.push(&body[pos..]);

    if segments.len() < 3 {
        return Vec::new();
    }
    segments[1..segments.len() - 1]
        .iter()
        .map(|s| s.trim().to_string())
        .collect()
}
