//! RFC 5322 header block parsing: folding, field accumulation, and
//! per-value RFC 2047 decoding.

use crate::parser::encoded_word::decode_encoded_words;

/// An ordered, case-insensitive multi-map of header fields.
///
/// Keys are lowercased field names; each key holds every value that
/// appeared under it, in message order, already encoded-word decoded.
/// Insertion order of first occurrence is preserved for iteration.
#[derive(Debug, Clone, Default)]
pub struct HeaderBlock {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderBlock {
    /// First value for a field name (case-insensitive).
    pub fn first(&self, name: &str) -> Option<&str> {
        self.all(name).first().map(String::as_str)
    }

    /// All values for a field name, in message order.
    pub fn all(&self, name: &str) -> &[String] {
        let lowered = name.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == lowered)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate `(name, values)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, name: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }
}

/// Parse the raw text preceding the header/body blank line into a
/// [`HeaderBlock`].
///
/// A line of the form `Name: value` (name = word characters or hyphens)
/// starts a new field; a line beginning with whitespace continues the
/// current field's value (trimmed, no separator inserted); anything else
/// is silently discarded. Values are trimmed and encoded-word decoded as
/// each field is flushed.
pub fn parse_header_block(text: &str) -> HeaderBlock {
    let mut headers = HeaderBlock::default();
    let mut pending: Option<(String, String)> = None;

    for line in text.lines() {
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some((_, value)) = pending.as_mut() {
                value.push_str(line.trim());
            }
        } else if let Some((name, value)) = split_field_line(line) {
            if let Some((prev_name, prev_value)) = pending.take() {
                headers.push(prev_name, decode_encoded_words(prev_value.trim()));
            }
            pending = Some((name.to_lowercase(), value.to_string()));
        }
        // Neither a field start nor a continuation: dropped.
    }

    if let Some((name, value)) = pending {
        headers.push(name, decode_encoded_words(value.trim()));
    }

    headers
}

/// Split `Name: value` when the name is a non-empty run of word characters
/// or hyphens. Leading whitespace after the colon is skipped.
fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let colon = line.find(':')?;
    let name = &line[..colon];
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    Some((name, line[colon + 1..].trim_start()))
}
