//! RFC 2047 encoded-word decoding for header values.
//!
//! An encoded word has the shape `=?charset?B?text?=` or `=?charset?Q?text?=`.
//! Words are replaced in place; surrounding text is never touched and no
//! whitespace is merged between adjacent words.

use tracing::debug;

use crate::parser::charset;
use crate::parser::transfer;

/// Replace every RFC 2047 encoded word in `input` with its decoded text.
///
/// Each word decodes independently. A word that fails to decode is kept
/// verbatim; a value with no encoded words comes back unchanged.
///
/// Example: `"=?UTF-8?B?5pel5pys6Kqe?="` → `"日本語"`
pub fn decode_encoded_words(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut remaining = input;

    while let Some(start) = remaining.find("=?") {
        result.push_str(&remaining[..start]);
        let word_start = &remaining[start..];

        match parse_word(word_start) {
            Some((decoded, consumed)) => {
                result.push_str(&decoded);
                remaining = &word_start[consumed..];
            }
            None => {
                result.push_str("=?");
                remaining = &word_start[2..];
            }
        }
    }

    result.push_str(remaining);
    result
}

/// Try to parse and decode one encoded word at the start of `s`
/// (which begins with `=?`).
///
/// Returns the decoded text and the number of bytes consumed, or `None`
/// when `s` does not continue as a structurally valid word or the word
/// fails to decode.
fn parse_word(s: &str) -> Option<(String, usize)> {
    let inner = &s[2..];

    let q1 = inner.find('?')?;
    let charset_label = &inner[..q1];
    if charset_label.is_empty() {
        return None;
    }

    let rest = &inner[q1 + 1..];
    let q2 = rest.find('?')?;
    let encoding = &rest[..q2];

    let rest2 = &rest[q2 + 1..];
    let end = rest2.find('?')?;
    if !rest2[end..].starts_with("?=") {
        return None;
    }
    let text = &rest2[..end];

    let consumed = 2 + q1 + 1 + q2 + 1 + end + 2;

    let decoded = match encoding.to_uppercase().as_str() {
        "B" => {
            use base64::Engine as _;
            let cleaned: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            match base64::engine::general_purpose::STANDARD.decode(cleaned.as_bytes()) {
                Ok(bytes) => charset::decode(&bytes, Some(charset_label)),
                Err(e) => {
                    debug!(error = %e, "Invalid base64 in encoded word, keeping raw");
                    return None;
                }
            }
        }
        "Q" => {
            let unspaced = text.replace('_', " ");
            let bytes = transfer::decode_qp_bytes(&unspaced);
            charset::decode(&bytes, Some(charset_label))
        }
        // Unrecognized encoding letter: the word decodes to its raw inner text.
        _ => text.to_string(),
    };

    Some((decoded, consumed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64_word() {
        assert_eq!(decode_encoded_words("=?UTF-8?B?5pel5pys6Kqe?="), "日本語");
    }

    #[test]
    fn test_decode_q_word_underscores() {
        assert_eq!(decode_encoded_words("=?UTF-8?Q?Hello_World?="), "Hello World");
    }

    #[test]
    fn test_decode_q_word_hex() {
        assert_eq!(
            decode_encoded_words("=?ISO-8859-1?Q?caf=E9?="),
            "café"
        );
    }

    #[test]
    fn test_decode_iso_2022_jp_word() {
        // お知らせ
        assert_eq!(
            decode_encoded_words("=?ISO-2022-JP?B?GyRCJCpDTiRpJDsbKEI=?="),
            "お知らせ"
        );
    }

    #[test]
    fn test_multiple_words_decode_independently() {
        let input = "=?UTF-8?B?5pel5pys6Kqe?= and =?UTF-8?Q?Hello_World?=";
        assert_eq!(decode_encoded_words(input), "日本語 and Hello World");
    }

    #[test]
    fn test_surrounding_text_untouched() {
        let input = "Re: =?UTF-8?Q?Hello?= there";
        assert_eq!(decode_encoded_words(input), "Re: Hello there");
    }

    #[test]
    fn test_plain_value_unchanged() {
        let input = "Just a normal subject line";
        assert_eq!(decode_encoded_words(input), input);
    }

    #[test]
    fn test_lone_markers_unchanged() {
        assert_eq!(decode_encoded_words("price =? unknown"), "price =? unknown");
        assert_eq!(decode_encoded_words("a =?b"), "a =?b");
    }

    #[test]
    fn test_unrecognized_encoding_yields_inner_text() {
        assert_eq!(decode_encoded_words("=?UTF-8?X?raw-text?="), "raw-text");
    }

    #[test]
    fn test_invalid_base64_keeps_word_verbatim() {
        let input = "=?UTF-8?B?!!not base64!!?=";
        assert_eq!(decode_encoded_words(input), input);
    }

    #[test]
    fn test_lowercase_encoding_letters() {
        assert_eq!(decode_encoded_words("=?utf-8?q?Hello_World?="), "Hello World");
        assert_eq!(decode_encoded_words("=?utf-8?b?5pel5pys6Kqe?="), "日本語");
    }

    #[test]
    fn test_unknown_charset_falls_back_to_utf8() {
        // 5pel5pys6Kqe is UTF-8 for 日本語; the bogus label must not raise.
        assert_eq!(
            decode_encoded_words("=?x-bogus-charset?B?5pel5pys6Kqe?="),
            "日本語"
        );
    }
}
