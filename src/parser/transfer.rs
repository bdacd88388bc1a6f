//! Content-Transfer-Encoding reversal: base64, quoted-printable, 7bit/8bit.
//!
//! Every decode path bakes its fallback into the return value — a syntax
//! error yields the input unchanged, a charset problem degrades to UTF-8.
//! Nothing here ever aborts a parse.

use tracing::warn;

use crate::parser::charset;

/// Decode a body according to its transfer encoding, then interpret the
/// resulting bytes under `charset_label`.
///
/// The encoding label is trimmed and lowercased before dispatch. An absent
/// or unrecognized label returns `content` unchanged.
pub fn decode(content: &str, encoding: Option<&str>, charset_label: Option<&str>) -> String {
    let Some(encoding) = encoding else {
        return content.to_string();
    };

    match encoding.trim().to_lowercase().as_str() {
        "base64" => decode_base64(content, charset_label),
        "quoted-printable" => {
            let bytes = decode_qp_bytes(content);
            charset::decode(&bytes, charset_label)
        }
        // Not a byte transform: reinterpret the content's UTF-8 bytes
        // under the declared charset.
        "7bit" | "8bit" => charset::decode(content.as_bytes(), charset_label),
        _ => content.to_string(),
    }
}

/// Base64-decode `content` (ignoring embedded whitespace) and charset-decode
/// the bytes. Returns `content` unchanged on invalid base64.
fn decode_base64(content: &str, charset_label: Option<&str>) -> String {
    use base64::Engine as _;

    let cleaned: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    match base64::engine::general_purpose::STANDARD.decode(cleaned.as_bytes()) {
        Ok(bytes) => charset::decode(&bytes, charset_label),
        Err(e) => {
            warn!(error = %e, "Invalid base64 body, returning content undecoded");
            content.to_string()
        }
    }
}

/// Quoted-printable to raw bytes.
///
/// Soft line breaks (`=` before CRLF or LF) are stripped first. In the
/// remaining text, `=XX` with two hex digits becomes one byte, `=` with
/// fewer than two characters after it is dropped as malformed, `=` before
/// two non-hex characters is kept as a literal `=`, and every other
/// character contributes its UTF-8 bytes as-is.
pub(crate) fn decode_qp_bytes(input: &str) -> Vec<u8> {
    let stripped = input.replace("=\r\n", "").replace("=\n", "");
    let bytes = stripped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'=' {
            if i + 2 < bytes.len() {
                let (h1, h2) = (bytes[i + 1], bytes[i + 2]);
                if let (Some(hi), Some(lo)) =
                    ((h1 as char).to_digit(16), (h2 as char).to_digit(16))
                {
                    out.push((hi * 16 + lo) as u8);
                    i += 3;
                    continue;
                }
                out.push(b'=');
            }
            // Truncated escape at end of input: emit nothing.
            i += 1;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    out
}
