//! The message assembler: turns a raw `.eml` text buffer into a
//! [`ParsedEmail`].
//!
//! This is the decoder's entry point. All decode failures inside a message
//! are recovered locally by the lower layers; the only errors that leave
//! this module are file-read failures from [`parse_eml_file`].

use std::path::Path;

use base64::Engine as _;
use chrono::{SecondsFormat, Utc};

use crate::error::{EmlError, Result};
use crate::model::attachment::Attachment;
use crate::model::email::ParsedEmail;
use crate::parser::{content_type, encoded_word, header, multipart, transfer};

/// Parse a complete raw message into a [`ParsedEmail`].
pub fn parse(raw: &str) -> Result<ParsedEmail> {
    let (header_text, body) = split_at_blank_line(raw);
    let headers = header::parse_header_block(header_text);
    let top = content_type::resolve(headers.first("content-type").unwrap_or(""));

    let mut text = String::new();
    let mut html = String::new();
    let mut attachments = Vec::new();

    if let Some(boundary) = top.boundary.as_deref() {
        for part in multipart::split_parts(body, boundary) {
            decode_part(
                &part,
                top.charset.as_deref(),
                &mut text,
                &mut html,
                &mut attachments,
            );
        }
    } else {
        // Single-part message: the whole body is the text content.
        let encoding = headers.first("content-transfer-encoding");
        text = transfer::decode(body, encoding, top.charset.as_deref());
    }

    let to = match headers.first("to") {
        Some(value) => value
            .split(',')
            .map(|addr| encoded_word::decode_encoded_words(addr.trim()))
            .collect(),
        None => vec![String::new()],
    };

    let html = html.trim();

    Ok(ParsedEmail {
        subject: headers
            .first("subject")
            .unwrap_or("No Subject")
            .to_string(),
        from: headers
            .first("from")
            .unwrap_or("Unknown Sender")
            .to_string(),
        to,
        date: headers
            .first("date")
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        text: text.trim().to_string(),
        html: (!html.is_empty()).then(|| html.to_string()),
        attachments,
    })
}

/// Read an `.eml` file fully into memory and parse it.
///
/// The file bytes are decoded as UTF-8 with lossy replacement (the envelope
/// encoding is assumed, not detected) and a leading BOM is stripped.
pub fn parse_eml_file(path: impl AsRef<Path>) -> Result<ParsedEmail> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EmlError::FileNotFound(path.to_path_buf())
        } else {
            EmlError::io(path, e)
        }
    })?;

    let text = String::from_utf8_lossy(&data);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    parse(text)
}

/// Decode one multipart segment and fold it into the message being built.
///
/// `text/plain` and `text/html` parts replace the body slots (last wins);
/// anything else with an `attachment` disposition becomes an [`Attachment`];
/// remaining parts are dropped.
fn decode_part(
    part: &str,
    default_charset: Option<&str>,
    text: &mut String,
    html: &mut String,
    attachments: &mut Vec<Attachment>,
) {
    let (header_text, raw_content) = split_at_blank_line(part);
    let headers = header::parse_header_block(header_text);
    let info = content_type::resolve(headers.first("content-type").unwrap_or(""));
    let charset = info.charset.as_deref().or(default_charset);
    let encoding = headers.first("content-transfer-encoding");

    match info.media_type.as_str() {
        "text/plain" => *text = transfer::decode(raw_content, encoding, charset),
        "text/html" => *html = transfer::decode(raw_content, encoding, charset),
        _ => {
            let Some(disposition) = headers.first("content-disposition") else {
                return;
            };
            if !disposition.to_lowercase().contains("attachment") {
                return;
            }
            let filename = disposition_filename(disposition)
                .map(|f| encoded_word::decode_encoded_words(&f))
                .unwrap_or_else(|| "unnamed".to_string());
            attachments.push(Attachment {
                filename,
                size: raw_content.len(),
                content: base64::engine::general_purpose::STANDARD.encode(raw_content.as_bytes()),
                content_type: info.media_type.clone(),
            });
        }
    }
}

/// Split text at the first blank line (`\r\n\r\n` or `\n\n`).
///
/// Without one, everything is headers and the body is empty.
fn split_at_blank_line(text: &str) -> (&str, &str) {
    let bytes = text.as_bytes();
    for i in 0..bytes.len() {
        if bytes[i] == b'\r'
            && i + 3 < bytes.len()
            && bytes[i + 1] == b'\n'
            && bytes[i + 2] == b'\r'
            && bytes[i + 3] == b'\n'
        {
            return (&text[..i], &text[i + 4..]);
        }
        if bytes[i] == b'\n' && i + 1 < bytes.len() && bytes[i + 1] == b'\n' {
            return (&text[..i], &text[i + 2..]);
        }
    }
    (text, "")
}

/// Extract the `filename` parameter from a Content-Disposition value.
///
/// Quoted form runs to the closing quote; unquoted form runs to the next
/// `;` or end of value, trimmed.
fn disposition_filename(disposition: &str) -> Option<String> {
    let bytes = disposition.as_bytes();
    let pattern = b"filename=";

    let mut i = 0;
    while i + pattern.len() <= bytes.len() {
        if bytes[i..i + pattern.len()].eq_ignore_ascii_case(pattern) {
            let after = &disposition[i + pattern.len()..];
            let value = if let Some(quoted) = after.strip_prefix('"') {
                quoted.split('"').next().unwrap_or("")
            } else {
                after.split(';').next().unwrap_or("").trim()
            };
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_blank_line_lf() {
        let (h, b) = split_at_blank_line("From: a@b.com\nSubject: Hi\n\nBody\n");
        assert_eq!(h, "From: a@b.com\nSubject: Hi");
        assert_eq!(b, "Body\n");
    }

    #[test]
    fn test_split_at_blank_line_crlf() {
        let (h, b) = split_at_blank_line("From: a@b.com\r\nSubject: Hi\r\n\r\nBody\r\n");
        assert_eq!(h, "From: a@b.com\r\nSubject: Hi");
        assert_eq!(b, "Body\r\n");
    }

    #[test]
    fn test_split_without_blank_line() {
        let (h, b) = split_at_blank_line("Content-Type: text/plain");
        assert_eq!(h, "Content-Type: text/plain");
        assert_eq!(b, "");
    }

    #[test]
    fn test_missing_headers_use_defaults() {
        let email = parse("X-Other: nothing useful\n\nsome body").unwrap();
        assert_eq!(email.subject, "No Subject");
        assert_eq!(email.from, "Unknown Sender");
        assert_eq!(email.to, vec![String::new()]);
        assert_eq!(email.text, "some body");
        assert!(email.html.is_none());
        assert!(email.attachments.is_empty());
    }

    #[test]
    fn test_missing_date_gets_current_timestamp() {
        let email = parse("Subject: hi\n\nbody").unwrap();
        // ISO 8601 with millisecond precision and Z suffix.
        assert!(email.date.ends_with('Z'));
        assert!(email.date.contains('T'));
    }

    #[test]
    fn test_single_part_quoted_printable_body() {
        let raw = "Subject: qp\n\
                   Content-Type: text/plain; charset=utf-8\n\
                   Content-Transfer-Encoding: quoted-printable\n\
                   \n\
                   Caf=C3=A9 au lait\n";
        let email = parse(raw).unwrap();
        assert_eq!(email.text, "Café au lait");
    }

    #[test]
    fn test_last_text_part_wins() {
        let raw = "Content-Type: multipart/mixed; boundary=b\n\n\
                   --b\nContent-Type: text/plain\n\nfirst\n\
                   --b\nContent-Type: text/plain\n\nsecond\n\
                   --b--\n";
        let email = parse(raw).unwrap();
        assert_eq!(email.text, "second");
    }

    #[test]
    fn test_part_without_recognized_role_dropped() {
        let raw = "Content-Type: multipart/mixed; boundary=b\n\n\
                   --b\nContent-Type: application/pdf\n\n%PDF-1.4 data\n\
                   --b\nContent-Type: text/plain\n\nhello\n\
                   --b--\n";
        let email = parse(raw).unwrap();
        assert_eq!(email.text, "hello");
        assert!(email.attachments.is_empty());
    }

    #[test]
    fn test_attachment_content_round_trips_raw_bytes() {
        let raw = "Content-Type: multipart/mixed; boundary=b\n\n\
                   --b\n\
                   Content-Type: application/octet-stream\n\
                   Content-Disposition: attachment; filename=\"test.txt\"\n\
                   Content-Transfer-Encoding: base64\n\
                   \n\
                   SGVsbG8=\n\
                   --b--\n";
        let email = parse(raw).unwrap();
        assert_eq!(email.attachments.len(), 1);
        let att = &email.attachments[0];
        assert_eq!(att.filename, "test.txt");
        assert_eq!(att.content_type, "application/octet-stream");
        // The stored content is the raw part text, still transfer-encoded.
        let stored = base64::engine::general_purpose::STANDARD
            .decode(att.content.as_bytes())
            .unwrap();
        assert_eq!(stored, b"SGVsbG8=");
        assert_eq!(att.size, 8);
    }

    #[test]
    fn test_attachment_filename_defaults_to_unnamed() {
        let raw = "Content-Type: multipart/mixed; boundary=b\n\n\
                   --b\n\
                   Content-Type: application/octet-stream\n\
                   Content-Disposition: attachment\n\
                   \n\
                   payload\n\
                   --b--\n";
        let email = parse(raw).unwrap();
        assert_eq!(email.attachments[0].filename, "unnamed");
    }

    #[test]
    fn test_disposition_filename_forms() {
        assert_eq!(
            disposition_filename("attachment; filename=\"report final.pdf\"; size=100"),
            Some("report final.pdf".to_string())
        );
        assert_eq!(
            disposition_filename("attachment; filename=data.bin; size=100"),
            Some("data.bin".to_string())
        );
        assert_eq!(disposition_filename("attachment"), None);
    }

    #[test]
    fn test_part_charset_falls_back_to_top_level() {
        // Top-level declares iso-2022-jp; the part has no charset of its own.
        let raw = "Content-Type: multipart/mixed; boundary=b; charset=iso-2022-jp\n\n\
                   --b\nContent-Type: text/plain\nContent-Transfer-Encoding: 7bit\n\n\
                   \x1b$B$*CN$i$;\x1b(B\n\
                   --b--\n";
        let email = parse(raw).unwrap();
        assert_eq!(email.text, "お知らせ");
    }

    #[test]
    fn test_to_addresses_split_and_decoded() {
        let raw = "To: a@example.com , =?UTF-8?Q?Taro?= <b@example.jp>\n\nbody";
        let email = parse(raw).unwrap();
        assert_eq!(email.to, vec!["a@example.com", "Taro <b@example.jp>"]);
    }

    #[test]
    fn test_parse_eml_file_not_found() {
        let err = parse_eml_file("/no/such/file.eml").unwrap_err();
        assert!(matches!(err, EmlError::FileNotFound(_)));
    }
}
