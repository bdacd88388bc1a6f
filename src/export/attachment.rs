//! Save parsed attachments to disk.

use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::error::{EmlError, Result};
use crate::model::attachment::Attachment;
use crate::model::email::ParsedEmail;

/// Write a single attachment's bytes into `output_dir`.
///
/// The stored base64 content is decoded back to the raw part bytes; unlike
/// the in-parse fallbacks, corrupt stored content is an error here — there
/// is nothing sensible to write in its place. The filename is sanitized
/// and made unique before writing.
pub fn save_attachment(attachment: &Attachment, output_dir: &Path) -> Result<PathBuf> {
    let data = base64::engine::general_purpose::STANDARD
        .decode(attachment.content.as_bytes())
        .map_err(|e| EmlError::Decode(format!("'{}': {e}", attachment.filename)))?;

    let filename = sanitize_filename(&attachment.filename, 150);
    let path = unique_path(&output_dir.join(filename));
    std::fs::write(&path, &data).map_err(|e| EmlError::io(&path, e))?;
    Ok(path)
}

/// Write every attachment of a message into `output_dir`.
///
/// A failing attachment is logged and skipped; the rest are still written.
pub fn save_all_attachments(email: &ParsedEmail, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir).map_err(|e| EmlError::io(output_dir, e))?;

    let mut paths = Vec::with_capacity(email.attachments.len());
    for att in &email.attachments {
        match save_attachment(att, output_dir) {
            Ok(path) => paths.push(path),
            Err(e) => {
                tracing::warn!(
                    filename = %att.filename,
                    error = %e,
                    "Failed to save attachment"
                );
            }
        }
    }
    Ok(paths)
}

/// Sanitize a string for use as a filename.
///
/// Replaces anything outside alphanumerics, `-`, `.`, `_` and `@` with `_`
/// and truncates to `max_len` characters.
pub fn sanitize_filename(s: &str, max_len: usize) -> String {
    let sanitized: String = s
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' || c == '_' || c == '@' {
                c
            } else {
                '_'
            }
        })
        .take(max_len)
        .collect();

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

/// If `path` already exists, append a counter to make it unique.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("file");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let parent = path.parent().unwrap_or(Path::new("."));

    for i in 1..1000 {
        let candidate = if ext.is_empty() {
            parent.join(format!("{stem}_{i}"))
        } else {
            parent.join(format!("{stem}_{i}.{ext}"))
        };
        if !candidate.exists() {
            return candidate;
        }
    }

    // Fallback — very unlikely
    parent.join(format!("{stem}_dup.{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(filename: &str, bytes: &[u8]) -> Attachment {
        Attachment {
            filename: filename.to_string(),
            size: bytes.len(),
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
            content_type: "application/octet-stream".to_string(),
        }
    }

    #[test]
    fn test_save_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let att = attachment("data.bin", b"\x00\x01binary\xFF");
        let path = save_attachment(&att, dir.path()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"\x00\x01binary\xFF");
    }

    #[test]
    fn test_hostile_filename_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let att = attachment("../../etc/passwd", b"nope");
        let path = save_attachment(&att, dir.path()).unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(path.file_name().unwrap(), ".._.._etc_passwd");
    }

    #[test]
    fn test_collision_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let att = attachment("report.txt", b"one");
        let first = save_attachment(&att, dir.path()).unwrap();
        let second = save_attachment(&att, dir.path()).unwrap();
        assert_ne!(first, second);
        assert_eq!(second.file_name().unwrap(), "report_1.txt");
    }

    #[test]
    fn test_corrupt_content_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let att = Attachment {
            filename: "bad.bin".to_string(),
            size: 4,
            content: "!!not base64!!".to_string(),
            content_type: "application/octet-stream".to_string(),
        };
        let err = save_attachment(&att, dir.path()).unwrap_err();
        assert!(matches!(err, EmlError::Decode(_)));
    }

    #[test]
    fn test_save_all() {
        let dir = tempfile::tempdir().unwrap();
        let email = ParsedEmail {
            subject: "s".into(),
            from: "f".into(),
            to: vec![String::new()],
            date: "today".into(),
            text: String::new(),
            html: None,
            attachments: vec![attachment("a.txt", b"aaa"), attachment("b.txt", b"bbb")],
        };
        let paths = save_all_attachments(&email, dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("hello world.txt", 50), "hello_world.txt");
        assert_eq!(sanitize_filename("レポート.pdf", 50), "レポート.pdf");
        assert_eq!(sanitize_filename("", 50), "unnamed");
    }
}
