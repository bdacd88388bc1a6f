//! Charset label normalization and byte decoding.
//!
//! Japanese mail traffic spells the same three encodings many ways
//! (`sjis`, `MS932`, `Shift_JIS`, ...); these are folded to canonical
//! labels before the bytes reach `encoding_rs`.

use tracing::warn;

/// Alias fragments mapped to canonical charset labels.
///
/// Matching is case-insensitive substring containment; rows are checked
/// in order and the first hit wins.
const JAPANESE_ALIASES: &[(&[&str], &str)] = &[
    (&["iso-2022-jp", "iso2022jp"], "iso-2022-jp"),
    (
        &["shift-jis", "shift_jis", "shiftjis", "sjis", "ms932"],
        "shift-jis",
    ),
    (&["euc-jp", "eucjp"], "euc-jp"),
];

/// Normalize a charset label to its canonical form.
///
/// Unrecognized labels are lowercased and passed through unchanged.
/// An absent or empty label means UTF-8.
pub fn normalize(charset: Option<&str>) -> String {
    let lowered = match charset {
        Some(raw) => raw.trim().to_lowercase(),
        None => return "utf-8".to_string(),
    };
    if lowered.is_empty() {
        return "utf-8".to_string();
    }
    for (fragments, canonical) in JAPANESE_ALIASES {
        if fragments.iter().any(|f| lowered.contains(f)) {
            return (*canonical).to_string();
        }
    }
    lowered
}

/// Decode `bytes` as text under the given charset label.
///
/// The label is normalized first. An unknown label falls back to lossy
/// UTF-8 and logs a warning; malformed sequences under a known label
/// decode to replacement characters. This never fails.
pub fn decode(bytes: &[u8], charset: Option<&str>) -> String {
    let label = normalize(charset);
    match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(encoding) => {
            let (decoded, _, _) = encoding.decode(bytes);
            decoded.into_owned()
        }
        None => {
            warn!(
                charset = label,
                "Unknown charset, falling back to UTF-8 lossy"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_japanese_aliases() {
        assert_eq!(normalize(Some("ISO-2022-JP")), "iso-2022-jp");
        assert_eq!(normalize(Some("iso2022jp")), "iso-2022-jp");
        assert_eq!(normalize(Some("Shift_JIS")), "shift-jis");
        assert_eq!(normalize(Some("SJIS")), "shift-jis");
        assert_eq!(normalize(Some("x-sjis")), "shift-jis");
        assert_eq!(normalize(Some("MS932")), "shift-jis");
        assert_eq!(normalize(Some("EUC-JP")), "euc-jp");
        assert_eq!(normalize(Some("eucJP")), "euc-jp");
    }

    #[test]
    fn test_normalize_passthrough() {
        assert_eq!(normalize(Some("ISO-8859-1")), "iso-8859-1");
        assert_eq!(normalize(Some("Windows-1252")), "windows-1252");
        assert_eq!(normalize(None), "utf-8");
        assert_eq!(normalize(Some("")), "utf-8");
        assert_eq!(normalize(Some("  ")), "utf-8");
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode("日本語".as_bytes(), Some("UTF-8")), "日本語");
        assert_eq!(decode(b"plain ascii", None), "plain ascii");
    }

    #[test]
    fn test_decode_shift_jis() {
        // こんにちは
        let bytes = [
            0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD,
        ];
        assert_eq!(decode(&bytes, Some("Shift_JIS")), "こんにちは");
        assert_eq!(decode(&bytes, Some("sjis")), "こんにちは");
    }

    #[test]
    fn test_decode_iso_2022_jp() {
        // お知らせ
        let bytes = [
            0x1B, 0x24, 0x42, 0x24, 0x2A, 0x43, 0x4E, 0x24, 0x69, 0x24, 0x3B, 0x1B, 0x28, 0x42,
        ];
        assert_eq!(decode(&bytes, Some("ISO-2022-JP")), "お知らせ");
    }

    #[test]
    fn test_decode_euc_jp() {
        // こんにちは
        let bytes = [
            0xA4, 0xB3, 0xA4, 0xF3, 0xA4, 0xCB, 0xA4, 0xC1, 0xA4, 0xCF,
        ];
        assert_eq!(decode(&bytes, Some("eucjp")), "こんにちは");
    }

    #[test]
    fn test_decode_unknown_label_falls_back_to_utf8() {
        assert_eq!(decode("fallback".as_bytes(), Some("x-no-such-charset")), "fallback");
        // Invalid UTF-8 under an unknown label degrades to replacement chars,
        // never an error.
        let garbled = decode(&[0xFF, 0xFE, 0x41], Some("not-a-charset"));
        assert!(garbled.contains('A'));
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode(&[0x63, 0x61, 0x66, 0xE9], Some("ISO-8859-1")), "café");
    }
}
