//! MIME message decoding: header lexing, RFC 2047 encoded words, charset
//! normalization, transfer encodings, and single-level multipart splitting.

pub mod charset;
pub mod content_type;
pub mod eml;
pub mod encoded_word;
pub mod header;
pub mod multipart;
pub mod transfer;

pub use eml::{parse, parse_eml_file};
