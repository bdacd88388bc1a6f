//! Attachment records.

/// A single email attachment, carried inline in the parsed record.
///
/// `content` is the base64 re-encoding of the part's raw body text exactly
/// as it sat between the MIME boundaries — still transfer-encoded, never
/// charset-decoded. Decoding `content` therefore reproduces the original
/// part bytes unchanged, which is what a download/save path wants.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Attachment {
    /// Filename from the `Content-Disposition` header
    /// (`"unnamed"` when the parameter is missing).
    pub filename: String,

    /// Byte length of the raw part content prior to re-encoding.
    pub size: usize,

    /// Base64 of the raw part content.
    pub content: String,

    /// MIME media type of the part (e.g. `"application/pdf"`).
    pub content_type: String,
}
