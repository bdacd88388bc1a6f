//! The assembled message record produced by a parse.

use super::attachment::Attachment;

/// Fully decoded representation of a single `.eml` message, ready for
/// display.
///
/// Every field is final: headers are unfolded and RFC 2047-decoded, bodies
/// are transfer- and charset-decoded, and nothing here refers back to the
/// raw input. One record is produced per parse call and never mutated.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParsedEmail {
    /// Decoded subject line (`"No Subject"` when the header is missing).
    pub subject: String,

    /// Decoded sender as written in the `From` header
    /// (`"Unknown Sender"` when missing).
    pub from: String,

    /// Decoded recipients from the `To` header, split on commas.
    /// Never empty: a missing header yields a single empty string.
    pub to: Vec<String>,

    /// The `Date` header value as stored, or the parse-time UTC timestamp
    /// in ISO 8601 when the header is absent.
    pub date: String,

    /// Plain-text body, trimmed. Empty when the message has none.
    pub text: String,

    /// HTML body, trimmed. `None` when absent or empty after trimming.
    /// The content is passed through untouched — sanitization is the
    /// renderer's responsibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,

    /// Attachments in order of appearance in the message.
    pub attachments: Vec<Attachment>,
}

impl ParsedEmail {
    /// All recipients joined for single-line display.
    pub fn to_line(&self) -> String {
        self.to.join(", ")
    }
}
