//! Decomposed message content.

use super::part::BinaryPart;

/// The extracted content of one fetched message.
///
/// Built fresh per fetch and discarded after its files are written.
#[derive(Debug, Clone)]
pub struct MessageContent {
    /// Decoded subject line (RFC 2047 encoded-words resolved). May be empty;
    /// the directory naming applies the `No_Subject` fallback.
    pub subject: String,

    /// First `text/html` body found in walk order, if any.
    pub html: Option<String>,

    /// First `text/plain` body found in walk order.
    ///
    /// Only populated when no HTML body exists — HTML takes precedence and
    /// only one textual body is ever written.
    pub text: Option<String>,

    /// All non-body leaf parts (attachments and inline images), decoded.
    pub parts: Vec<BinaryPart>,
}

impl MessageContent {
    /// Parts that carry an explicit `Content-Disposition: attachment`.
    pub fn attachments(&self) -> impl Iterator<Item = &BinaryPart> {
        self.parts.iter().filter(|p| p.is_attachment)
    }
}
