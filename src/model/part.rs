//! Binary message parts (attachments and inline images).

/// One non-body leaf part of a MIME message, with its payload already
/// decoded from the transfer encoding.
#[derive(Debug, Clone)]
pub struct BinaryPart {
    /// Filename from the part headers, if present. Not yet sanitized.
    pub filename: Option<String>,

    /// Content-ID with surrounding angle brackets stripped, for parts
    /// referenced from HTML via `cid:` URIs.
    pub content_id: Option<String>,

    /// Decoded payload bytes.
    pub data: Vec<u8>,

    /// `true` if the part carries `Content-Disposition: attachment`.
    pub is_attachment: bool,
}
