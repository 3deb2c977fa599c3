//! Message parsing: MIME decomposition of raw RFC 5322 bytes.

pub mod mime;
