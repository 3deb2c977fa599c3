//! MIME decomposition: subject, body selection and binary part extraction.

use mail_parser::{Message, MessageParser, MimeHeaders, PartType};

use crate::error::{ArchiveError, Result};
use crate::model::message::MessageContent;
use crate::model::part::BinaryPart;

/// Parse a complete raw message (headers + body) and extract its content.
///
/// `mail-parser` handles RFC 2047 header decoding, transfer encodings
/// (base64, quoted-printable) and charset conversion, lossy on invalid
/// bytes.
///
/// Body selection: the first `text/html` part in walk order wins; the first
/// `text/plain` part is kept only when the message has no HTML body at all.
/// Only one textual body of each kind is ever retained.
pub fn decompose(raw: &[u8]) -> Result<MessageContent> {
    let parser = MessageParser::default();
    let msg = parser
        .parse(raw)
        .ok_or_else(|| ArchiveError::Mime("unparseable message".to_string()))?;

    let subject = msg.subject().unwrap_or_default().to_string();

    // Select by actual part type: `body_html`/`body_text` convert between
    // the two representations when the requested one is missing, which
    // would turn a text-only message into an HTML one.
    let html = first_body(&msg, &msg.html_body, |part| match part {
        PartType::Html(body) => Some(body.as_ref()),
        _ => None,
    });
    let text = if html.is_none() {
        first_body(&msg, &msg.text_body, |part| match part {
            PartType::Text(body) => Some(body.as_ref()),
            _ => None,
        })
    } else {
        None
    };

    let parts = collect_binary_parts(&msg);

    Ok(MessageContent {
        subject,
        html,
        text,
        parts,
    })
}

/// First body part in walk order for which `extract` yields a match.
fn first_body<'a>(
    msg: &'a Message<'_>,
    ids: &[mail_parser::MessagePartId],
    extract: impl Fn(&'a PartType<'_>) -> Option<&'a str>,
) -> Option<String> {
    ids.iter()
        .filter_map(|&id| msg.parts.get(id))
        .find_map(|part| extract(&part.body))
        .map(|body| body.trim().to_string())
}

/// Collect every non-body leaf part, decoded, in depth-first walk order.
fn collect_binary_parts(msg: &mail_parser::Message<'_>) -> Vec<BinaryPart> {
    let mut result = Vec::new();

    for part in msg.attachments() {
        let filename = part.attachment_name().map(String::from);

        let content_id = part.content_id().map(strip_angle_brackets);

        let is_attachment = part
            .content_disposition()
            .map(|d| d.ctype().eq_ignore_ascii_case("attachment"))
            .unwrap_or(false);

        result.push(BinaryPart {
            filename,
            content_id,
            data: part.contents().to_vec(),
            is_attachment,
        });
    }

    result
}

/// Strip surrounding `<` `>` from a Content-ID value.
pub fn strip_angle_brackets(id: &str) -> String {
    id.trim()
        .trim_matches(|c| c == '<' || c == '>')
        .to_string()
}
