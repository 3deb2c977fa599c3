//! Inline image rewriting.
//!
//! HTML bodies reference embedded images via `cid:` URIs. Each referenced
//! part is written into the message directory under a freshly generated
//! name and the `src` attribute is pointed at that sibling file, so the
//! saved HTML renders without the original message.

use std::path::Path;

use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use crate::error::{ArchiveError, Result};
use crate::model::part::BinaryPart;
use crate::parser::mime::strip_angle_brackets;

/// Length of generated image file names (before the extension).
const IMAGE_NAME_LEN: usize = 10;

/// Extension for extracted inline images.
const IMAGE_EXT: &str = "jpg";

/// Rewrite every `<img>` whose `src` is a `cid:` reference to a relative
/// filename, extracting the referenced part into `dir`.
///
/// References without a matching Content-ID are left untouched. Generated
/// names are not collision-checked: `dir` is exclusive to one message and
/// freshly created, so ten random alphanumerics are plenty.
pub fn rewrite_inline_images(html: &str, parts: &[BinaryPart], dir: &Path) -> Result<String> {
    // ASCII lowercasing keeps byte offsets aligned with the original.
    let lower = html.to_ascii_lowercase();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some(rel) = lower[pos..].find("<img") {
        let tag_start = pos + rel;
        out.push_str(&html[pos..tag_start]);

        let Some(gt) = find_tag_end(html, tag_start) else {
            // Unterminated tag — keep the remainder verbatim
            pos = tag_start;
            break;
        };
        let tag_end = gt + 1;

        let rewritten = rewrite_img_tag(&html[tag_start..tag_end], parts, dir)?;
        out.push_str(&rewritten);
        pos = tag_end;
    }
    out.push_str(&html[pos..]);
    Ok(out)
}

/// Find the `>` closing the tag that starts at `tag_start`, skipping any
/// `>` inside quoted attribute values (a `cid:<id>` reference carries one).
fn find_tag_end(html: &str, tag_start: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate().skip(tag_start) {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

/// Find a `src=` that is a whole attribute name, not the tail of one
/// (`data-src=`, `lowsrc=`).
fn find_src_attr(lower_tag: &str) -> Option<usize> {
    let mut search = 0;
    while let Some(rel) = lower_tag[search..].find("src=") {
        let idx = search + rel;
        if idx > 0 && lower_tag.as_bytes()[idx - 1].is_ascii_whitespace() {
            return Some(idx);
        }
        search = idx + "src=".len();
    }
    None
}

/// Rewrite a single `<img ...>` tag if its `src` is a resolvable `cid:`.
fn rewrite_img_tag(tag: &str, parts: &[BinaryPart], dir: &Path) -> Result<String> {
    let lower = tag.to_ascii_lowercase();

    let Some(attr) = find_src_attr(&lower) else {
        return Ok(tag.to_string());
    };
    let quote_pos = attr + "src=".len();
    let quote = match tag.as_bytes().get(quote_pos) {
        Some(&q @ (b'"' | b'\'')) => q as char,
        _ => return Ok(tag.to_string()),
    };
    let value_start = quote_pos + 1;
    let Some(rel_end) = tag[value_start..].find(quote) else {
        return Ok(tag.to_string());
    };
    let value_end = value_start + rel_end;

    let Some(reference) = tag[value_start..value_end].strip_prefix("cid:") else {
        return Ok(tag.to_string());
    };
    let cid = strip_angle_brackets(reference);

    let Some(part) = parts
        .iter()
        .find(|p| p.content_id.as_deref() == Some(cid.as_str()))
    else {
        // No part carries this Content-ID; keep the reference as-is
        return Ok(tag.to_string());
    };

    let filename = random_image_name();
    let path = dir.join(&filename);
    std::fs::write(&path, &part.data).map_err(|e| ArchiveError::io(&path, e))?;

    let mut out = String::with_capacity(tag.len());
    out.push_str(&tag[..value_start]);
    out.push_str(&filename);
    out.push_str(&tag[value_end..]);
    Ok(out)
}

/// Generate a random alphanumeric image filename.
fn random_image_name() -> String {
    let name: String = OsRng
        .sample_iter(&Alphanumeric)
        .take(IMAGE_NAME_LEN)
        .map(char::from)
        .collect();
    format!("{name}.{IMAGE_EXT}")
}
