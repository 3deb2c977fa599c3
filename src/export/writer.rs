//! Write a decomposed message into its directory.

use std::path::Path;

use crate::error::{ArchiveError, Result};
use crate::model::message::MessageContent;

use super::name::safe_filename;

/// Write all files for one message into its (freshly created) directory.
///
/// Layout, with `<dirname>` being the directory's own name:
/// - `<dirname>.eml` — the raw message bytes, always.
/// - one file per attachment, named by its sanitized original filename.
///   Duplicate names within the same message overwrite each other.
/// - `<dirname>.html` iff an HTML body exists (`html` is the rewritten
///   form), else `<dirname>.txt` iff a plain-text body exists.
pub fn write_message(
    dir: &Path,
    raw: &[u8],
    content: &MessageContent,
    html: Option<&str>,
) -> Result<()> {
    // Directory names come out of `create_message_dir` and are plain ASCII.
    let dirname = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("message");

    let eml_path = dir.join(format!("{dirname}.eml"));
    std::fs::write(&eml_path, raw).map_err(|e| ArchiveError::io(&eml_path, e))?;

    for part in content.attachments() {
        let Some(original) = part.filename.as_deref() else {
            continue;
        };
        let filename = safe_filename(original);
        if filename.is_empty() {
            tracing::warn!(filename = %original, "Skipping attachment with unusable filename");
            continue;
        }
        let path = dir.join(&filename);
        std::fs::write(&path, &part.data).map_err(|e| ArchiveError::io(&path, e))?;
    }

    if let Some(html) = html {
        let path = dir.join(format!("{dirname}.html"));
        std::fs::write(&path, html).map_err(|e| ArchiveError::io(&path, e))?;
    } else if let Some(text) = content.text.as_deref() {
        let path = dir.join(format!("{dirname}.txt"));
        std::fs::write(&path, text).map_err(|e| ArchiveError::io(&path, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::part::BinaryPart;

    fn content(text: Option<&str>, html: Option<&str>, parts: Vec<BinaryPart>) -> MessageContent {
        MessageContent {
            subject: "Test".to_string(),
            html: html.map(String::from),
            text: text.map(String::from),
            parts,
        }
    }

    fn attachment(name: &str, data: &[u8]) -> BinaryPart {
        BinaryPart {
            filename: Some(name.to_string()),
            content_id: None,
            data: data.to_vec(),
            is_attachment: true,
        }
    }

    #[test]
    fn test_text_only_message() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Test");
        std::fs::create_dir(&dir).unwrap();

        write_message(&dir, b"raw bytes", &content(Some("Hello"), None, vec![]), None).unwrap();

        assert_eq!(std::fs::read(dir.join("Test.eml")).unwrap(), b"raw bytes");
        assert_eq!(
            std::fs::read_to_string(dir.join("Test.txt")).unwrap(),
            "Hello"
        );
        assert!(!dir.join("Test.html").exists());
    }

    #[test]
    fn test_html_suppresses_text_file() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Test");
        std::fs::create_dir(&dir).unwrap();

        let c = content(None, Some("<p>hi</p>"), vec![]);
        write_message(&dir, b"raw", &c, Some("<p>hi</p>")).unwrap();

        assert!(dir.join("Test.html").exists());
        assert!(!dir.join("Test.txt").exists());
    }

    #[test]
    fn test_attachment_written_with_sanitized_name() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Test");
        std::fs::create_dir(&dir).unwrap();

        let c = content(
            Some("body"),
            None,
            vec![attachment("résumé:final.pdf", b"%PDF")],
        );
        write_message(&dir, b"raw", &c, None).unwrap();

        assert_eq!(std::fs::read(dir.join("resumefinal.pdf")).unwrap(), b"%PDF");
    }

    #[test]
    fn test_inline_part_not_written_as_attachment() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Test");
        std::fs::create_dir(&dir).unwrap();

        let inline = BinaryPart {
            filename: Some("logo.png".to_string()),
            content_id: Some("logo".to_string()),
            data: b"png".to_vec(),
            is_attachment: false,
        };
        write_message(&dir, b"raw", &content(None, None, vec![inline]), None).unwrap();

        // Only the .eml — inline parts are extracted by the rewriter instead
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
    }
}
