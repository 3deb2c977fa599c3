//! The archive pipeline: fetch → decompose → rewrite → write → mark seen.

use std::path::Path;

use crate::client::MailSession;
use crate::config::Config;
use crate::error::{ArchiveError, Result};
use crate::{export, parser, rewrite};

/// Outcome of one archive run.
#[derive(Debug, Clone, Copy, Default, serde::Serialize)]
pub struct RunSummary {
    /// Unseen messages found by the search.
    pub unread: usize,
    /// Messages archived and marked seen.
    pub archived: usize,
    /// Messages skipped after a per-message failure.
    pub failed: usize,
}

/// Archive all unread messages from the configured mailbox.
///
/// Messages are processed one at a time in ascending UID order. A failure
/// on a single message is logged and counted, and the run moves on; a
/// connection-level failure aborts the run. The session is logged out on
/// every exit path. The progress callback receives `(current, total)`.
pub fn run(config: &Config, progress: &dyn Fn(usize, usize)) -> Result<RunSummary> {
    let root = &config.archive.output_dir;
    std::fs::create_dir_all(root).map_err(|e| ArchiveError::io(root, e))?;

    let mut session = MailSession::connect(&config.imap)?;

    let uids = match session.unread_uids() {
        Ok(uids) => uids,
        Err(e) => {
            session.logout();
            return Err(e);
        }
    };
    tracing::info!(count = uids.len(), mailbox = %config.imap.mailbox, "Found unread messages");

    let mut summary = RunSummary {
        unread: uids.len(),
        ..RunSummary::default()
    };

    let total = uids.len();
    for (i, &uid) in uids.iter().enumerate() {
        progress(i, total);

        match archive_one(&mut session, uid, root) {
            Ok(subject) => {
                tracing::info!(uid, subject = %subject, "Archived message");
                summary.archived += 1;
            }
            Err(e) if e.is_connection_level() => {
                tracing::error!(uid, error = %e, "Session failed, aborting run");
                session.logout();
                return Err(e);
            }
            Err(e) => {
                tracing::error!(uid, error = %e, "Failed to archive message");
                summary.failed += 1;
            }
        }
    }
    progress(total, total);

    session.logout();
    Ok(summary)
}

/// Archive a single message. Returns its decoded subject.
///
/// The message is only marked seen after all of its files are on disk, so
/// a failed message stays unread and is retried on the next run.
fn archive_one(session: &mut MailSession, uid: u32, root: &Path) -> Result<String> {
    let raw = session.fetch_raw(uid)?;
    let content = parser::mime::decompose(&raw)?;

    let dir = export::dir::create_message_dir(root, &content.subject)?;

    let html = match content.html.as_deref() {
        Some(body) => Some(rewrite::rewrite_inline_images(body, &content.parts, &dir)?),
        None => None,
    };

    export::writer::write_message(&dir, &raw, &content, html.as_deref())?;
    session.mark_seen(uid)?;

    Ok(content.subject)
}
