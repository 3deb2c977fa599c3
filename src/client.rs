//! IMAP session handling.
//!
//! A thin wrapper around the `imap` crate covering the five operations the
//! archiver needs: connect/login/select, search unseen, fetch raw bytes,
//! set the `\Seen` flag, and logout.

use crate::config::ImapConfig;
use crate::error::{ArchiveError, Result};

/// An authenticated IMAP session with the configured mailbox selected.
pub struct MailSession {
    session: imap::Session<imap::Connection>,
}

impl MailSession {
    /// Connect over TLS, authenticate, and select the configured mailbox.
    pub fn connect(config: &ImapConfig) -> Result<Self> {
        let client = imap::ClientBuilder::new(config.host.as_str(), config.port)
            .tls_kind(imap::TlsKind::Native)
            .mode(imap::ConnectionMode::AutoTls)
            .connect()
            .map_err(|source| ArchiveError::Connection {
                host: config.host.clone(),
                source,
            })?;

        let mut session = client
            .login(&config.username, &config.password)
            .map_err(|e| ArchiveError::Auth {
                user: config.username.clone(),
                source: e.0,
            })?;

        let mailbox = session.select(&config.mailbox)?;
        tracing::debug!(
            mailbox = %config.mailbox,
            exists = mailbox.exists,
            "Selected mailbox"
        );

        Ok(Self { session })
    }

    /// UIDs of all unseen messages, ascending.
    ///
    /// The server defines the base order; sorting makes the processing
    /// order deterministic across servers.
    pub fn unread_uids(&mut self) -> Result<Vec<u32>> {
        let uids = self.session.uid_search("UNSEEN")?;
        let mut uids: Vec<u32> = uids.into_iter().collect();
        uids.sort_unstable();
        Ok(uids)
    }

    /// Fetch the complete raw message for one UID.
    ///
    /// `BODY.PEEK[]` so the unseen flag only changes through the explicit
    /// [`mark_seen`](Self::mark_seen) after the message is safely on disk.
    pub fn fetch_raw(&mut self, uid: u32) -> Result<Vec<u8>> {
        let fetches = self
            .session
            .uid_fetch(uid.to_string(), "BODY.PEEK[]")
            .map_err(|source| ArchiveError::Fetch { uid, source })?;

        let fetch = fetches
            .iter()
            .next()
            .ok_or(ArchiveError::EmptyFetch { uid })?;
        let body = fetch.body().ok_or(ArchiveError::EmptyFetch { uid })?;
        Ok(body.to_vec())
    }

    /// Mark one message as read on the server.
    pub fn mark_seen(&mut self, uid: u32) -> Result<()> {
        self.session
            .uid_store(uid.to_string(), "+FLAGS.SILENT (\\Seen)")?;
        Ok(())
    }

    /// Log out and drop the connection. Best-effort: a failed LOGOUT on a
    /// dying connection is not worth surfacing.
    pub fn logout(mut self) {
        if let Err(e) = self.session.logout() {
            tracing::debug!(error = %e, "LOGOUT failed");
        }
    }
}
