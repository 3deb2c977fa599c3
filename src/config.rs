//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAILARCHIVE_CONFIG` (environment variable)
//! 2. `~/.config/mailarchive/config.toml` (Linux/macOS)
//!    `%APPDATA%\mailarchive\config.toml` (Windows)
//! 3. Built-in defaults (which fail validation — host and credentials
//!    are required)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IMAP server and credentials.
    pub imap: ImapConfig,
    /// Archive output settings.
    pub archive: ArchiveConfig,
    /// General behavior settings.
    pub general: GeneralConfig,
}

/// IMAP server and credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImapConfig {
    /// Server hostname (e.g. `imap.example.com`).
    pub host: String,
    /// Server port (993 = implicit TLS).
    pub port: u16,
    /// Login username.
    pub username: String,
    /// Login password. Prefer the `MAILARCHIVE_PASSWORD` environment
    /// variable over storing this in the file.
    pub password: String,
    /// Mailbox to archive from.
    pub mailbox: String,
}

/// Archive output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Root directory that receives one subdirectory per message.
    pub output_dir: PathBuf,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
}

// ── Default implementations ─────────────────────────────────────

impl Default for ImapConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 993,
            username: String::new(),
            password: String::new(),
            mailbox: "INBOX".to_string(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("archive"),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            cache_dir: None,
        }
    }
}

impl Config {
    /// Check that the fields without a usable default are present.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.imap.host.is_empty() {
            anyhow::bail!("no IMAP host configured (set [imap] host or pass --host)");
        }
        if self.imap.username.is_empty() {
            anyhow::bail!("no IMAP username configured (set [imap] username or pass --username)");
        }
        if self.imap.password.is_empty() {
            anyhow::bail!(
                "no IMAP password configured (set [imap] password or MAILARCHIVE_PASSWORD)"
            );
        }
        Ok(())
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration.
///
/// With an explicit path the file must exist and parse. Otherwise the
/// standard locations are searched and the default configuration is
/// returned if no file is found or on parse error.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read config '{}': {e}", path.display()))?;
        let cfg = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("cannot parse config '{}': {e}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config");
        return Ok(cfg);
    }

    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return Ok(cfg);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Ok(Config::default())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("MAILARCHIVE_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("mailarchive").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mailarchive")
}
