//! `mailarchive` — archive unread IMAP messages to disk.
//!
//! This crate provides the core library for fetching unread messages over
//! IMAP, decomposing their MIME structure, and writing one directory per
//! message containing the raw source, the decoded body and all attachments.

pub mod archiver;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod rewrite;
