//! Filesystem output: name sanitization, per-message directories, and file
//! writing.

pub mod dir;
pub mod name;
pub mod writer;
