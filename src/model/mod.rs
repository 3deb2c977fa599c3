//! Core data model types for decomposed messages and their parts.

pub mod message;
pub mod part;
