//! Shared utilities: external commands, paths, pluralization.

pub mod exec;
pub mod path;
pub mod plural;
