//! Subcommand implementations.

pub mod archive;
pub mod completion;
pub mod ls;
pub mod serve;
