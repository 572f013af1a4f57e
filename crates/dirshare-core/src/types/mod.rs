//! Core types for root-confined filesystem access.
//!
//! This module provides type-safe wrappers that enforce confinement
//! invariants at compile time:
//!
//! - [`Root`]: the canonical directory every request is confined to
//! - [`ResolvedEntry`]: a path that has passed confinement, tagged with its
//!   [`EntryKind`]
//!
//! A `ResolvedEntry` can only be produced by [`Root::resolve`], so code that
//! accepts one never sees an unconfined path.

mod entry;
mod root;

pub use entry::EntryKind;
pub use entry::ResolvedEntry;
pub use root::Root;
pub(crate) use root::admits;
