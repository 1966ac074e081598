//! Browsing operations, each an `impl ObjectBrowser` block.

pub mod access;
pub mod list;
