//! Scaffold fetching, resetting, and placeholder rewriting
//!
//! This module provides:
//! - Scaffold sources (remote URL, scp shorthand, local checkout) and cloning
//! - Removal of inherited history and lock metadata
//! - Extension-filtered placeholder substitution
//! - Version references shared by the clone and the dependency pin

pub mod fetcher;
pub mod reset;
pub mod rewriter;
pub mod version;

pub use fetcher::{fetch_scaffold, TemplateSource};
pub use reset::reset_workspace;
pub use rewriter::{replace_bytes, replace_placeholder, rewrite_identifiers, RewriteReport, RewriteRule};
pub use version::VersionRef;
