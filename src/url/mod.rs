//! URL handling module for Pagecrawl
//!
//! This module provides the canonical dedup key used by the visited registry
//! and the host-based scope boundary that decides which URLs get crawled.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{host_key, Scope};
pub use normalize::{canonical_key, canonical_key_of};
