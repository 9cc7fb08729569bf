//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: Tracks the state of a claimed page (claimed, recorded, failed)
//! - `PageRecord`: The extracted content of one page, keyed by canonical URL
//! - `VisitedRegistry`: The shared, lock-guarded set of claimed pages

mod page_record;
mod page_state;
mod registry;

// Re-export main types
pub use page_record::{PageContent, PageRecord};
pub use page_state::PageState;
pub use registry::{ClaimOutcome, RegistryCounts, VisitedRegistry};
