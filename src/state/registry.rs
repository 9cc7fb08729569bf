//! Visited registry shared by every task of one crawl run
//!
//! The registry is the single source of truth for "has this canonical URL
//! been visited". All operations take the same lock, so a claim is atomic
//! with respect to any other claim, store or snapshot.

use crate::state::{PageRecord, PageState};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Result of trying to claim a canonical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// This caller inserted the key and owns the fetch
    Claimed,
    /// Key was already present
    Duplicate,
    /// Registry already holds the configured maximum number of pages
    LimitReached,
}

/// Per-state totals of a registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryCounts {
    pub claimed: usize,
    pub recorded: usize,
    pub failed: usize,
}

#[derive(Debug)]
struct PageEntry {
    state: PageState,
    record: PageRecord,
}

/// Mapping from canonical URL to page record, guarded by one lock
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    pages: Mutex<HashMap<String, PageEntry>>,
    page_limit: Option<usize>,
}

impl VisitedRegistry {
    /// Creates an unbounded registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry that accepts at most `limit` claims
    pub fn with_page_limit(limit: usize) -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            page_limit: Some(limit),
        }
    }

    // Entries are only ever inserted or replaced whole, so a panic in another
    // holder cannot leave the map inconsistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, PageEntry>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Atomically checks for `key` and inserts a placeholder if absent
    ///
    /// Exactly one caller per key ever sees [`ClaimOutcome::Claimed`], no
    /// matter how many race for it.
    pub fn try_claim(&self, key: &str) -> ClaimOutcome {
        let mut pages = self.lock();

        if pages.contains_key(key) {
            return ClaimOutcome::Duplicate;
        }

        if let Some(limit) = self.page_limit {
            if pages.len() >= limit {
                return ClaimOutcome::LimitReached;
            }
        }

        pages.insert(
            key.to_string(),
            PageEntry {
                state: PageState::Claimed,
                record: PageRecord::placeholder(key),
            },
        );
        ClaimOutcome::Claimed
    }

    /// Returns true if this call newly inserted `key`
    pub fn claim(&self, key: &str) -> bool {
        self.try_claim(key) == ClaimOutcome::Claimed
    }

    /// Stores the extracted record for `key`, overwriting the placeholder
    pub fn store(&self, key: &str, record: PageRecord) {
        let mut pages = self.lock();
        if let Some(entry) = pages.get(key) {
            if !entry.state.can_transition_to(PageState::Recorded) {
                tracing::debug!("Overwriting {} page {}", entry.state, key);
            }
        }
        pages.insert(
            key.to_string(),
            PageEntry {
                state: PageState::Recorded,
                record,
            },
        );
    }

    /// Marks a claimed page as failed; its placeholder stays keyed
    pub fn mark_failed(&self, key: &str) {
        let mut pages = self.lock();
        if let Some(entry) = pages.get_mut(key) {
            if entry.state.can_transition_to(PageState::Failed) {
                entry.state = PageState::Failed;
            }
        }
    }

    /// Returns the state of `key`, if it was ever claimed
    pub fn state_of(&self, key: &str) -> Option<PageState> {
        self.lock().get(key).map(|entry| entry.state)
    }

    /// Copies every recorded page
    ///
    /// Claimed-but-unfinished and failed pages are left out, so a page whose
    /// fetch failed never shows up in a report.
    pub fn snapshot(&self) -> HashMap<String, PageRecord> {
        self.lock()
            .iter()
            .filter(|(_, entry)| entry.state.is_reportable())
            .map(|(key, entry)| (key.clone(), entry.record.clone()))
            .collect()
    }

    /// Number of claimed keys, whatever their state
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true once the page limit has been reached
    pub fn is_full(&self) -> bool {
        match self.page_limit {
            Some(limit) => self.len() >= limit,
            None => false,
        }
    }

    pub fn page_limit(&self) -> Option<usize> {
        self.page_limit
    }

    /// Counts entries by state
    pub fn counts(&self) -> RegistryCounts {
        let pages = self.lock();
        let mut counts = RegistryCounts::default();
        for entry in pages.values() {
            match entry.state {
                PageState::Claimed => counts.claimed += 1,
                PageState::Recorded => counts.recorded += 1,
                PageState::Failed => counts.failed += 1,
            }
        }
        counts
    }
}
