/// Page state definitions for tracking crawl progress
///
/// Only URLs that were claimed in the visited registry carry a state; URLs
/// rejected before the claim (out of scope, unparseable, duplicate) never do.
use std::fmt;

/// Represents the current state of a claimed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Key reserved by the first visitor; fetch not finished yet
    Claimed,

    /// Page was fetched and its extracted record stored
    Recorded,

    /// Fetch failed; the claim stays so the page is never fetched again
    Failed,
}

impl PageState {
    /// Returns true if this page contributes a row to the report
    pub fn is_reportable(&self) -> bool {
        matches!(self, Self::Recorded)
    }

    /// Returns true if a transition from `self` to `next` is legal
    ///
    /// Every page moves `Claimed -> Recorded` or `Claimed -> Failed` exactly once.
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Claimed, Self::Recorded) | (Self::Claimed, Self::Failed)
        )
    }

    /// Lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claimed => "claimed",
            Self::Recorded => "recorded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_recorded_is_reportable() {
        assert!(PageState::Recorded.is_reportable());
        assert!(!PageState::Claimed.is_reportable());
        assert!(!PageState::Failed.is_reportable());
    }

    #[test]
    fn test_transitions() {
        assert!(PageState::Claimed.can_transition_to(PageState::Recorded));
        assert!(PageState::Claimed.can_transition_to(PageState::Failed));
        assert!(!PageState::Recorded.can_transition_to(PageState::Failed));
        assert!(!PageState::Failed.can_transition_to(PageState::Recorded));
        assert!(!PageState::Recorded.can_transition_to(PageState::Claimed));
    }

    #[test]
    fn test_display() {
        assert_eq!(PageState::Failed.to_string(), "failed");
    }
}
