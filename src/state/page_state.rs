/// Page state definitions for tracking crawl progress
///
/// This module defines all possible states a page can be in during the crawl process.
use std::fmt;

/// Represents the current state of a page in the crawl process
///
/// ```text
/// Unseen -> Queued -> Fetching -> Extracted
///                              \-> FetchFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Page URL has not been discovered yet
    Unseen,

    /// Page passed the dedup gate and a task was spawned for it
    Queued,

    /// Page is currently being fetched
    Fetching,

    // ===== Terminal States =====
    /// Page was fetched and its links and images were extracted
    Extracted,

    /// Fetch failed (network error or non-success status); the page is dropped
    FetchFailed,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Extracted | Self::FetchFailed)
    }

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted)
    }

    /// Returns true if `next` is a legal transition from this state
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Unseen, Self::Queued)
                | (Self::Queued, Self::Fetching)
                | (Self::Fetching, Self::Extracted)
                | (Self::Fetching, Self::FetchFailed)
        )
    }

    /// Returns the lowercase name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Queued => "queued",
            Self::Fetching => "fetching",
            Self::Extracted => "extracted",
            Self::FetchFailed => "fetch_failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
