/// Page outcome definitions for tracking crawl progress
///
/// Every URL taken off the frontier ends in exactly one of these outcomes.
/// HTTP status codes are not outcomes: any answered request counts as
/// fetched, and non-2xx statuses are tallied separately in the statistics.
use std::fmt;

/// What happened to a single dequeued URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    // ===== Success States =====
    /// Detail page whose article was written to the corpus
    Saved,

    /// Index page whose links were appended to the frontier
    Expanded,

    // ===== Skip States =====
    /// Detail page without any paragraph text; not saved, not counted
    EmptyContent,

    // ===== Error States =====
    /// Timeout, refused connection, DNS or TLS failure
    Unreachable,

    /// Anything else, e.g. a body that could not be read
    Failed,
}

impl PageOutcome {
    /// Returns true if the fetch itself failed
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Unreachable | Self::Failed)
    }

    /// Stable lowercase label used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Expanded => "expanded",
            Self::EmptyContent => "empty_content",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible outcomes, in reporting order
    pub fn all() -> [Self; 5] {
        [
            Self::Saved,
            Self::Expanded,
            Self::EmptyContent,
            Self::Unreachable,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
