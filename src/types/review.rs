use std::fmt;

/// Result of one review attempt.
///
/// Precondition failures and client failures are values, not errors, so a
/// front end can display them directly. `Failed` renders with the `Error:`
/// prefix its message already carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Review markup returned by the model, verbatim.
    Review(String),
    /// The selected commit carries no changes.
    NoChanges(String),
    Failed(String),
}

impl ReviewOutcome {
    pub fn message(&self) -> &str {
        match self {
            ReviewOutcome::Review(s) | ReviewOutcome::NoChanges(s) | ReviewOutcome::Failed(s) => s,
        }
    }

    pub fn is_review(&self) -> bool {
        matches!(self, ReviewOutcome::Review(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReviewOutcome::Failed(_))
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
