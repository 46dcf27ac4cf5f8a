//! Answer classification and the reserved transcript markers

use std::fmt;

/// Marker line for a "yes" answer.
pub const YES_MARKER: &str = "Yes";
/// Marker line for a "no" answer.
pub const NO_MARKER: &str = "No";
/// Marker line that ends a session.
pub const QUIT_MARKER: &str = "Quit";

/// Classified player answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Quit,
}

impl Answer {
    /// Classify one input line (newline already stripped).
    ///
    /// Matching is exact and case-sensitive. The empty line and `Quit` end the
    /// session, `Yes` is yes, everything else (including `No`) is no.
    pub fn classify(line: &str) -> Self {
        match line {
            "" | QUIT_MARKER => Answer::Quit,
            YES_MARKER => Answer::Yes,
            _ => Answer::No,
        }
    }

    /// Classify a line that may be missing because input ran out.
    pub fn from_input(line: Option<&str>) -> Self {
        line.map_or(Answer::Quit, Self::classify)
    }
}

/// One of the two children of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Yes,
    No,
}

impl Branch {
    /// The marker line that selects this branch during replay.
    pub fn marker(self) -> &'static str {
        match self {
            Branch::Yes => YES_MARKER,
            Branch::No => NO_MARKER,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}
