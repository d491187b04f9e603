//! Typed outcomes for searches and dispatched device commands.
//!
//! Every result the engine can produce is attributable to exactly one
//! variant here, so callers and tests branch on kind rather than sniffing
//! message text. Two axes stay separate on purpose:
//!
//! - [`SearchOutcome`] says whether an element was *found*.
//! - [`ActionResult`] says whether the dispatched command *succeeded*.
//!
//! A search that locates its element returns `Found` even when the
//! follow-up tap fails; the tap's own result rides alongside in the
//! [`SearchReport`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Terminal outcome of a locate or scroll-retry search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A matching element was found and resolved to a tap point.
    Found { point: Point },
    /// No matching element, after all attempts. Not an error.
    NotFound,
    /// The final attempt's snapshot did not parse.
    ParseError,
    /// The final attempt could not reach the device or puller.
    TransportError,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found { point } => write!(f, "found at {point}"),
            SearchOutcome::NotFound => write!(f, "no matching element"),
            SearchOutcome::ParseError => write!(f, "snapshot did not parse"),
            SearchOutcome::TransportError => write!(f, "device transport unavailable"),
        }
    }
}

/// Classified result of one command dispatched to the device shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ActionResult {
    /// Zero exit; carries trimmed stdout.
    Success { output: String },
    /// The device accepted the command but signaled a nonzero exit.
    /// Not retried automatically: re-sending an already-applied tap can
    /// double-trigger UI actions.
    CommandFailed { exit_code: i32, message: String },
    /// The command exceeded its deadline.
    Timeout,
    /// The shell itself is unreachable (binary missing, connection gone).
    TransportUnavailable,
}

impl ActionResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success { .. })
    }
}

impl fmt::Display for ActionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionResult::Success { output } if output.is_empty() => write!(f, "ok"),
            ActionResult::Success { output } => write!(f, "ok: {output}"),
            ActionResult::CommandFailed { exit_code, message } => {
                write!(f, "command failed (exit {exit_code}): {message}")
            }
            ActionResult::Timeout => write!(f, "command timed out"),
            ActionResult::TransportUnavailable => {
                write!(f, "device shell unavailable (is adb installed and connected?)")
            }
        }
    }
}

/// What a search produced: the search outcome plus, when an element was
/// acted on, the result of that action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionResult>,
}

impl SearchReport {
    #[must_use]
    pub fn not_acted(outcome: SearchOutcome) -> Self {
        Self {
            outcome,
            action: None,
        }
    }

    #[must_use]
    pub fn acted(point: Point, action: ActionResult) -> Self {
        Self {
            outcome: SearchOutcome::Found { point },
            action: Some(action),
        }
    }
}
