//! Duration arithmetic shared by the lifecycle and the read models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

const HOUR: u64 = 3600;

/// Whole seconds from `start` to `end`, floored and clamped to zero.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use pitstop_core::models::seconds_between;
///
/// let start: Timestamp = "2024-01-01T00:00:00Z".parse().unwrap();
/// let end: Timestamp = "2024-01-01T01:30:00.900Z".parse().unwrap();
/// assert_eq!(seconds_between(start, end), 5400);
/// assert_eq!(seconds_between(end, start), 0);
/// ```
pub fn seconds_between(start: Timestamp, end: Timestamp) -> u64 {
    u64::try_from(end.duration_since(start).as_secs()).unwrap_or(0)
}

/// Hours rounded to two decimals, as shown on reports.
pub fn hours_rounded(seconds: f64) -> f64 {
    (seconds / HOUR as f64 * 100.0).round() / 100.0
}

/// How long an in-progress checklist has been open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeBand {
    /// Open for less than a day
    Fresh,
    /// Open for less than three days
    Aging,
    /// Open for three days or more
    Overdue,
}

impl AgeBand {
    pub fn from_seconds(seconds: u64) -> Self {
        if seconds < 24 * HOUR {
            AgeBand::Fresh
        } else if seconds < 72 * HOUR {
            AgeBand::Aging
        } else {
            AgeBand::Overdue
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::Fresh => "fresh",
            AgeBand::Aging => "aging",
            AgeBand::Overdue => "overdue",
        }
    }
}
