//! Status enumeration for checklists.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of checklist lifecycle states.
///
/// Transitions run forward only, `Draft → InProgress → Finalized`, except for
/// the privileged reopen which moves `Finalized → InProgress`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    /// Created but never opened
    #[default]
    Draft,

    /// Opened; maintenance time is accruing
    InProgress,

    /// Closed with a measured duration
    Finalized,
}

impl FromStr for ChecklistStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ChecklistStatus::Draft),
            "in_progress" | "inprogress" | "in-progress" => Ok(ChecklistStatus::InProgress),
            "finalized" | "finished" => Ok(ChecklistStatus::Finalized),
            _ => Err(format!("Invalid checklist status: {s}")),
        }
    }
}

impl ChecklistStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecklistStatus::Draft => "draft",
            ChecklistStatus::InProgress => "in_progress",
            ChecklistStatus::Finalized => "finalized",
        }
    }

    /// Whether the checklist still counts as open for its vehicle.
    pub fn is_open(&self) -> bool {
        matches!(self, ChecklistStatus::Draft | ChecklistStatus::InProgress)
    }

    /// Whether `next` is a legal transition from this status.
    ///
    /// A draft may be finalized directly; it then records no maintenance
    /// time. `Finalized → InProgress` is only reachable through reopen.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pitstop_core::models::ChecklistStatus;
    ///
    /// assert!(ChecklistStatus::Draft.can_transition_to(ChecklistStatus::InProgress));
    /// assert!(ChecklistStatus::Draft.can_transition_to(ChecklistStatus::Finalized));
    /// assert!(ChecklistStatus::Finalized.can_transition_to(ChecklistStatus::InProgress));
    /// assert!(!ChecklistStatus::Finalized.can_transition_to(ChecklistStatus::Draft));
    /// ```
    pub fn can_transition_to(&self, next: ChecklistStatus) -> bool {
        matches!(
            (self, next),
            (ChecklistStatus::Draft, ChecklistStatus::InProgress)
                | (ChecklistStatus::Draft, ChecklistStatus::Finalized)
                | (ChecklistStatus::InProgress, ChecklistStatus::Finalized)
                | (ChecklistStatus::Finalized, ChecklistStatus::InProgress)
        )
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Icons Used
    /// - `✓ Finalized` - Checkmark for closed checklists
    /// - `➤ In Progress` - Arrow for checklists being worked on
    /// - `○ Draft` - Circle for checklists never opened
    pub fn with_icon(&self) -> &'static str {
        match self {
            ChecklistStatus::Finalized => "✓ Finalized",
            ChecklistStatus::InProgress => "➤ In Progress",
            ChecklistStatus::Draft => "○ Draft",
        }
    }
}
