//! Requests and results of the privileged lifecycle operations.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Atomic finalize request sent to [`crate::store::PrivilegedOps`].
#[derive(Debug, Clone)]
pub struct FinalizeRequest {
    pub id: u64,
    pub actor: Option<String>,
    /// Finish instant; the duration is measured against the stored start
    pub at: Timestamp,
}

/// Atomic reopen request sent to [`crate::store::PrivilegedOps`].
#[derive(Debug, Clone)]
pub struct ReopenRequest {
    pub id: u64,
    pub actor: Option<String>,
    pub at: Timestamp,
}

/// Raw answer of the privileged finalize operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeReceipt {
    pub success: bool,
    pub maintenance_seconds: u64,
}

/// Which write path produced a finalize outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizePath {
    /// Single atomic transaction on the store
    Privileged,
    /// Two sequential writes: status/timing first, lock second
    Fallback,
}

/// Result of [`crate::lifecycle::LifecycleManager::finalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeOutcome {
    pub success: bool,
    pub maintenance_seconds: u64,
    pub path: FinalizePath,
    /// Whether the lock is known to be set. Always true on the privileged
    /// path; on the fallback path the lock write is best-effort.
    pub locked: bool,
}

/// Kind of audited lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Finalized,
    Reopened,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Finalized => "finalized",
            AuditAction::Reopened => "reopened",
        }
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "finalized" => Ok(AuditAction::Finalized),
            "reopened" => Ok(AuditAction::Reopened),
            _ => Err(format!("Invalid audit action: {s}")),
        }
    }
}

/// Audit trail entry written by the privileged operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub checklist_id: u64,
    pub action: AuditAction,
    pub actor: Option<String>,
    pub at: Timestamp,
    /// Duration recorded at finalize, or the duration discarded by a reopen
    pub maintenance_seconds: Option<u64>,
}
