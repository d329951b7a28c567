//! ExportOutcome - the success half of a work unit's result

use std::fmt;

/// What the hub did with a successfully delivered unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Hub created a new record (201)
    Created,
    /// Hub replaced an existing record (200)
    Updated,
    /// Hub detected identical content and skipped the write (304)
    Unchanged,
    /// Reconciliation sweep finished; `deleted` records were scheduled for removal
    Reconciled { deleted: usize },
}

impl fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
            Self::Unchanged => write!(f, "unchanged"),
            Self::Reconciled { deleted } => write!(f, "reconciled ({deleted} deleted)"),
        }
    }
}

impl ExportOutcome {
    /// Stable label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
            Self::Reconciled { .. } => "reconciled",
        }
    }
}
