use serde::{Deserialize, Serialize};
use std::sync::Arc;

use attest_core::{Address, EmploymentType};
use attest_registry::{EmploymentRecord, Registry};

/// Answer to "does this candidate already hold conflicting employment?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// True iff more than one full-time employment is simultaneously active.
    pub has_conflicts: bool,
    /// Number of active full-time records.
    pub active_full_time: u32,
}

/// Detects conflicting active employment from an employee's history.
///
/// Part-time, contract, and internship spans never trigger a conflict on
/// their own; callers inspect [`ConflictEngine::active_employments`] to
/// judge those themselves.
pub struct ConflictEngine {
    registry: Arc<Registry>,
}

impl ConflictEngine {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The employee's active records, preserving history order.
    pub fn active_employments(&self, employee: &Address) -> Vec<EmploymentRecord> {
        self.registry
            .employment_history(employee)
            .into_iter()
            .filter(|r| r.is_active())
            .collect()
    }

    /// Check for simultaneous active full-time employment.
    ///
    /// Deterministic for a given store state; computed from a single
    /// history read.
    pub fn check_conflicts(&self, employee: &Address) -> ConflictReport {
        let active_full_time = self
            .registry
            .employment_history(employee)
            .iter()
            .filter(|r| r.is_active() && r.employment_type == EmploymentType::FullTime)
            .count() as u32;

        let report = ConflictReport {
            has_conflicts: active_full_time > 1,
            active_full_time,
        };
        tracing::debug!(
            employee = %employee,
            active_full_time,
            has_conflicts = report.has_conflicts,
            "employment conflict check"
        );
        report
    }
}
