use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use attest_core::{Address, EmploymentType, RecordState, RegistryError, TokenId};

/// A single employment span in an employee's history.
///
/// Created atomically with its paired employment credential token and never
/// deleted. The only mutation allowed is setting `end_date` once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    /// The paired employment credential token.
    pub token_id: TokenId,
    pub employee: Address,
    /// Company name as registered at mint time (denormalized snapshot).
    pub company_name: String,
    pub position: String,
    pub employment_type: EmploymentType,
    pub start_date: DateTime<Utc>,
    /// `None` while the employment is ongoing.
    pub end_date: Option<DateTime<Utc>>,
}

impl EmploymentRecord {
    /// Whether the employment is ongoing.
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// Lifecycle state derived from the end date.
    pub fn state(&self) -> RecordState {
        if self.is_active() {
            RecordState::Active
        } else {
            RecordState::Ended
        }
    }
}

/// Mutable employment-history state: per-employee append-only record
/// sequences plus a token-id back-index for terminations.
///
/// Plain data with no locking of its own; [`crate::Registry`] serializes
/// access.
#[derive(Debug, Default)]
pub struct EmploymentState {
    /// Employee → records in mint order.
    history: HashMap<Address, Vec<EmploymentRecord>>,
    /// Token id → employee holding the linked record.
    by_token: HashMap<TokenId, Address>,
}

impl EmploymentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly minted record to its employee's history.
    pub(crate) fn append(&mut self, record: EmploymentRecord) {
        self.by_token
            .insert(record.token_id, record.employee.clone());
        self.history
            .entry(record.employee.clone())
            .or_default()
            .push(record);
    }

    /// Look up the record linked to a token.
    pub fn record(&self, token_id: TokenId) -> Option<&EmploymentRecord> {
        let employee = self.by_token.get(&token_id)?;
        self.history
            .get(employee)?
            .iter()
            .find(|r| r.token_id == token_id)
    }

    /// Set the end date on the record linked to `token_id`.
    ///
    /// All checks run before any mutation: unknown token → `NotFound`,
    /// already ended → `InvalidState`, `end_date < start_date` →
    /// `InvalidState`.
    pub(crate) fn end_record(
        &mut self,
        token_id: TokenId,
        end_date: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        let employee = self
            .by_token
            .get(&token_id)
            .cloned()
            .ok_or(RegistryError::NotFound(token_id))?;
        let record = self
            .history
            .get_mut(&employee)
            .and_then(|records| records.iter_mut().find(|r| r.token_id == token_id))
            .ok_or(RegistryError::NotFound(token_id))?;

        record.state().end()?;
        if end_date < record.start_date {
            return Err(RegistryError::InvalidState(format!(
                "end date {} precedes start date {}",
                end_date, record.start_date
            )));
        }

        record.end_date = Some(end_date);
        Ok(())
    }

    /// Full history for an employee, in mint order. Empty for unknowns.
    pub fn history(&self, employee: &Address) -> Vec<EmploymentRecord> {
        self.history.get(employee).cloned().unwrap_or_default()
    }

    /// Total records across all employees.
    pub fn record_count(&self) -> usize {
        self.history.values().map(|r| r.len()).sum()
    }
}
