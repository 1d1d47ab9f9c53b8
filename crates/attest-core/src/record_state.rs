use std::fmt;

use crate::error::RegistryError;

/// The states of an employment record lifecycle.
///
/// Valid transitions:
/// - Active → Ended (termination)
///
/// There is no re-activation: Ended is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RecordState {
    /// Employment is ongoing (no end date set).
    Active,
    /// Employment has been terminated. Final state.
    Ended,
}

impl RecordState {
    /// Whether this is a final (terminal) state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// Attempt the termination transition.
    /// Returns the new state, or an error if the record is already ended.
    pub fn end(self) -> Result<Self, RegistryError> {
        match self {
            Self::Active => {
                tracing::debug!(from = %self, to = %Self::Ended, "record state transition");
                Ok(Self::Ended)
            }
            Self::Ended => Err(RegistryError::InvalidState(
                "employment record is already ended".into(),
            )),
        }
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Ended => write!(f, "Ended"),
        }
    }
}
