//! Attest Engines
//!
//! Pure derived queries over the registry store:
//! - Employment-conflict detection (simultaneous active full-time spans)
//! - Company-legitimacy scoring with named warnings
//!
//! Both engines are stateless: every call recomputes its answer from the
//! current store contents, so results are always consistent with the most
//! recently committed write and never stale.

pub mod conflict;
pub mod legitimacy;

pub use conflict::{ConflictEngine, ConflictReport};
pub use legitimacy::{LegitimacyEngine, LegitimacyReport, RiskLevel};
