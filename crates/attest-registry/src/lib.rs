//! Attest Registry
//!
//! The authoritative store for the Attest protocol:
//! - Owner-gated company authorization with self-declared profiles
//! - Soulbound credential ledger (mint-only, no transfer, no burn)
//! - Per-employee append-only employment histories
//!
//! All writes enter through [`Registry`], which checks the caller's
//! capability before touching state and commits each mutation atomically
//! under a single write lock.

pub mod authorization;
pub mod employment;
pub mod ledger;
pub mod registry;

pub use authorization::{AuthorizationManager, CompanyProfile};
pub use employment::EmploymentRecord;
pub use ledger::CredentialToken;
pub use registry::{IssuanceFootprint, Registry};
