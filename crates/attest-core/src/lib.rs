//! Attest Core — Fundamental types, errors, and policy configuration for the
//! Attest employment and credential registry.

pub mod config;
pub mod error;
pub mod record_state;
pub mod types;

pub use config::RegistryPolicy;
pub use error::RegistryError;
pub use record_state::RecordState;
pub use types::{Address, CredentialCategory, EmploymentType, TokenId};
