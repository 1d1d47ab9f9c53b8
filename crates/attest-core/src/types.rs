use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// A wallet address identifying a participant (company or individual).
/// Format: `0x` followed by 40 hex characters (a 20-byte account address).
///
/// Whether an address acts as a company or an individual is determined by
/// usage, not by the type: it appears as an issuer, an owner, or both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    /// Parse and validate an address string.
    ///
    /// The hex payload is normalized to lowercase so that two spellings of
    /// the same address always compare equal.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, RegistryError> {
        let raw = raw.as_ref();
        let payload = raw.strip_prefix("0x").ok_or_else(|| {
            RegistryError::InvalidArgument(format!("address must start with '0x', got: {}", raw))
        })?;
        let bytes = hex::decode(payload).map_err(|_| {
            RegistryError::InvalidArgument(format!("address is not valid hex: {}", raw))
        })?;
        if bytes.len() != 20 {
            return Err(RegistryError::InvalidArgument(format!(
                "address must encode 20 bytes, got {} in: {}",
                bytes.len(),
                raw
            )));
        }
        Ok(Self(format!("0x{}", payload.to_lowercase())))
    }

    /// The full address string, lowercase hex with `0x` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a credential token. Assigned from a single global counter,
/// strictly increasing, never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TokenId(pub u64);

impl TokenId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category of an issued credential token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialCategory {
    /// A general-purpose credential (education, certification, ...).
    Generic,
    /// An employment credential paired 1:1 with an employment record.
    Employment,
}

impl fmt::Display for CredentialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::Employment => write!(f, "employment"),
        }
    }
}

/// Kind of employment engagement recorded on an employment credential.
///
/// The wire spellings ("full-time", ...) are the ones submitted by
/// collaborating dashboards and kept for compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullTime => write!(f, "full-time"),
            Self::PartTime => write!(f, "part-time"),
            Self::Contract => write!(f, "contract"),
            Self::Internship => write!(f, "internship"),
        }
    }
}

impl FromStr for EmploymentType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full-time" => Ok(Self::FullTime),
            "part-time" => Ok(Self::PartTime),
            "contract" => Ok(Self::Contract),
            "internship" => Ok(Self::Internship),
            other => Err(RegistryError::InvalidArgument(format!(
                "unknown employment type: {}",
                other
            ))),
        }
    }
}
