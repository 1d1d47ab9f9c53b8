use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use attest_core::{Address, RegistryError};

/// Self-declared profile of a company identity.
///
/// Created on first authorization and never deleted. Unknown addresses
/// read back as the zero-value profile (empty name, unauthorized).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Registered company name, overwritten on re-authorization.
    pub company_name: String,
    /// Whether the registry owner has authorized this address to issue
    /// employment credentials.
    pub authorized: bool,
    /// When the address was first authorized.
    pub authorized_at: Option<DateTime<Utc>>,
}

/// Maintains the set of addresses permitted to issue employment records
/// and the profile data associated with each.
///
/// Every write path in the registry reuses this one gate rather than
/// re-implementing the capability check.
pub struct AuthorizationManager {
    /// The registry owner; the only identity allowed to authorize companies.
    owner: Address,
    /// Company address → profile.
    profiles: DashMap<Address, CompanyProfile>,
}

impl AuthorizationManager {
    /// Create a manager with the given registry owner.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            profiles: DashMap::new(),
        }
    }

    /// The registry owner address.
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Authorize a company address, recording (or overwriting) its name.
    ///
    /// Owner-only. Idempotent: re-authorizing updates the name and keeps
    /// the original authorization timestamp.
    pub fn authorize_company(
        &self,
        caller: &Address,
        company: &Address,
        name: &str,
    ) -> Result<(), RegistryError> {
        if caller != &self.owner {
            return Err(RegistryError::Unauthorized(format!(
                "caller {} is not the registry owner",
                caller
            )));
        }

        self.profiles
            .entry(company.clone())
            .and_modify(|profile| {
                profile.company_name = name.to_string();
                profile.authorized = true;
            })
            .or_insert_with(|| CompanyProfile {
                company_name: name.to_string(),
                authorized: true,
                authorized_at: Some(Utc::now()),
            });

        tracing::info!(company = %company, name, "company authorized");
        Ok(())
    }

    /// Whether an address is an authorized company. False for unknowns.
    pub fn is_authorized(&self, company: &Address) -> bool {
        self.profiles
            .get(company)
            .map(|p| p.authorized)
            .unwrap_or(false)
    }

    /// The profile for an address; zero-value for unknowns.
    pub fn profile(&self, company: &Address) -> CompanyProfile {
        self.profiles
            .get(company)
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Number of company profiles on record.
    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }
}
