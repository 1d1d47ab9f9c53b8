use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use attest_core::{
    Address, CredentialCategory, EmploymentType, RegistryError, RegistryPolicy, TokenId,
};

use crate::authorization::{AuthorizationManager, CompanyProfile};
use crate::employment::{EmploymentRecord, EmploymentState};
use crate::ledger::{CredentialToken, LedgerState};

/// A company's issuance footprint, computed from the ledger in one read.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct IssuanceFootprint {
    /// Employment credentials the company has minted.
    pub employment_tokens: usize,
    /// Generic credentials the company has minted.
    pub generic_tokens: usize,
}

impl IssuanceFootprint {
    pub fn total(&self) -> usize {
        self.employment_tokens + self.generic_tokens
    }
}

/// Token table plus employment histories, guarded together so a single
/// write lock covers every index a mutation touches.
#[derive(Debug, Default)]
struct RegistryState {
    ledger: LedgerState,
    employment: EmploymentState,
}

/// The shared registry store.
///
/// Every mutating operation takes an explicit `caller` capability argument,
/// checks the authorization gate first, and commits atomically under one
/// write lock — concurrent writes are serialized, and a failed operation
/// leaves the store unchanged. Reads are snapshot-consistent against the
/// most recently committed write and never fail for well-formed addresses.
pub struct Registry {
    auth: AuthorizationManager,
    policy: RegistryPolicy,
    state: RwLock<RegistryState>,
}

impl Registry {
    /// Create a registry owned by `owner`, with the default policy.
    pub fn new(owner: Address) -> Self {
        Self {
            auth: AuthorizationManager::new(owner),
            policy: RegistryPolicy::default(),
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Create a registry with an explicit policy. Rejects policies whose
    /// score parameters fall outside the 0–100 scale.
    pub fn with_policy(owner: Address, policy: RegistryPolicy) -> Result<Self, RegistryError> {
        policy.validate()?;
        Ok(Self {
            auth: AuthorizationManager::new(owner),
            policy,
            state: RwLock::new(RegistryState::default()),
        })
    }

    pub fn owner(&self) -> &Address {
        self.auth.owner()
    }

    pub fn policy(&self) -> &RegistryPolicy {
        &self.policy
    }

    // A poisoned lock means a writer panicked mid-operation; the guarded
    // state is still the last committed version, so reads may proceed.
    fn read_state(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ---------------------------------------------------------------------
    // Identity & authorization
    // ---------------------------------------------------------------------

    /// Authorize `company` to issue employment credentials. Owner-only.
    pub fn authorize_company(
        &self,
        caller: &Address,
        company: &Address,
        name: &str,
    ) -> Result<(), RegistryError> {
        self.auth.authorize_company(caller, company, name)
    }

    /// Whether an address is an authorized company.
    pub fn is_authorized(&self, company: &Address) -> bool {
        self.auth.is_authorized(company)
    }

    /// Profile for an address; zero-value for unknowns.
    pub fn profile(&self, company: &Address) -> CompanyProfile {
        self.auth.profile(company)
    }

    // ---------------------------------------------------------------------
    // Credential ledger
    // ---------------------------------------------------------------------

    /// Mint a credential token.
    ///
    /// Generic credentials may only be minted by the registry owner;
    /// employment credentials only by an authorized company (the
    /// record-bearing path is [`Registry::mint_employment`]).
    pub fn mint_credential(
        &self,
        caller: &Address,
        owner: &Address,
        category: CredentialCategory,
        trust_score: u8,
        metadata_uri: &str,
    ) -> Result<TokenId, RegistryError> {
        match category {
            CredentialCategory::Generic => {
                if caller != self.auth.owner() {
                    return Err(RegistryError::Unauthorized(format!(
                        "caller {} is not the registry owner",
                        caller
                    )));
                }
            }
            CredentialCategory::Employment => {
                if !self.auth.is_authorized(caller) {
                    return Err(RegistryError::Unauthorized(format!(
                        "caller {} is not an authorized company",
                        caller
                    )));
                }
            }
        }

        let token_id = self.write_state().ledger.mint(
            owner.clone(),
            category,
            caller.clone(),
            trust_score,
            metadata_uri.to_string(),
        )?;

        tracing::info!(
            token_id = %token_id,
            owner = %owner,
            issuer = %caller,
            %category,
            trust_score,
            "credential minted"
        );
        Ok(token_id)
    }

    /// The token with the given id.
    pub fn token(&self, token_id: TokenId) -> Result<CredentialToken, RegistryError> {
        self.read_state()
            .ledger
            .token(token_id)
            .cloned()
            .ok_or(RegistryError::NotFound(token_id))
    }

    /// The metadata URI of a token.
    pub fn token_uri(&self, token_id: TokenId) -> Result<String, RegistryError> {
        self.read_state()
            .ledger
            .token_uri(token_id)
            .map(str::to_string)
    }

    /// Token ids owned by an address, in mint order.
    pub fn credentials_by_owner(&self, owner: &Address) -> Vec<TokenId> {
        self.read_state().ledger.by_owner(owner)
    }

    /// Issuance counts for a company, from one consistent ledger read.
    pub fn issuance_footprint(&self, company: &Address) -> IssuanceFootprint {
        let state = self.read_state();
        IssuanceFootprint {
            employment_tokens: state
                .ledger
                .issued_by(company, CredentialCategory::Employment),
            generic_tokens: state.ledger.issued_by(company, CredentialCategory::Generic),
        }
    }

    // ---------------------------------------------------------------------
    // Employment records
    // ---------------------------------------------------------------------

    /// Mint an employment credential and its linked record, atomically.
    ///
    /// Authorized companies only. The token carries the policy's default
    /// employment trust score; the record starts Active with
    /// `start_date = now`.
    pub fn mint_employment(
        &self,
        caller: &Address,
        employee: &Address,
        company_name: &str,
        position: &str,
        employment_type: EmploymentType,
        metadata_uri: &str,
    ) -> Result<TokenId, RegistryError> {
        if !self.auth.is_authorized(caller) {
            return Err(RegistryError::Unauthorized(format!(
                "caller {} is not an authorized company",
                caller
            )));
        }

        // Token and record commit under the same write guard: concurrent
        // readers never observe one without the other.
        let mut state = self.write_state();
        let token_id = state.ledger.mint(
            employee.clone(),
            CredentialCategory::Employment,
            caller.clone(),
            self.policy.default_employment_trust_score,
            metadata_uri.to_string(),
        )?;
        state.employment.append(EmploymentRecord {
            token_id,
            employee: employee.clone(),
            company_name: company_name.to_string(),
            position: position.to_string(),
            employment_type,
            start_date: Utc::now(),
            end_date: None,
        });
        drop(state);

        tracing::info!(
            token_id = %token_id,
            employee = %employee,
            company = %caller,
            company_name,
            position,
            %employment_type,
            "employment credential minted"
        );
        Ok(token_id)
    }

    /// End the employment linked to `token_id`.
    ///
    /// Only the issuing company may end a record. Fails with `NotFound`
    /// for ids that do not resolve to an employment record, `InvalidState`
    /// if already ended or if `end_date` precedes the start date.
    pub fn end_employment(
        &self,
        caller: &Address,
        token_id: TokenId,
        end_date: DateTime<Utc>,
    ) -> Result<(), RegistryError> {
        let mut state = self.write_state();
        let issuer = state
            .employment
            .record(token_id)
            .and_then(|_| state.ledger.token(token_id))
            .map(|t| t.issuer.clone())
            .ok_or(RegistryError::NotFound(token_id))?;
        if caller != &issuer {
            return Err(RegistryError::Unauthorized(format!(
                "caller {} did not issue employment token {}",
                caller, token_id
            )));
        }
        state.employment.end_record(token_id, end_date)?;
        drop(state);

        tracing::info!(token_id = %token_id, company = %caller, end_date = %end_date, "employment ended");
        Ok(())
    }

    /// Full employment history for an employee, in mint order.
    pub fn employment_history(&self, employee: &Address) -> Vec<EmploymentRecord> {
        self.read_state().employment.history(employee)
    }
}
