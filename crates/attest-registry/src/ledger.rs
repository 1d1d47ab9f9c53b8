use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use attest_core::config::MAX_TRUST_SCORE;
use attest_core::{Address, CredentialCategory, RegistryError, TokenId};

/// An issued credential token.
///
/// Tokens are soulbound: once minted, every field including the owner is
/// immutable, and no transfer or burn operation exists anywhere in the
/// public contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialToken {
    pub token_id: TokenId,
    pub owner: Address,
    pub category: CredentialCategory,
    /// Identity that minted the token.
    pub issuer: Address,
    /// Trust score snapshot taken at mint time, 0–100.
    pub trust_score: u8,
    /// Opaque pointer to off-registry descriptive data. Never parsed here.
    pub metadata_uri: String,
    pub issued_at: DateTime<Utc>,
}

/// Mutable ledger state: the global token counter, the token table, and the
/// per-owner ownership index.
///
/// Plain data with no locking of its own; [`crate::Registry`] serializes
/// access.
#[derive(Debug, Default)]
pub struct LedgerState {
    /// Last assigned token id. Ids start at 1 and are never reused.
    next_token_id: u64,
    tokens: HashMap<TokenId, CredentialToken>,
    /// Owner → token ids in mint order.
    owned: HashMap<Address, Vec<TokenId>>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a token to `owner`. Validates before mutating, so a failed
    /// mint leaves the ledger untouched.
    pub(crate) fn mint(
        &mut self,
        owner: Address,
        category: CredentialCategory,
        issuer: Address,
        trust_score: u8,
        metadata_uri: String,
    ) -> Result<TokenId, RegistryError> {
        if trust_score > MAX_TRUST_SCORE {
            return Err(RegistryError::InvalidArgument(format!(
                "trust score {} out of range 0..={}",
                trust_score, MAX_TRUST_SCORE
            )));
        }

        self.next_token_id += 1;
        let token_id = TokenId(self.next_token_id);
        let token = CredentialToken {
            token_id,
            owner: owner.clone(),
            category,
            issuer,
            trust_score,
            metadata_uri,
            issued_at: Utc::now(),
        };
        self.tokens.insert(token_id, token);
        self.owned.entry(owner).or_default().push(token_id);
        Ok(token_id)
    }

    /// Look up a token by id.
    pub fn token(&self, token_id: TokenId) -> Option<&CredentialToken> {
        self.tokens.get(&token_id)
    }

    /// The metadata URI for a token.
    pub fn token_uri(&self, token_id: TokenId) -> Result<&str, RegistryError> {
        self.tokens
            .get(&token_id)
            .map(|t| t.metadata_uri.as_str())
            .ok_or(RegistryError::NotFound(token_id))
    }

    /// Token ids owned by an address, in mint order. Empty for unknowns.
    pub fn by_owner(&self, owner: &Address) -> Vec<TokenId> {
        self.owned.get(owner).cloned().unwrap_or_default()
    }

    /// Count tokens of a category minted by an issuer.
    pub fn issued_by(&self, issuer: &Address, category: CredentialCategory) -> usize {
        self.tokens
            .values()
            .filter(|t| &t.issuer == issuer && t.category == category)
            .count()
    }

    /// Total tokens in the ledger.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
