use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Maximum trust score a credential or company report can carry.
pub const MAX_TRUST_SCORE: u8 = 100;

/// Policy parameters for the registry.
///
/// The legitimacy score derivation and the "low risk" threshold are policy,
/// not protocol: they are deliberately configurable rather than hard-coded.
/// The score assigned to a company is:
///
/// `authorized_base_score` (if authorized)
///   + `named_profile_bonus` (if the profile has a non-empty name)
///   + `min(employment tokens issued * issuance_step, issuance_cap)`
///
/// clamped to [`MAX_TRUST_SCORE`]. Each term is monotonic in observable
/// ledger state, so identical store contents always produce identical
/// reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryPolicy {
    /// Trust score stamped on employment credentials at mint time.
    pub default_employment_trust_score: u8,
    /// Score contribution for being authorized by the registry owner.
    pub authorized_base_score: u8,
    /// Score contribution for a non-empty registered company name.
    pub named_profile_bonus: u8,
    /// Score contribution per employment credential issued.
    pub issuance_step: u8,
    /// Cap on the total issuance-history contribution.
    pub issuance_cap: u8,
    /// Scores strictly above this (with no warnings) are presented as
    /// "low risk" by collaborators. Presentation convention, not an
    /// engine invariant.
    pub low_risk_threshold: u8,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            default_employment_trust_score: 80,
            authorized_base_score: 50,
            named_profile_bonus: 10,
            issuance_step: 8,
            issuance_cap: 40,
            low_risk_threshold: 70,
        }
    }
}

impl RegistryPolicy {
    /// Validate that every score parameter fits the 0–100 scale.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for (name, value) in [
            (
                "default_employment_trust_score",
                self.default_employment_trust_score,
            ),
            ("authorized_base_score", self.authorized_base_score),
            ("named_profile_bonus", self.named_profile_bonus),
            ("issuance_cap", self.issuance_cap),
            ("low_risk_threshold", self.low_risk_threshold),
        ] {
            if value > MAX_TRUST_SCORE {
                return Err(RegistryError::InvalidArgument(format!(
                    "policy parameter {} = {} exceeds {}",
                    name, value, MAX_TRUST_SCORE
                )));
            }
        }
        Ok(())
    }
}
