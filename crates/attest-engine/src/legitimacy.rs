use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use attest_core::config::MAX_TRUST_SCORE;
use attest_core::Address;
use attest_registry::Registry;

/// Presentation-level risk bucket derived from a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Legitimacy report for a company identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegitimacyReport {
    /// Registered company name; empty for unknown addresses.
    pub company_name: String,
    /// True iff the address is authorized and no disqualifying warning
    /// (missing authorization, missing registered name) is present.
    pub is_verified: bool,
    /// Derived score, 0–100.
    pub trust_score: u8,
    /// Specific red flags, in check order.
    pub warnings: Vec<String>,
}

/// Derives a legitimacy report from a company's profile and its issuance
/// footprint in the ledger.
///
/// The scoring function is policy (see `RegistryPolicy`): each term is a
/// monotonic function of observable store state, so identical state always
/// produces identical reports.
pub struct LegitimacyEngine {
    registry: Arc<Registry>,
}

impl LegitimacyEngine {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Build the legitimacy report for a company address.
    pub fn verify_company(&self, company: &Address) -> LegitimacyReport {
        let policy = self.registry.policy();
        let profile = self.registry.profile(company);
        let footprint = self.registry.issuance_footprint(company);

        let mut warnings = Vec::new();
        let mut disqualified = false;
        if !profile.authorized {
            warnings.push("company is not authorized in the registry".to_string());
            disqualified = true;
        }
        if profile.company_name.is_empty() {
            warnings.push("company profile has no registered name".to_string());
            disqualified = true;
        }
        if footprint.total() == 0 {
            // Informational only: a freshly authorized company still verifies.
            warnings.push("company has no credential issuance history".to_string());
        }

        let mut score: u32 = 0;
        if profile.authorized {
            score += u32::from(policy.authorized_base_score);
        }
        if !profile.company_name.is_empty() {
            score += u32::from(policy.named_profile_bonus);
        }
        score += (footprint.employment_tokens as u32 * u32::from(policy.issuance_step))
            .min(u32::from(policy.issuance_cap));
        let trust_score = score.min(u32::from(MAX_TRUST_SCORE)) as u8;

        let report = LegitimacyReport {
            company_name: profile.company_name,
            is_verified: profile.authorized && !disqualified,
            trust_score,
            warnings,
        };
        tracing::debug!(
            company = %company,
            is_verified = report.is_verified,
            trust_score,
            warning_count = report.warnings.len(),
            "company legitimacy check"
        );
        report
    }

    /// The "low risk" presentation convention: score strictly above the
    /// policy threshold with no warnings at all. Layered on top of the raw
    /// report, not an engine invariant.
    pub fn risk_level(&self, report: &LegitimacyReport) -> RiskLevel {
        if report.trust_score > self.registry.policy().low_risk_threshold
            && report.warnings.is_empty()
        {
            RiskLevel::Low
        } else {
            RiskLevel::High
        }
    }
}
