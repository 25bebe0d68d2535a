use super::domain::{CheckResult, Verdict};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Employer-name sentinel for a hiring company hidden from the public listing.
pub(crate) const UNDISCLOSED: &str = "非公開";
/// Employment-type label for dispatched workers.
pub(crate) const DISPATCH: &str = "派遣社員";

/// Generation of the editorial rulebook applied to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesetVersion {
    /// First rulebook: strict on schema gaps and undisclosed dispatch listings, lenient on
    /// unresolved regions.
    Initial,
    /// Rulebook revised after editorial feedback.
    #[default]
    Current,
}

impl RulesetVersion {
    pub const fn ordered() -> [Self; 2] {
        [Self::Initial, Self::Current]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Current => "current",
        }
    }

    pub fn policy(self) -> &'static dyn RulesetPolicy {
        match self {
            Self::Initial => &InitialRuleset,
            Self::Current => &CurrentRuleset,
        }
    }
}

impl fmt::Display for RulesetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ruleset '{0}' (expected 'initial' or 'current')")]
pub struct UnknownRuleset(pub String);

impl FromStr for RulesetVersion {
    type Err = UnknownRuleset;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "initial" | "v1" => Ok(Self::Initial),
            "current" | "v2" => Ok(Self::Current),
            other => Err(UnknownRuleset(other.to_string())),
        }
    }
}

/// Secondary job-title checks that route to manual review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleReviewCheck {
    Digits,
    FacilityName,
}

/// Policy points on which rulebook generations disagree.
pub trait RulesetPolicy: fmt::Debug + Send + Sync {
    fn version(&self) -> RulesetVersion;

    /// Whether a column missing from the dataset reads as a blank cell. When false, the gap is
    /// reported for manual review instead.
    fn absent_columns_are_blank(&self) -> bool;

    /// Judges an undisclosed employer whose intermediary name is filled in.
    fn undisclosed_employer(&self, intermediary: &str, employment_type: &str) -> CheckResult;

    fn unresolved_region_verdict(&self) -> Verdict;

    fn checks_intermediary_name(&self) -> bool;

    fn title_review_checks(&self) -> &'static [TitleReviewCheck];
}

#[derive(Debug, Clone, Copy)]
pub struct InitialRuleset;

impl RulesetPolicy for InitialRuleset {
    fn version(&self) -> RulesetVersion {
        RulesetVersion::Initial
    }

    fn absent_columns_are_blank(&self) -> bool {
        true
    }

    fn undisclosed_employer(&self, _intermediary: &str, employment_type: &str) -> CheckResult {
        if employment_type == DISPATCH {
            return CheckResult::reject("undisclosed employer with dispatch employment");
        }
        CheckResult::pass()
    }

    fn unresolved_region_verdict(&self) -> Verdict {
        Verdict::NeedsReview
    }

    fn checks_intermediary_name(&self) -> bool {
        false
    }

    fn title_review_checks(&self) -> &'static [TitleReviewCheck] {
        &[TitleReviewCheck::FacilityName]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CurrentRuleset;

impl RulesetPolicy for CurrentRuleset {
    fn version(&self) -> RulesetVersion {
        RulesetVersion::Current
    }

    fn absent_columns_are_blank(&self) -> bool {
        false
    }

    fn undisclosed_employer(&self, intermediary: &str, employment_type: &str) -> CheckResult {
        if intermediary != UNDISCLOSED {
            return CheckResult::pass();
        }

        if employment_type == DISPATCH {
            CheckResult::reject(
                "undisclosed employer with dispatch employment and undisclosed intermediary",
            )
        } else {
            CheckResult::reject("undisclosed employer and undisclosed intermediary")
        }
    }

    fn unresolved_region_verdict(&self) -> Verdict {
        Verdict::Reject
    }

    fn checks_intermediary_name(&self) -> bool {
        true
    }

    fn title_review_checks(&self) -> &'static [TitleReviewCheck] {
        &[TitleReviewCheck::Digits, TitleReviewCheck::FacilityName]
    }
}
