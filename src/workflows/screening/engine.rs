use super::aggregate::VerdictAggregator;
use super::domain::{CheckKind, CheckResult, JobListing, ListingField, Verdict};
use super::policy::{RulesetPolicy, RulesetVersion};
use super::rules;
use super::text::format_number;
use super::wage::{WageAssessment, WageComplianceEngine};
use super::wage_table::RegionWageTable;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

type FieldCheck = fn(&JobListing, &dyn RulesetPolicy) -> CheckResult;

/// Field validators in reason order; wage compliance is evaluated separately and leads.
const FIELD_CHECKS: [(CheckKind, FieldCheck); 8] = [
    (CheckKind::RequiredFields, rules::check_required_fields),
    (CheckKind::EmailFormat, rules::check_email),
    (CheckKind::EmploymentType, rules::check_employment_type),
    (CheckKind::JobTitle, rules::check_job_title),
    (CheckKind::CompanyName, rules::check_company_name),
    (CheckKind::IntermediaryName, rules::check_intermediary_name),
    (CheckKind::UndisclosedEmployer, rules::check_undisclosed_employer),
    (CheckKind::Locality, rules::check_locality),
];

/// Immutable inputs of a screening run.
#[derive(Debug, Clone, Default)]
pub struct ScreeningConfig {
    pub ruleset: RulesetVersion,
    pub wage_table: RegionWageTable,
}

impl ScreeningConfig {
    pub fn new(ruleset: RulesetVersion, wage_table: RegionWageTable) -> Self {
        Self {
            ruleset,
            wage_table,
        }
    }
}

/// Stateless evaluator applying one rulebook generation to listings.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    config: ScreeningConfig,
}

impl ScreeningEngine {
    pub fn new(config: ScreeningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScreeningConfig {
        &self.config
    }

    pub fn ruleset(&self) -> RulesetVersion {
        self.config.ruleset
    }

    pub fn evaluate(&self, listing: &JobListing) -> ScreeningOutcome {
        let policy = self.config.ruleset.policy();
        let wage = WageComplianceEngine::new(&self.config.wage_table, policy).assess(listing);

        let mut aggregator = VerdictAggregator::new();
        aggregator.record(CheckKind::WageCompliance, wage.result.clone());
        for (kind, check) in FIELD_CHECKS {
            if kind == CheckKind::IntermediaryName && !policy.checks_intermediary_name() {
                continue;
            }
            aggregator.record(kind, check(listing, policy));
        }

        let verdict = aggregator.verdict();
        let reason = aggregator.reason();
        debug!(row = listing.row_number(), %verdict, "listing screened");

        let checks = aggregator.into_results().into_iter().collect();
        ScreeningOutcome {
            row_number: listing.row_number(),
            verdict,
            reason,
            checks,
            wage: WageSummary::from_assessment(listing, wage),
        }
    }

    /// Evaluates listings in input order.
    pub fn evaluate_all<'a, I>(&self, listings: I) -> Vec<ScreeningOutcome>
    where
        I: IntoIterator<Item = &'a JobListing>,
    {
        listings
            .into_iter()
            .map(|listing| self.evaluate(listing))
            .collect()
    }
}

/// Verdict and audit trail for one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningOutcome {
    pub row_number: usize,
    pub verdict: Verdict,
    pub reason: String,
    pub checks: BTreeMap<CheckKind, CheckResult>,
    pub wage: WageSummary,
}

impl ScreeningOutcome {
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.get(&kind)
    }

    pub fn check_verdict(&self, kind: CheckKind) -> Option<Verdict> {
        self.check(kind).map(|result| result.verdict)
    }
}

/// Wage columns reported alongside the verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WageSummary {
    /// Resolved region, or the raw region text when none was resolved.
    pub region_used: String,
    pub region_minimum_wage: Option<u32>,
    pub wage_unit_raw: Option<i64>,
    pub wage_lower_raw: Option<f64>,
    pub normalized_hourly: Option<f64>,
    pub provenance: String,
}

impl WageSummary {
    fn from_assessment(listing: &JobListing, assessment: WageAssessment) -> Self {
        let region_used = assessment
            .region
            .map(str::to_string)
            .unwrap_or_else(|| listing.text(ListingField::Region).to_string());

        Self {
            region_used,
            region_minimum_wage: assessment.minimum_wage,
            wage_unit_raw: assessment.unit_code,
            wage_lower_raw: assessment.lower_bound,
            normalized_hourly: assessment.normalized_hourly,
            provenance: assessment.provenance,
        }
    }

    pub fn normalized_hourly_label(&self) -> String {
        self.normalized_hourly
            .map(|hourly| format!("{hourly:.2}"))
            .unwrap_or_default()
    }

    pub fn wage_lower_label(&self) -> String {
        self.wage_lower_raw.map(format_number).unwrap_or_default()
    }
}
