use super::super::domain::{CheckKind, Verdict};
use super::super::policy::RulesetVersion;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VerdictCountEntry {
    pub verdict: Verdict,
    pub verdict_label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckVerdictEntry {
    pub check: CheckKind,
    pub check_label: &'static str,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcomeView {
    pub row_number: usize,
    pub verdict: Verdict,
    pub verdict_label: &'static str,
    pub reason: String,
    pub checks: Vec<CheckVerdictEntry>,
    pub region_used: String,
    pub region_minimum_wage: Option<u32>,
    pub wage_unit_raw: Option<i64>,
    pub wage_lower_raw: Option<f64>,
    pub normalized_hourly: Option<f64>,
    pub wage_provenance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReportSummary {
    pub ruleset: RulesetVersion,
    pub ruleset_label: &'static str,
    pub total: usize,
    pub counts: Vec<VerdictCountEntry>,
    pub outcomes: Vec<ScreeningOutcomeView>,
}
