pub mod views;
mod xlsx;

pub use xlsx::{
    ReportError, ScreeningWorkbookWriter, NEEDS_REVIEW_SHEET, REJECTS_SHEET, RESULTS_SHEET,
};

use super::domain::{CheckKind, JobListing, Verdict};
use super::engine::ScreeningOutcome;
use super::import::ListingDataset;
use super::policy::RulesetVersion;
use chrono::{DateTime, TimeZone};
use views::{CheckVerdictEntry, ScreeningOutcomeView, ScreeningReportSummary, VerdictCountEntry};

/// Outcomes of one screening run, aligned with the dataset rows they came from.
#[derive(Debug, Clone)]
pub struct ScreeningReport {
    ruleset: RulesetVersion,
    dataset: ListingDataset,
    outcomes: Vec<ScreeningOutcome>,
}

/// A dataset row together with its screening outcome.
#[derive(Debug, Clone, Copy)]
pub struct ReportRow<'a> {
    pub listing: &'a JobListing,
    pub cells: &'a [String],
    pub outcome: &'a ScreeningOutcome,
}

impl ScreeningReport {
    pub fn new(
        ruleset: RulesetVersion,
        dataset: ListingDataset,
        outcomes: Vec<ScreeningOutcome>,
    ) -> Self {
        debug_assert_eq!(dataset.len(), outcomes.len());
        Self {
            ruleset,
            dataset,
            outcomes,
        }
    }

    pub fn ruleset(&self) -> RulesetVersion {
        self.ruleset
    }

    pub fn dataset(&self) -> &ListingDataset {
        &self.dataset
    }

    pub fn outcomes(&self) -> &[ScreeningOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = ReportRow<'_>> {
        self.dataset
            .listings()
            .iter()
            .zip(self.dataset.rows())
            .zip(&self.outcomes)
            .map(|((listing, cells), outcome)| ReportRow {
                listing,
                cells: cells.as_slice(),
                outcome,
            })
    }

    pub fn rows_with(&self, verdict: Verdict) -> impl Iterator<Item = ReportRow<'_>> {
        self.rows()
            .filter(move |row| row.outcome.verdict == verdict)
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.verdict == verdict)
            .count()
    }

    pub fn rejects(&self) -> Vec<&ScreeningOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.verdict == Verdict::Reject)
            .collect()
    }

    pub fn needs_review(&self) -> Vec<&ScreeningOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.verdict == Verdict::NeedsReview)
            .collect()
    }

    pub fn summary(&self) -> ScreeningReportSummary {
        let counts = Verdict::ordered()
            .into_iter()
            .map(|verdict| VerdictCountEntry {
                verdict,
                verdict_label: verdict.label(),
                count: self.count(verdict),
            })
            .collect();

        let outcomes = self.outcomes.iter().map(outcome_view).collect();

        ScreeningReportSummary {
            ruleset: self.ruleset,
            ruleset_label: self.ruleset.label(),
            total: self.outcomes.len(),
            counts,
            outcomes,
        }
    }
}

/// Timestamped workbook name for a run, e.g. `screening_20240401_093000.xlsx`.
pub fn default_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("screening_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

fn outcome_view(outcome: &ScreeningOutcome) -> ScreeningOutcomeView {
    let checks = CheckKind::ordered()
        .into_iter()
        .filter_map(|check| {
            outcome
                .check_verdict(check)
                .map(|verdict| CheckVerdictEntry {
                    check,
                    check_label: check.label(),
                    verdict,
                })
        })
        .collect();

    ScreeningOutcomeView {
        row_number: outcome.row_number,
        verdict: outcome.verdict,
        verdict_label: outcome.verdict.label(),
        reason: outcome.reason.clone(),
        checks,
        region_used: outcome.wage.region_used.clone(),
        region_minimum_wage: outcome.wage.region_minimum_wage,
        wage_unit_raw: outcome.wage.wage_unit_raw,
        wage_lower_raw: outcome.wage.wage_lower_raw,
        normalized_hourly: outcome.wage.normalized_hourly,
        wage_provenance: outcome.wage.provenance.clone(),
    }
}
