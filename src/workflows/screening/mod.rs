//! Pre-publication screening of job-listing exports.
//!
//! Each listing runs through independent field validators and the minimum-wage engine; the
//! aggregator folds their results into PASS, NEEDS_REVIEW or REJECT with a combined reason.

mod aggregate;
pub mod domain;
mod engine;
pub mod import;
pub mod policy;
pub mod regions;
mod resolver;
pub mod report;
pub mod router;
mod rules;
pub mod service;
mod text;
mod wage;
mod wage_store;
mod wage_table;

#[cfg(test)]
mod tests;

pub use aggregate::{VerdictAggregator, REASON_SEPARATOR};
pub use domain::{CheckKind, CheckResult, JobListing, ListingField, Verdict};
pub use engine::{ScreeningConfig, ScreeningEngine, ScreeningOutcome, WageSummary};
pub use import::{ImportError, ListingDataset, ListingImporter, SourceRow};
pub use policy::{RulesetPolicy, RulesetVersion, UnknownRuleset};
pub use report::{default_file_name, ReportError, ScreeningReport, ScreeningWorkbookWriter};
pub use resolver::{resolve_region, ResolvedRegion, REGION_SEARCH_FIELDS};
pub use router::screening_router;
pub use service::{ScreeningService, ScreeningServiceError};
pub use wage::{WageAssessment, WageComplianceEngine, WageUnit};
pub use wage_store::WageTableStore;
pub use wage_table::{RegionWageTable, WageTableError, WageTableSnapshot};
