//! Field validators. Each one inspects a single semantic field and never looks at the
//! results of the others.

mod company;
mod fields;
mod job_title;

pub(crate) use company::{check_company_name, check_intermediary_name, check_undisclosed_employer};
pub(crate) use fields::{check_email, check_employment_type, check_locality, check_required_fields};
pub(crate) use job_title::check_job_title;

use super::domain::{CheckResult, JobListing, ListingField};
use super::policy::RulesetPolicy;

/// Reports a column missing from the dataset for manual review, unless the ruleset reads
/// missing columns as blank cells.
pub(crate) fn schema_gap(
    listing: &JobListing,
    field: ListingField,
    policy: &dyn RulesetPolicy,
) -> Option<CheckResult> {
    if listing.has_column(field) || policy.absent_columns_are_blank() {
        return None;
    }

    Some(CheckResult::needs_review(format!(
        "column not in dataset: {}",
        field.header()
    )))
}
