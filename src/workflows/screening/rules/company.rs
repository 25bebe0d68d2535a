use super::super::domain::{CheckResult, JobListing, ListingField};
use super::super::policy::{RulesetPolicy, UNDISCLOSED};
use super::super::text::first_token_in;
use super::schema_gap;

/// Abbreviated corporate-form marks that must be spelled out in published names.
pub(crate) const SPECIAL_COMPANY_MARKS: [&str; 6] = ["㈱", "（株）", "(株)", "㈲", "（有）", "(有)"];

pub(crate) fn check_company_name(listing: &JobListing, policy: &dyn RulesetPolicy) -> CheckResult {
    if let Some(gap) = schema_gap(listing, ListingField::EmployerName, policy) {
        return gap;
    }

    let value = listing.text(ListingField::EmployerName);
    if value.is_empty() {
        return CheckResult::reject("employer name blank");
    }
    match first_token_in(value, &SPECIAL_COMPANY_MARKS) {
        Some(mark) => CheckResult::reject(format!("employer name contains special mark {mark}")),
        None => CheckResult::pass(),
    }
}

/// The intermediary is optional, so blank passes.
pub(crate) fn check_intermediary_name(
    listing: &JobListing,
    _policy: &dyn RulesetPolicy,
) -> CheckResult {
    let value = listing.text(ListingField::IntermediaryName);
    match first_token_in(value, &SPECIAL_COMPANY_MARKS) {
        Some(mark) => {
            CheckResult::reject(format!("intermediary name contains special mark {mark}"))
        }
        None => CheckResult::pass(),
    }
}

pub(crate) fn check_undisclosed_employer(
    listing: &JobListing,
    policy: &dyn RulesetPolicy,
) -> CheckResult {
    if listing.text(ListingField::EmployerName) != UNDISCLOSED {
        return CheckResult::pass();
    }

    let intermediary = listing.text(ListingField::IntermediaryName);
    if intermediary.is_empty() {
        return CheckResult::reject("undisclosed employer without intermediary name");
    }

    policy.undisclosed_employer(intermediary, listing.text(ListingField::EmploymentType))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::domain::Verdict;
    use crate::workflows::screening::policy::{RulesetVersion, DISPATCH};

    fn current() -> &'static dyn RulesetPolicy {
        RulesetVersion::Current.policy()
    }

    fn employer(name: &str) -> JobListing {
        JobListing::new(2).with(ListingField::EmployerName, name)
    }

    #[test]
    fn company_name_rejects_bracketed_corporate_marks() {
        assert_eq!(
            check_company_name(&employer("㈱サンプル"), current()).verdict,
            Verdict::Reject
        );
        assert_eq!(
            check_company_name(&employer("サンプル(有)"), current()).verdict,
            Verdict::Reject
        );
        assert_eq!(
            check_company_name(&employer("（株）サンプル"), current()).verdict,
            Verdict::Reject
        );
        assert!(check_company_name(&employer("サンプル株式会社"), current()).is_pass());
        assert_eq!(
            check_company_name(&employer(""), current()),
            CheckResult::reject("employer name blank")
        );
    }

    #[test]
    fn intermediary_name_allows_blank() {
        let blank = JobListing::new(2);
        assert!(check_intermediary_name(&blank, current()).is_pass());

        let marked = JobListing::new(2).with(ListingField::IntermediaryName, "㈲人材センター");
        assert_eq!(
            check_intermediary_name(&marked, current()).verdict,
            Verdict::Reject
        );
    }

    #[test]
    fn disclosure_only_applies_to_undisclosed_employers() {
        let listing = employer("サンプル株式会社").with(ListingField::EmploymentType, DISPATCH);
        assert!(check_undisclosed_employer(&listing, current()).is_pass());
    }

    #[test]
    fn undisclosed_employer_needs_an_intermediary() {
        let listing = employer(UNDISCLOSED).with(ListingField::IntermediaryName, " ");
        assert_eq!(
            check_undisclosed_employer(&listing, current()),
            CheckResult::reject("undisclosed employer without intermediary name")
        );
    }

    #[test]
    fn dispatch_listing_passes_with_named_intermediary_under_current_rules() {
        let listing = employer(UNDISCLOSED)
            .with(ListingField::IntermediaryName, "サンプル人材")
            .with(ListingField::EmploymentType, DISPATCH);

        assert!(check_undisclosed_employer(&listing, current()).is_pass());
        assert_eq!(
            check_undisclosed_employer(&listing, RulesetVersion::Initial.policy()).verdict,
            Verdict::Reject
        );
    }

    #[test]
    fn undisclosed_intermediary_is_rejected_regardless_of_employment() {
        for employment in [DISPATCH, "正社員"] {
            let listing = employer(UNDISCLOSED)
                .with(ListingField::IntermediaryName, UNDISCLOSED)
                .with(ListingField::EmploymentType, employment);
            assert_eq!(
                check_undisclosed_employer(&listing, current()).verdict,
                Verdict::Reject
            );
        }
    }
}
