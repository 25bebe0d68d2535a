use super::super::domain::{CheckResult, JobListing, ListingField, Verdict};
use super::super::policy::RulesetPolicy;
use super::super::text::{has_garbled_text, split_emails};
use super::schema_gap;
use regex::Regex;
use std::sync::OnceLock;

/// Employment-type labels accepted verbatim.
pub(crate) const ALLOWED_EMPLOYMENT_TYPES: [&str; 14] = [
    "正社員",
    "契約社員",
    "派遣社員",
    "パート",
    "アルバイト",
    "アルバイト・パート",
    "アルバイト/パート",
    "アルバイト／パート",
    "アルバイト、パート",
    "パート・アルバイト",
    "パート/アルバイト",
    "パート／アルバイト",
    "パート、アルバイト",
    "業務委託",
];

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

pub(crate) fn check_required_fields(
    listing: &JobListing,
    policy: &dyn RulesetPolicy,
) -> CheckResult {
    let mut absent = Vec::new();
    let mut blank = Vec::new();

    for field in ListingField::required() {
        if !listing.has_column(field) && !policy.absent_columns_are_blank() {
            absent.push(field.header());
        } else if listing.is_blank(field) {
            blank.push(field.header());
        }
    }

    let mut verdict = Verdict::Pass;
    let mut reasons = Vec::new();
    if !blank.is_empty() {
        verdict = verdict.max(Verdict::Reject);
        reasons.push(format!("required field blank: {}", blank.join(", ")));
    }
    if !absent.is_empty() {
        verdict = verdict.max(Verdict::NeedsReview);
        reasons.push(format!("required column missing: {}", absent.join(", ")));
    }

    CheckResult::with_verdict(verdict, reasons.join("; "))
}

pub(crate) fn check_email(listing: &JobListing, policy: &dyn RulesetPolicy) -> CheckResult {
    if let Some(gap) = schema_gap(listing, ListingField::Email, policy) {
        return gap;
    }

    let addresses = split_emails(listing.text(ListingField::Email));
    if addresses.is_empty() {
        return CheckResult::reject("application email blank");
    }

    match addresses
        .into_iter()
        .find(|address| !email_pattern().is_match(address))
    {
        Some(invalid) => CheckResult::reject(format!("malformed email: {invalid}")),
        None => CheckResult::pass(),
    }
}

pub(crate) fn check_employment_type(
    listing: &JobListing,
    policy: &dyn RulesetPolicy,
) -> CheckResult {
    if let Some(gap) = schema_gap(listing, ListingField::EmploymentType, policy) {
        return gap;
    }

    let value = listing.text(ListingField::EmploymentType);
    if value.is_empty() {
        return CheckResult::reject("employment type blank");
    }
    if !ALLOWED_EMPLOYMENT_TYPES.contains(&value) {
        return CheckResult::reject(format!("employment type not in allowed labels: {value}"));
    }
    CheckResult::pass()
}

pub(crate) fn check_locality(listing: &JobListing, policy: &dyn RulesetPolicy) -> CheckResult {
    if let Some(gap) = schema_gap(listing, ListingField::Locality, policy) {
        return gap;
    }

    let value = listing.text(ListingField::Locality);
    if value.is_empty() {
        return CheckResult::reject("locality blank");
    }
    if has_garbled_text(value) {
        return CheckResult::reject("locality may be garbled");
    }
    CheckResult::pass()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::policy::RulesetVersion;

    fn current() -> &'static dyn RulesetPolicy {
        RulesetVersion::Current.policy()
    }

    fn with_email(value: &str) -> JobListing {
        JobListing::new(2).with(ListingField::Email, value)
    }

    #[test]
    fn email_accepts_plus_addressing_and_subdomains() {
        assert!(check_email(&with_email("a.b+c@example.co.jp"), current()).is_pass());
        assert!(check_email(&with_email("hr@x.jp、jobs@y.com"), current()).is_pass());
    }

    #[test]
    fn email_rejects_any_bad_segment() {
        let result = check_email(&with_email("not-an-email"), current());
        assert_eq!(result.verdict, Verdict::Reject);
        assert!(result.reason.contains("not-an-email"));

        let result = check_email(&with_email("a@b.com, bad"), current());
        assert_eq!(result.verdict, Verdict::Reject);
        assert!(result.reason.ends_with("bad"));

        assert_eq!(
            check_email(&with_email("user@localhost"), current()).verdict,
            Verdict::Reject
        );
        assert_eq!(
            check_email(&with_email("ユーザー@example.jp"), current()).verdict,
            Verdict::Reject
        );
    }

    #[test]
    fn email_blank_after_split_is_rejected() {
        let result = check_email(&with_email(" ; 、 "), current());
        assert_eq!(result, CheckResult::reject("application email blank"));
    }

    #[test]
    fn employment_type_is_exact_membership() {
        let listing = |value: &str| JobListing::new(2).with(ListingField::EmploymentType, value);
        assert!(check_employment_type(&listing("アルバイト"), current()).is_pass());
        assert!(check_employment_type(&listing("パート／アルバイト"), current()).is_pass());
        assert_eq!(
            check_employment_type(&listing("インターン"), current()).verdict,
            Verdict::Reject
        );
        assert_eq!(
            check_employment_type(&listing("アルバイト・パート・派遣"), current()).verdict,
            Verdict::Reject
        );
        assert_eq!(
            check_employment_type(&listing(""), current()),
            CheckResult::reject("employment type blank")
        );
    }

    #[test]
    fn locality_detects_blank_and_garbling() {
        let listing = |value: &str| JobListing::new(2).with(ListingField::Locality, value);
        assert!(check_locality(&listing("札幌市中央区"), current()).is_pass());
        assert_eq!(
            check_locality(&listing(" "), current()),
            CheckResult::reject("locality blank")
        );
        assert_eq!(
            check_locality(&listing("札幌 市"), current()).verdict,
            Verdict::Reject
        );
        assert_eq!(
            check_locality(&listing("驥幌市"), current()).verdict,
            Verdict::Reject
        );
    }

    #[test]
    fn absent_column_is_a_schema_gap_under_current_rules() {
        let listing = JobListing::new(2);
        let result = check_locality(&listing, current());
        assert_eq!(result.verdict, Verdict::NeedsReview);
        assert!(result.reason.contains(ListingField::Locality.header()));

        let result = check_locality(&listing, RulesetVersion::Initial.policy());
        assert_eq!(result, CheckResult::reject("locality blank"));
    }

    fn complete_listing() -> JobListing {
        ListingField::required()
            .into_iter()
            .fold(JobListing::new(2), |listing, field| listing.with(field, "x"))
    }

    #[test]
    fn required_fields_distinguish_missing_column_from_blank_value() {
        assert!(check_required_fields(&complete_listing(), current()).is_pass());

        let blank = complete_listing().with(ListingField::Email, "  ");
        let result = check_required_fields(&blank, current());
        assert_eq!(result.verdict, Verdict::Reject);
        assert!(result.reason.starts_with("required field blank"));

        let mut missing = JobListing::new(2);
        for field in ListingField::required() {
            if field != ListingField::WageUnit {
                missing.insert(field, "x");
            }
        }
        let result = check_required_fields(&missing, current());
        assert_eq!(result.verdict, Verdict::NeedsReview);
        assert_eq!(
            result.reason,
            format!("required column missing: {}", ListingField::WageUnit.header())
        );

        let initial = check_required_fields(&missing, RulesetVersion::Initial.policy());
        assert_eq!(initial.verdict, Verdict::Reject);
    }

    #[test]
    fn required_fields_report_both_gaps_at_the_most_severe_verdict() {
        let mut listing = JobListing::new(2).with(ListingField::EmployerName, "");
        for field in ListingField::required().into_iter().skip(1).take(3) {
            listing.insert(field, "x");
        }

        let result = check_required_fields(&listing, current());
        assert_eq!(result.verdict, Verdict::Reject);
        assert!(result.reason.contains("required field blank: 就業先会社名"));
        assert!(result.reason.contains("required column missing"));
    }
}
