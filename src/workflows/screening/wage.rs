use super::domain::{CheckResult, JobListing, ListingField, Verdict};
use super::policy::RulesetPolicy;
use super::resolver::{resolve_region, ResolvedRegion};
use super::rules::schema_gap;
use super::text::{parse_amount, parse_unit_code};
use super::wage_table::RegionWageTable;
use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: f64 = 8.0;
/// 8 hours over 20 working days.
pub const HOURS_PER_MONTH: f64 = 160.0;
pub const HOURS_PER_YEAR: f64 = 1920.0;

/// Pay-period granularity of a posted wage (`unitText`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageUnit {
    Hour,
    Day,
    Month,
    Year,
    Week,
}

impl WageUnit {
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Hour),
            2 => Some(Self::Day),
            3 => Some(Self::Month),
            4 => Some(Self::Year),
            5 => Some(Self::Week),
            _ => None,
        }
    }

    /// Hourly rate for `amount`, or `None` for weekly pay, which is never converted.
    pub fn to_hourly(self, amount: f64) -> Option<f64> {
        match self {
            Self::Hour => Some(amount),
            Self::Day => Some(amount / HOURS_PER_DAY),
            Self::Month => Some(amount / HOURS_PER_MONTH),
            Self::Year => Some(amount / HOURS_PER_YEAR),
            Self::Week => None,
        }
    }

    fn basis(self) -> &'static str {
        match self {
            Self::Hour => "HOUR: lower bound used as hourly rate",
            Self::Day => "DAY: converted at 8h/day",
            Self::Month => "MONTH: converted at 160h/month (8h x 20d)",
            Self::Year => "YEAR: converted at 1920h/year (160h x 12m)",
            Self::Week => "WEEK: not converted (manual review)",
        }
    }
}

/// Minimum-wage judgement for one listing, kept for audit columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WageAssessment {
    pub result: CheckResult,
    pub region: Option<&'static str>,
    pub minimum_wage: Option<u32>,
    pub unit_code: Option<i64>,
    pub lower_bound: Option<f64>,
    pub normalized_hourly: Option<f64>,
    pub provenance: String,
}

/// Compares posted wages with the regional minimum using fixed conversion constants.
#[derive(Debug, Clone, Copy)]
pub struct WageComplianceEngine<'a> {
    table: &'a RegionWageTable,
    policy: &'a dyn RulesetPolicy,
}

impl<'a> WageComplianceEngine<'a> {
    pub fn new(table: &'a RegionWageTable, policy: &'a dyn RulesetPolicy) -> Self {
        Self { table, policy }
    }

    pub fn assess(&self, listing: &JobListing) -> WageAssessment {
        let resolved = resolve_region(listing, self.table);
        let unit_code = parse_unit_code(listing.text(ListingField::WageUnit));
        let lower_bound = parse_amount(listing.text(ListingField::WageLowerBound));

        let mut assessment = WageAssessment {
            result: CheckResult::pass(),
            region: resolved.region,
            minimum_wage: None,
            unit_code,
            lower_bound,
            normalized_hourly: None,
            provenance: resolved.provenance.clone(),
        };

        let Some((region, minimum)) = self.minimum_for(&resolved) else {
            assessment.result = CheckResult::with_verdict(
                self.policy.unresolved_region_verdict(),
                "minimum wage not judged: region unknown",
            );
            return assessment;
        };
        assessment.region = Some(region);
        assessment.minimum_wage = Some(minimum);

        for field in [ListingField::WageUnit, ListingField::WageLowerBound] {
            if let Some(gap) = schema_gap(listing, field, self.policy) {
                assessment.result = gap;
                return assessment;
            }
        }

        let Some(code) = unit_code else {
            assessment.result = CheckResult::reject("minimum wage not judged: wage unit unknown");
            return assessment;
        };
        let Some(amount) = lower_bound else {
            assessment.result =
                CheckResult::reject("minimum wage not judged: wage lower bound unknown");
            return assessment;
        };

        let Some(unit) = WageUnit::from_code(code) else {
            assessment.provenance = format!("{} / unknown wage unit {code}", resolved.provenance);
            assessment.result =
                CheckResult::reject("minimum wage not judged: hourly rate not derivable");
            return assessment;
        };
        assessment.provenance = format!("{} / {}", resolved.provenance, unit.basis());

        let Some(hourly) = unit.to_hourly(amount) else {
            assessment.result =
                CheckResult::needs_review("minimum wage needs review: weekly pay unsupported");
            return assessment;
        };
        assessment.normalized_hourly = Some(hourly);

        if hourly >= f64::from(minimum) {
            assessment.result = CheckResult::pass();
        } else {
            assessment.result = CheckResult::reject(format!(
                "below minimum wage (normalized hourly {hourly:.2} < minimum {minimum})"
            ));
        }
        assessment
    }

    fn minimum_for(&self, resolved: &ResolvedRegion) -> Option<(&'static str, u32)> {
        let region = resolved.region?;
        self.table.get(region).map(|minimum| (region, minimum))
    }
}

impl WageAssessment {
    pub fn verdict(&self) -> Verdict {
        self.result.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::policy::RulesetVersion;

    fn tokyo(unit: &str, lower: &str) -> JobListing {
        JobListing::new(2)
            .with(ListingField::Region, "東京")
            .with(ListingField::WageUnit, unit)
            .with(ListingField::WageLowerBound, lower)
    }

    fn assess(listing: &JobListing) -> WageAssessment {
        let table = RegionWageTable::default();
        WageComplianceEngine::new(&table, RulesetVersion::Current.policy()).assess(listing)
    }

    #[test]
    fn hourly_wage_at_or_above_minimum_passes() {
        let assessment = assess(&tokyo("1", "1300"));
        assert!(assessment.result.is_pass());
        assert_eq!(assessment.normalized_hourly, Some(1300.0));
        assert_eq!(assessment.minimum_wage, Some(1226));
        assert_eq!(assessment.region, Some("東京"));

        assert!(assess(&tokyo("1", "1226")).result.is_pass());
    }

    #[test]
    fn daily_wage_is_normalized_before_comparison() {
        let assessment = assess(&tokyo("2", "8000"));
        assert_eq!(assessment.verdict(), Verdict::Reject);
        assert_eq!(assessment.normalized_hourly, Some(1000.0));
        assert!(assessment
            .result
            .reason
            .contains("normalized hourly 1000.00 < minimum 1226"));
        assert!(assessment.provenance.contains("DAY"));
    }

    #[test]
    fn monthly_and_annual_wages_use_fixed_hours() {
        let monthly = assess(&tokyo("3", "200000"));
        assert_eq!(monthly.normalized_hourly, Some(1250.0));
        assert!(monthly.result.is_pass());

        let annual = assess(&tokyo("4", "2304000"));
        assert_eq!(annual.normalized_hourly, Some(1200.0));
        assert_eq!(annual.verdict(), Verdict::Reject);
    }

    #[test]
    fn weekly_wage_always_needs_review() {
        for amount in ["1", "999999"] {
            let assessment = assess(&tokyo("5", amount));
            assert_eq!(assessment.verdict(), Verdict::NeedsReview);
            assert_eq!(assessment.normalized_hourly, None);
        }
    }

    #[test]
    fn unknown_or_missing_inputs_are_rejected() {
        assert_eq!(assess(&tokyo("", "1300")).verdict(), Verdict::Reject);
        assert_eq!(assess(&tokyo("1", "")).verdict(), Verdict::Reject);

        let unknown = assess(&tokyo("9", "1300"));
        assert_eq!(unknown.verdict(), Verdict::Reject);
        assert!(unknown.result.reason.contains("not derivable"));
    }

    #[test]
    fn unresolved_region_severity_depends_on_ruleset() {
        let listing = JobListing::new(2)
            .with(ListingField::WageUnit, "1")
            .with(ListingField::WageLowerBound, "2000");
        let table = RegionWageTable::default();

        let current = WageComplianceEngine::new(&table, RulesetVersion::Current.policy())
            .assess(&listing);
        assert_eq!(current.verdict(), Verdict::Reject);
        assert_eq!(current.minimum_wage, None);
        assert_eq!(current.provenance, "region unresolved");

        let initial = WageComplianceEngine::new(&table, RulesetVersion::Initial.policy())
            .assess(&listing);
        assert_eq!(initial.verdict(), Verdict::NeedsReview);
    }

    #[test]
    fn region_is_resolved_from_address_text() {
        let listing = JobListing::new(2)
            .with(ListingField::Region, "")
            .with(ListingField::WorkAddress, "大阪市北区梅田")
            .with(ListingField::WageUnit, "1")
            .with(ListingField::WageLowerBound, "1177");
        let assessment = assess(&listing);
        assert!(assessment.result.is_pass());
        assert_eq!(assessment.region, Some("大阪"));
        assert!(assessment.provenance.starts_with("region extracted from text #1"));
    }

    #[test]
    fn absent_wage_column_is_reported_for_review_under_current_rules() {
        let listing = JobListing::new(2)
            .with(ListingField::Region, "東京")
            .with(ListingField::WageLowerBound, "1300");
        assert_eq!(assess(&listing).verdict(), Verdict::NeedsReview);
    }

    #[test]
    fn overridden_minimum_is_used() {
        let table = RegionWageTable::default()
            .with_edits(["東京=1400"])
            .expect("edit applies");
        let assessment = WageComplianceEngine::new(&table, RulesetVersion::Current.policy())
            .assess(&tokyo("1", "1300"));
        assert_eq!(assessment.verdict(), Verdict::Reject);
        assert_eq!(assessment.minimum_wage, Some(1400));
    }
}
