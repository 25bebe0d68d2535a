use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Screening verdict. Variant order is the severity order used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Pass,
    NeedsReview,
    Reject,
}

impl Verdict {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pass, Self::NeedsReview, Self::Reject]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::NeedsReview => "NEEDS_REVIEW",
            Self::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a single check. The reason is empty exactly when the verdict is `Pass`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub verdict: Verdict,
    pub reason: String,
}

impl CheckResult {
    pub fn pass() -> Self {
        Self {
            verdict: Verdict::Pass,
            reason: String::new(),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Reject,
            reason: reason.into(),
        }
    }

    pub fn needs_review(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::NeedsReview,
            reason: reason.into(),
        }
    }

    pub(crate) fn with_verdict(verdict: Verdict, reason: impl Into<String>) -> Self {
        match verdict {
            Verdict::Pass => Self::pass(),
            other => Self {
                verdict: other,
                reason: reason.into(),
            },
        }
    }

    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// Individual checks contributing to a listing's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    WageCompliance,
    RequiredFields,
    EmailFormat,
    EmploymentType,
    JobTitle,
    CompanyName,
    IntermediaryName,
    UndisclosedEmployer,
    Locality,
}

impl CheckKind {
    /// Order in which reasons are concatenated; wage compliance always leads.
    pub const fn ordered() -> [Self; 9] {
        [
            Self::WageCompliance,
            Self::RequiredFields,
            Self::EmailFormat,
            Self::EmploymentType,
            Self::JobTitle,
            Self::CompanyName,
            Self::IntermediaryName,
            Self::UndisclosedEmployer,
            Self::Locality,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WageCompliance => "Minimum wage",
            Self::RequiredFields => "Required fields",
            Self::EmailFormat => "Application email",
            Self::EmploymentType => "Employment type",
            Self::JobTitle => "Job title",
            Self::CompanyName => "Employer name format",
            Self::IntermediaryName => "Intermediary name format",
            Self::UndisclosedEmployer => "Undisclosed employer",
            Self::Locality => "Locality",
        }
    }
}

/// Semantic columns of a job-listing export consumed by the screener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingField {
    EmployerName,
    IntermediaryName,
    Email,
    EmploymentType,
    JobTitle,
    Locality,
    Region,
    WorkAddress,
    MonthlyHours,
    WageUnit,
    WageLowerBound,
}

impl ListingField {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::EmployerName,
            Self::IntermediaryName,
            Self::Email,
            Self::EmploymentType,
            Self::JobTitle,
            Self::Locality,
            Self::Region,
            Self::WorkAddress,
            Self::MonthlyHours,
            Self::WageUnit,
            Self::WageLowerBound,
        ]
    }

    /// Fields every listing must carry before publication.
    pub const fn required() -> [Self; 7] {
        [
            Self::EmployerName,
            Self::EmploymentType,
            Self::JobTitle,
            Self::Email,
            Self::Locality,
            Self::WageUnit,
            Self::WageLowerBound,
        ]
    }

    /// Column header used by the listing export.
    pub const fn header(self) -> &'static str {
        match self {
            Self::EmployerName => "就業先会社名",
            Self::IntermediaryName => "紹介元会社名",
            Self::Email => "応募先メールアドレス",
            Self::EmploymentType => "雇用形態",
            Self::JobTitle => "職種",
            Self::Locality => "市区町村（addressLocality）",
            Self::Region => "都道府県（addressRegion）",
            Self::WorkAddress => "勤務地住所",
            Self::MonthlyHours => "勤務時間/月平均所定労働時間",
            Self::WageUnit => "給与形態（unitText）",
            Self::WageLowerBound => "給与下限（minValue）",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EmployerName => "employer name",
            Self::IntermediaryName => "intermediary name",
            Self::Email => "application email",
            Self::EmploymentType => "employment type",
            Self::JobTitle => "job title",
            Self::Locality => "locality",
            Self::Region => "region",
            Self::WorkAddress => "work address",
            Self::MonthlyHours => "monthly hours",
            Self::WageUnit => "wage unit",
            Self::WageLowerBound => "wage lower bound",
        }
    }
}

/// One row of a listing export.
///
/// A field missing from `values` means its column is absent from the dataset; a present
/// field with blank text means the cell is empty for this row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    row_number: usize,
    values: BTreeMap<ListingField, String>,
}

impl JobListing {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: ListingField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: ListingField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Sheet row number of the listing, counting the header as row 1.
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn has_column(&self, field: ListingField) -> bool {
        self.values.contains_key(&field)
    }

    /// Trimmed cell text; empty when the column is absent or the cell is blank.
    pub fn text(&self, field: ListingField) -> &str {
        self.values
            .get(&field)
            .map(|value| value.trim())
            .unwrap_or("")
    }

    pub fn is_blank(&self, field: ListingField) -> bool {
        self.text(field).is_empty()
    }
}
