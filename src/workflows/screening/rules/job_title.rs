use super::super::domain::{CheckResult, JobListing, ListingField};
use super::super::policy::{RulesetPolicy, TitleReviewCheck};
use super::super::regions::find_region;
use super::super::text::first_token_in;
use super::schema_gap;
use regex::Regex;
use std::sync::OnceLock;

/// Recruitment, employment, shift, benefit and seniority words that do not belong in a title.
pub(crate) const CONDITION_TOKENS: [&str; 44] = [
    "募集",
    "急募",
    "大募集",
    "積極採用",
    "オープニング",
    "新規",
    "正社員",
    "契約社員",
    "派遣社員",
    "アルバイト",
    "パート",
    "業務委託",
    "夜勤",
    "日勤",
    "深夜",
    "早朝",
    "交替",
    "シフト",
    "残業",
    "未経験",
    "経験不問",
    "学歴不問",
    "資格不問",
    "○○不問",
    "歓迎",
    "優遇",
    "高収入",
    "日払い",
    "週払い",
    "即日",
    "短期",
    "長期",
    "寮",
    "社宅",
    "在宅",
    "リモート",
    "テレワーク",
    "マネージャー",
    "リーダー",
    "部長",
    "課長",
    "係長",
    "主任",
    "候補",
];

pub(crate) const FACILITY_TOKENS: [&str; 19] = [
    "病院",
    "クリニック",
    "医院",
    "歯科",
    "学校",
    "大学",
    "専門学校",
    "保育園",
    "幼稚園",
    "ホテル",
    "旅館",
    "空港",
    "センター",
    "工場",
    "倉庫",
    "店舗",
    "営業所",
    "本社",
    "支店",
];

/// Locality suffixes for ward, city, town, village and station.
const PLACE_SUFFIXES: [char; 5] = ['区', '市', '町', '村', '駅'];

/// Decimal digits in any script (`2`, `２`); numeral letters such as `Ⅱ`, `①` or `〇` are not digits.
fn digit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d").expect("digit pattern is valid"))
}

fn looks_like_place(title: &str) -> bool {
    title.chars().count() >= 3 && title.chars().any(|c| PLACE_SUFFIXES.contains(&c))
}

pub(crate) fn check_job_title(listing: &JobListing, policy: &dyn RulesetPolicy) -> CheckResult {
    if let Some(gap) = schema_gap(listing, ListingField::JobTitle, policy) {
        return gap;
    }

    let title = listing.text(ListingField::JobTitle);
    if title.is_empty() {
        return CheckResult::reject("job title blank");
    }

    if let Some(region) = find_region(title) {
        return CheckResult::reject(format!("job title contains region name {region}"));
    }
    if looks_like_place(title) {
        return CheckResult::reject(
            "job title contains a place name (ward/city/town/village/station)",
        );
    }

    if let Some(token) = first_token_in(title, &CONDITION_TOKENS) {
        return CheckResult::needs_review(format!(
            "job title may mix in hiring conditions ({token})"
        ));
    }

    for check in policy.title_review_checks() {
        match check {
            TitleReviewCheck::Digits => {
                if digit_pattern().is_match(title) {
                    return CheckResult::needs_review(
                        "job title contains digits (possible internal code)",
                    );
                }
            }
            TitleReviewCheck::FacilityName => {
                if let Some(token) = first_token_in(title, &FACILITY_TOKENS) {
                    return CheckResult::needs_review(format!(
                        "job title contains a facility name ({token})"
                    ));
                }
            }
        }
    }

    CheckResult::pass()
}
