use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;
use tempfile::TempDir;

use crate::workflows::screening::domain::{JobListing, ListingField};
use crate::workflows::screening::{
    screening_router, RegionWageTable, RulesetVersion, ScreeningConfig, ScreeningEngine,
    ScreeningService, WageTableStore,
};

/// Cells in `ListingField::ordered()` order.
pub(super) type ExportRow = [&'static str; 11];

pub(super) const COMPLIANT_ROW: ExportRow = [
    "サンプル株式会社",
    "",
    "jobs@example.co.jp",
    "正社員",
    "一般事務",
    "新宿区",
    "東京",
    "東京都新宿区西新宿1-1",
    "160",
    "1",
    "1300",
];

pub(super) const LOW_WAGE_ROW: ExportRow = [
    "サンプル物流株式会社",
    "",
    "staff@example.co.jp",
    "アルバイト",
    "軽作業スタッフ",
    "北区",
    "大阪",
    "大阪府大阪市北区梅田1-1",
    "",
    "1",
    "900",
];

pub(super) const REVIEW_ROW: ExportRow = [
    "サンプル商事株式会社",
    "",
    "hr@example.com",
    "契約社員",
    "未経験歓迎の営業事務",
    "中区",
    "",
    "愛知県名古屋市中区栄3-1",
    "",
    "3",
    "250000",
];

pub(super) fn compliant_listing() -> JobListing {
    listing_from(2, &COMPLIANT_ROW)
}

pub(super) fn listing_from(row_number: usize, cells: &ExportRow) -> JobListing {
    ListingField::ordered()
        .into_iter()
        .zip(cells.iter())
        .fold(JobListing::new(row_number), |listing, (field, value)| {
            listing.with(field, *value)
        })
}

pub(super) fn export_csv(rows: &[ExportRow]) -> String {
    let header: Vec<&str> = ListingField::ordered()
        .iter()
        .map(|field| field.header())
        .collect();

    let mut lines = vec![header.join(",")];
    lines.extend(rows.iter().map(|row| row.join(",")));
    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

pub(super) fn engine(ruleset: RulesetVersion) -> ScreeningEngine {
    ScreeningEngine::new(ScreeningConfig::new(ruleset, RegionWageTable::default()))
}

pub(super) fn engine_with_table(
    ruleset: RulesetVersion,
    table: RegionWageTable,
) -> ScreeningEngine {
    ScreeningEngine::new(ScreeningConfig::new(ruleset, table))
}

/// Service backed by a wage table file inside a fresh temp dir.
pub(super) fn build_service() -> (ScreeningService, TempDir) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = WageTableStore::new(dir.path().join("config").join("minimum_wages.json"));
    (ScreeningService::new(store, RulesetVersion::Current), dir)
}

pub(super) fn screening_router_with_service(service: ScreeningService) -> axum::Router {
    screening_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
