use super::regions::{self, DEFAULT_MINIMUM_WAGES, REGION_COUNT};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Errors raised while editing or persisting the minimum-wage table.
#[derive(Debug, thiserror::Error)]
pub enum WageTableError {
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
    #[error("minimum wage for {region} must be a positive integer (found '{value}')")]
    InvalidWage { region: String, value: String },
    #[error("edit '{0}' must look like region=value (e.g. 東京=1226)")]
    MalformedEdit(String),
    #[error("failed to write wage table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode wage table: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimum hourly wage per region. Always holds every region with a positive wage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionWageTable {
    wages: [(&'static str, u32); REGION_COUNT],
}

impl Default for RegionWageTable {
    fn default() -> Self {
        Self {
            wages: DEFAULT_MINIMUM_WAGES,
        }
    }
}

impl RegionWageTable {
    pub fn get(&self, region: &str) -> Option<u32> {
        self.wages
            .iter()
            .find(|(name, _)| *name == region)
            .map(|(_, wage)| *wage)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.get(region).is_some()
    }

    /// Entries in canonical region order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.wages.iter().copied()
    }

    pub fn set(&mut self, region: &str, wage: u32) -> Result<(), WageTableError> {
        if wage == 0 {
            return Err(WageTableError::InvalidWage {
                region: region.to_string(),
                value: wage.to_string(),
            });
        }

        let slot = self
            .wages
            .iter_mut()
            .find(|(name, _)| *name == region)
            .ok_or_else(|| WageTableError::UnknownRegion(region.to_string()))?;
        slot.1 = wage;
        Ok(())
    }

    /// Applies `region=value` edits, returning the edited copy. Nothing is applied when
    /// any edit is invalid.
    pub fn with_edits<I, S>(&self, edits: I) -> Result<Self, WageTableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut edited = self.clone();
        for raw in edits {
            let line = raw.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let (region, value) = line
                .split_once('=')
                .ok_or_else(|| WageTableError::MalformedEdit(line.to_string()))?;
            let region = region.trim();
            let value = value.trim();

            if !regions::is_region(region) {
                return Err(WageTableError::UnknownRegion(region.to_string()));
            }

            let wage = coerce_text(value).ok_or_else(|| WageTableError::InvalidWage {
                region: region.to_string(),
                value: value.to_string(),
            })?;
            edited.set(region, wage)?;
        }
        Ok(edited)
    }

    /// Defaults merged with a persisted override document.
    ///
    /// Unknown regions are ignored. Returns `None` when the document is not an object or any
    /// known region carries a value that is not a positive integer.
    pub fn merged_with_override(overrides: &Value) -> Option<Self> {
        let object = overrides.as_object()?;
        let mut merged = Self::default();

        for (region, value) in object {
            let Some(canonical) = regions::canonical(region) else {
                continue;
            };
            let wage = coerce_value(value)?;
            merged.set(canonical, wage).ok()?;
        }

        Some(merged)
    }

    pub fn to_document(&self) -> Value {
        let map: Map<String, Value> = self
            .entries()
            .map(|(region, wage)| (region.to_string(), Value::from(wage)))
            .collect();
        Value::Object(map)
    }

    pub fn snapshot(&self) -> WageTableSnapshot {
        WageTableSnapshot {
            wages: self
                .entries()
                .map(|(region, wage)| (region.to_string(), wage))
                .collect(),
        }
    }
}

/// Serializable view of the table for reports and HTTP responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WageTableSnapshot {
    pub wages: BTreeMap<String, u32>,
}

fn coerce_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number.as_f64().and_then(positive_truncated),
        Value::String(text) => coerce_text(text),
        _ => None,
    }
}

fn coerce_text(text: &str) -> Option<u32> {
    text.trim().parse::<f64>().ok().and_then(positive_truncated)
}

fn positive_truncated(amount: f64) -> Option<u32> {
    if !amount.is_finite() {
        return None;
    }
    let truncated = amount.trunc();
    if truncated < 1.0 || truncated > u32::MAX as f64 {
        return None;
    }
    Some(truncated as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_table_covers_every_region() {
        let table = RegionWageTable::default();
        assert_eq!(table.entries().count(), REGION_COUNT);
        assert_eq!(table.get("東京"), Some(1226));
        assert_eq!(table.get("Tokyo"), None);
    }

    #[test]
    fn override_merges_by_key_and_ignores_unknown_regions() {
        let merged = RegionWageTable::merged_with_override(&json!({
            "東京": 1300,
            "大阪": "1200",
            "沖縄": 1050.7,
            "Atlantis": 1,
        }))
        .expect("override applies");

        assert_eq!(merged.get("東京"), Some(1300));
        assert_eq!(merged.get("大阪"), Some(1200));
        assert_eq!(merged.get("沖縄"), Some(1050));
        assert_eq!(merged.get("北海道"), Some(1075));
    }

    #[test]
    fn override_with_invalid_value_is_refused() {
        assert!(RegionWageTable::merged_with_override(&json!({ "東京": 0 })).is_none());
        assert!(RegionWageTable::merged_with_override(&json!({ "東京": -5 })).is_none());
        assert!(RegionWageTable::merged_with_override(&json!({ "東京": "abc" })).is_none());
        assert!(RegionWageTable::merged_with_override(&json!({ "東京": null })).is_none());
        assert!(RegionWageTable::merged_with_override(&json!([1, 2])).is_none());
    }

    #[test]
    fn edits_are_validated_before_applying() {
        let table = RegionWageTable::default();

        let edited = table
            .with_edits(["東京=1230", "", " 大阪 = 1180.0 "])
            .expect("edits apply");
        assert_eq!(edited.get("東京"), Some(1230));
        assert_eq!(edited.get("大阪"), Some(1180));

        assert!(matches!(
            table.with_edits(["東京=0"]),
            Err(WageTableError::InvalidWage { .. })
        ));
        assert!(matches!(
            table.with_edits(["東京=-1"]),
            Err(WageTableError::InvalidWage { .. })
        ));
        assert!(matches!(
            table.with_edits(["東京都=1300"]),
            Err(WageTableError::UnknownRegion(_))
        ));
        assert!(matches!(
            table.with_edits(["東京 1300"]),
            Err(WageTableError::MalformedEdit(_))
        ));
    }

    #[test]
    fn document_round_trips_through_override_merge() {
        let mut table = RegionWageTable::default();
        table.set("福岡", 1100).expect("known region");
        let restored =
            RegionWageTable::merged_with_override(&table.to_document()).expect("valid document");
        assert_eq!(restored, table);
    }
}
