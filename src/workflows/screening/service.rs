use std::path::Path;
use std::sync::{Mutex, PoisonError};

use super::domain::Verdict;
use super::engine::{ScreeningConfig, ScreeningEngine};
use super::import::{ImportError, ListingDataset, ListingImporter};
use super::policy::RulesetVersion;
use super::report::ScreeningReport;
use super::wage_store::WageTableStore;
use super::wage_table::{RegionWageTable, WageTableError};
use tracing::info;

/// Service composing the importer, the persisted wage table, and the screening engine.
pub struct ScreeningService {
    store: WageTableStore,
    default_ruleset: RulesetVersion,
    edit_lock: Mutex<()>,
}

impl ScreeningService {
    pub fn new(store: WageTableStore, default_ruleset: RulesetVersion) -> Self {
        Self {
            store,
            default_ruleset,
            edit_lock: Mutex::new(()),
        }
    }

    pub fn default_ruleset(&self) -> RulesetVersion {
        self.default_ruleset
    }

    pub fn store(&self) -> &WageTableStore {
        &self.store
    }

    /// Effective wage table; loaded fresh so each run sees the latest saved edits.
    pub fn wage_table(&self) -> RegionWageTable {
        self.store.load()
    }

    pub fn engine(&self, ruleset: Option<RulesetVersion>) -> ScreeningEngine {
        let ruleset = ruleset.unwrap_or(self.default_ruleset);
        ScreeningEngine::new(ScreeningConfig::new(ruleset, self.wage_table()))
    }

    /// Screen an already imported dataset.
    pub fn screen(
        &self,
        dataset: ListingDataset,
        ruleset: Option<RulesetVersion>,
    ) -> ScreeningReport {
        let engine = self.engine(ruleset);
        let outcomes = engine.evaluate_all(dataset.listings());
        let report = ScreeningReport::new(engine.ruleset(), dataset, outcomes);

        info!(
            ruleset = %report.ruleset(),
            rows = report.len(),
            pass = report.count(Verdict::Pass),
            needs_review = report.count(Verdict::NeedsReview),
            reject = report.count(Verdict::Reject),
            "screening run complete"
        );
        report
    }

    pub fn screen_path(
        &self,
        path: &Path,
        ruleset: Option<RulesetVersion>,
    ) -> Result<ScreeningReport, ScreeningServiceError> {
        let dataset = ListingImporter::from_path(path)?;
        Ok(self.screen(dataset, ruleset))
    }

    pub fn screen_text(
        &self,
        content: &str,
        ruleset: Option<RulesetVersion>,
    ) -> Result<ScreeningReport, ScreeningServiceError> {
        let dataset = ListingImporter::from_text(content)?;
        Ok(self.screen(dataset, ruleset))
    }

    /// Validate and persist `region=value` edits. Nothing is saved when any edit is invalid.
    pub fn update_wages<I, S>(&self, edits: I) -> Result<RegionWageTable, ScreeningServiceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _guard = self.edit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let edited = self.store.load().with_edits(edits)?;
        let path = self.store.save(&edited)?;
        info!(path = %path.display(), "wage table saved");
        Ok(edited)
    }

    /// Persist the built-in defaults over any saved edits.
    pub fn reset_wages(&self) -> Result<RegionWageTable, ScreeningServiceError> {
        let _guard = self.edit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let defaults = RegionWageTable::default();
        let path = self.store.save(&defaults)?;
        info!(path = %path.display(), "wage table reset to defaults");
        Ok(defaults)
    }
}

/// Error raised by the screening service.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningServiceError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    WageTable(#[from] WageTableError),
}
