use super::domain::{CheckKind, CheckResult, Verdict};

pub const REASON_SEPARATOR: &str = " / ";

/// Folds per-check results into the overall verdict and reason.
#[derive(Debug, Default)]
pub struct VerdictAggregator {
    results: Vec<(CheckKind, CheckResult)>,
}

impl VerdictAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: CheckKind, result: CheckResult) {
        self.results.push((kind, result));
    }

    /// Most severe verdict seen, `Pass` when nothing was recorded.
    pub fn verdict(&self) -> Verdict {
        self.results
            .iter()
            .map(|(_, result)| result.verdict)
            .max()
            .unwrap_or(Verdict::Pass)
    }

    /// Non-empty reasons in `CheckKind::ordered` order, independent of recording order.
    pub fn reason(&self) -> String {
        let mut ordered: Vec<&(CheckKind, CheckResult)> = self.results.iter().collect();
        ordered.sort_by_key(|(kind, _)| *kind);
        ordered
            .into_iter()
            .map(|(_, result)| result.reason.as_str())
            .filter(|reason| !reason.is_empty())
            .collect::<Vec<_>>()
            .join(REASON_SEPARATOR)
    }

    pub fn into_results(self) -> Vec<(CheckKind, CheckResult)> {
        self.results
    }
}
