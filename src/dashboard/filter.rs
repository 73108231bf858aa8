use std::collections::BTreeSet;

use crate::bill::{Bill, Bucket, Stage};

/// Bucket and stage selection.
///
/// The two sets behave differently when empty: no buckets selected shows
/// nothing, no stages selected skips stage filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub buckets: BTreeSet<Bucket>,
    pub stages: BTreeSet<Stage>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            buckets: Bucket::ALL.into_iter().collect(),
            stages: BTreeSet::new(),
        }
    }
}

impl FilterState {
    pub fn new(
        buckets: impl IntoIterator<Item = Bucket>,
        stages: impl IntoIterator<Item = Stage>,
    ) -> Self {
        Self {
            buckets: buckets.into_iter().collect(),
            stages: stages.into_iter().collect(),
        }
    }

    pub fn toggle_bucket(&mut self, bucket: Bucket) {
        if !self.buckets.remove(&bucket) {
            self.buckets.insert(bucket);
        }
    }

    pub fn toggle_stage(&mut self, stage: Stage) {
        if !self.stages.remove(&stage) {
            self.stages.insert(stage);
        }
    }

    pub fn apply(&self, bills: &[Bill]) -> Vec<Bill> {
        filter_bills(bills, &self.buckets, &self.stages)
    }

    pub fn matches(&self, bill: &Bill) -> bool {
        selects(bill, &self.buckets, &self.stages)
    }

    /// Human-readable filter line for the exported report.
    pub fn description(&self) -> String {
        if self.buckets.is_empty() || self.buckets.len() == Bucket::ALL.len() {
            return "Todos os boletos".to_string();
        }
        let labels: Vec<&str> = self.buckets.iter().map(|b| b.label()).collect();
        format!("Período de atraso: {}", labels.join(", "))
    }
}

/// Keep bills whose age falls in any selected bucket and, when `stages` is
/// non-empty, whose stage is selected. Input order is preserved.
pub fn filter_bills(
    bills: &[Bill],
    buckets: &BTreeSet<Bucket>,
    stages: &BTreeSet<Stage>,
) -> Vec<Bill> {
    bills
        .iter()
        .filter(|bill| selects(bill, buckets, stages))
        .cloned()
        .collect()
}

fn selects(bill: &Bill, buckets: &BTreeSet<Bucket>, stages: &BTreeSet<Stage>) -> bool {
    buckets.iter().any(|b| b.contains(bill.days_overdue))
        && (stages.is_empty() || stages.contains(&bill.stage))
}
