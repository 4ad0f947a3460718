use crate::data::normalize::Observation;
use crate::stats::percentile;

/// Observations from all sources plus the caller-given label order.
///
/// `label_order` is the ordered category axis: grouping, legends, and table
/// rows all follow it, regardless of concatenation order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub label_order: Vec<String>,
}

impl Dataset {
    /// Concatenate normalized sources in input order and attach the label
    /// axis. Aggregation never mutates member records.
    pub fn aggregate(sources: Vec<Vec<Observation>>, label_order: Vec<String>) -> Self {
        let observations = sources.into_iter().flatten().collect();
        Dataset {
            observations,
            label_order,
        }
    }

    /// All elapsed values for one label, in concatenation order.
    pub fn elapsed_of(&self, label: &str) -> Vec<f64> {
        self.observations
            .iter()
            .filter(|o| o.label == label)
            .map(|o| o.elapsed)
            .collect()
    }

    /// The concurrency factor of a label's source table (first observation
    /// wins; the factor is constant within a source). 0 or absent becomes 1.
    pub fn factor_of(&self, label: &str) -> u32 {
        self.observations
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.concurrency_factor)
            .filter(|&f| f > 0)
            .unwrap_or(1)
    }

    /// Mean error rate for one label, 0.0 when the label has no observations.
    pub fn error_rate_of(&self, label: &str) -> f64 {
        let mut total = 0usize;
        let mut errors = 0usize;
        for o in self.observations.iter().filter(|o| o.label == label) {
            total += 1;
            if o.error {
                errors += 1;
            }
        }
        if total == 0 {
            0.0
        } else {
            errors as f64 / total as f64
        }
    }

    /// Per label independently, keep observations whose elapsed lies within
    /// the label's own [low, high] percentile band, inclusive. One label's
    /// outliers never affect another's bounds. Plot-only: summaries are
    /// always computed from the untrimmed dataset.
    pub fn trim_percentile_per_label(&self, low: f64, high: f64) -> Dataset {
        let mut kept: Vec<Observation> = Vec::with_capacity(self.observations.len());
        for label in &self.label_order {
            let group: Vec<&Observation> = self
                .observations
                .iter()
                .filter(|o| &o.label == label)
                .collect();
            if group.is_empty() {
                continue;
            }
            let mut sorted: Vec<f64> = group.iter().map(|o| o.elapsed).collect();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let lo = percentile(&sorted, low);
            let hi = percentile(&sorted, high);
            kept.extend(
                group
                    .into_iter()
                    .filter(|o| o.elapsed >= lo && o.elapsed <= hi)
                    .cloned(),
            );
        }
        Dataset {
            observations: kept,
            label_order: self.label_order.clone(),
        }
    }
}
