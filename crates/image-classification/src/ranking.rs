//! Score ranking: threshold, sort, keep the top results

use crate::config::{ClassifierConfig, MAX_RESULTS, THRESHOLD};
use crate::engine::RawScores;
use crate::labels::LabelTable;
use crate::result::{ClassificationResult, RankedResults};
use std::cmp::Ordering;

/// Turns raw model scores into labelled, ranked results.
///
/// A class is kept when its confidence is strictly above the threshold (NaN never
/// is). Kept classes are sorted by descending confidence, equal confidences by
/// ascending index, and cut to `max_results`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRanker {
    max_results: usize,
    threshold: f32,
}

impl Default for ResultRanker {
    fn default() -> Self {
        Self::new(MAX_RESULTS, THRESHOLD)
    }
}

impl ResultRanker {
    #[must_use]
    pub fn new(max_results: usize, threshold: f32) -> Self {
        Self {
            max_results,
            threshold,
        }
    }

    #[must_use]
    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.max_results, config.threshold)
    }

    /// Rank every score index. Indices past the label table are named "unknown".
    #[must_use]
    pub fn rank(&self, scores: &RawScores, labels: &LabelTable) -> RankedResults {
        let mut candidates: Vec<(usize, f32)> = scores
            .confidences()
            .enumerate()
            .filter(|&(_, confidence)| confidence > self.threshold)
            .collect();

        candidates.sort_by(|a, b| compare_candidates(*a, *b));
        candidates.truncate(self.max_results);

        RankedResults::from_sorted(
            candidates
                .into_iter()
                .map(|(index, confidence)| ClassificationResult {
                    index,
                    label: labels.get(index).to_string(),
                    confidence,
                })
                .collect(),
        )
    }
}

/// Descending confidence, then ascending index
fn compare_candidates(a: (usize, f32), b: (usize, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}
