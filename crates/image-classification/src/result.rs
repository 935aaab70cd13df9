//! Classification results

use serde::Serialize;
use std::fmt;

/// One recognized class
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Position in the model output
    pub index: usize,
    /// Class name from the label table
    pub label: String,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl ClassificationResult {
    /// Confidence as a percentage
    #[must_use]
    pub fn percent(&self) -> f32 {
        self.confidence * 100.0
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}%)", self.label, self.percent())
    }
}

/// Results ordered by descending confidence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResults {
    results: Vec<ClassificationResult>,
}

impl RankedResults {
    /// Callers must pass results already sorted by descending confidence
    pub(crate) fn from_sorted(results: Vec<ClassificationResult>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Highest-confidence result, if any
    #[must_use]
    pub fn top(&self) -> Option<&ClassificationResult> {
        self.results.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassificationResult> {
        self.results.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ClassificationResult] {
        &self.results
    }
}

impl<'a> IntoIterator for &'a RankedResults {
    type Item = &'a ClassificationResult;
    type IntoIter = std::slice::Iter<'a, ClassificationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Space separated `label (xx.x%)` entries, e.g. `tabby (81.2%) tiger cat (12.5%)`
impl fmt::Display for RankedResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, result) in self.results.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{result}")?;
        }
        Ok(())
    }
}
