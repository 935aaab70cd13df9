//! Class label table

use serde::{Deserialize, Serialize};

/// Placeholder name for score indices past the end of the label table
pub const UNKNOWN_LABEL: &str = "unknown";

/// Ordered class names, indexed by model output position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Parse a label list with one class name per line (the format shipped next to
    /// TFLite image classifiers). Line endings may be `\n` or `\r\n`; a trailing
    /// newline does not add an empty label.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            labels: text.lines().map(str::to_string).collect(),
        }
    }

    /// Name for a class index, or [`UNKNOWN_LABEL`] when out of range
    #[must_use]
    pub fn get(&self, index: usize) -> &str {
        self.labels
            .get(index)
            .map_or(UNKNOWN_LABEL, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LabelTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
