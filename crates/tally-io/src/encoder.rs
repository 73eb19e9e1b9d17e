//! Mapping between string class labels and contiguous class indices.

use std::collections::HashMap;

use tracing::debug;

/// Assigns class indices to string labels.
///
/// Gold labels get the contiguous range `0..n_classes` in first-seen order.
/// Labels that only ever appear among predictions get indices
/// `>= n_classes`, so they count as misses without adding evaluated classes.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    index: HashMap<String, usize>,
    labels: Vec<String>,
    n_classes: usize,
}

impl LabelEncoder {
    /// Build an encoder from the gold labels.
    pub fn fit<S: AsRef<str>>(gold: &[S]) -> Self {
        let mut encoder = Self::default();
        for label in gold {
            encoder.intern(label.as_ref());
        }
        encoder.n_classes = encoder.labels.len();
        debug!(n_classes = encoder.n_classes, "label encoder fitted");
        encoder
    }

    /// Return the number of gold classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Return the gold class names, indexed by class.
    #[must_use]
    pub fn class_names(&self) -> &[String] {
        &self.labels[..self.n_classes]
    }

    /// Look up the index of a known label.
    #[must_use]
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Look up the label of a known index.
    #[must_use]
    pub fn decode(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Encode a label sequence, assigning fresh out-of-class indices to
    /// labels never seen before.
    pub fn encode_all<S: AsRef<str>>(&mut self, labels: &[S]) -> Vec<usize> {
        let before = self.labels.len();
        let encoded: Vec<usize> = labels.iter().map(|l| self.intern(l.as_ref())).collect();
        let unseen = self.labels.len() - before;
        if unseen > 0 {
            debug!(unseen, "labels outside the gold class set");
        }
        encoded
    }

    fn intern(&mut self, label: &str) -> usize {
        if let Some(&i) = self.index.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.index.insert(label.to_string(), i);
        self.labels.push(label.to_string());
        i
    }
}
