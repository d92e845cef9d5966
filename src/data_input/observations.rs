// src/data_input/observations.rs

use crate::types::GroupedValues;

/// A table of (measurement, group label) observations.
/// Order of insertion is preserved; group enumeration follows the order in
/// which each distinct label first appears.
#[derive(Debug, Default, Clone)]
pub struct ObservationTable {
    values: Vec<f64>,
    labels: Vec<String>,
}

impl ObservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: f64, label: impl Into<String>) {
        self.values.push(value);
        self.labels.push(label.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Distinct group labels in first-seen order.
    pub fn group_labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for label in &self.labels {
            if !seen.iter().any(|s| *s == label.as_str()) {
                seen.push(label.as_str());
            }
        }
        seen
    }

    /// All values belonging to `label`, in row order.
    pub fn group_values(&self, label: &str) -> Vec<f64> {
        self.values
            .iter()
            .zip(self.labels.iter())
            .filter(|(_, l)| l.as_str() == label)
            .map(|(v, _)| *v)
            .collect()
    }

    /// Splits the table into per-group value vectors, first-seen order.
    pub fn grouped(&self) -> GroupedValues {
        self.group_labels()
            .into_iter()
            .map(|label| (label.to_string(), self.group_values(label)))
            .collect()
    }
}
