use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sentinel label used when the acquisition string carries no sample name
pub const SINGLE_LABEL: &str = "single";

/// One label's observation series: stage positions and the encoder indices
/// recorded with them, kept in lockstep and in acquisition order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelSeries {
    pub positions: Vec<f64>,
    pub indices: Vec<i64>,
}

impl LabelSeries {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append an observation unless its position repeats the last recorded
    /// one. Returns whether the sample was kept.
    pub fn push(&mut self, index: i64, position: f64) -> bool {
        if self.positions.last() == Some(&position) {
            return false;
        }
        self.indices.push(index);
        self.positions.push(position);
        true
    }

    pub fn first_position(&self) -> f64 {
        self.positions[0]
    }

    pub fn last_position(&self) -> f64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn first_index(&self) -> i64 {
        self.indices[0]
    }

    pub fn last_index(&self) -> i64 {
        self.indices[self.indices.len() - 1]
    }

    pub fn drop_front(&mut self) {
        self.positions.remove(0);
        self.indices.remove(0);
    }

    pub fn drop_back(&mut self) {
        self.positions.pop();
        self.indices.pop();
    }
}

/// Parsed state of one acquisition log: every tracked label in the order it
/// was first opened, with its observation series.
///
/// All pipeline stages (parse, trim, estimate, resample) take this state
/// explicitly; nothing lives in globals.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanLog {
    /// Labels in first-seen order. The first entry decides the scan direction.
    pub labels: Vec<String>,
    pub series: HashMap<String, LabelSeries>,
}

impl ScanLog {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            series: HashMap::new(),
        }
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Register a label with a fresh series. A repeated name keeps its slot
    /// in the label order but starts over with an empty series.
    pub fn open_label(&mut self, name: &str) {
        if !self.labels.iter().any(|l| l == name) {
            self.labels.push(name.to_string());
        }
        self.series.insert(name.to_string(), LabelSeries::new());
    }

    pub fn contains_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l == name)
    }

    pub fn remove_label(&mut self, name: &str) {
        self.labels.retain(|l| l != name);
        self.series.remove(name);
    }

    pub fn get(&self, name: &str) -> Option<&LabelSeries> {
        self.series.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut LabelSeries> {
        self.series.get_mut(name)
    }
}
