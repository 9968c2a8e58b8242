#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Corrected scan geometry shared by every label: the common angular window,
/// the consensus step and the uniform target grid spanning the window.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanGeometry {
    /// First grid angle (direction-aware overlap start)
    pub start: f64,
    /// Last covered angle (direction-aware overlap stop)
    pub stop: f64,
    /// Lower bound of the common window
    pub min_pos: f64,
    /// Upper bound of the common window
    pub max_pos: f64,
    /// Angular increment between consecutive projections; negative for
    /// decreasing scans
    pub step: f64,
    /// Target angles, `start + step * n` while inside the window
    pub grid: Vec<f64>,
}

impl ScanGeometry {
    /// Number of output projections
    pub fn steps(&self) -> usize {
        self.grid.len()
    }

    /// Covered angular range, signed like the step
    pub fn range(&self) -> f64 {
        self.stop - self.start
    }
}

/// One label's share of the reconciled result: its own summary figures and
/// the resampled encoder index per grid angle.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelReport {
    pub label: String,
    /// First position after trimming
    pub first_position: f64,
    /// Trimmed positional range, signed
    pub position_range: f64,
    /// Trimmed encoder index span, signed
    pub index_span: i64,
    /// This label's own derived step
    pub step: f64,
    /// First recorded position before trimming
    pub raw_start: f64,
    /// Last recorded position before trimming
    pub raw_stop: f64,
    /// Interpolated, rounded and repaired index per grid angle
    pub indices: Vec<i64>,
}

/// Full result of reconciling one acquisition log
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reconciled {
    pub geometry: ScanGeometry,
    /// Per-label reports in label order
    pub labels: Vec<LabelReport>,
}
