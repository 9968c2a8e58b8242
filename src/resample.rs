//! Reconciliation of the parsed label series onto a uniform angle grid
//!
//! This is the numerical core: the common angular window across labels, the
//! boundary trimming, the consensus step estimate, the target grid, the
//! monotone linear interpolation of each label's encoder-index series, and
//! the repair pass over the rounded indices.

use crate::error::{LogError, Result};
use crate::parser::scan::MIN_SAMPLES;
use crate::types::{LabelReport, LabelSeries, Reconciled, ScanGeometry, ScanLog};
use std::collections::HashMap;

/// The common angular window across all labels
#[derive(Debug, Clone, Copy)]
pub struct Window {
    /// Direction-aware latest of the per-label starting positions
    pub start: f64,
    /// Direction-aware earliest of the per-label ending positions
    pub stop: f64,
    pub min_pos: f64,
    pub max_pos: f64,
    /// Whether the scan sweeps towards increasing positions
    pub increasing: bool,
}

impl Window {
    pub fn contains(&self, position: f64) -> bool {
        self.min_pos <= position && position <= self.max_pos
    }
}

/// Options controlling the reconciliation stages
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Nonzero overrides the log-derived step with the configured one
    pub step: f64,
    /// Turn trimmed-out labels into hard errors
    pub strict: bool,
}

/// Compute the angular window every label covers. The first label's sweep
/// decides the scan direction.
pub fn compute_window(scan: &ScanLog) -> Result<Window> {
    let first = scan.labels.first().ok_or(LogError::EmptyLog)?;
    let series = &scan.series[first];
    let increasing = series.first_position() < series.last_position();

    let mut start = if increasing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut stop = -start;
    for label in &scan.labels {
        let series = &scan.series[label];
        if increasing {
            start = start.max(series.first_position());
            stop = stop.min(series.last_position());
        } else {
            start = start.min(series.first_position());
            stop = stop.max(series.last_position());
        }
    }

    Ok(Window {
        start,
        stop,
        min_pos: start.min(stop),
        max_pos: start.max(stop),
        increasing,
    })
}

/// Drop leading and trailing samples outside the window from every label,
/// then drop labels trimmed below `MIN_SAMPLES`.
///
/// Trimming looks at the second and second-to-last samples and never cuts a
/// series below 4 points, so the boundary checks always reference interior
/// data. Labels that still end up undersized are corrupt or incomplete
/// scans; they are dropped with a warning (or abort in strict mode).
pub fn trim_to_window(scan: &mut ScanLog, window: &Window, strict: bool) -> Result<()> {
    let mut good_labels = Vec::new();
    for label in scan.labels.clone() {
        if let Some(series) = scan.get_mut(&label) {
            while series.len() > 3 && !window.contains(series.positions[1]) {
                series.drop_front();
            }
            while series.len() > 3 && !window.contains(series.positions[series.len() - 2]) {
                series.drop_back();
            }
            if series.len() < MIN_SAMPLES {
                if strict {
                    return Err(LogError::ShortLabel {
                        samples: series.len(),
                        label,
                    });
                }
                eprintln!(
                    "Warning! Corrupt log or incomplete scan on label \"{}\". Will be disregarded.",
                    label
                );
                scan.series.remove(&label);
            } else {
                good_labels.push(label);
            }
        }
    }
    scan.labels = good_labels;

    if scan.labels.is_empty() {
        return Err(LogError::EmptyLog);
    }
    Ok(())
}

/// The consensus step: the supplied nonzero override, or the mean of the
/// per-label rates `(last_pos - first_pos) / (last_idx - first_idx)`. Signed
/// like the scan direction.
pub fn estimate_step(scan: &ScanLog, step_override: f64) -> Result<f64> {
    let step = if step_override != 0.0 {
        step_override
    } else {
        let mut sum = 0.0;
        for label in &scan.labels {
            let series = &scan.series[label];
            let index_span = (series.last_index() - series.first_index()) as f64;
            sum += (series.last_position() - series.first_position()) / index_span;
        }
        sum / scan.label_count() as f64
    };

    if step == 0.0 || !step.is_finite() {
        return Err(LogError::BadStep(step));
    }
    Ok(step)
}

/// Target angles `start + step * n`, generated while inside the window.
/// Each angle is recomputed from the start rather than accumulated.
pub fn build_grid(window: &Window, step: f64) -> Vec<f64> {
    let mut grid = Vec::new();
    let mut cpos = window.start;
    while window.contains(cpos) {
        grid.push(cpos);
        cpos = window.start + step * grid.len() as f64;
    }
    grid
}

/// Resample one label's (position -> index) mapping onto the grid: monotone
/// piecewise-linear interpolation, rounding, and the repair pass.
pub fn resample_series(series: &LabelSeries, grid: &[f64]) -> Vec<i64> {
    let (positions, indices): (Vec<f64>, Vec<i64>) =
        if series.first_position() <= series.last_position() {
            (series.positions.clone(), series.indices.clone())
        } else {
            // interp_linear wants increasing abscissae
            (
                series.positions.iter().rev().copied().collect(),
                series.indices.iter().rev().copied().collect(),
            )
        };

    let mut resampled: Vec<i64> = grid
        .iter()
        .map(|&angle| interp_linear(angle, &positions, &indices).round() as i64)
        .collect();
    repair_rounding(&mut resampled);
    resampled
}

/// Piecewise-linear interpolation over increasing abscissae, clamped to the
/// end values outside the covered range.
fn interp_linear(x: f64, xp: &[f64], fp: &[i64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0] as f64;
    }
    if x >= xp[last] {
        return fp[last] as f64;
    }
    let hi = xp.partition_point(|&p| p < x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] as f64 + t * (fp[hi] as f64 - fp[lo] as f64)
}

/// Fix isolated rounding artifacts in place: where the neighbors two apart
/// differ by exactly 2 but the middle value breaks the steady +1 increment,
/// restore the increment. Genuine multi-step jumps are left alone. A single
/// forward pass resolves every matching pattern.
pub fn repair_rounding(indices: &mut [i64]) {
    for cur in 1..indices.len().saturating_sub(1) {
        if indices[cur + 1] - indices[cur - 1] == 2 && indices[cur] != indices[cur - 1] + 1 {
            indices[cur] = indices[cur - 1] + 1;
        }
    }
}

/// Run the full pipeline on a parsed log: window, trim, step, grid,
/// per-label resampling. Per-label raw spans are captured before trimming;
/// they appear in the report's parenthesized start/stop fields.
pub fn reconcile(mut scan: ScanLog, options: &ReconcileOptions) -> Result<Reconciled> {
    let window = compute_window(&scan)?;

    let mut raw_spans: HashMap<String, (f64, f64)> = HashMap::new();
    for label in &scan.labels {
        let series = &scan.series[label];
        raw_spans.insert(
            label.clone(),
            (series.first_position(), series.last_position()),
        );
    }

    trim_to_window(&mut scan, &window, options.strict)?;
    let step = estimate_step(&scan, options.step)?;
    let grid = build_grid(&window, step);

    let geometry = ScanGeometry {
        start: window.start,
        stop: window.stop,
        min_pos: window.min_pos,
        max_pos: window.max_pos,
        step,
        grid,
    };

    let mut labels = Vec::new();
    for label in &scan.labels {
        let series = &scan.series[label];
        let indices = resample_series(series, &geometry.grid);
        let position_range = series.last_position() - series.first_position();
        let index_span = series.last_index() - series.first_index();
        let (raw_start, raw_stop) = raw_spans[label];
        labels.push(LabelReport {
            label: label.clone(),
            first_position: series.first_position(),
            position_range,
            index_span,
            step: position_range / index_span as f64,
            raw_start,
            raw_stop,
            indices,
        });
    }

    Ok(Reconciled { geometry, labels })
}
