//! Report output for reconciled scan geometry
//!
//! The primary output is the text the surrounding tools grep: a header
//! comment, the `# Common:` geometry line, one `# <label>:` line per label,
//! and optionally the per-projection index data in label-major or table
//! form.

use crate::types::Reconciled;
use std::io::{self, Write};

/// What to emit after the summary lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Summary lines only
    #[default]
    Summary,
    /// One `label projection index` line per label and projection
    LabelRows,
    /// One line per projection with every label's index, space-separated
    Table,
}

/// Options controlling the report
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub mode: OutputMode,
    /// Emit projections only up to this cumulative angle; 0 means no cap
    pub max_angle: f64,
    /// Emit at most this many projections; 0 means no cap
    pub max_proj: usize,
}

/// Write the full report for a reconciled log.
///
/// Warnings aside, this is the only output of a run; the geometry consumers
/// parse the `# Common:` line and the label list from the `# <label>:`
/// lines, so their field layout is fixed.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &Reconciled,
    options: &ReportOptions,
) -> io::Result<()> {
    let geometry = &result.geometry;

    writeln!(out, "# Set: start, range, projections, step (full scan)")?;
    writeln!(
        out,
        "# Common: {:.3} {:.3} {} {:.6}",
        geometry.start,
        geometry.range(),
        geometry.steps(),
        geometry.step
    )?;
    for report in &result.labels {
        writeln!(
            out,
            "# {}: {} {} {} {:.6} ({} ... {})",
            report.label,
            signed3(report.first_position),
            signed3(report.position_range),
            report.index_span,
            report.step,
            signed3(report.raw_start),
            signed3(report.raw_stop)
        )?;
    }

    let cap = projection_cap(
        geometry.steps(),
        geometry.step,
        options.max_angle,
        options.max_proj,
    );

    match options.mode {
        OutputMode::Summary => {}
        OutputMode::LabelRows => {
            for report in &result.labels {
                for (cur, index) in report.indices.iter().take(cap).enumerate() {
                    writeln!(out, "{} {} {}", report.label, cur, index)?;
                }
            }
        }
        OutputMode::Table => {
            for cur in 0..cap {
                for report in &result.labels {
                    write!(out, "{} ", report.indices[cur])?;
                }
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Number of projections to emit: the natural count bounded by the optional
/// angle and count caps. The angle cap truncates towards zero; a cap that
/// comes out negative yields no rows.
fn projection_cap(steps: usize, step: f64, max_angle: f64, max_proj: usize) -> usize {
    let mut cap = steps as i64;
    if max_proj != 0 {
        cap = cap.min(max_proj as i64);
    }
    if max_angle != 0.0 {
        cap = cap.min((max_angle / step) as i64);
    }
    cap.max(0) as usize
}

/// Three-decimal format with a space in the sign column for non-negative
/// values, the way the summary consumers expect the positional fields.
fn signed3(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!(" {}", formatted)
    }
}
