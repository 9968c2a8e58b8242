//! Stateful sweep over an acquisition log
//!
//! Consumes the log line by line, grouping data triples under the label
//! opened by the most recent start marker. Defective labels are dropped with
//! a warning in lenient mode and abort the parse in strict mode.

use crate::error::LogError;
use crate::parser::line::{LineClassifier, LogLine};
use crate::types::ScanLog;
use anyhow::{Context, Result};
use std::io::BufRead;

/// A label is unusable below this many observations
pub const MIN_SAMPLES: usize = 4;

/// Options controlling the parse sweep
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Track only labels containing at least one of these substrings; empty
    /// tracks everything
    pub labels: Vec<String>,
    /// Turn per-label defects (duplicates, undersized sets) into hard errors
    pub strict: bool,
    /// Report per-label statistics on stderr after the sweep
    pub debug: bool,
}

/// The label context between a start marker and the next marker
enum Active {
    /// No label open; data lines are skipped silently
    None,
    /// Observations accumulate under this label
    Tracked(String),
    /// A label excluded by the allow-list is open; data lines are skipped
    /// without warnings
    Filtered,
}

/// Parse a full acquisition log from `input`.
///
/// Returns the surviving labels with their observation series, in the order
/// the labels were first opened. Fails when no label with data remains, or
/// on the first per-label defect in strict mode.
pub fn parse_scan_log<R: BufRead>(input: R, options: &ParseOptions) -> Result<ScanLog> {
    let classifier = LineClassifier::new();
    let mut scan = ScanLog::new();
    let mut active = Active::None;

    for (number, line) in input.lines().enumerate() {
        let line = line.context("reading log from standard input")?;
        let number = number + 1;

        match classifier.classify(&line) {
            LogLine::Finished => {
                close_label(&mut scan, &active, options)?;
                active = Active::None;
            }
            LogLine::Started(name) => {
                discard_short_label(&mut scan, &active, options)?;
                active = open_label(&mut scan, name, &line, options)?;
            }
            LogLine::Data { index, position } => {
                if let Active::Tracked(label) = &active {
                    if let Some(series) = scan.get_mut(label) {
                        series.push(index, position);
                    }
                }
            }
            LogLine::Unrecognized => {
                if let Active::Tracked(_) = active {
                    eprintln!("Error in log at string {}: \"{}\"", number, line);
                }
            }
        }
    }

    // An open label left without data by the end of input counts as empty
    close_label(&mut scan, &active, options)?;

    if scan.labels.is_empty() {
        return Err(LogError::EmptyLog.into());
    }

    if options.debug {
        for label in &scan.labels {
            eprintln!(
                "Parsed label \"{}\": {} observations",
                label,
                scan.get(label).map_or(0, |s| s.len())
            );
        }
    }

    Ok(scan)
}

/// A finish marker (or end of input) on a label with zero observations
/// discards that label.
fn close_label(scan: &mut ScanLog, active: &Active, options: &ParseOptions) -> Result<()> {
    if let Active::Tracked(label) = active {
        if scan.get(label).is_some_and(|s| s.is_empty()) {
            if options.strict {
                return Err(LogError::ShortLabel {
                    label: label.clone(),
                    samples: 0,
                }
                .into());
            }
            eprintln!("Warning: empty set on label {}.", label);
            scan.remove_label(label);
        }
    }
    Ok(())
}

/// A start marker arriving while the open label holds fewer than
/// `MIN_SAMPLES` observations discards the open label; the new marker is
/// still honored by the caller.
fn discard_short_label(scan: &mut ScanLog, active: &Active, options: &ParseOptions) -> Result<()> {
    if let Active::Tracked(label) = active {
        let samples = scan.get(label).map_or(0, |s| s.len());
        if samples < MIN_SAMPLES {
            if options.strict {
                return Err(LogError::ShortLabel {
                    label: label.clone(),
                    samples,
                }
                .into());
            }
            eprintln!(
                "Warning! Too small ({}) set on label \"{}\". Will be disregarded.",
                samples, label
            );
            scan.remove_label(label);
        }
    }
    Ok(())
}

fn open_label(
    scan: &mut ScanLog,
    name: Option<String>,
    line: &str,
    options: &ParseOptions,
) -> Result<Active> {
    let Some(name) = name else {
        eprintln!("Warning! Can't find label in acquisition string \"{}\".", line);
        return Ok(Active::None);
    };

    if !options.labels.is_empty() && !options.labels.iter().any(|l| name.contains(l.as_str())) {
        return Ok(Active::Filtered);
    }

    if scan.contains_label(&name) {
        if options.strict {
            return Err(LogError::DuplicateLabel(name).into());
        }
        eprintln!(
            "Warning! Label \"{}\" already exists. Will overwrite previous.",
            name
        );
    }
    scan.open_label(&name);
    Ok(Active::Tracked(name))
}
