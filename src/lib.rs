//! ctgui Stage-Log Parser Library
//!
//! A Rust library for reconciling the rotation-stage encoder log written by
//! the ctgui acquisition front-end against the nominal scan configuration.
//! It parses the interleaved multi-label log, trims every label to the
//! common angular window, derives a consensus angular step, and resamples
//! each label's encoder-index series onto a uniform angle grid.
//!
//! # Features
//!
//! - **`cli`** (default): Build the command-line filter binary
//! - **`serde`**: Enable serialization/deserialization of the result types
//!
//! # Quick Start
//!
//! Parse a log and reconcile it onto a uniform grid:
//! ```rust,no_run
//! use ctlog_parser::{parse_scan_log, reconcile, ParseOptions, ReconcileOptions};
//!
//! let text = std::fs::read_to_string("acquisition.log").unwrap();
//! let scan = parse_scan_log(text.as_bytes(), &ParseOptions::default()).unwrap();
//! let result = reconcile(scan, &ReconcileOptions::default()).unwrap();
//! println!(
//!     "start {:.3}, {} projections at step {:.6}",
//!     result.geometry.start,
//!     result.geometry.steps(),
//!     result.geometry.step
//! );
//! ```
//!
//! Write the report the downstream tools grep:
//! ```rust,no_run
//! use ctlog_parser::{parse_scan_log, reconcile, write_report,
//!     OutputMode, ParseOptions, ReconcileOptions, ReportOptions};
//!
//! let scan = parse_scan_log("...".as_bytes(), &ParseOptions::default()).unwrap();
//! let result = reconcile(scan, &ReconcileOptions::default()).unwrap();
//! let options = ReportOptions { mode: OutputMode::Table, ..Default::default() };
//! let mut stdout = std::io::stdout();
//! write_report(&mut stdout, &result, &options).unwrap();
//! ```
//!
//! # Public API
//!
//! ## Pipeline
//! - [`parse_scan_log`] - Parse a log stream into a [`ScanLog`]
//! - [`reconcile`] - Trim, estimate the step, and resample onto the grid
//! - [`write_report`] - Emit the summary and per-projection report
//!
//! ## Stages
//! - [`compute_window`] - Common angular window across labels
//! - [`trim_to_window`] - Boundary trimming against the window
//! - [`estimate_step`] - Consensus angular step
//! - [`build_grid`] - Uniform target angles
//! - [`resample_series`] - Interpolate, round and repair one label
//!
//! ## Data Types
//! - [`ScanLog`] / [`LabelSeries`] - Parsed per-label observation series
//! - [`Reconciled`] / [`ScanGeometry`] / [`LabelReport`] - Pipeline results
//! - [`ParseOptions`] / [`ReconcileOptions`] / [`ReportOptions`] - Stage options

pub mod error;
pub mod export;
pub mod parser;
pub mod resample;
pub mod types;

pub use error::LogError;
pub use export::*;
pub use parser::*;
pub use resample::*;
pub use types::*;

// Re-export Result type for convenience
pub use anyhow::Result;
