//! End-to-end tests of the library pipeline on embedded log text

use ctlog_parser::{
    parse_scan_log, reconcile, write_report, LogError, OutputMode, ParseOptions, ReconcileOptions,
    ReportOptions,
};

fn run_pipeline(
    log: &str,
    parse_options: &ParseOptions,
    reconcile_options: &ReconcileOptions,
) -> ctlog_parser::Reconciled {
    let scan = parse_scan_log(log.as_bytes(), parse_options).expect("parse failed");
    reconcile(scan, reconcile_options).expect("reconcile failed")
}

fn render(result: &ctlog_parser::Reconciled, options: &ReportOptions) -> String {
    let mut out = Vec::new();
    write_report(&mut out, result, options).expect("report failed");
    String::from_utf8(out).unwrap()
}

/// Build a log segment for one label from (index, position) samples
fn segment(name: &str, samples: &[(i64, f64)]) -> String {
    let mut text = format!("12:00:00 \"SAMPLE{}\" Acquisition started.\n", name);
    for (n, (index, position)) in samples.iter().enumerate() {
        text.push_str(&format!("12:00:{:02}.5 {} {}\n", n + 1, index, position));
    }
    text.push_str("12:59:59 Acquisition finished.\n");
    text
}

fn linear_samples(count: usize, position_step: f64) -> Vec<(i64, f64)> {
    (0..count)
        .map(|n| (n as i64, n as f64 * position_step))
        .collect()
}

#[test]
fn linear_single_label_scan() {
    // One unnamed sample: four projections, ten degrees apart
    let log = segment("", &linear_samples(4, 10.0));
    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());

    assert_eq!(result.geometry.start, 0.0);
    assert_eq!(result.geometry.stop, 30.0);
    assert_eq!(result.geometry.steps(), 4);
    assert!((result.geometry.step - 10.0).abs() < 1e-12);

    let report = &result.labels[0];
    assert_eq!(report.label, "single");
    assert_eq!(report.indices, vec![0, 1, 2, 3]);

    let text = render(&result, &ReportOptions::default());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "# Set: start, range, projections, step (full scan)");
    assert_eq!(lines[1], "# Common: 0.000 30.000 4 10.000000");
    assert_eq!(
        lines[2],
        "# single:  0.000  30.000 3 10.000000 ( 0.000 ...  30.000)"
    );
}

#[test]
fn table_output_with_configured_step() {
    // Indices recorded every ten counts; the configured step keeps the grid
    // at four projections and the table reports the raw encoder indices
    let samples: Vec<(i64, f64)> = (0..4).map(|n| (n * 10, n as f64 * 10.0)).collect();
    let log = segment("", &samples);
    let reconcile_options = ReconcileOptions {
        step: 10.0,
        ..Default::default()
    };
    let result = run_pipeline(&log, &ParseOptions::default(), &reconcile_options);

    assert_eq!(result.geometry.steps(), 4);
    let options = ReportOptions {
        mode: OutputMode::Table,
        ..Default::default()
    };
    let text = render(&result, &options);
    let rows: Vec<&str> = text.lines().skip(3).collect();
    assert_eq!(rows, vec!["0 ", "10 ", "20 ", "30 "]);
}

#[test]
fn offset_windows_share_common_range() {
    // Label a spans 0..100, label b spans 10..90; every projection falls in
    // the [10, 90] overlap
    let mut log = segment("_a", &linear_samples(11, 10.0));
    let b: Vec<(i64, f64)> = (0..9).map(|n| (n as i64, 10.0 + n as f64 * 10.0)).collect();
    log.push_str(&segment("_b", &b));

    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());
    assert_eq!(result.geometry.start, 10.0);
    assert_eq!(result.geometry.stop, 90.0);
    assert_eq!(result.geometry.min_pos, 10.0);
    assert_eq!(result.geometry.max_pos, 90.0);

    let labels: Vec<&str> = result.labels.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["a", "b"]);
    for report in &result.labels {
        assert_eq!(report.indices.len(), result.geometry.steps());
        assert!(report.indices.len() >= 4);
    }
    for &angle in &result.geometry.grid {
        assert!((10.0..=90.0).contains(&angle));
    }
}

#[test]
fn interrupted_label_is_dropped() {
    // A start marker arrives while the previous label holds two samples;
    // the new label accumulates independently
    let mut log = segment("_broken", &linear_samples(2, 10.0))
        .replace("12:59:59 Acquisition finished.\n", "");
    log.push_str(&segment("_whole", &linear_samples(6, 10.0)));

    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());
    let labels: Vec<&str> = result.labels.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["whole"]);
    assert_eq!(result.geometry.steps(), 6);
}

#[test]
fn log_without_markers_is_fatal() {
    let log = "12:00:01 0 0.0\n12:00:02 1 0.1\njunk\n";
    let err = parse_scan_log(log.as_bytes(), &ParseOptions::default()).unwrap_err();
    assert!(err
        .downcast_ref::<LogError>()
        .is_some_and(|e| matches!(e, LogError::EmptyLog)));
}

#[test]
fn label_filter_keeps_only_matches() {
    let mut log = segment("_foo_1", &linear_samples(5, 1.0));
    log.push_str(&segment("_bar_1", &linear_samples(5, 1.0)));

    let parse_options = ParseOptions {
        labels: vec!["foo".to_string()],
        ..Default::default()
    };
    let result = run_pipeline(&log, &parse_options, &ReconcileOptions::default());
    let labels: Vec<&str> = result.labels.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["foo_1"]);
}

#[test]
fn decreasing_scan_reverses_geometry() {
    let samples: Vec<(i64, f64)> = (0..4).map(|n| (n as i64, 30.0 - n as f64 * 10.0)).collect();
    let log = segment("_rev", &samples);
    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());

    assert_eq!(result.geometry.start, 30.0);
    assert_eq!(result.geometry.stop, 0.0);
    assert!((result.geometry.step + 10.0).abs() < 1e-12);
    assert_eq!(result.geometry.steps(), 4);
    assert_eq!(result.labels[0].indices, vec![0, 1, 2, 3]);

    let text = render(&result, &ReportOptions::default());
    assert!(text.contains("# Common: 30.000 -30.000 4 -10.000000"));
}

#[test]
fn summary_is_prefix_of_full_output() {
    let mut log = segment("_a", &linear_samples(6, 10.0));
    log.push_str(&segment("_b", &linear_samples(6, 10.0)));
    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());

    let summary = render(&result, &ReportOptions::default());
    for mode in [OutputMode::LabelRows, OutputMode::Table] {
        let full = render(
            &result,
            &ReportOptions {
                mode,
                ..Default::default()
            },
        );
        assert!(full.starts_with(&summary));
        assert!(full.len() > summary.len());
    }
}

#[test]
fn projection_caps_limit_rows() {
    let log = segment("", &linear_samples(10, 1.0));
    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());
    assert_eq!(result.geometry.steps(), 10);

    let rows = |max_angle: f64, max_proj: usize| {
        let options = ReportOptions {
            mode: OutputMode::LabelRows,
            max_angle,
            max_proj,
        };
        render(&result, &options)
            .lines()
            .filter(|l| !l.starts_with('#'))
            .count()
    };

    // Unset caps mean the natural count
    assert_eq!(rows(0.0, 0), 10);
    // Count cap
    assert_eq!(rows(0.0, 4), 4);
    // Angle cap: floor(6.5 / 1.0) projections
    assert_eq!(rows(6.5, 0), 6);
    // Both: the minimum wins
    assert_eq!(rows(6.5, 3), 3);
    // Caps larger than the natural count change nothing
    assert_eq!(rows(500.0, 400), 10);
}

#[test]
fn strict_mode_rejects_what_lenient_mode_drops() {
    // Duplicate label
    let mut log = segment("_a", &linear_samples(5, 1.0));
    log.push_str(&segment("_a", &linear_samples(5, 1.0)));
    let strict = ParseOptions {
        strict: true,
        ..Default::default()
    };
    assert!(parse_scan_log(log.as_bytes(), &ParseOptions::default()).is_ok());
    assert!(parse_scan_log(log.as_bytes(), &strict).is_err());

    // Undersized label interrupted by the next start marker
    let mut log = segment("_short", &linear_samples(2, 1.0)).replace(
        "12:59:59 Acquisition finished.\n",
        "",
    );
    log.push_str(&segment("_b", &linear_samples(5, 1.0)));
    assert!(parse_scan_log(log.as_bytes(), &ParseOptions::default()).is_ok());
    assert!(parse_scan_log(log.as_bytes(), &strict).is_err());
}

#[test]
fn duplicate_label_keeps_latest_series() {
    let mut log = segment("_a", &linear_samples(5, 1.0));
    let replacement: Vec<(i64, f64)> = (0..5).map(|n| (n as i64 + 100, n as f64 * 2.0)).collect();
    log.push_str(&segment("_a", &replacement));

    let result = run_pipeline(&log, &ParseOptions::default(), &ReconcileOptions::default());
    assert_eq!(result.labels.len(), 1);
    let report = &result.labels[0];
    assert_eq!(report.raw_start, 0.0);
    assert_eq!(report.raw_stop, 8.0);
    assert_eq!(report.indices[0], 100);
}
