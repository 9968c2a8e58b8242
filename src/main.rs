//! CLI binary for the ctgui stage-log parser
//!
//! A filter in the classic shape: the acquisition log is read from standard
//! input, the report goes to standard output, diagnostics go to standard
//! error.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use ctlog_parser::{
    parse_scan_log, reconcile, write_report, OutputMode, ParseOptions, ReconcileOptions,
    ReportOptions,
};
use std::io::{self, BufWriter, Write};

fn main() {
    let matches = Command::new("ctlog_parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Parses the log file produced by ctgui to recalculate proper rotation positions. \
             The file is read from the standard input and the result is sent to the standard output.",
        )
        .arg(
            Arg::new("labels")
                .help("Parse only labels containing one of the given substrings")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("info")
                .short('i')
                .long("info")
                .help("Output only the summary derived from the log (the default)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .help("Output full information derived from the log")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("table")
                .short('t')
                .long("table")
                .help("Output data in the table format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("step")
                .short('s')
                .long("step")
                .value_name("STEP")
                .value_parser(clap::value_parser!(f64))
                .allow_negative_numbers(true)
                .default_value("0")
                .help(
                    "Use the step size matching the configuration file. \
                     By default it uses the step derived from the log file.",
                ),
        )
        .arg(
            Arg::new("max_angle")
                .short('m')
                .long("max_angle")
                .value_name("ANGLE")
                .value_parser(clap::value_parser!(f64))
                .allow_negative_numbers(true)
                .default_value("0")
                .help("Output only projections up to the given angle"),
        )
        .arg(
            Arg::new("max_proj")
                .short('M')
                .long("max_proj")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(usize))
                .default_value("0")
                .help("Output only projections up to the given number"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .help("Treat duplicate or undersized labels as hard errors instead of warnings")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable detailed parsing information on stderr")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let parse_options = ParseOptions {
        labels: matches
            .get_many::<String>("labels")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        strict: matches.get_flag("strict"),
        debug: matches.get_flag("debug"),
    };
    let reconcile_options = ReconcileOptions {
        step: *matches.get_one::<f64>("step").unwrap(),
        strict: matches.get_flag("strict"),
    };
    let report_options = ReportOptions {
        mode: if matches.get_flag("info") {
            OutputMode::Summary
        } else if matches.get_flag("table") {
            OutputMode::Table
        } else if matches.get_flag("all") {
            OutputMode::LabelRows
        } else {
            OutputMode::Summary
        },
        max_angle: *matches.get_one::<f64>("max_angle").unwrap(),
        max_proj: *matches.get_one::<usize>("max_proj").unwrap(),
    };

    if let Err(err) = run(&parse_options, &reconcile_options, &report_options) {
        eprintln!("Error! {:#}.", err);
        std::process::exit(1);
    }
}

fn run(
    parse_options: &ParseOptions,
    reconcile_options: &ReconcileOptions,
    report_options: &ReportOptions,
) -> Result<()> {
    let stdin = io::stdin();
    let scan = parse_scan_log(stdin.lock(), parse_options)?;
    let result = reconcile(scan, reconcile_options)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_report(&mut out, &result, report_options).context("writing report")?;
    out.flush().context("writing report")?;
    Ok(())
}
