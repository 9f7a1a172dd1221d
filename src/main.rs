//! CLI entry point for the grade report tool.
//!
//! Reads one or more CSV files of graded rows and prints a ranked
//! per-student or per-teacher performance table.

mod config;

use crate::config::LogSettings;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use grade_report::ReportError;
use grade_report::reports::registry::ReportRegistry;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grade_report")]
#[command(about = "Build student and teacher performance reports from CSV files")]
#[command(long_about = None)]
struct Cli {
    /// CSV files to read, in order
    #[arg(long, num_args = 1.., required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Report to build, e.g. students_performance or teacher_performance
    #[arg(long, value_name = "NAME")]
    report: String,

    /// Print the ranked rows as a table or as JSON
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    let settings = LogSettings::from_env();
    let _file_guard = match init_tracing(&settings) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to set up logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let registry = ReportRegistry::with_defaults();

    match run(&registry, &cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, report = %cli.report, "Report generation failed");
            match e.downcast_ref::<ReportError>() {
                Some(report_error) => eprintln!("Error: {report_error}"),
                None => eprintln!("An unexpected error occurred: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

#[tracing::instrument(skip_all, fields(report = %cli.report, files = cli.files.len()))]
fn run(registry: &ReportRegistry, cli: &Cli) -> Result<String> {
    let report = registry.create(&cli.report, &cli.files)?;

    let output = match cli.format {
        OutputFormat::Table => report.generate()?,
        OutputFormat::Json => serde_json::to_string_pretty(&report.rows()?)?,
    };

    info!(format = ?cli.format, "Report generated");
    Ok(output)
}

/// Colored stderr logging, plus a daily-rolling JSON log file when
/// `LOG_FILE_PATH` is set. The returned guard flushes the file on drop.
fn init_tracing(settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_new(&settings.stderr_filter)?);

    let (json_layer, guard) = match &settings.file_path {
        Some(path) => {
            let log_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = path.file_name().unwrap_or(OsStr::new("grade_report.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(EnvFilter::try_new(&settings.json_filter)?);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .try_init()?;

    Ok(guard)
}
