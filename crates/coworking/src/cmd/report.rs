//! cowork-report - Run analytical reports over a coworking snapshot.
//!
//! # Usage
//!
//! ```bash
//! cowork-report coworking.json                 # every report
//! cowork-report coworking.json 7               # cheapest rooms
//! cowork-report coworking.json total-spent-by --member "Luis Pérez"
//! cowork-report coworking.json all -f json -o reports.json
//! cowork-report --list
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use coworking_loader::{load_params, Loader};
use coworking_query::{Executor, QueryError, QueryResult, Report, ReportParams};
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::render::{result_to_json, write_result, OutputFormat};

/// Run analytical reports over a coworking snapshot.
#[derive(Parser, Debug)]
#[command(name = "cowork-report")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The JSON snapshot to query
    #[arg(value_name = "FILE", required_unless_present = "list")]
    pub file: Option<PathBuf>,

    /// Report number (1-20), report id, or "all"
    #[arg(value_name = "REPORT", default_value = "all")]
    pub report: String,

    /// JSON file with report parameters (missing fields keep their defaults)
    #[arg(short, long, value_name = "PARAMS_FILE")]
    pub params: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: Option<PathBuf>,

    /// Reject reservations with an unknown status
    #[arg(long)]
    pub strict: bool,

    /// List the available reports and exit
    #[arg(short, long)]
    pub list: bool,

    /// Year for the yearly and monthly reports
    #[arg(long)]
    pub year: Option<i32>,

    /// Month for the monthly revenue report
    #[arg(long)]
    pub month: Option<u32>,

    /// Member name for the spending and overlap reports
    #[arg(long)]
    pub member: Option<String>,

    /// Room name for the full-day revenue report
    #[arg(long)]
    pub room: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Which reports a run covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The whole catalogue.
    All,
    /// A single report.
    One(Report),
}

impl Selection {
    /// Parse `all`, a report number, or a report id.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::UnknownReport`] for anything else.
    pub fn parse(s: &str) -> Result<Self, QueryError> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::One)
        }
    }

    fn reports(&self) -> Vec<Report> {
        match self {
            Self::All => Report::ALL.to_vec(),
            Self::One(report) => vec![*report],
        }
    }
}

/// Main entry point for the report command.
pub fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("coworking=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coworking=info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Run the command with parsed arguments.
///
/// Each report is evaluated independently: a failing report is reported on
/// stderr and turns the exit code to 1 without stopping the others.
///
/// # Errors
///
/// Returns an error if the snapshot or parameters cannot be loaded, the
/// report name is unknown, or output cannot be written.
pub fn run(args: &Args) -> Result<ExitCode> {
    if args.list {
        let stdout = io::stdout();
        write_catalogue(&mut stdout.lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(file) = args.file.as_ref() else {
        anyhow::bail!("no snapshot file given");
    };
    let selection = Selection::parse(&args.report)?;
    let params = resolve_params(args)?;

    let dataset = Loader::new()
        .with_strict_status(args.strict)
        .load(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    tracing::info!(
        members = dataset.members().len(),
        rooms = dataset.rooms().len(),
        reservations = dataset.reservations().len(),
        "loaded {}",
        file.display()
    );

    let executor = Executor::new(&dataset);
    let outcomes = evaluate(&executor, &selection.reports(), &params);

    let mut failed = false;
    for (report, outcome) in &outcomes {
        if let Err(e) = outcome {
            eprintln!("error: report {report}: {e}");
            failed = true;
        }
    }

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write_outcomes(&outcomes, &selection, args.format, &mut writer)?;
    writer.flush()?;

    Ok(if failed { ExitCode::from(1) } else { ExitCode::SUCCESS })
}

/// Evaluate reports in parallel, keeping catalogue order.
pub fn evaluate(
    executor: &Executor<'_>,
    reports: &[Report],
    params: &ReportParams,
) -> Vec<(Report, Result<QueryResult, QueryError>)> {
    reports
        .par_iter()
        .map(|&report| (report, report.execute(executor, params)))
        .collect()
}

/// Combine the parameter file (if any) with the command-line overrides.
///
/// # Errors
///
/// Returns an error if the parameter file cannot be loaded or the result
/// fails validation.
pub fn resolve_params(args: &Args) -> Result<ReportParams> {
    let mut params = match &args.params {
        Some(path) => load_params(path)
            .with_context(|| format!("failed to load parameters from {}", path.display()))?,
        None => ReportParams::default(),
    };

    if let Some(year) = args.year {
        params.year = year;
        params.revenue_year = year;
    }
    if let Some(month) = args.month {
        params.revenue_month = month;
    }
    if let Some(member) = &args.member {
        params.member_name.clone_from(member);
    }
    if let Some(room) = &args.room {
        params.room_name.clone_from(room);
    }

    params.validate()?;
    tracing::debug!(?params, "report parameters");
    Ok(params)
}

fn write_catalogue<W: Write>(writer: &mut W) -> Result<()> {
    for report in Report::ALL {
        let number = report.number().map_or_else(|| "-".to_string(), |n| n.to_string());
        writeln!(writer, "{number:>2}  {:<34}  {}", report.id(), report.title())?;
    }
    Ok(())
}

fn write_outcomes<W: Write>(
    outcomes: &[(Report, Result<QueryResult, QueryError>)],
    selection: &Selection,
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match (selection, format) {
        (Selection::One(_), _) => {
            if let Some((_, Ok(result))) = outcomes.first() {
                write_result(result, format, writer)?;
            }
        }
        (Selection::All, OutputFormat::Json) => {
            let reports: Vec<serde_json::Value> = outcomes
                .iter()
                .map(|(report, outcome)| {
                    let mut entry = serde_json::json!({
                        "report": report.id(),
                        "number": report.number(),
                        "title": report.title(),
                    });
                    match outcome {
                        Ok(result) => entry["result"] = result_to_json(result),
                        Err(e) => entry["error"] = serde_json::Value::String(e.to_string()),
                    }
                    entry
                })
                .collect();
            writeln!(writer, "{}", serde_json::to_string_pretty(&reports)?)?;
        }
        (Selection::All, _) => {
            for (i, (report, outcome)) in outcomes.iter().enumerate() {
                if i > 0 {
                    writeln!(writer)?;
                }
                let heading = report
                    .number()
                    .map_or_else(|| report.title().to_string(), |n| format!("{n}. {}", report.title()));
                writeln!(writer, "# {heading}")?;
                match outcome {
                    Ok(result) => write_result(result, format, writer)?,
                    Err(e) => writeln!(writer, "error: {e}")?,
                }
            }
        }
    }
    Ok(())
}
