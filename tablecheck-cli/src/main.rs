#![deny(missing_docs)]
//! Tablecheck command-line interface.
//!
//! Parses extracted inspection report texts into violations and star ratings.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use tablecheck_core::{
    FsReportStore, InspectionReport, ReportStore, SeverityTable, format_violation,
    inspect_report, render_json, render_markdown, render_stars,
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "tablecheck", version, about = "Tablecheck CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(&["file", "dir"])
))]
struct ReportSourceArgs {
    /// Single report text file to parse.
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Directory of `.txt` report files to parse.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct TableArgs {
    /// JSON severity table replacing the built-in one.
    #[arg(long = "severity-table", env = "TABLECHECK_SEVERITY_TABLE")]
    severity_table: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one report file or a directory of report files.
    Inspect {
        #[command(flatten)]
        source: ReportSourceArgs,
        #[command(flatten)]
        table: TableArgs,
        /// Maximum number of reports parsed concurrently.
        #[arg(short = 'j', long, default_value_t = 5)]
        concurrency: usize,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Print the active severity table.
    Table {
        #[command(flatten)]
        table: TableArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect {
            source,
            table,
            concurrency,
            report,
        } => {
            let source = resolve_source_args(&source)?;
            let table = load_table(&table)?;
            run_inspect(FsReportStore::new(), source, table, concurrency, report).await?
        }
        Commands::Table { table, report } => {
            let table = load_table(&table)?;
            emit_output(&report, render_table(&table, report.format)?).await?
        }
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

enum ReportSource {
    File(PathBuf),
    Dir(PathBuf),
}

fn resolve_source_args(source: &ReportSourceArgs) -> CliResult<ReportSource> {
    if let Some(file) = source.file.clone() {
        return Ok(ReportSource::File(file));
    }
    if let Some(dir) = source.dir.clone() {
        return Ok(ReportSource::Dir(dir));
    }
    Err("no report source provided".into())
}

fn load_table(args: &TableArgs) -> CliResult<SeverityTable> {
    match &args.severity_table {
        Some(path) => {
            let table = SeverityTable::from_path(path)
                .map_err(|err| format!("{}: {err}", path.display()))?;
            log::info!("loaded severity table from {}", path.display());
            Ok(table)
        }
        None => Ok(SeverityTable::baltimore()),
    }
}

fn load_report_paths<S: ReportStore>(store: &S, source: ReportSource) -> CliResult<Vec<PathBuf>> {
    match source {
        ReportSource::File(file) => Ok(vec![file]),
        ReportSource::Dir(dir) => Ok(store.list_reports(&dir)?),
    }
}

async fn run_inspect<S>(
    store: S,
    source: ReportSource,
    table: SeverityTable,
    concurrency: usize,
    output: OutputArgs,
) -> CliResult<()>
where
    S: ReportStore + Send + Sync + 'static,
{
    let paths = load_report_paths(&store, source)?;
    if paths.is_empty() {
        println!("No reports found to inspect.");
        return Ok(());
    }

    let store = Arc::new(store);
    let table = Arc::new(table);
    let concurrency = if concurrency == 0 { 1 } else { concurrency };
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let store = store.clone();
        let table = table.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            (index, inspect_file(store.as_ref(), &path, &table))
        });
    }

    let mut slots = Vec::new();
    let mut failures = 0usize;
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok((index, Ok(report))) => slots.push((index, report)),
            Ok((_, Err(err))) => {
                failures += 1;
                log::error!("{err}");
            }
            Err(err) => {
                failures += 1;
                log::error!("inspection task failed: {err}");
            }
        }
    }
    slots.sort_by_key(|(index, _)| *index);
    let reports: Vec<InspectionReport> = slots.into_iter().map(|(_, report)| report).collect();

    if reports.is_empty() && failures > 0 {
        return Err(format!("all {failures} report(s) failed to load").into());
    }
    log::info!(
        "inspected {} report(s), {failures} failure(s)",
        reports.len()
    );

    emit_reports(&reports, &output).await
}

fn inspect_file<S: ReportStore>(
    store: &S,
    path: &Path,
    table: &SeverityTable,
) -> Result<InspectionReport, String> {
    let text = store
        .read_report(path)
        .map_err(|err| format!("{}: {err}", path.display()))?;
    Ok(inspect_report(path.display().to_string(), &text, table))
}

async fn emit_reports(reports: &[InspectionReport], output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_inspection_text(reports),
        OutputFormat::Markdown => render_markdown(reports),
        OutputFormat::Json => render_json(reports)?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_inspection_text(reports: &[InspectionReport]) -> String {
    let mut output = String::new();
    for report in reports {
        let _ = writeln!(output, "Source: {}", report.source);
        match report.last_inspection {
            Some(date) => {
                let _ = writeln!(output, "Inspected: {date}");
            }
            None => {
                let _ = writeln!(output, "Inspected: unknown");
            }
        }
        if let Some(zipcode) = &report.zipcode {
            let _ = writeln!(output, "ZIP: {zipcode}");
        }
        let _ = writeln!(
            output,
            "Rating: {} ({})",
            render_stars(report.result.star_rating),
            report.result.star_rating
        );

        if report.result.violations.is_empty() {
            let _ = writeln!(output, "Violations: none");
        } else {
            let _ = writeln!(output, "Violations:");
            for violation in &report.result.violations {
                let _ = writeln!(output, "- {}", format_violation(violation));
            }
        }

        let _ = writeln!(output);
    }
    output
}

fn render_table(table: &SeverityTable, format: OutputFormat) -> CliResult<String> {
    if format == OutputFormat::Json {
        return Ok(render_json(table)?);
    }
    let mut output = String::new();
    let tiers = [
        ("SEVERE", &table.severe),
        ("MAJOR", &table.major),
        ("MODERATE", &table.moderate),
        ("MINOR", &table.minor),
    ];
    for (label, codes) in tiers {
        if format == OutputFormat::Markdown {
            let _ = writeln!(output, "### {label}");
        } else {
            let _ = writeln!(output, "{label}:");
        }
        for (code, rationale) in codes {
            let _ = writeln!(output, "- {code}: {rationale}");
        }
        let _ = writeln!(output);
    }
    Ok(output)
}
