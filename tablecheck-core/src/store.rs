//! Access to extracted report texts on disk.

use std::path::{Path, PathBuf};

use crate::domain::InspectionReport;
use crate::error::Result;
use crate::pipeline::inspect_report;
use crate::severity::SeverityTable;

/// Abstraction over report storage for testability.
#[cfg_attr(test, mockall::automock)]
pub trait ReportStore {
    /// List report text files reachable from the root path.
    fn list_reports(&self, root: &Path) -> Result<Vec<PathBuf>>;
    /// Read one report's text.
    fn read_report(&self, path: &Path) -> Result<String>;
}

/// Report store backed by `std::fs`, holding one `.txt` file per report.
#[derive(Debug, Default, Clone)]
pub struct FsReportStore;

impl FsReportStore {
    /// Create a new filesystem report store.
    pub fn new() -> Self {
        Self
    }
}

impl ReportStore for FsReportStore {
    fn list_reports(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut reports = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if is_hidden(&path) {
                    continue;
                }
                let file_type = entry.file_type()?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_file() && is_report_text(&path) {
                    reports.push(path);
                }
            }
        }

        reports.sort();
        Ok(reports)
    }

    fn read_report(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Parse every report under `root`, in path order.
pub fn inspect_directory<S: ReportStore>(
    store: &S,
    root: &Path,
    table: &SeverityTable,
) -> Result<Vec<InspectionReport>> {
    let paths = store.list_reports(root)?;
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let text = store.read_report(&path)?;
        let report = inspect_report(path.display().to_string(), &text, table);
        log::info!(
            "{}: {} violation(s), {} star(s)",
            report.source,
            report.result.violations.len(),
            report.result.star_rating
        );
        reports.push(report);
    }
    Ok(reports)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn is_report_text(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}
