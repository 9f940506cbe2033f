#![deny(missing_docs)]
//! Tablecheck core library.
//!
//! Turns extracted food-safety inspection report text into a list of
//! severity-tagged violations and a 1-5 star rating.

pub mod assembler;
pub mod domain;
pub mod error;
pub mod merge;
pub mod metadata;
pub mod normalize;
pub mod pipeline;
pub mod rating;
pub mod report;
pub mod section;
pub mod severity;
pub mod store;

pub use domain::{InspectionReport, InspectionResult, Severity, SeverityBreakdown, Violation};
pub use error::{Result, TablecheckError};
pub use metadata::{extract_inspection_date, extract_zipcode};
pub use pipeline::{inspect_report, inspect_text, parse_violations};
pub use rating::compute_star_rating;
pub use report::{format_violation, render_json, render_markdown, render_stars};
pub use severity::{SeverityTable, SharedSeverityTable};
pub use store::{FsReportStore, ReportStore, inspect_directory};
