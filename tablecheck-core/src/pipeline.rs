//! End-to-end violation extraction.
//!
//! Stages run strictly in order: section isolation, block assembly (which
//! classifies each block), same-code merging, text cleanup, and rating.
//! No stage fails; malformed text degrades to fewer violations.

use crate::assembler::assemble_violations;
use crate::domain::{InspectionReport, InspectionResult, SeverityBreakdown, Violation};
use crate::merge::merge_by_code;
use crate::metadata::{extract_inspection_date, extract_zipcode};
use crate::normalize::normalize_violations;
use crate::rating::compute_star_rating;
use crate::section::extract_section;
use crate::severity::SeverityTable;

/// Extract the cleaned, merged violation list from a full report text.
pub fn parse_violations(text: &str, table: &SeverityTable) -> Vec<Violation> {
    let Some(section) = extract_section(text) else {
        return Vec::new();
    };
    let candidates = assemble_violations(section, table);
    normalize_violations(merge_by_code(candidates))
}

/// Parse a report text into violations and a star rating.
pub fn inspect_text(text: &str, table: &SeverityTable) -> InspectionResult {
    let violations = parse_violations(text, table);
    let star_rating = compute_star_rating(&violations);
    InspectionResult {
        violations,
        star_rating,
    }
}

/// Parse a report text and attach the metadata printed alongside it.
pub fn inspect_report(
    source: impl Into<String>,
    text: &str,
    table: &SeverityTable,
) -> InspectionReport {
    let result = inspect_text(text, table);
    let severity_breakdown = SeverityBreakdown::from_violations(&result.violations);
    InspectionReport {
        source: source.into(),
        last_inspection: extract_inspection_date(text),
        zipcode: extract_zipcode(text),
        result,
        severity_breakdown,
    }
}
