//! Report formatting utilities for Tablecheck outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{InspectionReport, SeverityBreakdown, Violation};
use crate::rating::MAX_STARS;

/// Render a list of inspection reports as Markdown.
pub fn render_markdown(reports: &[InspectionReport]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Tablecheck Inspection Report\n");
    for report in reports {
        let _ = writeln!(output, "## {}\n", report.source);
        append_metadata(&mut output, report);
        append_breakdown(&mut output, &report.severity_breakdown);
        append_violations(&mut output, &report.result.violations);
        let _ = writeln!(output);
    }
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

/// Render a rating as filled and empty stars, e.g. `★★★☆☆`.
pub fn render_stars(rating: u8) -> String {
    let filled = rating.min(MAX_STARS) as usize;
    let empty = MAX_STARS as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// Format one violation as a single list line.
pub fn format_violation(violation: &Violation) -> String {
    let mut line = format!(
        "[{}] {} {}",
        violation.code,
        violation.severity.label(),
        violation.description
    );
    if violation.corrected_on_site {
        line.push_str(" (corrected on site)");
    }
    line
}

fn append_metadata(output: &mut String, report: &InspectionReport) {
    match report.last_inspection {
        Some(date) => {
            let _ = writeln!(output, "- Inspected: {}", date.format("%Y-%m-%d"));
        }
        None => {
            let _ = writeln!(output, "- Inspected: unknown");
        }
    }
    let _ = writeln!(
        output,
        "- ZIP code: {}",
        report.zipcode.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(
        output,
        "- Rating: {} ({}/{MAX_STARS})",
        render_stars(report.result.star_rating),
        report.result.star_rating
    );
    let _ = writeln!(output);
}

fn append_breakdown(output: &mut String, breakdown: &SeverityBreakdown) {
    if breakdown.total() == 0 {
        return;
    }
    let _ = writeln!(output, "### Severity");
    let tiers = [
        ("SEVERE", breakdown.severe),
        ("MAJOR", breakdown.major),
        ("MODERATE", breakdown.moderate),
        ("MINOR", breakdown.minor),
        ("UNKNOWN_MODERATE", breakdown.unknown_moderate),
    ];
    for (label, count) in tiers.into_iter().filter(|(_, count)| *count > 0) {
        let _ = writeln!(output, "- {label}: {count}");
    }
    let _ = writeln!(output);
}

fn append_violations(output: &mut String, violations: &[Violation]) {
    if violations.is_empty() {
        let _ = writeln!(output, "### Violations\nNo violations found.\n");
        return;
    }
    let _ = writeln!(output, "### Violations");
    for violation in violations {
        let _ = writeln!(output, "- {}", format_violation(violation));
    }
    let _ = writeln!(output);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InspectionResult, Severity};
    use chrono::NaiveDate;

    fn sample_report() -> InspectionReport {
        let violations = vec![
            Violation {
                code: 22,
                description: "Mouse droppings under dish machine".to_string(),
                severity: Severity::Severe,
                corrected_on_site: true,
            },
            Violation {
                code: 57,
                description: "Permit not posted".to_string(),
                severity: Severity::UnknownModerate,
                corrected_on_site: false,
            },
        ];
        let severity_breakdown = SeverityBreakdown::from_violations(&violations);
        InspectionReport {
            source: "reports/harbor-grill.txt".to_string(),
            last_inspection: NaiveDate::from_ymd_opt(2024, 5, 9),
            zipcode: Some("21231".to_string()),
            result: InspectionResult {
                violations,
                star_rating: 1,
            },
            severity_breakdown,
        }
    }

    #[test]
    fn renders_markdown() {
        let output = render_markdown(&[sample_report()]);
        assert!(output.contains("# Tablecheck Inspection Report"));
        assert!(output.contains("## reports/harbor-grill.txt"));
        assert!(output.contains("- Inspected: 2024-05-09"));
        assert!(output.contains("- ZIP code: 21231"));
        assert!(output.contains("- Rating: ★☆☆☆☆ (1/5)"));
        assert!(output.contains("- SEVERE: 1"));
        assert!(output.contains("- UNKNOWN_MODERATE: 1"));
        assert!(!output.contains("- MINOR:"));
        assert!(output.contains(
            "- [22] SEVERE Mouse droppings under dish machine (corrected on site)"
        ));
        assert!(output.contains("- [57] UNKNOWN_MODERATE Permit not posted\n"));
    }

    #[test]
    fn renders_clean_report_markdown() {
        let report = InspectionReport {
            source: "clean.txt".to_string(),
            last_inspection: None,
            zipcode: None,
            result: InspectionResult {
                violations: Vec::new(),
                star_rating: 5,
            },
            severity_breakdown: SeverityBreakdown::default(),
        };
        let output = render_markdown(&[report]);
        assert!(output.contains("- Inspected: unknown"));
        assert!(output.contains("No violations found."));
        assert!(!output.contains("### Severity"));
    }

    #[test]
    fn renders_json_payload() {
        let json = render_json(&vec![sample_report()]).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["star_rating"], 1);
        assert_eq!(parsed[0]["violations"][0]["corrected_on_site"], true);
        assert_eq!(parsed[0]["severity_breakdown"]["SEVERE"], 1);
    }

    #[test]
    fn stars_are_clamped() {
        assert_eq!(render_stars(5), "★★★★★");
        assert_eq!(render_stars(3), "★★★☆☆");
        assert_eq!(render_stars(9), "★★★★★");
    }
}
