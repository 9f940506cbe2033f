//! Domain entities for Tablecheck.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Severity tier attached to a cited violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Immediate health hazard (pests, illness, temperature abuse).
    Severe,
    /// Significant risk requiring prompt correction.
    Major,
    /// Sanitation or equipment issue.
    Moderate,
    /// Low-impact citation.
    Minor,
    /// Code missing from every classification tier; weighted as `Moderate`.
    UnknownModerate,
}

impl Severity {
    /// Collapse audit-only tiers into the tier used for scoring.
    pub fn effective(self) -> Self {
        match self {
            Self::UnknownModerate => Self::Moderate,
            other => other,
        }
    }

    /// Wire label for the tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Severe => "SEVERE",
            Self::Major => "MAJOR",
            Self::Moderate => "MODERATE",
            Self::Minor => "MINOR",
            Self::UnknownModerate => "UNKNOWN_MODERATE",
        }
    }
}

/// A single cited food-safety deficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Violation {
    /// Regulatory item number as printed in the report.
    pub code: u32,
    /// Cleaned citation text.
    pub description: String,
    /// Severity tier of the code.
    pub severity: Severity,
    /// Whether the inspector checked "Corrected On Site".
    pub corrected_on_site: bool,
}

/// Structured outcome of parsing one report text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InspectionResult {
    /// Violations in first-appearance order of their codes.
    pub violations: Vec<Violation>,
    /// Star rating, 1-5.
    pub star_rating: u8,
}

/// Violation counts per severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SeverityBreakdown {
    /// Count of `SEVERE` violations.
    pub severe: usize,
    /// Count of `MAJOR` violations.
    pub major: usize,
    /// Count of `MODERATE` violations.
    pub moderate: usize,
    /// Count of `MINOR` violations.
    pub minor: usize,
    /// Count of `UNKNOWN_MODERATE` violations.
    pub unknown_moderate: usize,
}

impl SeverityBreakdown {
    /// Tally violations by their stored tier.
    pub fn from_violations(violations: &[Violation]) -> Self {
        let mut breakdown = Self::default();
        for violation in violations {
            match violation.severity {
                Severity::Severe => breakdown.severe += 1,
                Severity::Major => breakdown.major += 1,
                Severity::Moderate => breakdown.moderate += 1,
                Severity::Minor => breakdown.minor += 1,
                Severity::UnknownModerate => breakdown.unknown_moderate += 1,
            }
        }
        breakdown
    }

    /// Total number of violations counted.
    pub fn total(&self) -> usize {
        self.severe + self.major + self.moderate + self.minor + self.unknown_moderate
    }
}

/// Inspection result enriched with report metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InspectionReport {
    /// Where the text came from (file path or caller label).
    pub source: String,
    /// First inspection date printed in the report.
    pub last_inspection: Option<NaiveDate>,
    /// First ZIP code printed in the report.
    pub zipcode: Option<String>,
    /// Violations and star rating.
    #[serde(flatten)]
    pub result: InspectionResult,
    /// Violation counts per tier.
    pub severity_breakdown: SeverityBreakdown,
}
