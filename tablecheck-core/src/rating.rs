//! Star rating heuristic.

use std::collections::BTreeSet;

use crate::domain::{Severity, Violation};

/// Highest rating, awarded to clean reports.
pub const MAX_STARS: u8 = 5;
/// Lowest rating.
pub const MIN_STARS: u8 = 1;

/// Reduce a violation set to a 1-5 star score.
///
/// Checks run top to bottom and the first match wins:
/// no violations is 5, any severe citation is 1, a lone minor citation is
/// still 5, then the score drops with the total count.
pub fn compute_star_rating(violations: &[Violation]) -> u8 {
    if violations.is_empty() {
        return MAX_STARS;
    }

    let mut severe = 0usize;
    let mut major = 0usize;
    let mut minor = 0usize;
    let mut unknown_codes = BTreeSet::new();

    for violation in violations {
        if violation.severity == Severity::UnknownModerate {
            unknown_codes.insert(violation.code);
        }
        match violation.severity.effective() {
            Severity::Severe => severe += 1,
            Severity::Major => major += 1,
            Severity::Minor => minor += 1,
            Severity::Moderate | Severity::UnknownModerate => {}
        }
    }

    if !unknown_codes.is_empty() {
        log::warn!("unknown violation codes {unknown_codes:?} treated as MODERATE");
    }

    let total = violations.len();
    if severe > 0 {
        MIN_STARS
    } else if total == 1 && minor == 1 {
        MAX_STARS
    } else if total <= 2 && major == 0 {
        4
    } else if total <= 3 {
        3
    } else if total <= 5 {
        2
    } else {
        MIN_STARS
    }
}
