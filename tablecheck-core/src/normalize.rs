//! Description cleanup applied after merging.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::Violation;

/// Longest description kept before truncation.
pub const MAX_DESCRIPTION_CHARS: usize = 1500;
/// Appended to truncated descriptions.
pub const ELLIPSIS: &str = "...";

const NO_VIOLATIONS_PHRASE: &str = "no violations observed";

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)Corrected On Site:\s*\[.*?\]").expect("valid regex"))
}

/// Strip leaked checkbox markers, collapse whitespace, and cap the length.
///
/// Running this on its own output returns the same string.
pub fn normalize_description(description: &str) -> String {
    truncate_description(clean_description(description))
}

fn clean_description(description: &str) -> String {
    let without_markers = marker_pattern().replace_all(description, "");
    without_markers.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a cleaned description is the "no violations" boilerplate.
pub fn is_no_violations_boilerplate(description: &str) -> bool {
    description.to_lowercase().contains(NO_VIOLATIONS_PHRASE)
}

/// Clean every description and drop records that are not real citations.
///
/// The boilerplate check sees the whole cleaned text; truncation comes last.
pub fn normalize_violations(violations: Vec<Violation>) -> Vec<Violation> {
    violations
        .into_iter()
        .filter_map(|mut violation| {
            let cleaned = clean_description(&violation.description);
            if cleaned.is_empty() || is_no_violations_boilerplate(&cleaned) {
                log::debug!("dropping non-citation entry for code {}", violation.code);
                return None;
            }
            violation.description = truncate_description(cleaned);
            Some(violation)
        })
        .collect()
}

fn truncate_description(description: String) -> String {
    match description.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((cut, _)) => {
            let mut truncated = description[..cut].to_string();
            truncated.push_str(ELLIPSIS);
            truncated
        }
        None => description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Severity;

    fn violation(code: u32, description: &str) -> Violation {
        Violation {
            code,
            description: description.to_string(),
            severity: Severity::Moderate,
            corrected_on_site: false,
        }
    }

    #[test]
    fn removes_leaked_markers_case_insensitively() {
        assert_eq!(
            normalize_description("Cooler door torn corrected on site: [X] gasket loose"),
            "Cooler door torn gasket loose"
        );
        assert_eq!(
            normalize_description("Corrected On Site:[] Floor tiles broken"),
            "Floor tiles broken"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            normalize_description("  Grease \t buildup\n\non   hood  "),
            "Grease buildup on hood"
        );
    }

    #[test]
    fn normalizing_twice_is_stable() {
        let inputs = [
            "  Grease \t buildup  Corrected On Site: [ ] on hood ".to_string(),
            "word ".repeat(450),
            "x".repeat(1499) + " tail of the text",
        ];
        for input in inputs {
            let once = normalize_description(&input);
            assert_eq!(normalize_description(&once), once);
        }
    }

    #[test]
    fn truncates_long_descriptions() {
        let long = "a".repeat(2000);
        let normalized = normalize_description(&long);
        assert_eq!(normalized.len(), MAX_DESCRIPTION_CHARS + ELLIPSIS.len());
        assert!(normalized.ends_with(ELLIPSIS));
        assert_eq!(&normalized[..MAX_DESCRIPTION_CHARS], &long[..MAX_DESCRIPTION_CHARS]);
    }

    #[test]
    fn exact_limit_is_untouched() {
        let exact = "b".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(normalize_description(&exact), exact);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let accented = "é".repeat(1600);
        let normalized = normalize_description(&accented);
        assert_eq!(
            normalized.chars().count(),
            MAX_DESCRIPTION_CHARS + ELLIPSIS.len()
        );
    }

    #[test]
    fn drops_no_violation_boilerplate_without_skipping_neighbours() {
        let cleaned = normalize_violations(vec![
            violation(1, "No Violations Observed."),
            violation(2, "No violations   observed at this time"),
            violation(16, "Food stored on floor"),
            violation(3, "no violations observed"),
            violation(21, "Wiping cloth on counter"),
        ]);
        let codes: Vec<u32> = cleaned.iter().map(|v| v.code).collect();
        assert_eq!(codes, vec![16, 21]);
    }

    #[test]
    fn boilerplate_beyond_the_length_cap_still_drops_the_entry() {
        let tail = format!("{} no violations observed", "a".repeat(1600));
        let straddling = format!("{} No Violations Observed", "b".repeat(MAX_DESCRIPTION_CHARS - 5));
        let cleaned = normalize_violations(vec![
            violation(25, &tail),
            violation(30, &straddling),
            violation(16, &"c".repeat(1600)),
        ]);
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].code, 16);
        assert!(cleaned[0].description.ends_with(ELLIPSIS));
    }

    #[test]
    fn drops_entries_emptied_by_cleanup() {
        let cleaned = normalize_violations(vec![violation(
            5,
            "corrected on site: [x]   ",
        )]);
        assert!(cleaned.is_empty());
    }
}
