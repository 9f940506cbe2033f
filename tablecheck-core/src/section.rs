//! Isolation of the violations listing inside a full report text.

use std::sync::OnceLock;

use regex::Regex;

/// Anchor pairs in priority order. Captures are lazy so the first end anchor
/// closes the section.
const SECTION_PATTERNS: [&str; 3] = [
    r"(?is)OBSERVATIONS AND CORRECTIVE ACTIONS(.+?)Person-in-charge\s*\(Signature\)",
    r"(?is)OBSERVATIONS AND CORRECTIVE ACTIONS(.+?)Inspector \(Print\)",
    r"(?is)OBSERVATIONS(.+?)Person-in-charge\s*\(Signature\)",
];

fn section_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        SECTION_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("valid regex"))
            .collect()
    })
}

/// Return the text between the first matching anchor pair, if any.
pub fn extract_section(text: &str) -> Option<&str> {
    let section = section_patterns().iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|capture| capture.as_str())
    });
    if section.is_none() {
        log::debug!("no observations section found in report text");
    }
    section
}

#[cfg(test)]
mod tests {
    use super::extract_section;

    #[test]
    fn captures_between_primary_anchors() {
        let text = "Header\nOBSERVATIONS AND CORRECTIVE ACTIONS\n19 Sink blocked\nPerson-in-charge (Signature)\nFooter";
        assert_eq!(extract_section(text), Some("\n19 Sink blocked\n"));
    }

    #[test]
    fn matches_case_insensitively_across_lines() {
        let text = "observations and corrective actions\nline one\nline two\nperson-in-charge   (signature)";
        assert_eq!(extract_section(text), Some("\nline one\nline two\n"));
    }

    #[test]
    fn stops_at_first_end_anchor() {
        let text = "OBSERVATIONS AND CORRECTIVE ACTIONS a Person-in-charge (Signature) b Person-in-charge (Signature)";
        assert_eq!(extract_section(text), Some(" a "));
    }

    #[test]
    fn falls_back_to_inspector_anchor() {
        let text = "OBSERVATIONS AND CORRECTIVE ACTIONS\n21 Wiping cloths stored on counter\nInspector (Print)";
        assert_eq!(
            extract_section(text),
            Some("\n21 Wiping cloths stored on counter\n")
        );
    }

    #[test]
    fn falls_back_to_bare_observations_heading() {
        let text = "OBSERVATIONS\n16 Raw chicken above salad\nPerson-in-charge(Signature)";
        assert_eq!(extract_section(text), Some("\n16 Raw chicken above salad\n"));
    }

    #[test]
    fn primary_pattern_takes_priority() {
        let text = "OBSERVATIONS AND CORRECTIVE ACTIONS first Inspector (Print) second Person-in-charge (Signature)";
        assert_eq!(
            extract_section(text),
            Some(" first Inspector (Print) second ")
        );
    }

    #[test]
    fn missing_anchors_yield_none() {
        assert_eq!(extract_section(""), None);
        assert_eq!(extract_section("OBSERVATIONS with no signature line"), None);
        assert_eq!(extract_section("\u{0}\u{1}garbage\u{fffd}"), None);
    }
}
