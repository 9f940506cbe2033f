//! Collapsing of candidates that share a violation code.

use std::collections::HashMap;

use crate::domain::Violation;

/// Merge candidates so every code appears once, in first-seen order.
///
/// A code cited in several blocks gets a numbered description,
/// `"(1) first (2) second"`, and is corrected on site when any block was.
pub fn merge_by_code(candidates: Vec<Violation>) -> Vec<Violation> {
    let mut slots: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<(Violation, Vec<String>)> = Vec::new();

    for candidate in candidates {
        match slots.get(&candidate.code) {
            Some(&slot) => {
                let (merged, descriptions) = &mut groups[slot];
                merged.corrected_on_site |= candidate.corrected_on_site;
                descriptions.push(candidate.description);
            }
            None => {
                slots.insert(candidate.code, groups.len());
                groups.push((candidate, Vec::new()));
            }
        }
    }

    groups
        .into_iter()
        .map(|(mut merged, extra)| {
            if !extra.is_empty() {
                merged.description = number_descriptions(&merged.description, &extra);
            }
            merged
        })
        .collect()
}

fn number_descriptions(first: &str, rest: &[String]) -> String {
    std::iter::once(first)
        .chain(rest.iter().map(String::as_str))
        .enumerate()
        .map(|(index, description)| format!("({}) {description}", index + 1))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::merge_by_code;
    use crate::domain::{Severity, Violation};

    fn candidate(code: u32, description: &str, corrected_on_site: bool) -> Violation {
        Violation {
            code,
            description: description.to_string(),
            severity: Severity::Major,
            corrected_on_site,
        }
    }

    #[test]
    fn single_citation_is_kept_verbatim() {
        let merged = merge_by_code(vec![candidate(19, "Handwashing sink blocked", false)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].description, "Handwashing sink blocked");
    }

    #[test]
    fn repeated_code_is_numbered_in_order() {
        let merged = merge_by_code(vec![
            candidate(19, "Handwashing sink blocked", false),
            candidate(21, "Wiping cloth on counter", false),
            candidate(19, "also missing soap", false),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].code, 19);
        assert_eq!(
            merged[0].description,
            "(1) Handwashing sink blocked (2) also missing soap"
        );
        assert_eq!(merged[1].code, 21);
        assert_eq!(merged[1].description, "Wiping cloth on counter");
    }

    #[test]
    fn corrected_flag_is_any_of_blocks() {
        let merged = merge_by_code(vec![
            candidate(19, "first", false),
            candidate(19, "second", true),
            candidate(19, "third", false),
        ]);
        assert!(merged[0].corrected_on_site);
        assert_eq!(merged[0].description, "(1) first (2) second (3) third");
    }

    #[test]
    fn order_follows_first_appearance() {
        let merged = merge_by_code(vec![
            candidate(30, "a", false),
            candidate(6, "b", false),
            candidate(30, "c", false),
            candidate(17, "d", false),
        ]);
        let codes: Vec<u32> = merged.iter().map(|violation| violation.code).collect();
        assert_eq!(codes, vec![30, 6, 17]);
    }

    #[test]
    fn empty_input_merges_to_empty() {
        assert!(merge_by_code(Vec::new()).is_empty());
    }
}
