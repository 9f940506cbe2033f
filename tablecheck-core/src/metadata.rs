//! Report fields printed outside the observations section.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{1,2})/(\d{1,2})/(\d{4})").expect("valid regex"))
}

fn zipcode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b(\d{5})(?:-\d{4})?\b").expect("valid regex"))
}

/// First valid `M/D/YYYY` date in the text.
pub fn extract_inspection_date(text: &str) -> Option<NaiveDate> {
    date_pattern().captures_iter(text).find_map(|captures| {
        let month = captures[1].parse().ok()?;
        let day = captures[2].parse().ok()?;
        let year = captures[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// First standalone five-digit ZIP code, without any `-NNNN` extension.
pub fn extract_zipcode(text: &str) -> Option<String> {
    zipcode_pattern()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|zip| zip.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_date() {
        let text = "Inspection Date: 7/2/2024  Follow-up: 08/15/2024";
        assert_eq!(
            extract_inspection_date(text),
            NaiveDate::from_ymd_opt(2024, 7, 2)
        );
    }

    #[test]
    fn skips_impossible_dates() {
        let text = "Ref 13/45/2023 then 02/29/2024";
        assert_eq!(
            extract_inspection_date(text),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(extract_inspection_date("Ref 02/30/2023"), None);
        assert_eq!(extract_inspection_date(""), None);
    }

    #[test]
    fn extracts_zip_without_extension() {
        assert_eq!(
            extract_zipcode("Baltimore, MD 21201-4567").as_deref(),
            Some("21201")
        );
        assert_eq!(extract_zipcode("MD 21230").as_deref(), Some("21230"));
    }

    #[test]
    fn ignores_longer_digit_runs() {
        assert_eq!(extract_zipcode("Permit 1234567 issued"), None);
        assert_eq!(
            extract_zipcode("Permit 1234567, zip 21218").as_deref(),
            Some("21218")
        );
    }
}
