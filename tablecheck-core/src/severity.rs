//! Severity classification tables.
//!
//! A [`SeverityTable`] is built once and passed by reference into the
//! pipeline. [`SharedSeverityTable`] lets long-running services swap the
//! whole table without disturbing classifications already in flight.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Severity;
use crate::error::Result;

/// Mapping of violation code to a human-readable rationale.
pub type CodeRationales = BTreeMap<u32, String>;

/// Immutable code-to-tier configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SeverityTable {
    /// Codes classified as `SEVERE`.
    #[serde(default)]
    pub severe: BTreeMap<u32, String>,
    /// Codes classified as `MAJOR`.
    #[serde(default)]
    pub major: BTreeMap<u32, String>,
    /// Codes classified as `MODERATE`.
    #[serde(default)]
    pub moderate: BTreeMap<u32, String>,
    /// Codes classified as `MINOR`.
    #[serde(default)]
    pub minor: BTreeMap<u32, String>,
}

impl SeverityTable {
    /// Built-in table derived from Baltimore inspection reports.
    pub fn baltimore() -> Self {
        Self {
            severe: rationales(&[
                (6, "Food temperature abuse (potentially hazardous)"),
                (22, "Pest infestation evidence (rodents/roaches)"),
                (43, "Illness complaint investigation"),
            ]),
            major: rationales(&[
                (10, "Improper thawing methods"),
                (13, "Temperature monitoring failure"),
                (19, "Handwashing facility issues"),
                (20, "Chemical/toxic material safety"),
                (33, "HACCP plan deficiency"),
            ]),
            moderate: rationales(&[
                (16, "Food storage violations"),
                (21, "Sanitizer/wiping cloth compliance"),
                (24, "Utensil storage and handling"),
                (25, "Equipment standards violation"),
                (30, "Equipment maintenance issues"),
            ]),
            minor: rationales(&[
                (17, "Uncovered employee beverage"),
                (23, "Single-use item mishandling"),
                (46, "Recommendations/non-violations"),
            ]),
        }
    }

    /// Parse a table from JSON, e.g. `{"SEVERE": {"6": "..."}, "MINOR": {}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table.warn_on_overlaps();
        Ok(table)
    }

    /// Load a JSON table from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Classify a code. Stricter tiers win when a code is listed twice.
    pub fn classify(&self, code: u32) -> Severity {
        if self.severe.contains_key(&code) {
            Severity::Severe
        } else if self.major.contains_key(&code) {
            Severity::Major
        } else if self.moderate.contains_key(&code) {
            Severity::Moderate
        } else if self.minor.contains_key(&code) {
            Severity::Minor
        } else {
            Severity::UnknownModerate
        }
    }

    /// Rationale recorded for a code, from the tier that classifies it.
    pub fn rationale(&self, code: u32) -> Option<&str> {
        self.tiers()
            .into_iter()
            .find_map(|tier| tier.get(&code))
            .map(String::as_str)
    }

    /// Codes listed in more than one tier.
    pub fn overlaps(&self) -> Vec<u32> {
        let mut seen: BTreeMap<u32, usize> = BTreeMap::new();
        for tier in self.tiers() {
            for code in tier.keys() {
                *seen.entry(*code).or_insert(0) += 1;
            }
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(code, _)| code)
            .collect()
    }

    fn tiers(&self) -> [&CodeRationales; 4] {
        [&self.severe, &self.major, &self.moderate, &self.minor]
    }

    fn warn_on_overlaps(&self) {
        for code in self.overlaps() {
            log::warn!(
                "violation code {code} appears in several severity tiers; classifying as {}",
                self.classify(code).label()
            );
        }
    }
}

fn rationales(entries: &[(u32, &str)]) -> CodeRationales {
    entries
        .iter()
        .map(|(code, reason)| (*code, (*reason).to_string()))
        .collect()
}

/// Reloadable handle to the active severity table.
#[derive(Debug, Default)]
pub struct SharedSeverityTable {
    current: RwLock<Arc<SeverityTable>>,
}

impl SharedSeverityTable {
    /// Wrap an initial table.
    pub fn new(table: SeverityTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Snapshot of the active table.
    pub fn snapshot(&self) -> Arc<SeverityTable> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the active table, returning the previous one.
    pub fn replace(&self, table: SeverityTable) -> Arc<SeverityTable> {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        std::mem::replace(&mut *guard, Arc::new(table))
    }
}
