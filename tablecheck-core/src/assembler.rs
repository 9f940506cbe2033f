//! Line-oriented assembly of candidate violations.
//!
//! One candidate is produced per physically distinct citation block. The
//! same code may appear in several candidates; see [`crate::merge`].

use crate::domain::Violation;
use crate::severity::SeverityTable;

/// Marker line carrying the inspector's checkbox.
pub const CORRECTED_ON_SITE_MARKER: &str = "Corrected On Site:";

const MIN_LINE_CHARS: usize = 5;
const MIN_OPENING_FRAGMENT_CHARS: usize = 11;

/// Header labels and form boilerplate that never carry citation text.
const JUNK_SUBSTRINGS: [&str; 8] = [
    "Item",
    "Number",
    "Corrected",
    "Violations cited",
    "Repeat",
    "must be corrected",
    "frame.Repeat",
    "within the specified",
];

/// Turns section lines into candidate violations.
///
/// States are `NO_OPEN_BLOCK` (`open == None`) and `BLOCK_OPEN`.
pub struct ViolationAssembler<'t> {
    table: &'t SeverityTable,
    open: Option<Violation>,
    emitted: Vec<Violation>,
}

impl<'t> ViolationAssembler<'t> {
    /// Start with no open block.
    pub fn new(table: &'t SeverityTable) -> Self {
        Self {
            table,
            open: None,
            emitted: Vec::new(),
        }
    }

    /// Feed one raw line.
    pub fn push_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.chars().count() < MIN_LINE_CHARS {
            return;
        }

        let start = split_block_start(line);

        // Continuation markers are read before the junk filter, which would
        // otherwise swallow them through its "Corrected" entry. A coded line
        // carrying the marker is junk like any other.
        if start.is_none() && line.contains(CORRECTED_ON_SITE_MARKER) {
            if let Some(open) = self.open.as_mut() {
                if is_checked(line) {
                    open.corrected_on_site = true;
                }
            }
            return;
        }

        if JUNK_SUBSTRINGS.iter().any(|junk| line.contains(junk)) {
            return;
        }

        match start {
            Some(start) => {
                self.flush();
                if let Some((code, fragment)) = start {
                    if fragment.chars().count() >= MIN_OPENING_FRAGMENT_CHARS {
                        self.open = Some(Violation {
                            code,
                            description: fragment.to_string(),
                            severity: self.table.classify(code),
                            corrected_on_site: false,
                        });
                    }
                }
            }
            None => {
                if let Some(open) = self.open.as_mut() {
                    open.description.push(' ');
                    open.description.push_str(line);
                }
            }
        }
    }

    /// Emit any open block and return every candidate in source order.
    pub fn finish(mut self) -> Vec<Violation> {
        self.flush();
        self.emitted
    }

    fn flush(&mut self) {
        if let Some(open) = self.open.take() {
            self.emitted.push(open);
        }
    }
}

/// Assemble candidates from an isolated section.
pub fn assemble_violations(section: &str, table: &SeverityTable) -> Vec<Violation> {
    let mut assembler = ViolationAssembler::new(table);
    for line in section.split('\n') {
        assembler.push_line(line);
    }
    assembler.finish()
}

/// Detect a line that begins with a code.
///
/// `None` means the line is a continuation. `Some(None)` means the line has
/// the shape of a block start but no usable code, which closes the open block
/// without starting a new one.
fn split_block_start(line: &str) -> Option<Option<(u32, &str)>> {
    let digits_end = line
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(line.len());
    if digits_end == 0 {
        return None;
    }
    let fragment = line[digits_end..].trim();
    Some(
        line[..digits_end]
            .parse::<u32>()
            .ok()
            .map(|code| (code, fragment)),
    )
}

fn is_checked(line: &str) -> bool {
    line.contains("[X]") || line.contains("[x]")
}
