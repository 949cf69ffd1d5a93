/*!
 * Splits a document into protected LaTeX environments and prose.
 *
 * Only `figure`, `figure*`, `table` and `table*` environments are recognized. A
 * match runs from `\begin{NAME}` to the first `\end{NAME}` with the same name,
 * across lines. Everything else is prose.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Environments whose content is never sent for correction
pub const PROTECTED_ENVIRONMENTS: [&str; 4] = ["figure", "figure*", "table", "table*"];

// One branch per name stands in for a `\1` backreference, which `regex` lacks.
// The begin tags are mutually exclusive, so at most one branch can start at any offset.
static ENVIRONMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    let branches: Vec<String> = PROTECTED_ENVIRONMENTS.iter()
        .map(|name| {
            let name = regex::escape(name);
            format!(r"\\begin\{{{name}\}}[\s\S]*?\\end\{{{name}\}}")
        })
        .collect();
    Regex::new(&branches.join("|")).expect("environment pattern is valid")
});

/// A contiguous slice of the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A matched figure/table environment, kept verbatim
    Protected(&'a str),
    /// Everything between protected environments
    Prose(&'a str),
}

impl<'a> Segment<'a> {
    /// The exact text of this segment
    pub fn content(&self) -> &'a str {
        match self {
            Segment::Protected(content) | Segment::Prose(content) => *content,
        }
    }

    /// Whether this segment must be left untouched
    pub fn is_protected(&self) -> bool {
        matches!(self, Segment::Protected(_))
    }
}

/// Split `text` into ordered segments whose concatenation equals `text`.
///
/// Zero-length gaps are skipped, so empty input yields no segments at all.
pub fn segment_environments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for found in ENVIRONMENT_REGEX.find_iter(text) {
        if found.start() > last_end {
            segments.push(Segment::Prose(&text[last_end..found.start()]));
        }
        segments.push(Segment::Protected(found.as_str()));
        last_end = found.end();
    }

    if last_end < text.len() {
        segments.push(Segment::Prose(&text[last_end..]));
    }

    segments
}
