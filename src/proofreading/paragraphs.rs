/*!
 * Paragraph splitting for prose segments.
 *
 * Paragraphs are separated by blank lines. Separators are kept verbatim so the
 * prose can be rebuilt byte for byte.
 */

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n+").expect("separator pattern is valid")
});

/// One piece of a prose segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProseToken<'a> {
    /// Text between separators; may be empty at either end
    Content(&'a str),
    /// A run of blank lines, exactly as it appeared in the input
    Separator(&'a str),
}

impl<'a> ProseToken<'a> {
    /// The exact text of this token
    pub fn text(&self) -> &'a str {
        match self {
            ProseToken::Content(text) | ProseToken::Separator(text) => *text,
        }
    }
}

/// Split `text` into alternating content and separator tokens.
///
/// The sequence always starts and ends with `Content` (possibly empty), so its
/// length is odd and a separator is never first.
pub fn split_paragraphs(text: &str) -> Vec<ProseToken<'_>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for separator in SEPARATOR_REGEX.find_iter(text) {
        tokens.push(ProseToken::Content(&text[last_end..separator.start()]));
        tokens.push(ProseToken::Separator(separator.as_str()));
        last_end = separator.end();
    }
    tokens.push(ProseToken::Content(&text[last_end..]));

    tokens
}
